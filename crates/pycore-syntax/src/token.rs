use text_size::{TextRange, TextSize};

use crate::{SyntaxKind, TriviaPiece, TriviaPieceKind};

/// A lexical token with its leading trivia.
///
/// `range` excludes trivia; the trivia pieces sit directly in front of it.
/// Trailing trivia does not exist: whatever follows a token belongs to the next
/// one, up to and including the end-of-input token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub leading: Box<[TriviaPiece]>,
    /// Source text of the leading trivia followed by the token itself.
    pub text: Box<str>,
    /// Identifier text or decoded string contents.
    pub value: Option<Box<str>>,
}

impl Token {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range, leading: Box::default(), text: Box::default(), value: None }
    }

    /// A zero-width end-of-input token.
    pub fn eof(offset: TextSize) -> Self {
        Self::new(SyntaxKind::EOF, TextRange::empty(offset))
    }

    #[must_use]
    pub fn with_leading(mut self, leading: impl Into<Box<[TriviaPiece]>>) -> Self {
        self.leading = leading.into();
        self
    }

    /// Sets the full text, leading trivia included.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<Box<str>>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<Box<str>>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn leading_len(&self) -> TextSize {
        self.leading.iter().map(|piece| piece.len).sum()
    }

    /// The token's own spelling, without leading trivia.
    pub fn text_trimmed(&self) -> &str {
        let start = usize::from(self.leading_len());
        self.text.get(start..).unwrap_or_default()
    }

    /// Each leading trivia piece with its source text.
    pub fn trivia(&self) -> impl Iterator<Item = (TriviaPieceKind, &str)> {
        let mut start = 0;
        self.leading.iter().map(move |piece| {
            let end = start + usize::from(piece.len);
            let text = self.text.get(start..end).unwrap_or_default();
            start = end;
            (piece.kind, text)
        })
    }

    /// Range including the leading trivia.
    pub fn full_range(&self) -> TextRange {
        let start = self.range.start().checked_sub(self.leading_len()).unwrap_or_default();
        TextRange::new(start, self.range.end())
    }

    /// Whether this is a name spelled `keyword`, e.g. `match` or `case`.
    pub fn is_soft_keyword(&self, keyword: &str) -> bool {
        self.kind == SyntaxKind::NAME && self.value() == Some(keyword)
    }
}
