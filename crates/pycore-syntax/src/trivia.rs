//! Source text that carries no grammatical meaning.

use text_size::TextSize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    /// Spaces, tabs and form feeds.
    Whitespace,
    /// A line break that does not end a logical line: blank lines, breaks
    /// inside brackets, the line after a comment-only line.
    Newline,
    /// `#` up to, but not including, the line break.
    Comment,
    /// A backslash immediately followed by a line break.
    LineContinuation,
}

/// One run of trivia. Pieces are stored in source order and only record
/// their length; the offset follows from the owning token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TriviaPieceKind::Comment
    }

    /// Whether the piece crosses a physical line boundary.
    pub fn is_line_break(&self) -> bool {
        matches!(self.kind, TriviaPieceKind::Newline | TriviaPieceKind::LineContinuation)
    }
}
