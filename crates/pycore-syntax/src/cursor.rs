use std::mem;

use text_size::TextSize;

use crate::Token;

/// A forward-only token source with one token of lookahead.
///
/// Once the end of input is reached, `current` keeps returning the
/// end-of-input token and `advance` keeps handing out copies of it.
pub trait Cursor {
    fn current(&self) -> &Token;

    /// Start of the current token, excluding its leading trivia.
    fn offset(&self) -> TextSize {
        self.current().range.start()
    }

    /// Moves past the current token and returns it.
    fn advance(&mut self) -> Token;
}

/// A [`Cursor`] over a pre-built token list.
///
/// A zero-width end-of-input token is synthesized when the list does not end
/// with one.
#[derive(Debug)]
pub struct BufferedCursor {
    tokens: std::vec::IntoIter<Token>,
    current: Token,
}

impl BufferedCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(TextSize::new(0), |token| token.range.end());
        let mut tokens = tokens.into_iter();
        let current = tokens.next().unwrap_or_else(|| Token::eof(end));
        Self { tokens, current }
    }
}

impl Cursor for BufferedCursor {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> Token {
        let end = self.current.range.end();
        let next = self.tokens.next().unwrap_or_else(|| Token::eof(end));
        mem::replace(&mut self.current, next)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::SyntaxKind::*;

    fn token(kind: crate::SyntaxKind, start: u32, end: u32) -> Token {
        Token::new(kind, TextRange::new(start.into(), end.into()))
    }

    #[test]
    fn advance_returns_consumed_token() {
        let mut cursor = BufferedCursor::new(vec![
            token(NAME, 0, 1).with_value("x"),
            token(NEWLINE, 1, 2),
            token(EOF, 2, 2),
        ]);

        assert_eq!(cursor.current().kind, NAME);
        assert_eq!(cursor.offset(), TextSize::new(0));
        assert_eq!(cursor.advance().value(), Some("x"));
        assert_eq!(cursor.advance().kind, NEWLINE);
        assert_eq!(cursor.current().kind, EOF);
        assert_eq!(cursor.offset(), TextSize::new(2));
    }

    #[test]
    fn end_of_input_is_sticky_and_synthesized() {
        let mut cursor = BufferedCursor::new(vec![token(PASS_KW, 0, 4)]);

        assert_eq!(cursor.advance().kind, PASS_KW);
        for _ in 0..3 {
            assert_eq!(cursor.current().kind, EOF);
            assert_eq!(cursor.advance().range, TextRange::empty(4.into()));
        }

        let mut empty = BufferedCursor::new(Vec::new());
        assert_eq!(empty.current().kind, EOF);
        assert_eq!(empty.advance().kind, EOF);
    }
}
