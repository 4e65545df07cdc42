use pycore_errors::{ParseError, ParseResult};
use pycore_syntax::ast::{AstNode as _, Expr};
use pycore_syntax::{Cursor, SyntaxKind, SyntaxSet, Token};
use text_size::{TextRange, TextSize};

/// Deepest bracket, unary operator, conditional, lambda, comprehension
/// clause, pattern or block nesting accepted.
pub(crate) const MAX_NESTING: u32 = 200;

/// Most operators a single left-associative chain may hold.
pub(crate) const MAX_OPERATOR_CHAIN: usize = 1000;

/// Stack left before `nested` moves onto a fresh segment.
const RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

/// Recursive-descent driver over a token cursor.
///
/// Holds at most one pushed-back token: a soft keyword that was consumed to
/// look at the token after it and turned out to be a plain name. It can also
/// hold one pushed-back atom, a parenthesized group after `with` that turned
/// out to start an ordinary expression.
pub(crate) struct Parser<'c> {
    cursor: &'c mut dyn Cursor,
    pushed_back: Option<Token>,
    pending_atom: Option<Expr>,
    last_end: TextSize,
    depth: u32,
}

impl<'c> Parser<'c> {
    pub(crate) fn new(cursor: &'c mut dyn Cursor) -> Self {
        let last_end = cursor.offset();
        Self { cursor, pushed_back: None, pending_atom: None, last_end, depth: 0 }
    }

    pub(crate) fn current(&self) -> &Token {
        match &self.pushed_back {
            Some(token) => token,
            None => self.cursor.current(),
        }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    /// Start of the current token, excluding its leading trivia.
    pub(crate) fn offset(&self) -> TextSize {
        match &self.pushed_back {
            Some(token) => token.range.start(),
            None => self.cursor.offset(),
        }
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn at_soft_keyword(&self, keyword: &str) -> bool {
        self.current().is_soft_keyword(keyword)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = match self.pushed_back.take() {
            Some(token) => token,
            None => self.cursor.advance(),
        };
        self.last_end = token.range.end();
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.at(kind).then(|| self.advance())
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: &str) -> ParseResult<Token> {
        if self.at(kind) { Ok(self.advance()) } else { self.error(message) }
    }

    /// Returns a consumed name so it is read again as the current token.
    pub(crate) fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed_back.is_none(), "only one token can be pushed back");
        self.pushed_back = Some(token);
    }

    /// Runs `parse` one nesting level deeper, failing once [`MAX_NESTING`]
    /// levels are open.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return self.error("too deeply nested");
        }

        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || parse(self));
        self.depth -= 1;
        result
    }

    /// Fails when a chain already holds [`MAX_OPERATOR_CHAIN`] operators.
    pub(crate) fn check_chain(&self, operators: usize) -> ParseResult<()> {
        if operators >= MAX_OPERATOR_CHAIN {
            return self.error("too many operators in one expression");
        }
        Ok(())
    }

    /// Makes `atom` the next atom the expression ladder reads. Prefix
    /// operators are not looked for in front of it.
    pub(crate) fn push_back_atom(&mut self, atom: Expr) {
        debug_assert!(self.pending_atom.is_none(), "only one atom can be pushed back");
        self.pending_atom = Some(atom);
    }

    pub(crate) fn has_pending_atom(&self) -> bool {
        self.pending_atom.is_some()
    }

    pub(crate) fn take_pending_atom(&mut self) -> Option<Expr> {
        self.pending_atom.take()
    }

    pub(crate) fn start(&self) -> Marker {
        let start = match &self.pending_atom {
            Some(atom) => atom.range().start(),
            None => self.offset(),
        };
        Marker { start }
    }

    pub(crate) fn error<T>(&self, message: impl Into<String>) -> ParseResult<T> {
        error_at(self.offset(), message)
    }

    pub(crate) fn internal(&self, message: impl Into<String>) -> ParseError {
        ParseError::internal(self.offset(), message)
    }
}

pub(crate) fn error_at<T>(offset: TextSize, message: impl Into<String>) -> ParseResult<T> {
    Err(ParseError::syntax(offset, message))
}

/// Start position of a node under construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Marker {
    start: TextSize,
}

impl Marker {
    /// Range from the marker to the end of the last consumed token.
    pub(crate) fn complete(self, p: &Parser<'_>) -> TextRange {
        TextRange::new(self.start, p.last_end.max(self.start))
    }
}
