//! Recursive-descent parser for the Python core grammar.
//!
//! The grammar functions only talk to a [`Cursor`], so any token source can
//! drive them. [`parse`] wires up the reference tokenizer for plain text.

use pycore_syntax::ast::{Expression, Module, Stmt};
use pycore_syntax::Cursor;
use pycore_tokenizer::Tokenizer;

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

pub use pycore_errors::{ParseError, ParseResult};

/// Nesting depth of loop and function bodies.
///
/// `break`, `continue`, `return`, `raise` and `yield` statements are only
/// accepted above the top level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FlowLevel(u32);

impl FlowLevel {
    pub const TOP_LEVEL: Self = Self(0);

    pub const fn new(depth: u32) -> Self {
        Self(depth)
    }

    /// The level of a loop or function body nested in this one.
    #[must_use]
    pub const fn enter(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub const fn allows_flow(self) -> bool {
        self.0 > 0
    }

    pub const fn depth(self) -> u32 {
        self.0
    }
}

/// What a piece of source text is parsed as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// A file: statements up to the end of input.
    #[default]
    Module,
    /// A lone expression list, as passed to `eval`.
    Expression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parsed {
    Module(Module),
    Expression(Expression),
}

impl Parsed {
    pub fn as_module(&self) -> Option<&Module> {
        match self {
            Parsed::Module(module) => Some(module),
            Parsed::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Parsed::Module(_) => None,
            Parsed::Expression(expression) => Some(expression),
        }
    }
}

/// Tokenizes and parses `text`.
pub fn parse(text: &str, mode: Mode) -> ParseResult<Parsed> {
    let mut tokenizer = Tokenizer::new(text);
    match mode {
        Mode::Module => parse_module(&mut tokenizer).map(Parsed::Module),
        Mode::Expression => parse_expression(&mut tokenizer).map(Parsed::Expression),
    }
}

/// `file_input`: statements until the end of input.
pub fn parse_module(cursor: &mut dyn Cursor) -> ParseResult<Module> {
    let _span = tracing::debug_span!("parse_module").entered();

    let mut p = parser::Parser::new(cursor);
    grammar::module(&mut p).inspect_err(|error| tracing::debug!(%error, "module failed to parse"))
}

/// `eval_input`: an expression list followed by optional newlines.
pub fn parse_expression(cursor: &mut dyn Cursor) -> ParseResult<Expression> {
    let _span = tracing::debug_span!("parse_expression").entered();

    let mut p = parser::Parser::new(cursor);
    grammar::expression(&mut p)
        .inspect_err(|error| tracing::debug!(%error, "expression failed to parse"))
}

/// Parses exactly one statement at the given flow level, leaving the cursor
/// on the token after it.
pub fn parse_statement(cursor: &mut dyn Cursor, flow: FlowLevel) -> ParseResult<Stmt> {
    let _span = tracing::debug_span!("parse_statement", depth = flow.depth()).entered();

    let mut p = parser::Parser::new(cursor);
    grammar::stmts::stmt(&mut p, flow)
        .inspect_err(|error| tracing::debug!(%error, "statement failed to parse"))
}
