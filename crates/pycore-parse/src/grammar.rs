use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::{self, *};
use pycore_syntax::SyntaxSet;
use pycore_syntax::ast::{Expression, Module, Separated};

use crate::FlowLevel;
use crate::parser::Parser;

pub(crate) mod compound;
pub(crate) mod exprs;
mod params;
mod patterns;
pub(crate) mod stmts;

/// `(NEWLINE | stmt)* EOF`
pub(crate) fn module(p: &mut Parser<'_>) -> ParseResult<Module> {
    let m = p.start();

    let mut body = Vec::new();
    while !p.at(EOF) {
        body.push(stmts::stmt(p, FlowLevel::TOP_LEVEL)?);
    }
    let eof = p.advance();

    Ok(Module { range: m.complete(p), body, eof })
}

/// `testlist NEWLINE* EOF`
pub(crate) fn expression(p: &mut Parser<'_>) -> ParseResult<Expression> {
    let m = p.start();
    let body = exprs::testlist(p)?;

    let mut newlines = Vec::new();
    while let Some(newline) = p.eat(NEWLINE) {
        newlines.push(newline);
    }
    let eof = p.expect(EOF, "expected end of input after expression")?;

    Ok(Expression { range: m.complete(p), body, newlines, eof })
}

/// Tokens that can begin an expression.
pub(crate) const EXPR_FIRST: SyntaxSet = SyntaxSet::new([
    NAME,
    NUMBER,
    STRING,
    LEFT_PAREN,
    LEFT_BRACKET,
    LEFT_BRACE,
    MINUS,
    PLUS,
    TILDE,
    STAR,
    NOT_KW,
    AWAIT_KW,
    LAMBDA_KW,
    NONE_KW,
    TRUE_KW,
    FALSE_KW,
    ELLIPSIS,
]);

pub(crate) fn starts_expr(p: &Parser<'_>) -> bool {
    p.has_pending_atom() || p.at_set(&EXPR_FIRST)
}

/// Continuation check for lists that cannot end with a separator.
pub(crate) fn always(_: &Parser<'_>) -> bool {
    true
}

/// Continuation check for bracketed lists: anything but the closing token.
pub(crate) fn until(close: SyntaxKind) -> impl Fn(&Parser<'_>) -> bool {
    move |p: &Parser<'_>| !p.at(close)
}

/// Parses `item (separator item)* [separator]`.
///
/// After each separator `more` decides whether another item follows or the
/// separator was a trailing one.
pub(crate) fn separated<T>(
    p: &mut Parser<'_>,
    separator: SyntaxKind,
    more: impl Fn(&Parser<'_>) -> bool,
    mut item: impl FnMut(&mut Parser<'_>) -> ParseResult<T>,
) -> ParseResult<Separated<T>> {
    let mut list = Separated::single(item(p)?);
    separated_tail(p, &mut list, separator, more, item)?;
    Ok(list)
}

/// Continues a list whose first item was already parsed.
pub(crate) fn separated_tail<T>(
    p: &mut Parser<'_>,
    list: &mut Separated<T>,
    separator: SyntaxKind,
    more: impl Fn(&Parser<'_>) -> bool,
    mut item: impl FnMut(&mut Parser<'_>) -> ParseResult<T>,
) -> ParseResult<()> {
    while let Some(token) = p.eat(separator) {
        list.push_separator(token);
        if !more(p) {
            break;
        }
        list.push(item(p)?);
    }
    Ok(())
}
