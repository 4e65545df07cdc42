use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::{self, *};
use pycore_syntax::Token;
use pycore_syntax::ast::{
    DoubleStarParam, Expr, Param, Parameter, Parameters, Separated, SlashParam, StarParam,
};

use super::exprs::test;
use super::{separated, until};
use crate::parser::{Parser, error_at};

/// Whether parameter names may carry `: annotation`. Lambdas don't.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Annotations {
    Allowed,
    Forbidden,
}

/// `'(' [typedargslist] ')'` of a function definition.
pub(crate) fn parameters(p: &mut Parser<'_>) -> ParseResult<Parameters> {
    let m = p.start();
    let lparen = p.expect(LEFT_PAREN, "expected '(' before parameters")?;
    let items = if p.at(RIGHT_PAREN) {
        Separated::new()
    } else {
        separated(p, COMMA, until(RIGHT_PAREN), |p| parameter(p, Annotations::Allowed))?
    };
    check_defaults(&items)?;
    let rparen = p.expect(RIGHT_PAREN, "expected ')' after parameters")?;

    Ok(Parameters { range: m.complete(p), lparen: Some(lparen), items, rparen: Some(rparen) })
}

/// `varargslist` of a lambda, terminated by its `:`.
pub(crate) fn lambda_parameters(p: &mut Parser<'_>) -> ParseResult<Parameters> {
    let m = p.start();
    let items = separated(p, COMMA, until(COLON), |p| parameter(p, Annotations::Forbidden))?;
    check_defaults(&items)?;
    Ok(Parameters { range: m.complete(p), lparen: None, items, rparen: None })
}

/// Once a positional parameter has a default, the positional parameters after
/// it need one too. Keyword-only parameters after `*` are exempt.
fn check_defaults(items: &Separated<Parameter>) -> ParseResult<()> {
    let mut has_default = false;
    for item in items {
        match item {
            Parameter::Plain(param) if param.default.is_some() => has_default = true,
            Parameter::Plain(param) if has_default => {
                return error_at(
                    param.range.start(),
                    "parameter without a default follows parameter with a default",
                );
            }
            Parameter::Star(_) | Parameter::DoubleStar(_) => break,
            _ => {}
        }
    }
    Ok(())
}

fn parameter(p: &mut Parser<'_>, annotations: Annotations) -> ParseResult<Parameter> {
    let m = p.start();
    match p.peek_kind() {
        SLASH => {
            let slash = p.advance();
            Ok(Parameter::Slash(SlashParam { range: m.complete(p), slash }))
        }
        STAR => {
            let star = p.advance();
            let param = if p.at(NAME) { Some(param(p, annotations, false)?) } else { None };
            Ok(Parameter::Star(StarParam { range: m.complete(p), star, param }))
        }
        DOUBLE_STAR => {
            let double_star = p.advance();
            let param = param(p, annotations, false)?;
            Ok(Parameter::DoubleStar(DoubleStarParam { range: m.complete(p), double_star, param }))
        }
        _ => param(p, annotations, true).map(Parameter::Plain),
    }
}

fn param(p: &mut Parser<'_>, annotations: Annotations, with_default: bool) -> ParseResult<Param> {
    let m = p.start();
    let name = p.expect(NAME, "expected parameter name")?;

    let (colon, annotation) = match annotations {
        Annotations::Allowed => optional_part(p, COLON)?,
        Annotations::Forbidden => (None, None),
    };
    let (eq, default) = if with_default { optional_part(p, EQ)? } else { (None, None) };

    Ok(Param { range: m.complete(p), name, colon, annotation, eq, default })
}

fn optional_part(
    p: &mut Parser<'_>,
    kind: SyntaxKind,
) -> ParseResult<(Option<Token>, Option<Expr>)> {
    match p.eat(kind) {
        Some(token) => Ok((Some(token), Some(test(p)?))),
        None => Ok((None, None)),
    }
}
