//! Patterns of `case` clauses.

use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::*;
use pycore_syntax::ast::{
    AsPattern, AstNode as _, Attribute, Binary, BinaryOp, CapturePattern, ClassPattern, Expr,
    GroupPattern, KeywordPattern, LiteralPattern, MappingEntry, MappingItem, MappingPattern,
    MappingRest, Name, OrPattern, Pattern, PatternArgument, Primary, SequencePattern, Separated,
    StarPattern, Trailer, Unary, UnaryOp, ValuePattern, WildcardPattern,
};

use super::exprs::{constant, number, strings};
use super::{always, separated, separated_tail, until};
use crate::parser::{Marker, Parser, error_at};

/// `open_sequence_pattern | pattern`, the top level of a `case`.
pub(crate) fn patterns(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    let m = p.start();
    let first = maybe_star_pattern(p)?;
    if !p.at(COMMA) {
        if let Pattern::Star(star) = &first {
            return error_at(star.range.start(), "star pattern must be part of a sequence");
        }
        return Ok(first);
    }

    let mut patterns = Separated::single(first);
    separated_tail(p, &mut patterns, COMMA, |p| !p.at(COLON) && !p.at(IF_KW), maybe_star_pattern)?;
    Ok(Pattern::Sequence(SequencePattern { range: m.complete(p), open: None, patterns, close: None }))
}

fn maybe_star_pattern(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    if !p.at(STAR) {
        return pattern(p);
    }

    let m = p.start();
    let star = p.advance();
    let name = p.expect(NAME, "expected name after '*' in pattern")?;
    Ok(Pattern::Star(StarPattern { range: m.complete(p), star, name }))
}

/// `or_pattern ['as' NAME]`
fn pattern(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    let m = p.start();
    let pattern = or_pattern(p)?;
    let Some(as_token) = p.eat(AS_KW) else {
        return Ok(pattern);
    };

    let name = p.expect(NAME, "expected name after 'as' in pattern")?;
    if name.is_soft_keyword("_") {
        return error_at(name.range.start(), "cannot use '_' as a target");
    }
    Ok(Pattern::As(AsPattern { range: m.complete(p), pattern: Box::new(pattern), as_token, name }))
}

fn or_pattern(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    let m = p.start();
    let mut patterns = separated(p, PIPE, always, closed_pattern)?;
    if patterns.len() == 1 {
        if let Some(single) = patterns.items.pop() {
            return Ok(single);
        }
    }
    Ok(Pattern::Or(OrPattern { range: m.complete(p), patterns }))
}

fn closed_pattern(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    p.nested(closed_pattern_inner)
}

fn closed_pattern_inner(p: &mut Parser<'_>) -> ParseResult<Pattern> {
    let m = p.start();
    match p.peek_kind() {
        MINUS | NUMBER => {
            let expr = complex_number(p)?;
            Ok(Pattern::Literal(LiteralPattern { range: m.complete(p), expr }))
        }
        STRING => {
            let expr = strings(p);
            Ok(Pattern::Literal(LiteralPattern { range: m.complete(p), expr }))
        }
        NONE_KW | TRUE_KW | FALSE_KW => {
            let expr = constant(p)?;
            Ok(Pattern::Literal(LiteralPattern { range: m.complete(p), expr }))
        }
        NAME => name_pattern(p, m),
        LEFT_PAREN => paren_pattern(p, m),
        LEFT_BRACKET => {
            let open = p.advance();
            let patterns = if p.at(RIGHT_BRACKET) {
                Separated::new()
            } else {
                separated(p, COMMA, until(RIGHT_BRACKET), maybe_star_pattern)?
            };
            let close = p.expect(RIGHT_BRACKET, "expected ']' after sequence pattern")?;
            Ok(Pattern::Sequence(SequencePattern {
                range: m.complete(p),
                open: Some(open),
                patterns,
                close: Some(close),
            }))
        }
        LEFT_BRACE => mapping_pattern(p, m),
        _ => p.error("expected pattern"),
    }
}

/// `['-'] NUMBER [('+' | '-') NUMBER]`
fn complex_number(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let real = signed_number(p)?;

    let op = match p.peek_kind() {
        PLUS => BinaryOp::Add,
        MINUS => BinaryOp::Sub,
        _ => return Ok(real),
    };
    let op_token = p.advance();
    if !p.at(NUMBER) {
        return p.error("expected imaginary number in complex literal pattern");
    }
    let imag = number(p);

    Ok(Expr::Binary(Binary {
        range: m.complete(p),
        lhs: Box::new(real),
        op,
        op_token,
        rhs: Box::new(imag),
    }))
}

fn signed_number(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let Some(op_token) = p.eat(MINUS) else {
        return Ok(number(p));
    };
    if !p.at(NUMBER) {
        return p.error("expected number after '-' in pattern");
    }
    let operand = number(p);
    Ok(Expr::Unary(Unary {
        range: m.complete(p),
        op: UnaryOp::Minus,
        op_token,
        operand: Box::new(operand),
    }))
}

/// Wildcard, capture, dotted value, or class pattern.
fn name_pattern(p: &mut Parser<'_>, m: Marker) -> ParseResult<Pattern> {
    let first = p.advance();

    if !p.at(DOT) && !p.at(LEFT_PAREN) {
        let range = first.range;
        return Ok(if first.is_soft_keyword("_") {
            Pattern::Wildcard(WildcardPattern { range, underscore: first })
        } else {
            Pattern::Capture(CapturePattern { range, name: first })
        });
    }

    let name = Expr::Name(Name::new(first));
    let mut trailers = Vec::new();
    while p.at(DOT) {
        let attribute_marker = p.start();
        let dot = p.advance();
        let name = p.expect(NAME, "expected name after '.' in pattern")?;
        trailers.push(Trailer::Attribute(Attribute {
            range: attribute_marker.complete(p),
            dot,
            name,
        }));
    }

    let expr = if trailers.is_empty() {
        name
    } else {
        Expr::Primary(Primary {
            range: m.complete(p),
            await_token: None,
            atom: Box::new(name),
            trailers,
        })
    };

    if p.at(LEFT_PAREN) {
        return class_pattern(p, m, expr);
    }
    Ok(Pattern::Value(ValuePattern { range: m.complete(p), expr }))
}

fn class_pattern(p: &mut Parser<'_>, m: Marker, class: Expr) -> ParseResult<Pattern> {
    let lparen = p.advance();
    let arguments = if p.at(RIGHT_PAREN) {
        Separated::new()
    } else {
        separated(p, COMMA, until(RIGHT_PAREN), pattern_argument)?
    };

    let mut seen_keyword = false;
    for argument in &arguments {
        match argument {
            PatternArgument::Keyword(_) => seen_keyword = true,
            PatternArgument::Positional(positional) if seen_keyword => {
                return error_at(
                    positional.range().start(),
                    "positional patterns follow keyword patterns",
                );
            }
            PatternArgument::Positional(_) => {}
        }
    }

    let rparen = p.expect(RIGHT_PAREN, "expected ')' after class pattern arguments")?;
    Ok(Pattern::Class(ClassPattern { range: m.complete(p), class, lparen, arguments, rparen }))
}

/// `pattern` or `NAME '=' pattern`. A keyword shows up as a capture
/// followed by `=`.
fn pattern_argument(p: &mut Parser<'_>) -> ParseResult<PatternArgument> {
    let m = p.start();
    let pattern = pattern(p)?;
    if !p.at(EQ) {
        return Ok(PatternArgument::Positional(pattern));
    }

    let Pattern::Capture(capture) = pattern else {
        return error_at(pattern.range().start(), "expected keyword name before '='");
    };
    let eq = p.advance();
    let value = self::pattern(p)?;
    Ok(PatternArgument::Keyword(KeywordPattern {
        range: m.complete(p),
        name: capture.name,
        eq,
        pattern: value,
    }))
}

/// `'(' ')'`, a parenthesized group, or a parenthesized sequence.
fn paren_pattern(p: &mut Parser<'_>, m: Marker) -> ParseResult<Pattern> {
    let lparen = p.advance();
    if let Some(rparen) = p.eat(RIGHT_PAREN) {
        return Ok(Pattern::Sequence(SequencePattern {
            range: m.complete(p),
            open: Some(lparen),
            patterns: Separated::new(),
            close: Some(rparen),
        }));
    }

    let first = maybe_star_pattern(p)?;
    if p.at(COMMA) {
        let mut patterns = Separated::single(first);
        separated_tail(p, &mut patterns, COMMA, until(RIGHT_PAREN), maybe_star_pattern)?;
        let rparen = p.expect(RIGHT_PAREN, "expected ')' after sequence pattern")?;
        return Ok(Pattern::Sequence(SequencePattern {
            range: m.complete(p),
            open: Some(lparen),
            patterns,
            close: Some(rparen),
        }));
    }

    if let Pattern::Star(star) = &first {
        return error_at(star.range.start(), "star pattern must be part of a sequence");
    }
    let rparen = p.expect(RIGHT_PAREN, "expected ')' after pattern")?;
    Ok(Pattern::Group(GroupPattern {
        range: m.complete(p),
        lparen,
        pattern: Box::new(first),
        rparen,
    }))
}

fn mapping_pattern(p: &mut Parser<'_>, m: Marker) -> ParseResult<Pattern> {
    let lbrace = p.advance();
    let items = if p.at(RIGHT_BRACE) {
        Separated::new()
    } else {
        separated(p, COMMA, until(RIGHT_BRACE), mapping_item)?
    };

    let last = items.len().saturating_sub(1);
    for (index, item) in items.iter().enumerate() {
        if matches!(item, MappingItem::Rest(_)) && index != last {
            return error_at(item.range().start(), "'**' pattern must come last in a mapping pattern");
        }
    }

    let rbrace = p.expect(RIGHT_BRACE, "expected '}' after mapping pattern")?;
    Ok(Pattern::Mapping(MappingPattern { range: m.complete(p), lbrace, items, rbrace }))
}

fn mapping_item(p: &mut Parser<'_>) -> ParseResult<MappingItem> {
    let m = p.start();
    if let Some(double_star) = p.eat(DOUBLE_STAR) {
        let name = p.expect(NAME, "expected name after '**' in mapping pattern")?;
        return Ok(MappingItem::Rest(MappingRest { range: m.complete(p), double_star, name }));
    }

    let key = closed_pattern(p)?;
    if !matches!(key, Pattern::Literal(_) | Pattern::Value(_)) {
        return error_at(key.range().start(), "mapping pattern keys must be literals or dotted names");
    }
    let colon = p.expect(COLON, "expected ':' after mapping pattern key")?;
    let pattern = pattern(p)?;
    Ok(MappingItem::Entry(MappingEntry { range: m.complete(p), key, colon, pattern }))
}
