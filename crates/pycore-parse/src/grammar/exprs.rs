use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::*;
use pycore_syntax::{SyntaxSet, Token};
use pycore_syntax::ast::{
    Argument, Attribute, AstNode as _, Binary, BinaryOp, Call, CompClause, CompFor, CompIf, Compare,
    CompareOp, Comprehension, ComprehensionKind, Constant, ConstantKind, Dict, DictComprehension,
    DictEntry, DictItem, DoubleStarred, Expr, IfExpr, KeywordArgument, Lambda, List, Name,
    NamedExpr, Number, ParenExpr, Primary, Separated, Set, Slice, Starred, StringLiteral,
    Subscript, SubscriptItem, Trailer, Tuple, Unary, UnaryOp, Yield, YieldFrom,
};

use super::{params, separated, separated_tail, starts_expr, until};
use crate::parser::{Marker, Parser, error_at};

pub(crate) const COMP_FOR_FIRST: SyntaxSet = SyntaxSet::new([FOR_KW, ASYNC_KW]);
const TRAILER_FIRST: SyntaxSet = SyntaxSet::new([LEFT_PAREN, LEFT_BRACKET, DOT]);
const COMPARISON_OPERATORS: SyntaxSet = SyntaxSet::new([
    LESS, GREATER, EQ_EQ, GREATER_EQ, LESS_EQ, NOT_EQ, IN_KW, NOT_KW, IS_KW,
]);
const UNARY_OPERATORS: SyntaxSet = SyntaxSet::new([PLUS, MINUS, TILDE]);
const SLICE_BOUND_END: SyntaxSet = SyntaxSet::new([COLON, COMMA, RIGHT_BRACKET]);

/// `test [':=' test]`
pub(crate) fn namedexpr_test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let target = test(p)?;
    if p.at(COLON_EQ) { named_tail(p, m, target) } else { Ok(target) }
}

fn named_tail(p: &mut Parser<'_>, m: Marker, target: Expr) -> ParseResult<Expr> {
    let colon_eq = p.advance();
    let value = test(p)?;
    Ok(Expr::Named(NamedExpr {
        range: m.complete(p),
        target: Box::new(target),
        colon_eq,
        value: Box::new(value),
    }))
}

/// `or_test ['if' or_test 'else' test] | lambdef`
pub(crate) fn test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if !p.has_pending_atom() && p.at(LAMBDA_KW) {
        return lambdef(p, true);
    }

    let m = p.start();
    let body = or_test(p)?;
    let Some(if_token) = p.eat(IF_KW) else {
        return Ok(body);
    };

    let condition = or_test(p)?;
    let else_token = p.expect(ELSE_KW, "expected 'else' in conditional expression")?;
    let orelse = p.nested(test)?;

    Ok(Expr::If(IfExpr {
        range: m.complete(p),
        body: Box::new(body),
        if_token,
        condition: Box::new(condition),
        else_token,
        orelse: Box::new(orelse),
    }))
}

/// `or_test | lambdef_nocond`, the condition of a comprehension `if`.
pub(crate) fn test_nocond(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if p.at(LAMBDA_KW) { lambdef(p, false) } else { or_test(p) }
}

/// Lambdas nest through their defaults and bodies without passing through
/// `factor`, so they open a nesting level of their own.
fn lambdef(p: &mut Parser<'_>, allows_conditional: bool) -> ParseResult<Expr> {
    debug_assert_eq!(p.peek_kind(), LAMBDA_KW);

    p.nested(|p| {
        let m = p.start();
        let lambda_token = p.advance();
        let parameters = if p.at(COLON) { None } else { Some(params::lambda_parameters(p)?) };
        let colon = p.expect(COLON, "expected ':' after lambda parameters")?;
        let body = if allows_conditional { test(p)? } else { test_nocond(p)? };

        Ok(Expr::Lambda(Lambda {
            range: m.complete(p),
            lambda_token,
            parameters,
            colon,
            body: Box::new(body),
            allows_conditional,
        }))
    })
}

fn binary(
    p: &mut Parser<'_>,
    operators: &SyntaxSet,
    operand: fn(&mut Parser<'_>) -> ParseResult<Expr>,
) -> ParseResult<Expr> {
    let m = p.start();
    let mut lhs = operand(p)?;

    let mut chain = 0;
    while p.at_set(operators) {
        p.check_chain(chain)?;
        chain += 1;
        let op_token = p.advance();
        let op = BinaryOp::from_kind(op_token.kind)
            .ok_or_else(|| p.internal(format!("no binary operator for {:?}", op_token.kind)))?;
        let rhs = operand(p)?;
        lhs = Expr::Binary(Binary {
            range: m.complete(p),
            lhs: Box::new(lhs),
            op,
            op_token,
            rhs: Box::new(rhs),
        });
    }

    Ok(lhs)
}

pub(crate) fn or_test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([OR_KW]), and_test)
}

fn and_test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([AND_KW]), not_test)
}

fn not_test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if p.has_pending_atom() || !p.at(NOT_KW) {
        return comparison(p);
    }

    let m = p.start();
    let op_token = p.advance();
    let operand = p.nested(not_test)?;
    Ok(Expr::Unary(Unary {
        range: m.complete(p),
        op: UnaryOp::Not,
        op_token,
        operand: Box::new(operand),
    }))
}

fn comparison(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let mut lhs = expr(p)?;

    let mut chain = 0;
    while p.at_set(&COMPARISON_OPERATORS) {
        p.check_chain(chain)?;
        chain += 1;
        let op_token = p.advance();
        let (op, second_op_token) = match op_token.kind {
            IS_KW => match p.eat(NOT_KW) {
                Some(not) => (CompareOp::IsNot, Some(not)),
                None => (CompareOp::Is, None),
            },
            NOT_KW => {
                let in_token = p.expect(IN_KW, "expected 'in' after 'not' in comparison")?;
                (CompareOp::NotIn, Some(in_token))
            }
            kind => {
                let op = CompareOp::from_kind(kind)
                    .ok_or_else(|| p.internal(format!("no comparison operator for {kind:?}")))?;
                (op, None)
            }
        };
        let rhs = expr(p)?;
        lhs = Expr::Compare(Compare {
            range: m.complete(p),
            lhs: Box::new(lhs),
            op,
            op_token,
            second_op_token,
            rhs: Box::new(rhs),
        });
    }

    Ok(lhs)
}

/// `'*' expr`
pub(crate) fn star_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    debug_assert_eq!(p.peek_kind(), STAR);

    let m = p.start();
    let star = p.advance();
    let value = expr(p)?;
    Ok(Expr::Starred(Starred { range: m.complete(p), star, expr: Box::new(value) }))
}

/// Bitwise or, the operand level of comparisons.
pub(crate) fn expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([PIPE]), xor_expr)
}

fn xor_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([CARET]), and_expr)
}

fn and_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([AMPERSAND]), shift_expr)
}

fn shift_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([LEFT_SHIFT, RIGHT_SHIFT]), arith_expr)
}

fn arith_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([PLUS, MINUS]), term)
}

fn term(p: &mut Parser<'_>) -> ParseResult<Expr> {
    binary(p, &SyntaxSet::new([STAR, AT, SLASH, PERCENT, DOUBLE_SLASH]), factor)
}

/// Every operand passes through here, so brackets, unary operators and `**`
/// all count against the nesting limit.
fn factor(p: &mut Parser<'_>) -> ParseResult<Expr> {
    p.nested(|p| {
        if p.has_pending_atom() || !p.at_set(&UNARY_OPERATORS) {
            return power(p);
        }

        let m = p.start();
        let op_token = p.advance();
        let op = UnaryOp::from_kind(op_token.kind)
            .ok_or_else(|| p.internal(format!("no unary operator for {:?}", op_token.kind)))?;
        let operand = factor(p)?;
        Ok(Expr::Unary(Unary { range: m.complete(p), op, op_token, operand: Box::new(operand) }))
    })
}

/// `atom_expr ['**' factor]`, right-associative through `factor`.
fn power(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let base = atom_expr(p)?;
    let Some(op_token) = p.eat(DOUBLE_STAR) else {
        return Ok(base);
    };

    let exponent = factor(p)?;
    Ok(Expr::Binary(Binary {
        range: m.complete(p),
        lhs: Box::new(base),
        op: BinaryOp::Pow,
        op_token,
        rhs: Box::new(exponent),
    }))
}

/// `['await'] atom trailer*`
fn atom_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let await_token = if p.has_pending_atom() { None } else { p.eat(AWAIT_KW) };
    let atom = atom(p)?;

    let mut trailers = Vec::new();
    while p.at_set(&TRAILER_FIRST) {
        trailers.push(trailer(p)?);
    }

    if await_token.is_none() && trailers.is_empty() {
        return Ok(atom);
    }

    Ok(Expr::Primary(Primary { range: m.complete(p), await_token, atom: Box::new(atom), trailers }))
}

fn atom(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if let Some(atom) = p.take_pending_atom() {
        return Ok(atom);
    }

    match p.peek_kind() {
        NAME => Ok(Expr::Name(Name::new(p.advance()))),
        NUMBER => Ok(number(p)),
        STRING => Ok(strings(p)),
        NONE_KW | TRUE_KW | FALSE_KW | ELLIPSIS => constant(p),
        LEFT_PAREN => paren_atom(p),
        LEFT_BRACKET => list_atom(p),
        LEFT_BRACE => brace_atom(p),
        _ => p.error("expected expression"),
    }
}

pub(crate) fn number(p: &mut Parser<'_>) -> Expr {
    let token = p.advance();
    Expr::Number(Number { range: token.range, token })
}

/// Adjacent string literals form one node.
pub(crate) fn strings(p: &mut Parser<'_>) -> Expr {
    let m = p.start();
    let mut tokens = Vec::new();
    while let Some(token) = p.eat(STRING) {
        tokens.push(token);
    }
    Expr::String(StringLiteral { range: m.complete(p), tokens })
}

pub(crate) fn constant(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let token = p.advance();
    let kind = ConstantKind::from_kind(token.kind)
        .ok_or_else(|| p.internal(format!("no constant for {:?}", token.kind)))?;
    Ok(Expr::Constant(Constant { range: token.range, kind, token }))
}

pub(crate) fn star_or_namedexpr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if p.at(STAR) { star_expr(p) } else { namedexpr_test(p) }
}

fn star_or_test(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if p.at(STAR) { star_expr(p) } else { test(p) }
}

fn star_or_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    if p.at(STAR) { star_expr(p) } else { expr(p) }
}

fn paren_atom(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let lparen = p.advance();
    paren_atom_rest(p, m, lparen)
}

/// The rest of a parenthesized atom whose `(` was already consumed.
pub(crate) fn paren_atom_rest(p: &mut Parser<'_>, m: Marker, lparen: Token) -> ParseResult<Expr> {
    if let Some(rparen) = p.eat(RIGHT_PAREN) {
        return Ok(Expr::Tuple(Tuple {
            range: m.complete(p),
            lparen: Some(lparen),
            elements: Separated::new(),
            rparen: Some(rparen),
        }));
    }

    if p.at(YIELD_KW) {
        let value = yield_expr(p)?;
        let rparen = p.expect(RIGHT_PAREN, "expected ')'")?;
        return Ok(Expr::Paren(ParenExpr {
            range: m.complete(p),
            lparen,
            expr: Box::new(value),
            rparen,
        }));
    }

    let first = star_or_namedexpr(p)?;

    if p.at_set(&COMP_FOR_FIRST) {
        return generator_rest(p, m, lparen, first);
    }

    if !p.at(COMMA) {
        if let Expr::Starred(starred) = &first {
            return error_at(starred.range.start(), "cannot use starred expression here");
        }
        let rparen = p.expect(RIGHT_PAREN, "expected ')'")?;
        return Ok(Expr::Paren(ParenExpr {
            range: m.complete(p),
            lparen,
            expr: Box::new(first),
            rparen,
        }));
    }

    let mut elements = Separated::single(first);
    separated_tail(p, &mut elements, COMMA, until(RIGHT_PAREN), star_or_namedexpr)?;
    let rparen = p.expect(RIGHT_PAREN, "expected ')'")?;
    Ok(Expr::Tuple(Tuple {
        range: m.complete(p),
        lparen: Some(lparen),
        elements,
        rparen: Some(rparen),
    }))
}

/// `'(' element comp_for ')'` with everything up to `comp_for` consumed.
pub(crate) fn generator_rest(
    p: &mut Parser<'_>,
    m: Marker,
    lparen: Token,
    element: Expr,
) -> ParseResult<Expr> {
    if matches!(element, Expr::Starred(_)) {
        return p.error("iterable unpacking cannot be used in comprehension");
    }
    let clauses = comp_for(p)?;
    let rparen = p.expect(RIGHT_PAREN, "expected ')' after generator expression")?;
    Ok(Expr::Comprehension(Comprehension {
        range: m.complete(p),
        kind: ComprehensionKind::Generator,
        open: Some(lparen),
        element: Box::new(element),
        clauses: Box::new(clauses),
        close: Some(rparen),
    }))
}

fn list_atom(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let lbracket = p.advance();

    if let Some(rbracket) = p.eat(RIGHT_BRACKET) {
        return Ok(Expr::List(List {
            range: m.complete(p),
            lbracket,
            elements: Separated::new(),
            rbracket,
        }));
    }

    let first = star_or_namedexpr(p)?;

    if p.at_set(&COMP_FOR_FIRST) {
        if matches!(first, Expr::Starred(_)) {
            return p.error("iterable unpacking cannot be used in comprehension");
        }
        let clauses = comp_for(p)?;
        let rbracket = p.expect(RIGHT_BRACKET, "expected ']' after list comprehension")?;
        return Ok(Expr::Comprehension(Comprehension {
            range: m.complete(p),
            kind: ComprehensionKind::List,
            open: Some(lbracket),
            element: Box::new(first),
            clauses: Box::new(clauses),
            close: Some(rbracket),
        }));
    }

    let mut elements = Separated::single(first);
    separated_tail(p, &mut elements, COMMA, until(RIGHT_BRACKET), star_or_namedexpr)?;
    let rbracket = p.expect(RIGHT_BRACKET, "expected ']'")?;
    Ok(Expr::List(List { range: m.complete(p), lbracket, elements, rbracket }))
}

/// Dictionary and set displays and their comprehensions.
///
/// The first entry decides: `**` or `key:` commits to a dictionary, `*` or a
/// plain element to a set.
fn brace_atom(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let lbrace = p.advance();

    if let Some(rbrace) = p.eat(RIGHT_BRACE) {
        return Ok(Expr::Dict(Dict { range: m.complete(p), lbrace, items: Separated::new(), rbrace }));
    }

    match p.peek_kind() {
        DOUBLE_STAR => {
            let first = DictItem::Unpack(double_starred(p, expr)?);
            if p.at_set(&COMP_FOR_FIRST) {
                return p.error("dict unpacking cannot be used in dict comprehension");
            }
            dict_tail(p, m, lbrace, first)
        }
        STAR => {
            let first = star_expr(p)?;
            if p.at_set(&COMP_FOR_FIRST) {
                return p.error("iterable unpacking cannot be used in comprehension");
            }
            set_tail(p, m, lbrace, first)
        }
        _ => {
            let key_marker = p.start();
            let key = test(p)?;

            if let Some(colon) = p.eat(COLON) {
                let value = test(p)?;
                if p.at_set(&COMP_FOR_FIRST) {
                    let clauses = comp_for(p)?;
                    let rbrace =
                        p.expect(RIGHT_BRACE, "expected '}' after dictionary comprehension")?;
                    return Ok(Expr::DictComprehension(DictComprehension {
                        range: m.complete(p),
                        lbrace,
                        key: Box::new(key),
                        colon,
                        value: Box::new(value),
                        clauses: Box::new(clauses),
                        rbrace,
                    }));
                }

                let first = DictItem::Entry(DictEntry {
                    range: key_marker.complete(p),
                    key,
                    colon,
                    value,
                });
                return dict_tail(p, m, lbrace, first);
            }

            let element = if p.at(COLON_EQ) { named_tail(p, key_marker, key)? } else { key };
            if p.at_set(&COMP_FOR_FIRST) {
                let clauses = comp_for(p)?;
                let rbrace = p.expect(RIGHT_BRACE, "expected '}' after set comprehension")?;
                return Ok(Expr::Comprehension(Comprehension {
                    range: m.complete(p),
                    kind: ComprehensionKind::Set,
                    open: Some(lbrace),
                    element: Box::new(element),
                    clauses: Box::new(clauses),
                    close: Some(rbrace),
                }));
            }
            set_tail(p, m, lbrace, element)
        }
    }
}

fn dict_tail(
    p: &mut Parser<'_>,
    m: Marker,
    lbrace: Token,
    first: DictItem,
) -> ParseResult<Expr> {
    let mut items = Separated::single(first);
    separated_tail(p, &mut items, COMMA, until(RIGHT_BRACE), dict_item)?;
    let rbrace = p.expect(RIGHT_BRACE, "expected '}'")?;
    Ok(Expr::Dict(Dict { range: m.complete(p), lbrace, items, rbrace }))
}

fn dict_item(p: &mut Parser<'_>) -> ParseResult<DictItem> {
    if p.at(DOUBLE_STAR) {
        return double_starred(p, expr).map(DictItem::Unpack);
    }

    let m = p.start();
    let key = test(p)?;
    let colon = p.expect(COLON, "expected ':' after dictionary key")?;
    let value = test(p)?;
    Ok(DictItem::Entry(DictEntry { range: m.complete(p), key, colon, value }))
}

fn set_tail(
    p: &mut Parser<'_>,
    m: Marker,
    lbrace: Token,
    first: Expr,
) -> ParseResult<Expr> {
    let mut elements = Separated::single(first);
    separated_tail(p, &mut elements, COMMA, until(RIGHT_BRACE), star_or_namedexpr)?;
    let rbrace = p.expect(RIGHT_BRACE, "expected '}'")?;
    Ok(Expr::Set(Set { range: m.complete(p), lbrace, elements, rbrace }))
}

fn double_starred(
    p: &mut Parser<'_>,
    operand: fn(&mut Parser<'_>) -> ParseResult<Expr>,
) -> ParseResult<DoubleStarred> {
    debug_assert_eq!(p.peek_kind(), DOUBLE_STAR);

    let m = p.start();
    let double_star = p.advance();
    let value = operand(p)?;
    Ok(DoubleStarred { range: m.complete(p), double_star, expr: Box::new(value) })
}

fn trailer(p: &mut Parser<'_>) -> ParseResult<Trailer> {
    match p.peek_kind() {
        LEFT_PAREN => call(p).map(Trailer::Call),
        LEFT_BRACKET => {
            let m = p.start();
            let lbracket = p.advance();
            let items = separated(p, COMMA, until(RIGHT_BRACKET), subscript)?;
            let rbracket = p.expect(RIGHT_BRACKET, "expected ']'")?;
            Ok(Trailer::Subscript(Subscript { range: m.complete(p), lbracket, items, rbracket }))
        }
        DOT => {
            let m = p.start();
            let dot = p.advance();
            let name = p.expect(NAME, "expected attribute name after '.'")?;
            Ok(Trailer::Attribute(Attribute { range: m.complete(p), dot, name }))
        }
        kind => Err(p.internal(format!("trailer dispatch reached {kind:?}"))),
    }
}

/// `'(' [arglist] ')'`
pub(crate) fn call(p: &mut Parser<'_>) -> ParseResult<Call> {
    let m = p.start();
    let lparen = p.expect(LEFT_PAREN, "expected '('")?;
    let arguments = if p.at(RIGHT_PAREN) {
        Separated::new()
    } else {
        separated(p, COMMA, until(RIGHT_PAREN), argument)?
    };

    if arguments.len() > 1 || !arguments.separators.is_empty() {
        let generator = arguments.iter().find(|argument| matches!(argument, Argument::Generator(_)));
        if let Some(generator) = generator {
            return error_at(generator.range().start(), "generator expression must be parenthesized");
        }
    }
    check_argument_order(&arguments)?;

    let rparen = p.expect(RIGHT_PAREN, "expected ')'")?;
    Ok(Call { range: m.complete(p), lparen, arguments, rparen })
}

/// Positional arguments come before keywords, and `*iterable` before
/// `**mapping`.
fn check_argument_order(arguments: &Separated<Argument>) -> ParseResult<()> {
    let mut keyword = false;
    let mut double_starred = false;
    for argument in arguments {
        match argument {
            Argument::Positional(_) | Argument::Generator(_) if double_starred => {
                return error_at(
                    argument.range().start(),
                    "positional argument follows keyword argument unpacking",
                );
            }
            Argument::Positional(_) | Argument::Generator(_) if keyword => {
                return error_at(
                    argument.range().start(),
                    "positional argument follows keyword argument",
                );
            }
            Argument::Starred(_) if double_starred => {
                return error_at(
                    argument.range().start(),
                    "iterable argument unpacking follows keyword argument unpacking",
                );
            }
            Argument::Keyword(_) => keyword = true,
            Argument::DoubleStarred(_) => double_starred = true,
            _ => {}
        }
    }
    Ok(())
}

fn argument(p: &mut Parser<'_>) -> ParseResult<Argument> {
    match p.peek_kind() {
        STAR => {
            let m = p.start();
            let star = p.advance();
            let value = test(p)?;
            Ok(Argument::Starred(Starred { range: m.complete(p), star, expr: Box::new(value) }))
        }
        DOUBLE_STAR => double_starred(p, test).map(Argument::DoubleStarred),
        _ => {
            let m = p.start();
            let value = test(p)?;
            match p.peek_kind() {
                EQ => {
                    let Expr::Name(name) = value else {
                        return error_at(
                            value.range().start(),
                            "expected parameter name before '='",
                        );
                    };
                    let eq = p.advance();
                    let value = test(p)?;
                    Ok(Argument::Keyword(KeywordArgument {
                        range: m.complete(p),
                        name: name.token,
                        eq,
                        value,
                    }))
                }
                COLON_EQ => named_tail(p, m, value).map(Argument::Positional),
                FOR_KW | ASYNC_KW => {
                    let clauses = comp_for(p)?;
                    Ok(Argument::Generator(Comprehension {
                        range: m.complete(p),
                        kind: ComprehensionKind::Generator,
                        open: None,
                        element: Box::new(value),
                        clauses: Box::new(clauses),
                        close: None,
                    }))
                }
                _ => Ok(Argument::Positional(value)),
            }
        }
    }
}

fn subscript(p: &mut Parser<'_>) -> ParseResult<SubscriptItem> {
    if p.at(STAR) {
        return star_expr(p).map(SubscriptItem::Expr);
    }

    let m = p.start();
    let lower = if p.at(COLON) {
        None
    } else {
        let value = namedexpr_test(p)?;
        if !p.at(COLON) {
            return Ok(SubscriptItem::Expr(value));
        }
        Some(Box::new(value))
    };

    let first_colon = p.advance();
    let upper = if p.at_set(&SLICE_BOUND_END) { None } else { Some(Box::new(test(p)?)) };
    let (second_colon, step) = match p.eat(COLON) {
        Some(colon) => {
            let step = if p.at(COMMA) || p.at(RIGHT_BRACKET) {
                None
            } else {
                Some(Box::new(test(p)?))
            };
            (Some(colon), step)
        }
        None => (None, None),
    };

    Ok(SubscriptItem::Slice(Slice {
        range: m.complete(p),
        lower,
        first_colon,
        upper,
        second_colon,
        step,
    }))
}

/// `[async] 'for' exprlist 'in' or_test [comp_iter]`
pub(crate) fn comp_for(p: &mut Parser<'_>) -> ParseResult<CompFor> {
    let m = p.start();
    let async_token = p.eat(ASYNC_KW);
    let for_token = p.expect(FOR_KW, "expected 'for' after 'async'")?;
    let target = exprlist(p)?;
    let in_token = p.expect(IN_KW, "expected 'in' in comprehension")?;
    let iter = or_test(p)?;
    let next = p.nested(comp_iter)?;

    Ok(CompFor {
        range: m.complete(p),
        async_token,
        for_token,
        target: Box::new(target),
        in_token,
        iter: Box::new(iter),
        next,
    })
}

fn comp_iter(p: &mut Parser<'_>) -> ParseResult<Option<Box<CompClause>>> {
    let clause = match p.peek_kind() {
        FOR_KW | ASYNC_KW => CompClause::For(comp_for(p)?),
        IF_KW => {
            let m = p.start();
            let if_token = p.advance();
            let condition = test_nocond(p)?;
            let next = p.nested(comp_iter)?;
            CompClause::If(CompIf {
                range: m.complete(p),
                if_token,
                condition: Box::new(condition),
                next,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(Box::new(clause)))
}

/// Builds a bare tuple when the list has a separator, otherwise returns the
/// single element.
fn bare_tuple(m: Marker, p: &Parser<'_>, mut elements: Separated<Expr>) -> Expr {
    if elements.separators.is_empty() && elements.len() == 1 {
        if let Some(single) = elements.items.pop() {
            return single;
        }
    }
    Expr::Tuple(Tuple { range: m.complete(p), lparen: None, elements, rparen: None })
}

/// `(expr|star_expr) (',' (expr|star_expr))* [',']`, the targets of `for`
/// and `del`.
pub(crate) fn exprlist(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let elements = separated(p, COMMA, starts_expr, star_or_expr)?;
    Ok(bare_tuple(m, p, elements))
}

/// `test (',' test)* [',']`
pub(crate) fn testlist(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let elements = separated(p, COMMA, starts_expr, test)?;
    Ok(bare_tuple(m, p, elements))
}

/// `(test|star_expr) (',' (test|star_expr))* [',']`
pub(crate) fn testlist_star_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    let m = p.start();
    let elements = separated(p, COMMA, starts_expr, star_or_test)?;
    Ok(bare_tuple(m, p, elements))
}

/// Continues a bare tuple after its first element was already parsed.
pub(crate) fn star_named_tail(p: &mut Parser<'_>, m: Marker, first: Expr) -> ParseResult<Expr> {
    let mut elements = Separated::single(first);
    separated_tail(p, &mut elements, COMMA, starts_expr, star_or_namedexpr)?;
    Ok(bare_tuple(m, p, elements))
}

/// `'yield' ['from' test | testlist_star_expr]`
pub(crate) fn yield_expr(p: &mut Parser<'_>) -> ParseResult<Expr> {
    debug_assert_eq!(p.peek_kind(), YIELD_KW);

    let m = p.start();
    let yield_token = p.advance();

    if let Some(from_token) = p.eat(FROM_KW) {
        let value = test(p)?;
        return Ok(Expr::YieldFrom(YieldFrom {
            range: m.complete(p),
            yield_token,
            from_token,
            value: Box::new(value),
        }));
    }

    let value = if starts_expr(p) { Some(Box::new(testlist_star_expr(p)?)) } else { None };
    Ok(Expr::Yield(Yield { range: m.complete(p), yield_token, value }))
}
