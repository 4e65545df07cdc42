use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::*;
use pycore_syntax::Token;
use pycore_syntax::ast::{
    AsyncStmt, Block, CaseBlock, ClassDef, Decorated, Decorator, ElifClause, ElseClause,
    ExceptHandler, Expr, FinallyClause, ForStmt, FunctionDef, IfStmt, MatchStmt, ParenExpr,
    Separated, Stmt, Suite, TryStmt, Tuple, TypeParam, TypeParams, WhileStmt, WithItem, WithStmt,
};

use super::exprs::{self, exprlist, namedexpr_test, test, testlist_star_expr};
use super::stmts::{alias, simple_stmt, stmt};
use super::{always, params, patterns, separated, separated_tail, starts_expr, until};
use crate::FlowLevel;
use crate::parser::{Marker, Parser, error_at};

pub(crate) fn compound_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Stmt> {
    match p.peek_kind() {
        IF_KW => if_stmt(p, flow).map(Stmt::If),
        WHILE_KW => while_stmt(p, flow).map(Stmt::While),
        FOR_KW => for_stmt(p, flow).map(Stmt::For),
        TRY_KW => try_stmt(p, flow).map(Stmt::Try),
        WITH_KW => with_stmt(p, flow).map(Stmt::With),
        DEF_KW => funcdef(p, flow).map(Stmt::FunctionDef),
        CLASS_KW => classdef(p, flow).map(Stmt::ClassDef),
        AT => decorated(p, flow).map(Stmt::Decorated),
        ASYNC_KW => async_stmt(p, flow).map(Stmt::Async),
        kind => Err(p.internal(format!("compound statement dispatch reached {kind:?}"))),
    }
}

/// `simple_stmt | NEWLINE INDENT stmt+ DEDENT`
pub(crate) fn suite(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Suite> {
    if !p.at(NEWLINE) {
        return simple_stmt(p, flow).map(Suite::Simple);
    }

    let m = p.start();
    let newline = p.advance();
    let indent = p.expect(INDENT, "expected an indented block")?;

    p.nested(|p| {
        let mut body = vec![stmt(p, flow)?];
        while !p.at(DEDENT) && !p.at(EOF) {
            body.push(stmt(p, flow)?);
        }
        let dedent = p.expect(DEDENT, "expected end of indented block")?;

        Ok(Suite::Block(Block { range: m.complete(p), newline, indent, body, dedent }))
    })
}

fn else_clause(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Option<ElseClause>> {
    if !p.at(ELSE_KW) {
        return Ok(None);
    }

    let m = p.start();
    let else_token = p.advance();
    let colon = p.expect(COLON, "expected ':' after 'else'")?;
    let body = suite(p, flow)?;
    Ok(Some(ElseClause { range: m.complete(p), else_token, colon, body }))
}

fn if_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<IfStmt> {
    let m = p.start();
    let if_token = p.advance();
    let condition = namedexpr_test(p)?;
    let colon = p.expect(COLON, "expected ':' after 'if' condition")?;
    let body = suite(p, flow)?;

    let mut elif_clauses = Vec::new();
    while p.at(ELIF_KW) {
        let m = p.start();
        let elif_token = p.advance();
        let condition = namedexpr_test(p)?;
        let colon = p.expect(COLON, "expected ':' after 'elif' condition")?;
        let body = suite(p, flow)?;
        elif_clauses.push(ElifClause { range: m.complete(p), elif_token, condition, colon, body });
    }

    let else_clause = else_clause(p, flow)?;

    Ok(IfStmt { range: m.complete(p), if_token, condition, colon, body, elif_clauses, else_clause })
}

fn while_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<WhileStmt> {
    let m = p.start();
    let while_token = p.advance();
    let condition = namedexpr_test(p)?;
    let colon = p.expect(COLON, "expected ':' after 'while' condition")?;
    let body = suite(p, flow.enter())?;
    let else_clause = else_clause(p, flow)?;

    Ok(WhileStmt { range: m.complete(p), while_token, condition, colon, body, else_clause })
}

fn for_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<ForStmt> {
    let m = p.start();
    let for_token = p.expect(FOR_KW, "expected 'for'")?;
    let target = exprlist(p)?;
    let in_token = p.expect(IN_KW, "expected 'in' after 'for' target")?;
    let iter = testlist_star_expr(p)?;
    let colon = p.expect(COLON, "expected ':' after 'for' iterable")?;
    let body = suite(p, flow.enter())?;
    let else_clause = else_clause(p, flow)?;

    Ok(ForStmt {
        range: m.complete(p),
        for_token,
        target,
        in_token,
        iter,
        colon,
        body,
        else_clause,
    })
}

fn try_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<TryStmt> {
    let m = p.start();
    let try_token = p.advance();
    let colon = p.expect(COLON, "expected ':' after 'try'")?;
    let body = suite(p, flow)?;

    let mut handlers: Vec<ExceptHandler> = Vec::new();
    while p.at(EXCEPT_KW) {
        let handler = except_handler(p, flow)?;
        let mixed = handlers
            .first()
            .is_some_and(|first| first.star.is_some() != handler.star.is_some());
        if mixed {
            return error_at(
                handler.range.start(),
                "cannot have both 'except' and 'except*' on the same 'try'",
            );
        }
        handlers.push(handler);
    }

    if p.at(ELSE_KW) && handlers.is_empty() {
        return p.error("expected 'except' or 'finally' block");
    }
    let else_clause = else_clause(p, flow)?;

    let finally_clause = if p.at(FINALLY_KW) {
        let m = p.start();
        let finally_token = p.advance();
        let colon = p.expect(COLON, "expected ':' after 'finally'")?;
        let body = suite(p, flow)?;
        Some(FinallyClause { range: m.complete(p), finally_token, colon, body })
    } else {
        None
    };

    if handlers.is_empty() && finally_clause.is_none() {
        return p.error("expected 'except' or 'finally' block");
    }

    Ok(TryStmt { range: m.complete(p), try_token, colon, body, handlers, else_clause, finally_clause })
}

/// `except ['*'] [test ['as' NAME]] ':' suite`
fn except_handler(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<ExceptHandler> {
    let m = p.start();
    let except_token = p.advance();
    let star = p.eat(STAR);

    let type_expr = if p.at(COLON) {
        if star.is_some() {
            return p.error("expected exception type after 'except*'");
        }
        None
    } else {
        Some(test(p)?)
    };
    let alias = if type_expr.is_some() { alias(p)? } else { None };

    let colon = p.expect(COLON, "expected ':' after 'except' clause")?;
    let body = suite(p, flow)?;

    Ok(ExceptHandler { range: m.complete(p), except_token, star, type_expr, alias, colon, body })
}

/// `'with' ('(' with_item (',' with_item)* [','] ')' | with_item (',' with_item)*) ':' suite`
fn with_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<WithStmt> {
    let m = p.start();
    let with_token = p.expect(WITH_KW, "expected 'with'")?;

    let (lparen, items, rparen) = match parenthesized_with(p)? {
        Some(ParenthesizedWith::Items { lparen, items, rparen }) => {
            (Some(lparen), items, Some(rparen))
        }
        Some(ParenthesizedWith::Atom(atom)) => {
            p.push_back_atom(atom);
            (None, separated(p, COMMA, always, with_item)?, None)
        }
        None => (None, separated(p, COMMA, always, with_item)?, None),
    };
    let colon = p.expect(COLON, "expected ':' after 'with' items")?;
    let body = suite(p, flow)?;

    Ok(WithStmt { range: m.complete(p), with_token, lparen, items, rparen, colon, body })
}

/// What a `(` right after `with` turned out to open.
enum ParenthesizedWith {
    Items { lparen: Token, items: Separated<WithItem>, rparen: Token },
    /// The first atom of an ordinary context expression, e.g. `(a, b)` in
    /// `with (a, b) as c:` or `(f)` in `with (f)(x):`.
    Atom(Expr),
}

/// Reads a parenthesized group after `with`.
///
/// It is an item list when some item has an `as` target, or when the group
/// is followed by `:` and holds only plain expressions. Otherwise it is
/// handed back as an atom and the context expression continues after it.
fn parenthesized_with(p: &mut Parser<'_>) -> ParseResult<Option<ParenthesizedWith>> {
    if !p.at(LEFT_PAREN) {
        return Ok(None);
    }

    let m = p.start();
    let lparen = p.advance();
    if p.at(RIGHT_PAREN) || p.at(YIELD_KW) {
        let atom = exprs::paren_atom_rest(p, m, lparen)?;
        return Ok(Some(ParenthesizedWith::Atom(atom)));
    }

    let first_m = p.start();
    let first = exprs::star_or_namedexpr(p)?;
    if p.at_set(&exprs::COMP_FOR_FIRST) {
        let atom = exprs::generator_rest(p, m, lparen, first)?;
        return Ok(Some(ParenthesizedWith::Atom(atom)));
    }

    let mut items = Separated::single(with_item_tail(p, first_m, first)?);
    separated_tail(p, &mut items, COMMA, until(RIGHT_PAREN), |p| {
        let m = p.start();
        let context = exprs::star_or_namedexpr(p)?;
        with_item_tail(p, m, context)
    })?;
    let rparen = p.expect(RIGHT_PAREN, "expected ')' after 'with' items")?;

    let has_targets = items.items.iter().any(|item| item.as_token.is_some());
    let all_plain = items.items.iter().all(|item| is_plain_context(&item.context));
    if has_targets || (all_plain && p.at(COLON)) {
        if let Some(item) = items.items.iter().find(|item| !is_plain_context(&item.context)) {
            return error_at(item.range.start(), "invalid 'with' item");
        }
        return Ok(Some(ParenthesizedWith::Items { lparen, items, rparen }));
    }

    let atom = if items.len() == 1 && !items.has_trailing_separator() {
        let Some(item) = items.items.pop() else {
            return Err(p.internal("single 'with' item went missing"));
        };
        if matches!(item.context, Expr::Starred(_)) {
            return error_at(item.range.start(), "cannot use starred expression here");
        }
        let expr = Box::new(item.context);
        Expr::Paren(ParenExpr { range: m.complete(p), lparen, expr, rparen })
    } else {
        let elements = Separated {
            items: items.items.into_iter().map(|item| item.context).collect(),
            separators: items.separators,
        };
        let (lparen, rparen) = (Some(lparen), Some(rparen));
        Expr::Tuple(Tuple { range: m.complete(p), lparen, elements, rparen })
    };
    Ok(Some(ParenthesizedWith::Atom(atom)))
}

/// Unpacking and `:=` only appear in context expressions that are
/// parenthesized themselves.
fn is_plain_context(context: &Expr) -> bool {
    !matches!(context, Expr::Starred(_) | Expr::Named(_))
}

fn with_item(p: &mut Parser<'_>) -> ParseResult<WithItem> {
    let m = p.start();
    let context = test(p)?;
    with_item_tail(p, m, context)
}

/// `['as' expr]` after a parsed context expression.
fn with_item_tail(p: &mut Parser<'_>, m: Marker, context: Expr) -> ParseResult<WithItem> {
    let (as_token, target) = match p.eat(AS_KW) {
        Some(as_token) => (Some(as_token), Some(exprs::expr(p)?)),
        None => (None, None),
    };
    Ok(WithItem { range: m.complete(p), context, as_token, target })
}

/// `def NAME [type_params] parameters ['->' test] ':' suite`
///
/// The body always runs one flow level deeper than the definition.
fn funcdef(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<FunctionDef> {
    let m = p.start();
    let def_token = p.expect(DEF_KW, "expected 'def'")?;
    let name = p.expect(NAME, "expected function name after 'def'")?;
    let type_params = if p.at(LEFT_BRACKET) { Some(type_params(p)?) } else { None };
    let parameters = params::parameters(p)?;
    let (arrow, returns) = match p.eat(ARROW) {
        Some(arrow) => (Some(arrow), Some(test(p)?)),
        None => (None, None),
    };
    let colon = p.expect(COLON, "expected ':' after function signature")?;
    let body = suite(p, flow.enter())?;

    Ok(FunctionDef {
        range: m.complete(p),
        def_token,
        name,
        type_params,
        parameters,
        arrow,
        returns,
        colon,
        body,
    })
}

fn classdef(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<ClassDef> {
    let m = p.start();
    let class_token = p.advance();
    let name = p.expect(NAME, "expected class name after 'class'")?;
    let type_params = if p.at(LEFT_BRACKET) { Some(type_params(p)?) } else { None };
    let arguments = if p.at(LEFT_PAREN) { Some(exprs::call(p)?) } else { None };
    let colon = p.expect(COLON, "expected ':' after class header")?;
    let body = suite(p, flow)?;

    Ok(ClassDef { range: m.complete(p), class_token, name, type_params, arguments, colon, body })
}

fn decorated(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Decorated> {
    let m = p.start();

    let mut decorators = Vec::new();
    while p.at(AT) {
        let m = p.start();
        let at = p.advance();
        let expr = namedexpr_test(p)?;
        let newline = p.expect(NEWLINE, "expected newline after decorator")?;
        decorators.push(Decorator { range: m.complete(p), at, expr, newline });
    }

    let definition = match p.peek_kind() {
        DEF_KW => Stmt::FunctionDef(funcdef(p, flow)?),
        CLASS_KW => Stmt::ClassDef(classdef(p, flow)?),
        ASYNC_KW => {
            let m = p.start();
            let async_token = p.advance();
            if !p.at(DEF_KW) {
                return p.error("expected 'def' after 'async' in decorated definition");
            }
            let def = funcdef(p, flow)?;
            Stmt::Async(AsyncStmt {
                range: m.complete(p),
                async_token,
                stmt: Box::new(Stmt::FunctionDef(def)),
            })
        }
        _ => return p.error("expected 'def', 'class' or 'async def' after decorators"),
    };

    Ok(Decorated { range: m.complete(p), decorators, definition: Box::new(definition) })
}

fn async_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<AsyncStmt> {
    let m = p.start();
    let async_token = p.advance();
    let stmt = match p.peek_kind() {
        DEF_KW => Stmt::FunctionDef(funcdef(p, flow)?),
        FOR_KW => Stmt::For(for_stmt(p, flow)?),
        WITH_KW => Stmt::With(with_stmt(p, flow)?),
        _ => return p.error("expected 'def', 'for' or 'with' after 'async'"),
    };
    Ok(AsyncStmt { range: m.complete(p), async_token, stmt: Box::new(stmt) })
}

/// `'[' type_param (',' type_param)* [','] ']'`
pub(crate) fn type_params(p: &mut Parser<'_>) -> ParseResult<TypeParams> {
    let m = p.start();
    let lbracket = p.expect(LEFT_BRACKET, "expected '['")?;
    let params = separated(p, COMMA, until(RIGHT_BRACKET), type_param)?;
    let rbracket = p.expect(RIGHT_BRACKET, "expected ']' after type parameters")?;
    Ok(TypeParams { range: m.complete(p), lbracket, params, rbracket })
}

fn type_param(p: &mut Parser<'_>) -> ParseResult<TypeParam> {
    let m = p.start();
    let prefix = if p.at(STAR) || p.at(DOUBLE_STAR) { Some(p.advance()) } else { None };
    let name = p.expect(NAME, "expected type parameter name")?;

    let (colon, bound) = match (&prefix, p.peek_kind()) {
        (None, COLON) => {
            let colon = p.advance();
            (Some(colon), Some(test(p)?))
        }
        (Some(_), COLON) => return p.error("variadic type parameters cannot have a bound"),
        _ => (None, None),
    };
    let (eq, default) = match p.eat(EQ) {
        Some(eq) => (Some(eq), Some(test(p)?)),
        None => (None, None),
    };

    Ok(TypeParam { range: m.complete(p), prefix, name, colon, bound, eq, default })
}

/// A statement starting with the name `match`.
///
/// The name is consumed first; if the next token can start a subject
/// expression the statement is a match block, otherwise the name is pushed
/// back and read again as the start of a simple statement.
///
/// A statement that calls, subscripts or negates a variable named `match`,
/// such as `match(a, b)`, `match[0] = 1` or `match -1`, therefore reads as a
/// match statement and fails on the missing `:`. Wrapping the name in
/// parentheses, `(match)(a, b)`, keeps it an expression.
pub(crate) fn match_or_simple_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Stmt> {
    let m = p.start();
    let match_token = p.advance();
    if !starts_expr(p) {
        p.push_back(match_token);
        return simple_stmt(p, flow).map(Stmt::Simple);
    }

    tracing::trace!(offset = ?match_token.range.start(), "`match` starts a match statement");

    let subject_marker = p.start();
    let first = exprs::star_or_namedexpr(p)?;
    let subject = exprs::star_named_tail(p, subject_marker, first)?;
    let colon = p.expect(COLON, "expected ':' after 'match' subject")?;
    let newline = p.expect(NEWLINE, "expected newline after 'match' subject")?;
    let indent = p.expect(INDENT, "expected an indented block of 'case' clauses")?;

    let mut cases = Vec::new();
    while p.at_soft_keyword("case") {
        cases.push(case_block(p, flow)?);
    }
    if cases.is_empty() {
        return p.error("expected 'case' block");
    }
    let dedent = p.expect(DEDENT, "expected 'case' block")?;

    Ok(Stmt::Match(MatchStmt {
        range: m.complete(p),
        match_token,
        subject,
        colon,
        newline,
        indent,
        cases,
        dedent,
    }))
}

/// `'case' patterns ['if' namedexpr_test] ':' suite`
fn case_block(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<CaseBlock> {
    let m = p.start();
    let case_token = p.advance();
    let pattern = patterns::patterns(p)?;
    let (if_token, guard) = match p.eat(IF_KW) {
        Some(if_token) => (Some(if_token), Some(namedexpr_test(p)?)),
        None => (None, None),
    };
    let colon = p.expect(COLON, "expected ':' after 'case' pattern")?;
    let body = suite(p, flow)?;

    Ok(CaseBlock { range: m.complete(p), case_token, pattern, if_token, guard, colon, body })
}
