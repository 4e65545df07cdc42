use pycore_errors::ParseResult;
use pycore_syntax::SyntaxKind::*;
use pycore_syntax::ast::{
    Alias, AnnAssignStmt, AssertStmt, AssignStmt, AssignValue, AstNode as _, AugAssignOp,
    AugAssignStmt, BreakStmt, ContinueStmt, DelStmt, DottedAsName, DottedName, EmptyStmt,
    ExprStmt, GlobalStmt, ImportAsName, ImportFromStmt, ImportList, ImportNames, ImportStmt,
    Expr, NonlocalStmt, PassStmt, RaiseStmt, ReturnStmt, Separated, SimpleStmt, SmallStmt, Stmt,
    TypeAliasStmt,
};
use pycore_syntax::{SyntaxSet, Token};

use super::exprs::{exprlist, test, testlist, testlist_star_expr, yield_expr};
use super::{always, compound, separated, starts_expr, until};
use crate::FlowLevel;
use crate::parser::{Parser, error_at};

const COMPOUND_FIRST: SyntaxSet = SyntaxSet::new([
    IF_KW, WHILE_KW, FOR_KW, TRY_KW, WITH_KW, DEF_KW, CLASS_KW, ASYNC_KW, AT,
]);
const FLOW_KEYWORDS: SyntaxSet =
    SyntaxSet::new([BREAK_KW, CONTINUE_KW, RETURN_KW, RAISE_KW, YIELD_KW]);

pub(crate) fn stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<Stmt> {
    match p.peek_kind() {
        NEWLINE => {
            let newline = p.advance();
            Ok(Stmt::Empty(EmptyStmt { range: newline.range, newline }))
        }
        INDENT => p.error("unexpected indent"),
        kind if COMPOUND_FIRST.contains(kind) => compound::compound_stmt(p, flow),
        NAME if p.at_soft_keyword("match") => compound::match_or_simple_stmt(p, flow),
        _ => simple_stmt(p, flow).map(Stmt::Simple),
    }
}

/// `small_stmt (';' small_stmt)* [';'] NEWLINE`
pub(crate) fn simple_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<SimpleStmt> {
    let m = p.start();
    let stmts = separated(p, SEMICOLON, until(NEWLINE), |p| small_stmt(p, flow))?;
    let newline = p.expect(NEWLINE, "expected newline after statement")?;
    Ok(SimpleStmt { range: m.complete(p), stmts, newline })
}

fn small_stmt(p: &mut Parser<'_>, flow: FlowLevel) -> ParseResult<SmallStmt> {
    let kind = p.peek_kind();
    if FLOW_KEYWORDS.contains(kind) && !flow.allows_flow() {
        let keyword = kind.text().unwrap_or_else(|| kind.describe());
        return p.error(format!("'{keyword}' outside of a function or loop"));
    }

    let m = p.start();
    match kind {
        PASS_KW => {
            let token = p.advance();
            Ok(SmallStmt::Pass(PassStmt { range: token.range, token }))
        }
        BREAK_KW => {
            let token = p.advance();
            Ok(SmallStmt::Break(BreakStmt { range: token.range, token }))
        }
        CONTINUE_KW => {
            let token = p.advance();
            Ok(SmallStmt::Continue(ContinueStmt { range: token.range, token }))
        }
        DEL_KW => {
            let del_token = p.advance();
            let targets = exprlist(p)?;
            Ok(SmallStmt::Del(DelStmt { range: m.complete(p), del_token, targets }))
        }
        RETURN_KW => {
            let return_token = p.advance();
            let value = if starts_expr(p) { Some(testlist_star_expr(p)?) } else { None };
            if let Some(value) = &value {
                reject_bare_starred(value)?;
            }
            Ok(SmallStmt::Return(ReturnStmt { range: m.complete(p), return_token, value }))
        }
        RAISE_KW => raise_stmt(p),
        YIELD_KW => {
            let expr = yield_expr(p)?;
            Ok(SmallStmt::Expr(ExprStmt { range: m.complete(p), expr }))
        }
        IMPORT_KW => import_stmt(p),
        FROM_KW => import_from_stmt(p),
        GLOBAL_KW => {
            let global_token = p.advance();
            let names = name_list(p)?;
            Ok(SmallStmt::Global(GlobalStmt { range: m.complete(p), global_token, names }))
        }
        NONLOCAL_KW => {
            let nonlocal_token = p.advance();
            let names = name_list(p)?;
            Ok(SmallStmt::Nonlocal(NonlocalStmt { range: m.complete(p), nonlocal_token, names }))
        }
        ASSERT_KW => {
            let assert_token = p.advance();
            let test_expr = test(p)?;
            let (comma, message) = match p.eat(COMMA) {
                Some(comma) => (Some(comma), Some(test(p)?)),
                None => (None, None),
            };
            Ok(SmallStmt::Assert(AssertStmt {
                range: m.complete(p),
                assert_token,
                test: test_expr,
                comma,
                message,
            }))
        }
        NAME if p.at_soft_keyword("type") => type_alias_or_expr_stmt(p),
        _ => expr_stmt(p),
    }
}

/// Resolves the shape of a statement that starts with an expression:
/// annotation, assignment chain, augmented assignment, or a bare expression.
fn expr_stmt(p: &mut Parser<'_>) -> ParseResult<SmallStmt> {
    let m = p.start();
    let target = testlist_star_expr(p)?;
    reject_bare_starred(&target)?;

    match p.peek_kind() {
        COLON => {
            if target.is_bare_tuple() {
                return error_at(
                    target.range().start(),
                    "only single target (not tuple) can be annotated",
                );
            }
            let colon = p.advance();
            let annotation = test(p)?;
            let value = if p.at(EQ) { Some(assign_value(p)?) } else { None };
            Ok(SmallStmt::AnnAssign(AnnAssignStmt {
                range: m.complete(p),
                target,
                colon,
                annotation,
                value,
            }))
        }
        EQ => {
            let mut values = Vec::new();
            while p.at(EQ) {
                values.push(assign_value(p)?);
            }
            Ok(SmallStmt::Assign(AssignStmt { range: m.complete(p), target, values }))
        }
        kind if kind.is_augmented_assign() => {
            if target.is_bare_tuple() {
                return error_at(
                    target.range().start(),
                    "illegal expression for augmented assignment",
                );
            }
            let op_token = p.advance();
            let op = AugAssignOp::from_kind(op_token.kind).ok_or_else(|| {
                p.internal(format!("no augmented assignment operator for {:?}", op_token.kind))
            })?;
            let value = if p.at(YIELD_KW) { yield_expr(p)? } else { testlist(p)? };
            Ok(SmallStmt::AugAssign(AugAssignStmt {
                range: m.complete(p),
                target,
                op,
                op_token,
                value,
            }))
        }
        _ => Ok(SmallStmt::Expr(ExprStmt { range: m.complete(p), expr: target })),
    }
}

/// `'=' (yield_expr | testlist_star_expr)`
fn assign_value(p: &mut Parser<'_>) -> ParseResult<AssignValue> {
    let m = p.start();
    let eq = p.expect(EQ, "expected '='")?;
    let value = if p.at(YIELD_KW) { yield_expr(p)? } else { testlist_star_expr(p)? };
    reject_bare_starred(&value)?;
    Ok(AssignValue { range: m.complete(p), eq, value })
}

/// A lone `*expr` is only valid as an element of a tuple, list or set.
fn reject_bare_starred(expr: &Expr) -> ParseResult<()> {
    match expr {
        Expr::Starred(starred) => {
            error_at(starred.range.start(), "cannot use starred expression here")
        }
        _ => Ok(()),
    }
}

/// `type` followed by a name starts an alias; anything else is an
/// expression statement that happens to begin with the name `type`.
fn type_alias_or_expr_stmt(p: &mut Parser<'_>) -> ParseResult<SmallStmt> {
    let m = p.start();
    let type_token = p.advance();
    if !p.at(NAME) {
        p.push_back(type_token);
        return expr_stmt(p);
    }

    tracing::trace!(offset = ?type_token.range.start(), "`type` starts a type alias");

    let name = p.advance();
    let type_params = if p.at(LEFT_BRACKET) { Some(compound::type_params(p)?) } else { None };
    let eq = p.expect(EQ, "expected '=' in type alias")?;
    let value = test(p)?;

    Ok(SmallStmt::TypeAlias(TypeAliasStmt {
        range: m.complete(p),
        type_token,
        name,
        type_params,
        eq,
        value,
    }))
}

fn raise_stmt(p: &mut Parser<'_>) -> ParseResult<SmallStmt> {
    let m = p.start();
    let raise_token = p.advance();

    let mut stmt = RaiseStmt {
        range: raise_token.range,
        raise_token,
        exception: None,
        from_token: None,
        cause: None,
    };

    if starts_expr(p) {
        stmt.exception = Some(test(p)?);
        if let Some(from_token) = p.eat(FROM_KW) {
            stmt.from_token = Some(from_token);
            stmt.cause = Some(test(p)?);
        }
    }

    stmt.range = m.complete(p);
    Ok(SmallStmt::Raise(stmt))
}

fn name_list(p: &mut Parser<'_>) -> ParseResult<Separated<Token>> {
    separated(p, COMMA, always, |p| p.expect(NAME, "expected name"))
}

/// `import dotted_as_name (',' dotted_as_name)*`
fn import_stmt(p: &mut Parser<'_>) -> ParseResult<SmallStmt> {
    let m = p.start();
    let import_token = p.advance();
    let names = separated(p, COMMA, always, dotted_as_name)?;
    Ok(SmallStmt::Import(ImportStmt { range: m.complete(p), import_token, names }))
}

fn dotted_as_name(p: &mut Parser<'_>) -> ParseResult<DottedAsName> {
    let m = p.start();
    let name = dotted_name(p)?;
    let alias = alias(p)?;
    Ok(DottedAsName { range: m.complete(p), name, alias })
}

fn dotted_name(p: &mut Parser<'_>) -> ParseResult<DottedName> {
    let m = p.start();
    let names = separated(p, DOT, always, |p| p.expect(NAME, "expected name after '.'"))?;
    Ok(DottedName { range: m.complete(p), names })
}

pub(crate) fn alias(p: &mut Parser<'_>) -> ParseResult<Option<Alias>> {
    let m = p.start();
    let Some(as_token) = p.eat(AS_KW) else {
        return Ok(None);
    };
    let name = p.expect(NAME, "expected name after 'as'")?;
    Ok(Some(Alias { range: m.complete(p), as_token, name }))
}

/// `from ('.' | '...')* dotted_name import names` or
/// `from ('.' | '...')+ import names`
fn import_from_stmt(p: &mut Parser<'_>) -> ParseResult<SmallStmt> {
    let m = p.start();
    let from_token = p.advance();

    let mut dots = Vec::new();
    while p.at(DOT) || p.at(ELLIPSIS) {
        dots.push(p.advance());
    }

    let module = if p.at(NAME) {
        Some(dotted_name(p)?)
    } else if dots.is_empty() {
        return p.error("expected module name after 'from'");
    } else {
        None
    };

    let import_token = p.expect(IMPORT_KW, "expected 'import' in from-import statement")?;
    let names = match p.peek_kind() {
        STAR => ImportNames::Star(p.advance()),
        LEFT_PAREN => {
            let list_marker = p.start();
            let lparen = p.advance();
            let names = separated(p, COMMA, until(RIGHT_PAREN), import_as_name)?;
            let rparen = p.expect(RIGHT_PAREN, "expected ')' after imported names")?;
            ImportNames::List(ImportList {
                range: list_marker.complete(p),
                lparen: Some(lparen),
                names,
                rparen: Some(rparen),
            })
        }
        _ => {
            let list_marker = p.start();
            let names = separated(p, COMMA, |p| p.at(NAME), import_as_name)?;
            if names.has_trailing_separator() {
                return p.error("trailing comma not allowed without surrounding parentheses");
            }
            ImportNames::List(ImportList {
                range: list_marker.complete(p),
                lparen: None,
                names,
                rparen: None,
            })
        }
    };

    Ok(SmallStmt::ImportFrom(ImportFromStmt {
        range: m.complete(p),
        from_token,
        dots,
        module,
        import_token,
        names,
    }))
}

fn import_as_name(p: &mut Parser<'_>) -> ParseResult<ImportAsName> {
    let m = p.start();
    let name = p.expect(NAME, "expected name in import list")?;
    let alias = alias(p)?;
    Ok(ImportAsName { range: m.complete(p), name, alias })
}

