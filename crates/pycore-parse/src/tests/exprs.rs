use expect_test::expect;
use pycore_syntax::ast::{
    Argument, BinaryOp, CompClause, CompareOp, ComprehensionKind, DictItem, Expr, SmallStmt,
    SubscriptItem, Trailer, UnaryOp,
};
use pycore_syntax::walk;

use super::{init_tracing, small_stmt};
use crate::{Mode, Parsed, parse};

fn expr(text: &str) -> Expr {
    match small_stmt(text) {
        SmallStmt::Expr(stmt) => stmt.expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn dump(text: &str) -> String {
    let Ok(Parsed::Expression(expression)) = parse(text, Mode::Expression) else {
        panic!("failed to parse {text:?}");
    };
    walk::dump(&expression.body)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Expr::Binary(add) = expr("a + b * c") else { panic!("expected binary") };
    assert_eq!(add.op, BinaryOp::Add);
    assert!(matches!(*add.lhs, Expr::Name(_)));
    let Expr::Binary(mul) = *add.rhs else { panic!("expected binary rhs") };
    assert_eq!(mul.op, BinaryOp::Mul);
}

#[test]
fn power_is_right_associative() {
    let Expr::Binary(top) = expr("a ** b ** c") else { panic!("expected binary") };
    assert_eq!(top.op, BinaryOp::Pow);
    assert!(matches!(*top.lhs, Expr::Name(_)));
    assert!(matches!(&*top.rhs, Expr::Binary(inner) if inner.op == BinaryOp::Pow));
}

#[test]
fn power_binds_tighter_than_unary_minus() {
    let Expr::Unary(neg) = expr("-a ** -b") else { panic!("expected unary") };
    assert_eq!(neg.op, UnaryOp::Minus);
    let Expr::Binary(pow) = *neg.operand else { panic!("expected power") };
    assert!(matches!(*pow.rhs, Expr::Unary(_)));
}

#[test]
fn subtraction_is_left_associative() {
    let Expr::Binary(top) = expr("a - b - c") else { panic!("expected binary") };
    assert_eq!(top.op, BinaryOp::Sub);
    assert!(matches!(&*top.lhs, Expr::Binary(inner) if inner.op == BinaryOp::Sub));
    assert!(matches!(*top.rhs, Expr::Name(_)));
}

#[test]
fn comparisons_chain_as_nested_nodes() {
    let Expr::Compare(outer) = expr("a < b < c") else { panic!("expected compare") };
    assert_eq!(outer.op, CompareOp::Less);
    let Expr::Compare(inner) = *outer.lhs else { panic!("expected nested compare") };
    assert_eq!(inner.op, CompareOp::Less);
    assert_eq!(inner.lhs.as_name().map(|name| name.text()), Some("a"));
}

#[test]
fn two_token_comparison_operators() {
    let Expr::Compare(is_not) = expr("a is not b") else { panic!("expected compare") };
    assert_eq!(is_not.op, CompareOp::IsNot);
    assert!(is_not.second_op_token.is_some());

    let Expr::Compare(is) = expr("a is b") else { panic!("expected compare") };
    assert_eq!(is.op, CompareOp::Is);
    assert!(is.second_op_token.is_none());

    let Expr::Compare(not_in) = expr("a not in b") else { panic!("expected compare") };
    assert_eq!(not_in.op, CompareOp::NotIn);
}

#[test]
fn boolean_operators() {
    let Expr::Binary(or) = expr("a or b and not c") else { panic!("expected binary") };
    assert_eq!(or.op, BinaryOp::Or);
    let Expr::Binary(and) = *or.rhs else { panic!("expected and") };
    assert_eq!(and.op, BinaryOp::And);
    assert!(matches!(&*and.rhs, Expr::Unary(not) if not.op == UnaryOp::Not));
}

#[test]
fn conditional_expression() {
    let Expr::If(conditional) = expr("1 if y else 2") else { panic!("expected conditional") };
    assert!(matches!(*conditional.body, Expr::Number(_)));
    assert_eq!(conditional.condition.as_name().map(|name| name.text()), Some("y"));
    assert!(matches!(*conditional.orelse, Expr::Number(_)));
}

#[test]
fn braces_decide_between_dict_and_set() {
    let Expr::Dict(dict) = expr("{1: 2}") else { panic!("expected dict") };
    assert_eq!(dict.items.len(), 1);

    let Expr::Set(set) = expr("{1, 2}") else { panic!("expected set") };
    assert_eq!(set.elements.len(), 2);

    let Expr::Dict(empty) = expr("{}") else { panic!("expected empty dict") };
    assert!(empty.items.is_empty());

    let Expr::Dict(unpacked) = expr("{**a, 'k': v,}") else { panic!("expected dict") };
    assert!(matches!(unpacked.items.items[0], DictItem::Unpack(_)));
    assert!(unpacked.items.has_trailing_separator());

    let Expr::Set(starred) = expr("{*a, b}") else { panic!("expected set") };
    assert!(matches!(starred.elements.items[0], Expr::Starred(_)));
}

#[test]
fn comprehensions() {
    let Expr::Comprehension(list) = expr("[x for x in y if x for z in x]") else {
        panic!("expected list comprehension")
    };
    assert_eq!(list.kind, ComprehensionKind::List);
    let Some(next) = &list.clauses.next else { panic!("expected an if clause") };
    let CompClause::If(filter) = &**next else { panic!("expected an if clause") };
    assert!(matches!(filter.next.as_deref(), Some(CompClause::For(_))));

    let Expr::Comprehension(set) = expr("{x for x in y}") else { panic!("expected set comp") };
    assert_eq!(set.kind, ComprehensionKind::Set);

    assert!(matches!(expr("{k: v for k, v in items}"), Expr::DictComprehension(_)));

    let Expr::Comprehension(generator) = expr("(x async for x in y)") else {
        panic!("expected generator")
    };
    assert_eq!(generator.kind, ComprehensionKind::Generator);
    assert!(generator.clauses.async_token.is_some());
}

#[test]
fn parenthesized_forms() {
    assert!(matches!(expr("()"), Expr::Tuple(tuple) if tuple.elements.is_empty()));
    assert!(matches!(expr("(a)"), Expr::Paren(_)));
    assert!(matches!(expr("(a,)"), Expr::Tuple(tuple) if tuple.elements.len() == 1));
    assert!(matches!(expr("(x := 1)"), Expr::Paren(paren) if matches!(*paren.expr, Expr::Named(_))));
}

#[test]
fn adjacent_strings_fold() {
    let Expr::String(string) = expr("'a' \"b\" '''c'''") else { panic!("expected string") };
    assert_eq!(string.tokens.len(), 3);
    assert_eq!(string.value(), "abc");
}

#[test]
fn trailers_form_a_flat_list() {
    let Expr::Primary(primary) = expr("await a.b(c)[d]") else { panic!("expected primary") };
    assert!(primary.await_token.is_some());
    assert_eq!(primary.trailers.len(), 3);
    assert!(matches!(primary.trailers[0], Trailer::Attribute(_)));
    assert!(matches!(primary.trailers[1], Trailer::Call(_)));
    assert!(matches!(primary.trailers[2], Trailer::Subscript(_)));
}

#[test]
fn call_arguments() {
    let Expr::Primary(primary) = expr("f(a, b=1, *c, **d, e := 2)") else {
        panic!("expected call")
    };
    let Trailer::Call(call) = &primary.trailers[0] else { panic!("expected call") };
    let arguments: Vec<_> = call.arguments.iter().collect();
    assert!(matches!(arguments[0], Argument::Positional(Expr::Name(_))));
    assert!(matches!(arguments[1], Argument::Keyword(keyword) if keyword.name.value() == Some("b")));
    assert!(matches!(arguments[2], Argument::Starred(_)));
    assert!(matches!(arguments[3], Argument::DoubleStarred(_)));
    assert!(matches!(arguments[4], Argument::Positional(Expr::Named(_))));

    let Expr::Primary(primary) = expr("sum(x for x in y)") else { panic!("expected call") };
    let Trailer::Call(call) = &primary.trailers[0] else { panic!("expected call") };
    assert!(matches!(call.arguments.items[0], Argument::Generator(_)));
}

#[test]
fn slices() {
    let Expr::Primary(primary) = expr("a[1:2, ::3, :, *b]") else { panic!("expected subscript") };
    let Trailer::Subscript(subscript) = &primary.trailers[0] else { panic!("expected subscript") };
    let items: Vec<_> = subscript.items.iter().collect();
    assert!(matches!(items[0], SubscriptItem::Slice(slice) if slice.lower.is_some() && slice.upper.is_some()));
    assert!(matches!(items[1], SubscriptItem::Slice(slice) if slice.step.is_some() && slice.lower.is_none()));
    assert!(matches!(items[2], SubscriptItem::Slice(slice) if slice.second_colon.is_none()));
    assert!(matches!(items[3], SubscriptItem::Expr(Expr::Starred(_))));
}

#[test]
fn lambda_in_comprehension_filter() {
    let Expr::Comprehension(list) = expr("[f for f in fs if lambda: f]") else {
        panic!("expected comprehension")
    };
    let Some(next) = &list.clauses.next else { panic!("expected if clause") };
    let CompClause::If(filter) = &**next else { panic!("expected if clause") };
    assert!(matches!(&*filter.condition, Expr::Lambda(lambda) if !lambda.allows_conditional));
}

#[test]
fn lambda_parameters() {
    let Expr::Lambda(lambda) = expr("lambda a, b=1, *c, **d: a") else { panic!("expected lambda") };
    let parameters = lambda.parameters.expect("parameters");
    assert_eq!(parameters.items.len(), 4);
    assert!(parameters.lparen.is_none());
    assert!(lambda.allows_conditional);
}

#[test]
fn dump_of_conditional_lambda() {
    init_tracing();
    expect![[r#"
        Lambda@0..23
          LAMBDA_KW@0..6 "lambda"
          Parameters@7..8
            Param@7..8
              NAME@7..8 "x"
          COLON@8..9 ":"
          IfExpr@10..23
            Name@10..11
              NAME@10..11 "x"
            IF_KW@12..14 "if"
            Name@15..16
              NAME@15..16 "x"
            ELSE_KW@17..21 "else"
            Number@22..23
              NUMBER@22..23 "0"
    "#]]
    .assert_eq(&dump("lambda x: x if x else 0"));
}

#[test]
fn parenthesized_yield() {
    let Expr::Paren(paren) = expr("(yield a, *b)") else { panic!("expected parentheses") };
    let Expr::Yield(yield_expr) = *paren.expr else { panic!("expected yield") };
    let Some(value) = yield_expr.value else { panic!("expected yielded value") };
    let Expr::Tuple(tuple) = *value else { panic!("expected tuple") };
    assert!(tuple.lparen.is_none());
    assert!(matches!(tuple.elements.items[1], Expr::Starred(_)));

    assert!(matches!(expr("(yield from g)"), Expr::Paren(paren) if matches!(*paren.expr, Expr::YieldFrom(_))));
}
