use text_size::TextRange;

use super::{
    BinaryOp, CompareOp, ComprehensionKind, ConstantKind, Parameters, Separated, UnaryOp,
};
use crate::Token;

ast_enum! {
    pub enum Expr {
        Name(Name),
        Number(Number),
        String(StringLiteral),
        Constant(Constant),
        Paren(ParenExpr),
        Tuple(Tuple),
        List(List),
        Set(Set),
        Dict(Dict),
        Comprehension(Comprehension),
        DictComprehension(DictComprehension),
        Primary(Primary),
        Starred(Starred),
        Binary(Binary),
        Unary(Unary),
        Compare(Compare),
        If(IfExpr),
        Lambda(Lambda),
        Named(NamedExpr),
        Yield(Yield),
        YieldFrom(YieldFrom),
    }
}

impl Expr {
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Expr::Name(name) => Some(name),
            _ => None,
        }
    }

    /// An unparenthesized tuple such as the target of `a, b = c`.
    pub fn is_bare_tuple(&self) -> bool {
        matches!(self, Expr::Tuple(tuple) if tuple.lparen.is_none())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    pub range: TextRange,
    pub token: Token,
}

impl Name {
    pub fn new(token: Token) -> Self {
        Self { range: token.range, token }
    }

    pub fn text(&self) -> &str {
        self.token.value().unwrap_or_default()
    }
}

ast_node!(Name, "Name", |node, c| c.token(&node.token));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number {
    pub range: TextRange,
    pub token: Token,
}

ast_node!(Number, "Number", |node, c| c.token(&node.token));

/// One or more adjacent string tokens, concatenated at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub range: TextRange,
    pub tokens: Vec<Token>,
}

impl StringLiteral {
    /// The decoded contents of all parts joined together.
    pub fn value(&self) -> String {
        self.tokens.iter().filter_map(Token::value).collect()
    }
}

ast_node!(StringLiteral, "String", |node, c| c.tokens(&node.tokens));

/// `None`, `True`, `False` or `...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    pub range: TextRange,
    pub kind: ConstantKind,
    pub token: Token,
}

ast_node!(Constant, "Constant", |node, c| c.token(&node.token));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParenExpr {
    pub range: TextRange,
    pub lparen: Token,
    pub expr: Box<Expr>,
    pub rparen: Token,
}

ast_node!(ParenExpr, "ParenExpr", |node, c| c
    .token(&node.lparen)
    .node(&*node.expr)
    .token(&node.rparen));

/// A tuple display, with or without parentheses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tuple {
    pub range: TextRange,
    pub lparen: Option<Token>,
    pub elements: Separated<Expr>,
    pub rparen: Option<Token>,
}

ast_node!(Tuple, "Tuple", |node, c| c
    .opt_token(node.lparen.as_ref())
    .separated(&node.elements)
    .opt_token(node.rparen.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    pub range: TextRange,
    pub lbracket: Token,
    pub elements: Separated<Expr>,
    pub rbracket: Token,
}

ast_node!(List, "List", |node, c| c
    .token(&node.lbracket)
    .separated(&node.elements)
    .token(&node.rbracket));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    pub range: TextRange,
    pub lbrace: Token,
    pub elements: Separated<Expr>,
    pub rbrace: Token,
}

ast_node!(Set, "Set", |node, c| c.token(&node.lbrace).separated(&node.elements).token(&node.rbrace));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dict {
    pub range: TextRange,
    pub lbrace: Token,
    pub items: Separated<DictItem>,
    pub rbrace: Token,
}

ast_node!(Dict, "Dict", |node, c| c.token(&node.lbrace).separated(&node.items).token(&node.rbrace));

ast_enum! {
    pub enum DictItem {
        Entry(DictEntry),
        Unpack(DoubleStarred),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictEntry {
    pub range: TextRange,
    pub key: Expr,
    pub colon: Token,
    pub value: Expr,
}

ast_node!(DictEntry, "DictEntry", |node, c| c
    .node(&node.key)
    .token(&node.colon)
    .node(&node.value));

/// List, set and generator comprehensions.
///
/// A generator passed as the sole call argument has no brackets of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comprehension {
    pub range: TextRange,
    pub kind: ComprehensionKind,
    pub open: Option<Token>,
    pub element: Box<Expr>,
    pub clauses: Box<CompFor>,
    pub close: Option<Token>,
}

impl super::AstNode for Comprehension {
    fn range(&self) -> TextRange {
        self.range
    }

    fn name(&self) -> &'static str {
        match self.kind {
            ComprehensionKind::List => "ListComp",
            ComprehensionKind::Set => "SetComp",
            ComprehensionKind::Generator => "Generator",
        }
    }

    fn children(&self) -> Vec<super::SyntaxElement<'_>> {
        super::Children::new()
            .opt_token(self.open.as_ref())
            .node(&*self.element)
            .node(&*self.clauses)
            .opt_token(self.close.as_ref())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictComprehension {
    pub range: TextRange,
    pub lbrace: Token,
    pub key: Box<Expr>,
    pub colon: Token,
    pub value: Box<Expr>,
    pub clauses: Box<CompFor>,
    pub rbrace: Token,
}

ast_node!(DictComprehension, "DictComp", |node, c| c
    .token(&node.lbrace)
    .node(&*node.key)
    .token(&node.colon)
    .node(&*node.value)
    .node(&*node.clauses)
    .token(&node.rbrace));

ast_enum! {
    /// A link in the clause chain of a comprehension.
    pub enum CompClause {
        For(CompFor),
        If(CompIf),
    }
}

/// `[async] for target in iter`, followed by the rest of the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompFor {
    pub range: TextRange,
    pub async_token: Option<Token>,
    pub for_token: Token,
    pub target: Box<Expr>,
    pub in_token: Token,
    pub iter: Box<Expr>,
    pub next: Option<Box<CompClause>>,
}

ast_node!(CompFor, "CompFor", |node, c| c
    .opt_token(node.async_token.as_ref())
    .token(&node.for_token)
    .node(&*node.target)
    .token(&node.in_token)
    .node(&*node.iter)
    .opt_node(node.next.as_deref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompIf {
    pub range: TextRange,
    pub if_token: Token,
    pub condition: Box<Expr>,
    pub next: Option<Box<CompClause>>,
}

ast_node!(CompIf, "CompIf", |node, c| c
    .token(&node.if_token)
    .node(&*node.condition)
    .opt_node(node.next.as_deref()));

/// An atom with an optional `await` and a chain of trailers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Primary {
    pub range: TextRange,
    pub await_token: Option<Token>,
    pub atom: Box<Expr>,
    pub trailers: Vec<Trailer>,
}

ast_node!(Primary, "Primary", |node, c| c
    .opt_token(node.await_token.as_ref())
    .node(&*node.atom)
    .nodes(&node.trailers));

ast_enum! {
    pub enum Trailer {
        Call(Call),
        Subscript(Subscript),
        Attribute(Attribute),
    }
}

/// A parenthesized argument list, also used for class bases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub range: TextRange,
    pub lparen: Token,
    pub arguments: Separated<Argument>,
    pub rparen: Token,
}

ast_node!(Call, "Call", |node, c| c
    .token(&node.lparen)
    .separated(&node.arguments)
    .token(&node.rparen));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscript {
    pub range: TextRange,
    pub lbracket: Token,
    pub items: Separated<SubscriptItem>,
    pub rbracket: Token,
}

ast_node!(Subscript, "Subscript", |node, c| c
    .token(&node.lbracket)
    .separated(&node.items)
    .token(&node.rbracket));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub range: TextRange,
    pub dot: Token,
    pub name: Token,
}

ast_node!(Attribute, "Attribute", |node, c| c.token(&node.dot).token(&node.name));

ast_enum! {
    pub enum SubscriptItem {
        Expr(Expr),
        Slice(Slice),
    }
}

/// `lower:upper:step` with every part optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub range: TextRange,
    pub lower: Option<Box<Expr>>,
    pub first_colon: Token,
    pub upper: Option<Box<Expr>>,
    pub second_colon: Option<Token>,
    pub step: Option<Box<Expr>>,
}

ast_node!(Slice, "Slice", |node, c| c
    .opt_node(node.lower.as_deref())
    .token(&node.first_colon)
    .opt_node(node.upper.as_deref())
    .opt_token(node.second_colon.as_ref())
    .opt_node(node.step.as_deref()));

ast_enum! {
    pub enum Argument {
        Positional(Expr),
        Keyword(KeywordArgument),
        Starred(Starred),
        DoubleStarred(DoubleStarred),
        Generator(Comprehension),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordArgument {
    pub range: TextRange,
    pub name: Token,
    pub eq: Token,
    pub value: Expr,
}

ast_node!(KeywordArgument, "KeywordArgument", |node, c| c
    .token(&node.name)
    .token(&node.eq)
    .node(&node.value));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Starred {
    pub range: TextRange,
    pub star: Token,
    pub expr: Box<Expr>,
}

ast_node!(Starred, "Starred", |node, c| c.token(&node.star).node(&*node.expr));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleStarred {
    pub range: TextRange,
    pub double_star: Token,
    pub expr: Box<Expr>,
}

ast_node!(DoubleStarred, "DoubleStarred", |node, c| c
    .token(&node.double_star)
    .node(&*node.expr));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    pub range: TextRange,
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub op_token: Token,
    pub rhs: Box<Expr>,
}

ast_node!(Binary, "BinaryExpr", |node, c| c
    .node(&*node.lhs)
    .token(&node.op_token)
    .node(&*node.rhs));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unary {
    pub range: TextRange,
    pub op: UnaryOp,
    pub op_token: Token,
    pub operand: Box<Expr>,
}

ast_node!(Unary, "UnaryExpr", |node, c| c.token(&node.op_token).node(&*node.operand));

/// A single comparison. Chains nest to the left: `a < b < c` is
/// `(a < b) < c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compare {
    pub range: TextRange,
    pub lhs: Box<Expr>,
    pub op: CompareOp,
    pub op_token: Token,
    /// The `not` of `is not`, or the `in` of `not in`.
    pub second_op_token: Option<Token>,
    pub rhs: Box<Expr>,
}

ast_node!(Compare, "CompareExpr", |node, c| c
    .node(&*node.lhs)
    .token(&node.op_token)
    .opt_token(node.second_op_token.as_ref())
    .node(&*node.rhs));

/// `body if condition else orelse`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfExpr {
    pub range: TextRange,
    pub body: Box<Expr>,
    pub if_token: Token,
    pub condition: Box<Expr>,
    pub else_token: Token,
    pub orelse: Box<Expr>,
}

ast_node!(IfExpr, "IfExpr", |node, c| c
    .node(&*node.body)
    .token(&node.if_token)
    .node(&*node.condition)
    .token(&node.else_token)
    .node(&*node.orelse));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lambda {
    pub range: TextRange,
    pub lambda_token: Token,
    pub parameters: Option<Parameters>,
    pub colon: Token,
    pub body: Box<Expr>,
    /// False for the `lambda` form allowed in comprehension conditions, whose
    /// body may not be a conditional expression.
    pub allows_conditional: bool,
}

ast_node!(Lambda, "Lambda", |node, c| c
    .token(&node.lambda_token)
    .opt_node(node.parameters.as_ref())
    .token(&node.colon)
    .node(&*node.body));

/// `target := value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedExpr {
    pub range: TextRange,
    pub target: Box<Expr>,
    pub colon_eq: Token,
    pub value: Box<Expr>,
}

ast_node!(NamedExpr, "NamedExpr", |node, c| c
    .node(&*node.target)
    .token(&node.colon_eq)
    .node(&*node.value));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Yield {
    pub range: TextRange,
    pub yield_token: Token,
    pub value: Option<Box<Expr>>,
}

ast_node!(Yield, "Yield", |node, c| c.token(&node.yield_token).opt_node(node.value.as_deref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YieldFrom {
    pub range: TextRange,
    pub yield_token: Token,
    pub from_token: Token,
    pub value: Box<Expr>,
}

ast_node!(YieldFrom, "YieldFrom", |node, c| c
    .token(&node.yield_token)
    .token(&node.from_token)
    .node(&*node.value));
