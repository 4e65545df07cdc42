use text_size::TextRange;

use super::{AstNode, AugAssignOp, Call, Children, Expr, Pattern, Separated, SyntaxElement};
use crate::Token;

/// A whole source file. The end-of-input token keeps the trailing trivia.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub range: TextRange,
    pub body: Vec<Stmt>,
    pub eof: Token,
}

ast_node!(Module, "Module", |node, c| c.nodes(&node.body).token(&node.eof));

/// A standalone expression as accepted by `eval`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub range: TextRange,
    pub body: Expr,
    pub newlines: Vec<Token>,
    pub eof: Token,
}

ast_node!(Expression, "Expression", |node, c| c
    .node(&node.body)
    .tokens(&node.newlines)
    .token(&node.eof));

ast_enum! {
    pub enum Stmt {
        Simple(SimpleStmt),
        Empty(EmptyStmt),
        If(IfStmt),
        While(WhileStmt),
        For(ForStmt),
        Try(TryStmt),
        With(WithStmt),
        FunctionDef(FunctionDef),
        ClassDef(ClassDef),
        Decorated(Decorated),
        Async(AsyncStmt),
        Match(MatchStmt),
    }
}

/// One or more small statements separated by `;` on a single logical line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleStmt {
    pub range: TextRange,
    pub stmts: Separated<SmallStmt>,
    pub newline: Token,
}

ast_node!(SimpleStmt, "SimpleStmt", |node, c| c.separated(&node.stmts).token(&node.newline));

/// A lone NEWLINE token. The reference tokenizer folds blank lines into
/// trivia, but other cursors may hand them out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyStmt {
    pub range: TextRange,
    pub newline: Token,
}

ast_node!(EmptyStmt, "EmptyStmt", |node, c| c.token(&node.newline));

ast_enum! {
    pub enum SmallStmt {
        Expr(ExprStmt),
        Assign(AssignStmt),
        AnnAssign(AnnAssignStmt),
        AugAssign(AugAssignStmt),
        Del(DelStmt),
        Pass(PassStmt),
        Break(BreakStmt),
        Continue(ContinueStmt),
        Return(ReturnStmt),
        Raise(RaiseStmt),
        Import(ImportStmt),
        ImportFrom(ImportFromStmt),
        Global(GlobalStmt),
        Nonlocal(NonlocalStmt),
        Assert(AssertStmt),
        TypeAlias(TypeAliasStmt),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprStmt {
    pub range: TextRange,
    pub expr: Expr,
}

ast_node!(ExprStmt, "ExprStmt", |node, c| c.node(&node.expr));

/// `a = b = value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignStmt {
    pub range: TextRange,
    pub target: Expr,
    pub values: Vec<AssignValue>,
}

ast_node!(AssignStmt, "AssignStmt", |node, c| c.node(&node.target).nodes(&node.values));

/// `= value`, one link of an assignment chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignValue {
    pub range: TextRange,
    pub eq: Token,
    pub value: Expr,
}

ast_node!(AssignValue, "AssignValue", |node, c| c.token(&node.eq).node(&node.value));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnAssignStmt {
    pub range: TextRange,
    pub target: Expr,
    pub colon: Token,
    pub annotation: Expr,
    pub value: Option<AssignValue>,
}

ast_node!(AnnAssignStmt, "AnnAssignStmt", |node, c| c
    .node(&node.target)
    .token(&node.colon)
    .node(&node.annotation)
    .opt_node(node.value.as_ref()));

/// `target op= value`. Each operator is its own node kind, named after it
/// by [`AugAssignOp::node_name`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugAssignStmt {
    pub range: TextRange,
    pub target: Expr,
    pub op: AugAssignOp,
    pub op_token: Token,
    pub value: Expr,
}

impl AstNode for AugAssignStmt {
    fn range(&self) -> TextRange {
        self.range
    }

    fn name(&self) -> &'static str {
        self.op.node_name()
    }

    fn children(&self) -> Vec<SyntaxElement<'_>> {
        Children::new().node(&self.target).token(&self.op_token).node(&self.value).finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelStmt {
    pub range: TextRange,
    pub del_token: Token,
    pub targets: Expr,
}

ast_node!(DelStmt, "DelStmt", |node, c| c.token(&node.del_token).node(&node.targets));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassStmt {
    pub range: TextRange,
    pub token: Token,
}

ast_node!(PassStmt, "PassStmt", |node, c| c.token(&node.token));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakStmt {
    pub range: TextRange,
    pub token: Token,
}

ast_node!(BreakStmt, "BreakStmt", |node, c| c.token(&node.token));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinueStmt {
    pub range: TextRange,
    pub token: Token,
}

ast_node!(ContinueStmt, "ContinueStmt", |node, c| c.token(&node.token));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStmt {
    pub range: TextRange,
    pub return_token: Token,
    pub value: Option<Expr>,
}

ast_node!(ReturnStmt, "ReturnStmt", |node, c| c
    .token(&node.return_token)
    .opt_node(node.value.as_ref()));

/// `raise [exception [from cause]]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaiseStmt {
    pub range: TextRange,
    pub raise_token: Token,
    pub exception: Option<Expr>,
    pub from_token: Option<Token>,
    pub cause: Option<Expr>,
}

ast_node!(RaiseStmt, "RaiseStmt", |node, c| c
    .token(&node.raise_token)
    .opt_node(node.exception.as_ref())
    .opt_token(node.from_token.as_ref())
    .opt_node(node.cause.as_ref()));

/// `import a.b as c, d`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportStmt {
    pub range: TextRange,
    pub import_token: Token,
    pub names: Separated<DottedAsName>,
}

ast_node!(ImportStmt, "ImportStmt", |node, c| c
    .token(&node.import_token)
    .separated(&node.names));

/// `from .module import names`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportFromStmt {
    pub range: TextRange,
    pub from_token: Token,
    /// `.` and `...` tokens in front of the module name.
    pub dots: Vec<Token>,
    pub module: Option<DottedName>,
    pub import_token: Token,
    pub names: ImportNames,
}

impl ImportFromStmt {
    /// Relative import level: every `.` counts one, every `...` three.
    pub fn level(&self) -> u32 {
        self.dots
            .iter()
            .map(|dot| if dot.kind == crate::SyntaxKind::ELLIPSIS { 3 } else { 1 })
            .sum()
    }
}

impl super::AstNode for ImportFromStmt {
    fn range(&self) -> TextRange {
        self.range
    }

    fn name(&self) -> &'static str {
        "ImportFromStmt"
    }

    fn children(&self) -> Vec<super::SyntaxElement<'_>> {
        let children = super::Children::new()
            .token(&self.from_token)
            .tokens(&self.dots)
            .opt_node(self.module.as_ref())
            .token(&self.import_token);
        let children = match &self.names {
            ImportNames::Star(star) => children.token(star),
            ImportNames::List(list) => children.node(list),
        };
        children.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportNames {
    Star(Token),
    List(ImportList),
}

/// Imported names, parenthesized or bare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportList {
    pub range: TextRange,
    pub lparen: Option<Token>,
    pub names: Separated<ImportAsName>,
    pub rparen: Option<Token>,
}

ast_node!(ImportList, "ImportList", |node, c| c
    .opt_token(node.lparen.as_ref())
    .separated(&node.names)
    .opt_token(node.rparen.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportAsName {
    pub range: TextRange,
    pub name: Token,
    pub alias: Option<Alias>,
}

ast_node!(ImportAsName, "ImportAsName", |node, c| c
    .token(&node.name)
    .opt_node(node.alias.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DottedAsName {
    pub range: TextRange,
    pub name: DottedName,
    pub alias: Option<Alias>,
}

ast_node!(DottedAsName, "DottedAsName", |node, c| c
    .node(&node.name)
    .opt_node(node.alias.as_ref()));

/// Names joined by `.`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DottedName {
    pub range: TextRange,
    pub names: Separated<Token>,
}

impl DottedName {
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.names.iter().filter_map(Token::value).collect();
        parts.join(".")
    }
}

ast_node!(DottedName, "DottedName", |node, c| c.separated_tokens(&node.names));

/// `as name`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    pub range: TextRange,
    pub as_token: Token,
    pub name: Token,
}

ast_node!(Alias, "Alias", |node, c| c.token(&node.as_token).token(&node.name));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalStmt {
    pub range: TextRange,
    pub global_token: Token,
    pub names: Separated<Token>,
}

ast_node!(GlobalStmt, "GlobalStmt", |node, c| c
    .token(&node.global_token)
    .separated_tokens(&node.names));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonlocalStmt {
    pub range: TextRange,
    pub nonlocal_token: Token,
    pub names: Separated<Token>,
}

ast_node!(NonlocalStmt, "NonlocalStmt", |node, c| c
    .token(&node.nonlocal_token)
    .separated_tokens(&node.names));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertStmt {
    pub range: TextRange,
    pub assert_token: Token,
    pub test: Expr,
    pub comma: Option<Token>,
    pub message: Option<Expr>,
}

ast_node!(AssertStmt, "AssertStmt", |node, c| c
    .token(&node.assert_token)
    .node(&node.test)
    .opt_token(node.comma.as_ref())
    .opt_node(node.message.as_ref()));

/// `type Name[T] = value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasStmt {
    pub range: TextRange,
    pub type_token: Token,
    pub name: Token,
    pub type_params: Option<TypeParams>,
    pub eq: Token,
    pub value: Expr,
}

ast_node!(TypeAliasStmt, "TypeAliasStmt", |node, c| c
    .token(&node.type_token)
    .token(&node.name)
    .opt_node(node.type_params.as_ref())
    .token(&node.eq)
    .node(&node.value));

ast_enum! {
    /// The body of a compound statement.
    pub enum Suite {
        Simple(SimpleStmt),
        Block(Block),
    }
}

/// An indented block: NEWLINE INDENT statements DEDENT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub range: TextRange,
    pub newline: Token,
    pub indent: Token,
    pub body: Vec<Stmt>,
    pub dedent: Token,
}

ast_node!(Block, "Block", |node, c| c
    .token(&node.newline)
    .token(&node.indent)
    .nodes(&node.body)
    .token(&node.dedent));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStmt {
    pub range: TextRange,
    pub if_token: Token,
    pub condition: Expr,
    pub colon: Token,
    pub body: Suite,
    pub elif_clauses: Vec<ElifClause>,
    pub else_clause: Option<ElseClause>,
}

ast_node!(IfStmt, "IfStmt", |node, c| c
    .token(&node.if_token)
    .node(&node.condition)
    .token(&node.colon)
    .node(&node.body)
    .nodes(&node.elif_clauses)
    .opt_node(node.else_clause.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElifClause {
    pub range: TextRange,
    pub elif_token: Token,
    pub condition: Expr,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(ElifClause, "ElifClause", |node, c| c
    .token(&node.elif_token)
    .node(&node.condition)
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElseClause {
    pub range: TextRange,
    pub else_token: Token,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(ElseClause, "ElseClause", |node, c| c
    .token(&node.else_token)
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhileStmt {
    pub range: TextRange,
    pub while_token: Token,
    pub condition: Expr,
    pub colon: Token,
    pub body: Suite,
    pub else_clause: Option<ElseClause>,
}

ast_node!(WhileStmt, "WhileStmt", |node, c| c
    .token(&node.while_token)
    .node(&node.condition)
    .token(&node.colon)
    .node(&node.body)
    .opt_node(node.else_clause.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForStmt {
    pub range: TextRange,
    pub for_token: Token,
    pub target: Expr,
    pub in_token: Token,
    pub iter: Expr,
    pub colon: Token,
    pub body: Suite,
    pub else_clause: Option<ElseClause>,
}

ast_node!(ForStmt, "ForStmt", |node, c| c
    .token(&node.for_token)
    .node(&node.target)
    .token(&node.in_token)
    .node(&node.iter)
    .token(&node.colon)
    .node(&node.body)
    .opt_node(node.else_clause.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TryStmt {
    pub range: TextRange,
    pub try_token: Token,
    pub colon: Token,
    pub body: Suite,
    pub handlers: Vec<ExceptHandler>,
    pub else_clause: Option<ElseClause>,
    pub finally_clause: Option<FinallyClause>,
}

ast_node!(TryStmt, "TryStmt", |node, c| c
    .token(&node.try_token)
    .token(&node.colon)
    .node(&node.body)
    .nodes(&node.handlers)
    .opt_node(node.else_clause.as_ref())
    .opt_node(node.finally_clause.as_ref()));

/// `except [*] [type [as name]]: body`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptHandler {
    pub range: TextRange,
    pub except_token: Token,
    pub star: Option<Token>,
    pub type_expr: Option<Expr>,
    pub alias: Option<Alias>,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(ExceptHandler, "ExceptHandler", |node, c| c
    .token(&node.except_token)
    .opt_token(node.star.as_ref())
    .opt_node(node.type_expr.as_ref())
    .opt_node(node.alias.as_ref())
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinallyClause {
    pub range: TextRange,
    pub finally_token: Token,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(FinallyClause, "FinallyClause", |node, c| c
    .token(&node.finally_token)
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithStmt {
    pub range: TextRange,
    pub with_token: Token,
    /// Parentheses around the whole item list, as in
    /// `with (open(a) as f, open(b) as g):`.
    pub lparen: Option<Token>,
    pub items: Separated<WithItem>,
    pub rparen: Option<Token>,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(WithStmt, "WithStmt", |node, c| c
    .token(&node.with_token)
    .opt_token(node.lparen.as_ref())
    .separated(&node.items)
    .opt_token(node.rparen.as_ref())
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithItem {
    pub range: TextRange,
    pub context: Expr,
    pub as_token: Option<Token>,
    pub target: Option<Expr>,
}

ast_node!(WithItem, "WithItem", |node, c| c
    .node(&node.context)
    .opt_token(node.as_token.as_ref())
    .opt_node(node.target.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub range: TextRange,
    pub def_token: Token,
    pub name: Token,
    pub type_params: Option<TypeParams>,
    pub parameters: Parameters,
    pub arrow: Option<Token>,
    pub returns: Option<Expr>,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(FunctionDef, "FunctionDef", |node, c| c
    .token(&node.def_token)
    .token(&node.name)
    .opt_node(node.type_params.as_ref())
    .node(&node.parameters)
    .opt_token(node.arrow.as_ref())
    .opt_node(node.returns.as_ref())
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub range: TextRange,
    pub class_token: Token,
    pub name: Token,
    pub type_params: Option<TypeParams>,
    pub arguments: Option<Call>,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(ClassDef, "ClassDef", |node, c| c
    .token(&node.class_token)
    .token(&node.name)
    .opt_node(node.type_params.as_ref())
    .opt_node(node.arguments.as_ref())
    .token(&node.colon)
    .node(&node.body));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decorated {
    pub range: TextRange,
    pub decorators: Vec<Decorator>,
    pub definition: Box<Stmt>,
}

ast_node!(Decorated, "Decorated", |node, c| c
    .nodes(&node.decorators)
    .node(&*node.definition));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decorator {
    pub range: TextRange,
    pub at: Token,
    pub expr: Expr,
    pub newline: Token,
}

ast_node!(Decorator, "Decorator", |node, c| c
    .token(&node.at)
    .node(&node.expr)
    .token(&node.newline));

/// `async def`, `async for` or `async with`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncStmt {
    pub range: TextRange,
    pub async_token: Token,
    pub stmt: Box<Stmt>,
}

ast_node!(AsyncStmt, "AsyncStmt", |node, c| c.token(&node.async_token).node(&*node.stmt));

/// Parameter list of a function or lambda. Lambdas have no parentheses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    pub range: TextRange,
    pub lparen: Option<Token>,
    pub items: Separated<Parameter>,
    pub rparen: Option<Token>,
}

ast_node!(Parameters, "Parameters", |node, c| c
    .opt_token(node.lparen.as_ref())
    .separated(&node.items)
    .opt_token(node.rparen.as_ref()));

ast_enum! {
    pub enum Parameter {
        Plain(Param),
        Star(StarParam),
        DoubleStar(DoubleStarParam),
        Slash(SlashParam),
    }
}

/// `name[: annotation][= default]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub range: TextRange,
    pub name: Token,
    pub colon: Option<Token>,
    pub annotation: Option<Expr>,
    pub eq: Option<Token>,
    pub default: Option<Expr>,
}

ast_node!(Param, "Param", |node, c| c
    .token(&node.name)
    .opt_token(node.colon.as_ref())
    .opt_node(node.annotation.as_ref())
    .opt_token(node.eq.as_ref())
    .opt_node(node.default.as_ref()));

/// `*args`, or a bare `*` that starts keyword-only parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StarParam {
    pub range: TextRange,
    pub star: Token,
    pub param: Option<Param>,
}

ast_node!(StarParam, "StarParam", |node, c| c.token(&node.star).opt_node(node.param.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleStarParam {
    pub range: TextRange,
    pub double_star: Token,
    pub param: Param,
}

ast_node!(DoubleStarParam, "DoubleStarParam", |node, c| c
    .token(&node.double_star)
    .node(&node.param));

/// The `/` marking the end of positional-only parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashParam {
    pub range: TextRange,
    pub slash: Token,
}

ast_node!(SlashParam, "SlashParam", |node, c| c.token(&node.slash));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParams {
    pub range: TextRange,
    pub lbracket: Token,
    pub params: Separated<TypeParam>,
    pub rbracket: Token,
}

ast_node!(TypeParams, "TypeParams", |node, c| c
    .token(&node.lbracket)
    .separated(&node.params)
    .token(&node.rbracket));

/// `T: bound = default`, `*Ts` or `**P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
    pub range: TextRange,
    pub prefix: Option<Token>,
    pub name: Token,
    pub colon: Option<Token>,
    pub bound: Option<Expr>,
    pub eq: Option<Token>,
    pub default: Option<Expr>,
}

ast_node!(TypeParam, "TypeParam", |node, c| c
    .opt_token(node.prefix.as_ref())
    .token(&node.name)
    .opt_token(node.colon.as_ref())
    .opt_node(node.bound.as_ref())
    .opt_token(node.eq.as_ref())
    .opt_node(node.default.as_ref()));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchStmt {
    pub range: TextRange,
    pub match_token: Token,
    pub subject: Expr,
    pub colon: Token,
    pub newline: Token,
    pub indent: Token,
    pub cases: Vec<CaseBlock>,
    pub dedent: Token,
}

ast_node!(MatchStmt, "MatchStmt", |node, c| c
    .token(&node.match_token)
    .node(&node.subject)
    .token(&node.colon)
    .token(&node.newline)
    .token(&node.indent)
    .nodes(&node.cases)
    .token(&node.dedent));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseBlock {
    pub range: TextRange,
    pub case_token: Token,
    pub pattern: Pattern,
    pub if_token: Option<Token>,
    pub guard: Option<Expr>,
    pub colon: Token,
    pub body: Suite,
}

ast_node!(CaseBlock, "CaseBlock", |node, c| c
    .token(&node.case_token)
    .node(&node.pattern)
    .opt_token(node.if_token.as_ref())
    .opt_node(node.guard.as_ref())
    .token(&node.colon)
    .node(&node.body));
