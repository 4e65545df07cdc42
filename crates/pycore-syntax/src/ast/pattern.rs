use text_size::TextRange;

use super::{Expr, Separated};
use crate::Token;

ast_enum! {
    /// A pattern in a `case` clause.
    pub enum Pattern {
        Literal(LiteralPattern),
        Value(ValuePattern),
        Capture(CapturePattern),
        Wildcard(WildcardPattern),
        Group(GroupPattern),
        Sequence(SequencePattern),
        Star(StarPattern),
        Mapping(MappingPattern),
        Class(ClassPattern),
        Or(OrPattern),
        As(AsPattern),
    }
}

/// Numbers (optionally signed or complex), strings, `None`, `True`, `False`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralPattern {
    pub range: TextRange,
    pub expr: Expr,
}

ast_node!(LiteralPattern, "LiteralPattern", |node, c| c.node(&node.expr));

/// A dotted name such as `Color.RED`, compared by equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValuePattern {
    pub range: TextRange,
    pub expr: Expr,
}

ast_node!(ValuePattern, "ValuePattern", |node, c| c.node(&node.expr));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturePattern {
    pub range: TextRange,
    pub name: Token,
}

ast_node!(CapturePattern, "CapturePattern", |node, c| c.token(&node.name));

/// `_`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardPattern {
    pub range: TextRange,
    pub underscore: Token,
}

ast_node!(WildcardPattern, "WildcardPattern", |node, c| c.token(&node.underscore));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPattern {
    pub range: TextRange,
    pub lparen: Token,
    pub pattern: Box<Pattern>,
    pub rparen: Token,
}

ast_node!(GroupPattern, "GroupPattern", |node, c| c
    .token(&node.lparen)
    .node(&*node.pattern)
    .token(&node.rparen));

/// `[a, b]`, `(a, b)` or the open form `a, b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePattern {
    pub range: TextRange,
    pub open: Option<Token>,
    pub patterns: Separated<Pattern>,
    pub close: Option<Token>,
}

ast_node!(SequencePattern, "SequencePattern", |node, c| c
    .opt_token(node.open.as_ref())
    .separated(&node.patterns)
    .opt_token(node.close.as_ref()));

/// `*rest` inside a sequence pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StarPattern {
    pub range: TextRange,
    pub star: Token,
    pub name: Token,
}

ast_node!(StarPattern, "StarPattern", |node, c| c.token(&node.star).token(&node.name));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingPattern {
    pub range: TextRange,
    pub lbrace: Token,
    pub items: Separated<MappingItem>,
    pub rbrace: Token,
}

ast_node!(MappingPattern, "MappingPattern", |node, c| c
    .token(&node.lbrace)
    .separated(&node.items)
    .token(&node.rbrace));

ast_enum! {
    pub enum MappingItem {
        Entry(MappingEntry),
        Rest(MappingRest),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub range: TextRange,
    pub key: Pattern,
    pub colon: Token,
    pub pattern: Pattern,
}

ast_node!(MappingEntry, "MappingEntry", |node, c| c
    .node(&node.key)
    .token(&node.colon)
    .node(&node.pattern));

/// `**rest`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingRest {
    pub range: TextRange,
    pub double_star: Token,
    pub name: Token,
}

ast_node!(MappingRest, "MappingRest", |node, c| c.token(&node.double_star).token(&node.name));

/// `Point(x, y=0)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassPattern {
    pub range: TextRange,
    pub class: Expr,
    pub lparen: Token,
    pub arguments: Separated<PatternArgument>,
    pub rparen: Token,
}

ast_node!(ClassPattern, "ClassPattern", |node, c| c
    .node(&node.class)
    .token(&node.lparen)
    .separated(&node.arguments)
    .token(&node.rparen));

ast_enum! {
    pub enum PatternArgument {
        Positional(Pattern),
        Keyword(KeywordPattern),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordPattern {
    pub range: TextRange,
    pub name: Token,
    pub eq: Token,
    pub pattern: Pattern,
}

ast_node!(KeywordPattern, "KeywordPattern", |node, c| c
    .token(&node.name)
    .token(&node.eq)
    .node(&node.pattern));

/// Alternatives separated by `|`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrPattern {
    pub range: TextRange,
    pub patterns: Separated<Pattern>,
}

ast_node!(OrPattern, "OrPattern", |node, c| c.separated(&node.patterns));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsPattern {
    pub range: TextRange,
    pub pattern: Box<Pattern>,
    pub as_token: Token,
    pub name: Token,
}

ast_node!(AsPattern, "AsPattern", |node, c| c
    .node(&*node.pattern)
    .token(&node.as_token)
    .token(&node.name));
