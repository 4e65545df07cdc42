//! Typed concrete syntax tree.
//!
//! Every node owns the tokens it consumed, so walking a tree in source order
//! yields every token the parser saw, and their texts concatenate back to the
//! input.

use text_size::TextRange;

use crate::Token;

/// Implements [`AstNode`] for a node struct with a `range` field.
///
/// The closure-like tail lists the children in source order through a
/// [`Children`] builder.
macro_rules! ast_node {
    ($ty:ident, $name:literal, |$node:ident, $children:ident| $body:expr) => {
        impl $crate::ast::AstNode for $ty {
            fn range(&self) -> ::text_size::TextRange {
                self.range
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn children(&self) -> Vec<$crate::ast::SyntaxElement<'_>> {
                let $node = self;
                let $children = $crate::ast::Children::new();
                ($body).finish()
            }
        }
    };
}

/// Declares a sum of node types that delegates [`AstNode`] to its variants.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::ast::AstNode for $name {
            fn range(&self) -> ::text_size::TextRange {
                match self {
                    $(Self::$variant(node) => $crate::ast::AstNode::range(node)),+
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(node) => $crate::ast::AstNode::name(node)),+
                }
            }

            fn children(&self) -> Vec<$crate::ast::SyntaxElement<'_>> {
                match self {
                    $(Self::$variant(node) => $crate::ast::AstNode::children(node)),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

mod expr;
mod ops;
mod pattern;
mod stmt;

pub use expr::*;
pub use ops::{AugAssignOp, BinaryOp, CompareOp, ConstantKind, ComprehensionKind, UnaryOp};
pub use pattern::*;
pub use stmt::*;

/// Common interface of all syntax nodes.
pub trait AstNode {
    /// Source range from the first token's start to the last token's end,
    /// excluding the leading trivia of the first token.
    fn range(&self) -> TextRange;

    /// Node kind name, e.g. `BinaryExpr` or `IfStmt`.
    fn name(&self) -> &'static str;

    /// Child nodes and tokens in source order.
    fn children(&self) -> Vec<SyntaxElement<'_>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

pub type SyntaxElement<'a> = NodeOrToken<&'a dyn AstNode, &'a Token>;

/// A list of items with the separator tokens between them.
///
/// `separators` is either one shorter than `items`, or of equal length when
/// the list ends with a trailing separator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Separated<T> {
    pub items: Vec<T>,
    pub separators: Vec<Token>,
}

impl<T> Default for Separated<T> {
    fn default() -> Self {
        Self { items: Vec::new(), separators: Vec::new() }
    }
}

impl<T> Separated<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(item: T) -> Self {
        Self { items: vec![item], separators: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn push_separator(&mut self, separator: Token) {
        self.separators.push(separator);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn has_trailing_separator(&self) -> bool {
        !self.separators.is_empty() && self.separators.len() == self.items.len()
    }

    /// Each item with the separator that follows it, if any.
    pub fn pairs(&self) -> impl Iterator<Item = (&T, Option<&Token>)> {
        self.items.iter().enumerate().map(|(index, item)| (item, self.separators.get(index)))
    }
}

impl<'a, T> IntoIterator for &'a Separated<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(crate) struct Children<'a> {
    elements: Vec<SyntaxElement<'a>>,
}

impl<'a> Children<'a> {
    pub(crate) fn new() -> Self {
        Self { elements: Vec::new() }
    }

    pub(crate) fn token(mut self, token: &'a Token) -> Self {
        self.elements.push(NodeOrToken::Token(token));
        self
    }

    pub(crate) fn opt_token(self, token: Option<&'a Token>) -> Self {
        match token {
            Some(token) => self.token(token),
            None => self,
        }
    }

    pub(crate) fn tokens(mut self, tokens: &'a [Token]) -> Self {
        self.elements.extend(tokens.iter().map(NodeOrToken::Token));
        self
    }

    pub(crate) fn node(mut self, node: &'a dyn AstNode) -> Self {
        self.elements.push(NodeOrToken::Node(node));
        self
    }

    pub(crate) fn opt_node<N: AstNode>(self, node: Option<&'a N>) -> Self {
        match node {
            Some(node) => self.node(node),
            None => self,
        }
    }

    pub(crate) fn nodes<N: AstNode>(mut self, nodes: &'a [N]) -> Self {
        self.elements.extend(nodes.iter().map(|node| NodeOrToken::Node(node as &dyn AstNode)));
        self
    }

    pub(crate) fn separated<N: AstNode>(mut self, list: &'a Separated<N>) -> Self {
        for (item, separator) in list.pairs() {
            self.elements.push(NodeOrToken::Node(item));
            if let Some(separator) = separator {
                self.elements.push(NodeOrToken::Token(separator));
            }
        }
        self
    }

    pub(crate) fn separated_tokens(mut self, list: &'a Separated<Token>) -> Self {
        for (item, separator) in list.pairs() {
            self.elements.push(NodeOrToken::Token(item));
            if let Some(separator) = separator {
                self.elements.push(NodeOrToken::Token(separator));
            }
        }
        self
    }

    pub(crate) fn finish(self) -> Vec<SyntaxElement<'a>> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::SyntaxKind;

    fn comma(at: u32) -> Token {
        Token::new(SyntaxKind::COMMA, TextRange::new(at.into(), (at + 1).into()))
    }

    #[test]
    fn trailing_separator() {
        let mut list = Separated::single(1);
        assert!(!list.has_trailing_separator());

        list.push_separator(comma(1));
        assert!(list.has_trailing_separator());

        list.push(2);
        assert!(!list.has_trailing_separator());
        assert_eq!(list.len(), 2);

        let pairs: Vec<_> = list.pairs().map(|(item, sep)| (*item, sep.is_some())).collect();
        assert_eq!(pairs, [(1, true), (2, false)]);
    }
}
