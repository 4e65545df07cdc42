//! Traversals over a finished tree.

use std::fmt::Write as _;

use crate::Token;
use crate::ast::{AstNode, NodeOrToken, SyntaxElement};

/// Depth-first traversal yielding an `Enter` and a `Leave` event per node.
pub struct Preorder<'a> {
    start: Option<&'a dyn AstNode>,
    stack: Vec<Frame<'a>>,
}

struct Frame<'a> {
    node: &'a dyn AstNode,
    children: std::vec::IntoIter<SyntaxElement<'a>>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a dyn AstNode) -> Self {
        Self { node, children: node.children().into_iter() }
    }
}

impl<'a> Preorder<'a> {
    pub fn new(start: &'a dyn AstNode) -> Self {
        Self { start: Some(start), stack: Vec::new() }
    }

    /// Skips the children of the most recently entered node.
    pub fn skip_subtree(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children = Vec::new().into_iter();
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push(Frame::new(start));
            return Some(WalkEvent::Enter(start));
        }

        loop {
            let frame = self.stack.last_mut()?;
            match frame.children.next() {
                Some(NodeOrToken::Node(child)) => {
                    self.stack.push(Frame::new(child));
                    return Some(WalkEvent::Enter(child));
                }
                Some(NodeOrToken::Token(_)) => {}
                None => {
                    let frame = self.stack.pop()?;
                    return Some(WalkEvent::Leave(frame.node));
                }
            }
        }
    }
}

pub enum WalkEvent<'a> {
    Enter(&'a dyn AstNode),
    Leave(&'a dyn AstNode),
}

/// Every token under `root`, in source order.
pub fn tokens(root: &dyn AstNode) -> Vec<&Token> {
    fn collect<'a>(node: &'a dyn AstNode, out: &mut Vec<&'a Token>) {
        for child in node.children() {
            match child {
                NodeOrToken::Node(node) => collect(node, out),
                NodeOrToken::Token(token) => out.push(token),
            }
        }
    }

    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

/// Node kind names in preorder.
pub fn node_kinds(root: &dyn AstNode) -> Vec<&'static str> {
    Preorder::new(root)
        .filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node.name()),
            WalkEvent::Leave(_) => None,
        })
        .collect()
}

/// Reassembles the source text covered by `root` from its tokens, trivia
/// included.
///
/// For a module this is exactly the text it was parsed from.
pub fn text(root: &dyn AstNode) -> String {
    tokens(root).into_iter().map(|token| &*token.text).collect()
}

/// Renders the tree one element per line, indented by depth.
///
/// Nodes print as `Name@start..end`, tokens as `KIND@start..end "text"`.
pub fn dump(root: &dyn AstNode) -> String {
    let mut out = String::new();
    dump_node(root, 0, &mut out);
    out
}

fn dump_node(node: &dyn AstNode, depth: usize, out: &mut String) {
    let range = node.range();
    let _ = writeln!(
        out,
        "{:indent$}{}@{}..{}",
        "",
        node.name(),
        u32::from(range.start()),
        u32::from(range.end()),
        indent = depth * 2
    );

    for child in node.children() {
        match child {
            NodeOrToken::Node(child) => dump_node(child, depth + 1, out),
            NodeOrToken::Token(token) => {
                let _ = writeln!(
                    out,
                    "{:indent$}{:?}@{}..{} {:?}",
                    "",
                    token.kind,
                    u32::from(token.range.start()),
                    u32::from(token.range.end()),
                    token.text_trimmed(),
                    indent = (depth + 1) * 2
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use text_size::{TextRange, TextSize};

    use super::*;
    use crate::SyntaxKind::{self, *};
    use crate::ast::{
        Binary, BinaryOp, Expr, ExprStmt, Module, Name, Number, Separated, SimpleStmt, SmallStmt,
        Stmt,
    };
    use crate::{TriviaPiece, TriviaPieceKind};

    fn token(kind: SyntaxKind, start: u32, end: u32, text: &str) -> Token {
        Token::new(kind, TextRange::new(start.into(), end.into())).with_text(text)
    }

    fn space() -> TriviaPiece {
        TriviaPiece::new(TriviaPieceKind::Whitespace, TextSize::new(1))
    }

    // Hand-built tree for `a + 1 # done`.
    fn sum() -> Module {
        let number = token(NUMBER, 4, 5, " 1").with_leading([space()]);
        let expr = Expr::Binary(Binary {
            range: TextRange::new(0.into(), 5.into()),
            lhs: Box::new(Expr::Name(Name::new(token(NAME, 0, 1, "a").with_value("a")))),
            op: BinaryOp::Add,
            op_token: token(PLUS, 2, 3, " +").with_leading([space()]),
            rhs: Box::new(Expr::Number(Number { range: number.range, token: number })),
        });
        let stmt = ExprStmt { range: expr.range(), expr };
        let simple = SimpleStmt {
            range: stmt.range,
            stmts: Separated::single(SmallStmt::Expr(stmt)),
            newline: token(NEWLINE, 5, 5, ""),
        };
        let eof = Token::eof(TextSize::new(12))
            .with_leading([space(), TriviaPiece::new(TriviaPieceKind::Comment, TextSize::new(6))])
            .with_text(" # done");
        Module { range: TextRange::new(0.into(), 12.into()), body: vec![Stmt::Simple(simple)], eof }
    }

    #[test]
    fn text_restores_trivia() {
        let module = sum();
        assert_eq!(text(&module), "a + 1 # done");
        assert_eq!(tokens(&module).len(), 5);
    }

    #[test]
    fn preorder_enters_and_leaves() {
        let module = sum();
        let mut depth = 0;
        let mut max_depth = 0;
        for event in Preorder::new(&module) {
            match event {
                WalkEvent::Enter(_) => depth += 1,
                WalkEvent::Leave(_) => depth -= 1,
            }
            max_depth = max_depth.max(depth);
        }
        assert_eq!(depth, 0);
        assert_eq!(max_depth, 5);
        assert_eq!(
            node_kinds(&module),
            ["Module", "SimpleStmt", "ExprStmt", "BinaryExpr", "Name", "Number"]
        );
    }

    #[test]
    fn skip_subtree_leaves_immediately() {
        let module = sum();
        let mut preorder = Preorder::new(&module);
        let mut entered = Vec::new();
        while let Some(event) = preorder.next() {
            if let WalkEvent::Enter(node) = event {
                entered.push(node.name());
                if node.name() == "BinaryExpr" {
                    preorder.skip_subtree();
                }
            }
        }
        assert_eq!(entered, ["Module", "SimpleStmt", "ExprStmt", "BinaryExpr"]);
    }

    #[test]
    fn dump_format() {
        let module = sum();
        expect![[r#"
            Module@0..12
              SimpleStmt@0..5
                ExprStmt@0..5
                  BinaryExpr@0..5
                    Name@0..1
                      NAME@0..1 "a"
                    PLUS@2..3 "+"
                    Number@4..5
                      NUMBER@4..5 "1"
                NEWLINE@5..5 ""
              EOF@12..12 ""
        "#]]
        .assert_eq(&dump(&module));
    }
}
