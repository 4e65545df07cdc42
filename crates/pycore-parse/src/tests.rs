use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use pycore_syntax::ast::{AstNode, Module, SimpleStmt, SmallStmt, Stmt};
use pycore_syntax::{BufferedCursor, SyntaxKind, Token, TriviaPieceKind, walk};
use pycore_tokenizer::tokenize;

use crate::{FlowLevel, Mode, ParseError, ParseResult, Parsed, parse, parse_statement};

mod exprs;
mod property_tests;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "py" {
                    let expected = path.with_extension("ast");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn module(text: &str) -> Module {
    match parse(text, Mode::Module) {
        Ok(Parsed::Module(module)) => module,
        Ok(Parsed::Expression(_)) => unreachable!("module mode yields a module"),
        Err(error) => panic!("failed to parse {text:?}: {error}"),
    }
}

pub(crate) fn module_error(text: &str) -> ParseError {
    match parse(text, Mode::Module) {
        Ok(_) => panic!("expected {text:?} to fail"),
        Err(error) => error,
    }
}

/// The only small statement of a one-line module.
pub(crate) fn small_stmt(text: &str) -> SmallStmt {
    let mut module = module(text);
    assert_eq!(module.body.len(), 1, "{text:?}");
    match module.body.pop() {
        Some(Stmt::Simple(SimpleStmt { mut stmts, .. })) => {
            assert_eq!(stmts.len(), 1, "{text:?}");
            stmts.items.pop().expect("one statement")
        }
        other => panic!("expected a simple statement, got {other:?}"),
    }
}

pub(crate) fn statement(text: &str, flow: FlowLevel) -> ParseResult<Stmt> {
    let mut cursor = BufferedCursor::new(tokenize(text));
    parse_statement(&mut cursor, flow)
}

#[test]
fn parse_test_data() {
    init_tracing();

    for case in TestCase::list() {
        let actual = match parse(&case.text, Mode::Module) {
            Ok(Parsed::Module(module)) => walk::dump(&module),
            Ok(Parsed::Expression(expression)) => walk::dump(&expression),
            Err(error) => {
                format!("error at {}: {}\n", u32::from(error.offset()), error.message())
            }
        };
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn test_data_round_trips() {
    for case in TestCase::list() {
        let Ok(Parsed::Module(module)) = parse(&case.text, Mode::Module) else {
            continue;
        };
        assert_eq!(walk::text(&module), case.text, "{}", case.input.display());
    }
}

#[test]
fn module_keeps_trailing_trivia() {
    let text = "pass\n\n# the end\n";
    let module = module(text);
    assert_eq!(module.eof.leading.len(), 3);
    assert_eq!(walk::text(&module), text);
}

#[test]
fn tree_owns_its_text() {
    let text = String::from("x = 1  # hello world\n");
    let module = module(&text);
    drop(text);

    assert_eq!(walk::text(&module), "x = 1  # hello world\n");
    let comments: Vec<_> = walk::tokens(&module)
        .into_iter()
        .flat_map(|token| token.trivia())
        .filter(|(kind, _)| *kind == TriviaPieceKind::Comment)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(comments, ["# hello world"]);
}

#[test]
fn raw_string_spelling_survives() {
    let text = "s = rb'\\x00' f\"{a}\"\n";
    let module = module(text);
    let strings: Vec<_> = walk::tokens(&module)
        .into_iter()
        .filter(|token| token.kind == SyntaxKind::STRING)
        .map(Token::text_trimmed)
        .collect();
    assert_eq!(strings, ["rb'\\x00'", "f\"{a}\""]);
    assert_eq!(walk::text(&module), text);
}

#[test]
fn empty_module() {
    for text in ["", "\n\n", "# nothing here", "   \n"] {
        let module = module(text);
        assert!(module.body.is_empty(), "{text:?}");
        assert_eq!(walk::text(&module), text);
    }
}

#[test]
fn node_ranges_exclude_leading_trivia() {
    let text = "  # lead\nx = 1\n";
    let module = module(text);
    assert_eq!(u32::from(module.range().start()), 9);
    let Stmt::Simple(simple) = &module.body[0] else { panic!("expected simple statement") };
    assert_eq!(&text[simple.range], "x = 1\n");
}

#[test]
fn expression_mode() {
    let text = "a, b if c else d\n\n";
    let Ok(Parsed::Expression(expression)) = parse(text, Mode::Expression) else {
        panic!("expected an expression");
    };
    assert!(expression.body.is_bare_tuple());
    assert_eq!(walk::text(&expression), text);
    assert_eq!(
        walk::node_kinds(&expression),
        ["Expression", "Tuple", "Name", "IfExpr", "Name", "Name", "Name"]
    );
}

#[test]
fn expression_mode_rejects_statements() {
    let error = parse("x = 1", Mode::Expression).unwrap_err();
    assert_eq!(u32::from(error.offset()), 2);
    assert!(!error.is_internal());
}

#[test]
fn parse_statement_leaves_rest_of_input() {
    let mut cursor = BufferedCursor::new(tokenize("x = 1\ny = 2\n"));
    let first = parse_statement(&mut cursor, FlowLevel::TOP_LEVEL).unwrap();
    let second = parse_statement(&mut cursor, FlowLevel::TOP_LEVEL).unwrap();
    assert_eq!(first.name(), "SimpleStmt");
    assert_eq!(u32::from(second.range().start()), 6);
}

#[test]
fn reparse_yields_same_kinds() {
    let text = "class A(B, metaclass=M):\n    def f(self, /, *a, **k):\n        return [x async for x in self if x]\n";
    let first = module(text);
    let rebuilt = walk::text(&first);
    let second = module(&rebuilt);
    assert_eq!(walk::node_kinds(&first), walk::node_kinds(&second));
}
