use pycore_syntax::SyntaxKind::*;
use pycore_syntax::{SyntaxKind, Token, TriviaPieceKind};

use super::*;

fn kinds(text: &str) -> Vec<SyntaxKind> {
    tokenize(text).iter().map(|token| token.kind).collect()
}

fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
    &text[token.range]
}

fn assert_lossless(text: &str) {
    let tokens = tokenize(text);
    let rebuilt: String = tokens.iter().map(|token| &*token.text).collect();
    assert_eq!(rebuilt, text);

    for token in &tokens {
        assert_eq!(&*token.text, &text[token.full_range()]);
        assert_eq!(token.text_trimmed(), &text[token.range]);
    }
}

#[test]
fn test_number_literals() {
    let inputs = [
        "123", "0", "0b1010", "0o755", "0x1f", "0XFF", "123_456", "1.5", "1.", ".5", "1e10",
        "1.0e-5", "2E+3", "3j", "1.5J", "123_456.789_012",
    ];

    for input in inputs {
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, NUMBER, "Input: '{input}'");
        assert_eq!(token_text(&tokens[0], input), input, "Input: '{input}'");
        assert_eq!(tokens[1].kind, NEWLINE, "Input: '{input}'");
    }
}

#[test]
fn test_number_does_not_swallow_names() {
    assert_eq!(kinds("1if x"), [NUMBER, IF_KW, NAME, NEWLINE, EOF]);
    assert_eq!(kinds("1e"), [NUMBER, NAME, NEWLINE, EOF]);
    assert_eq!(kinds("x.y"), [NAME, DOT, NAME, NEWLINE, EOF]);
}

#[test]
fn test_operators_use_longest_match() {
    let text = "a //= b ** c -> d := e ... != >= <<= >> @ ~";
    assert_eq!(
        kinds(text),
        [
            NAME,
            DOUBLE_SLASH_EQ,
            NAME,
            DOUBLE_STAR,
            NAME,
            ARROW,
            NAME,
            COLON_EQ,
            NAME,
            ELLIPSIS,
            NOT_EQ,
            GREATER_EQ,
            LEFT_SHIFT_EQ,
            RIGHT_SHIFT,
            AT,
            TILDE,
            NEWLINE,
            EOF
        ]
    );
    assert_eq!(kinds("!"), [UNKNOWN, NEWLINE, EOF]);
}

#[test]
fn test_keywords_and_names() {
    let text = "def match(_, None): return lambda";
    let tokens = tokenize(text);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        [
            DEF_KW,
            NAME,
            LEFT_PAREN,
            NAME,
            COMMA,
            NONE_KW,
            RIGHT_PAREN,
            COLON,
            RETURN_KW,
            LAMBDA_KW,
            NEWLINE,
            EOF
        ]
    );
    assert_eq!(tokens[1].value(), Some("match"));
    assert_eq!(tokens[3].value(), Some("_"));
    assert_eq!(tokens[0].value(), None);
}

#[test]
fn test_unicode_identifiers() {
    let text = "größe = 1";
    let tokens = tokenize(text);
    assert_eq!(tokens[0].kind, NAME);
    assert_eq!(tokens[0].value(), Some("größe"));
    assert_eq!(token_text(&tokens[0], text), "größe");
}

#[test]
fn test_string_values() {
    let cases = [
        (r#""a\nb""#, "a\nb"),
        (r#"r"a\nb""#, r"a\nb"),
        (r#"b'\x41'"#, "A"),
        (r#"'\u00e9'"#, "é"),
        (r#"f"{x}""#, "{x}"),
        (r#"Rb"\d""#, r"\d"),
        (r#"'it\'s'"#, "it's"),
        ("'''one\ntwo'''", "one\ntwo"),
        (r#""""say "hi" """"#, r#"say "hi" "#),
    ];

    for (input, value) in cases {
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, STRING, "Input: {input}");
        assert_eq!(tokens[0].value(), Some(value), "Input: {input}");
        assert_eq!(token_text(&tokens[0], input), input, "Input: {input}");
    }
}

#[test]
fn test_unterminated_strings() {
    assert_eq!(kinds("'abc"), [UNKNOWN, NEWLINE, EOF]);
    assert_eq!(kinds("'''abc"), [UNKNOWN, NEWLINE, EOF]);
    assert_eq!(kinds("'abc\nx")[0], UNKNOWN);
}

#[test]
fn test_string_prefix_needs_a_quote() {
    assert_eq!(kinds("rb + f"), [NAME, PLUS, NAME, NEWLINE, EOF]);
    assert_eq!(kinds("xr'a'"), [NAME, STRING, NEWLINE, EOF]);
}

#[test]
fn test_indentation() {
    let text = "if x:\n    y\nz\n";
    assert_eq!(
        kinds(text),
        [IF_KW, NAME, COLON, NEWLINE, INDENT, NAME, NEWLINE, DEDENT, NAME, NEWLINE, EOF]
    );

    let tokens = tokenize(text);
    assert_eq!(tokens[4].range, TextRange::empty(10.into()));
    assert_eq!(tokens[4].full_range(), TextRange::new(6.into(), 10.into()));
}

#[test]
fn test_nested_dedents_at_end_of_input() {
    let text = "class A:\n  def f():\n    pass";
    assert_eq!(
        kinds(text),
        [
            CLASS_KW, NAME, COLON, NEWLINE, INDENT, DEF_KW, NAME, LEFT_PAREN, RIGHT_PAREN, COLON,
            NEWLINE, INDENT, PASS_KW, NEWLINE, DEDENT, DEDENT, EOF
        ]
    );

    let tokens = tokenize(text);
    let newline = &tokens[13];
    assert_eq!(newline.range, TextRange::empty(text.text_len()));
}

#[test]
fn test_tabs_advance_to_multiples_of_eight() {
    let text = "if x:\n\ty\n        z\n";
    assert_eq!(
        kinds(text),
        [IF_KW, NAME, COLON, NEWLINE, INDENT, NAME, NEWLINE, NAME, NEWLINE, DEDENT, EOF]
    );
}

#[test]
fn test_inconsistent_dedent() {
    let text = "if x:\n    y\n  z\n";
    assert_eq!(
        kinds(text),
        [IF_KW, NAME, COLON, NEWLINE, INDENT, NAME, NEWLINE, DEDENT, UNKNOWN, NAME, NEWLINE, EOF]
    );
}

#[test]
fn test_blank_lines_and_comments_are_trivia() {
    let text = "x\n\n# c\n   \ny\n";
    let tokens = tokenize(text);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, [NAME, NEWLINE, NAME, NEWLINE, EOF]);

    let trivia: Vec<_> = tokens[2].leading.iter().map(|piece| piece.kind).collect();
    assert_eq!(
        trivia,
        [
            TriviaPieceKind::Newline,
            TriviaPieceKind::Comment,
            TriviaPieceKind::Newline,
            TriviaPieceKind::Whitespace,
            TriviaPieceKind::Newline
        ]
    );
}

#[test]
fn test_brackets_suppress_newlines() {
    let text = "(a,\n  b)\n";
    let tokens = tokenize(text);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, [LEFT_PAREN, NAME, COMMA, NAME, RIGHT_PAREN, NEWLINE, EOF]);

    let trivia: Vec<_> = tokens[3].leading.iter().map(|piece| piece.kind).collect();
    assert_eq!(trivia, [TriviaPieceKind::Newline, TriviaPieceKind::Whitespace]);
}

#[test]
fn test_line_continuation() {
    let text = "x = 1 + \\\n  2\n";
    assert_eq!(kinds(text), [NAME, EQ, NUMBER, PLUS, NUMBER, NEWLINE, EOF]);

    let tokens = tokenize(text);
    let trivia: Vec<_> = tokens[4].leading.iter().map(|piece| piece.kind).collect();
    assert_eq!(
        trivia,
        [TriviaPieceKind::Whitespace, TriviaPieceKind::LineContinuation, TriviaPieceKind::Whitespace]
    );
    let breaks: Vec<_> = tokens[4].leading.iter().map(|piece| piece.is_line_break()).collect();
    assert_eq!(breaks, [false, true, false]);
    let spelled: Vec<_> = tokens[4].trivia().map(|(_, text)| text).collect();
    assert_eq!(spelled, [" ", "\\\n", "  "]);
}

#[test]
fn test_crlf_line_endings() {
    let text = "x\r\ny\r\n";
    let tokens = tokenize(text);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds, [NAME, NEWLINE, NAME, NEWLINE, EOF]);
    assert_eq!(token_text(&tokens[1], text), "\r\n");
}

#[test]
fn test_empty_and_comment_only_input() {
    assert_eq!(kinds(""), [EOF]);

    let tokens = tokenize("# only a comment");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, EOF);
    assert!(tokens[0].leading[0].is_comment());
    assert_eq!(&*tokens[0].text, "# only a comment");
}

#[test]
fn test_comment_before_end_of_input_goes_to_newline() {
    let text = "x  # trailing";
    let tokens = tokenize(text);
    assert_eq!(tokens[1].kind, NEWLINE);
    assert_eq!(tokens[1].range, TextRange::empty(text.text_len()));
    assert_eq!(tokens[1].leading.len(), 2);
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut tokenizer = Tokenizer::new("x");
    for _ in 0..3 {
        tokenizer.next_token();
    }
    assert_eq!(tokenizer.peek().kind, EOF);
    assert_eq!(tokenizer.next_token().kind, EOF);
    assert_eq!(tokenizer.next_token().kind, EOF);
}

#[test]
fn test_lossless() {
    let inputs = [
        "",
        "x = 1\n",
        "  \n# header\n\nif a:  # why\n\tb(\n  1, # one\n  2)\n\n# tail\n",
        "def f(x):\r\n    return x \\\n        + 1\r\n",
        "s = '''multi\nline''' + r'raw\\'\n",
        "class A:\n    pass\n  # dangling",
        "'unterminated\nx",
        "if x:\n    y\n  z\n",
    ];

    for input in inputs {
        assert_lossless(input);
    }
}
