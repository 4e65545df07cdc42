/// Kind of a lexical token.
///
/// The set is closed: every token a cursor hands to the parser carries exactly
/// one of these kinds. Soft keywords (`match`, `case`, `type`, `_`) are plain
/// [`SyntaxKind::NAME`] tokens and are recognised from their payload.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    FALSE_KW,
    NONE_KW,
    TRUE_KW,
    AND_KW,
    AS_KW,
    ASSERT_KW,
    ASYNC_KW,
    AWAIT_KW,
    BREAK_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEF_KW,
    DEL_KW,
    ELIF_KW,
    ELSE_KW,
    EXCEPT_KW,
    FINALLY_KW,
    FOR_KW,
    FROM_KW,
    GLOBAL_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    IS_KW,
    LAMBDA_KW,
    NONLOCAL_KW,
    NOT_KW,
    OR_KW,
    PASS_KW,
    RAISE_KW,
    RETURN_KW,
    TRY_KW,
    WHILE_KW,
    WITH_KW,
    YIELD_KW,

    PLUS,
    MINUS,
    STAR,
    DOUBLE_STAR,
    SLASH,
    DOUBLE_SLASH,
    PERCENT,
    AT,
    LEFT_SHIFT,
    RIGHT_SHIFT,
    AMPERSAND,
    PIPE,
    CARET,
    TILDE,
    COLON_EQ,
    LESS,
    GREATER,
    LESS_EQ,
    GREATER_EQ,
    EQ_EQ,
    NOT_EQ,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    COLON,
    DOT,
    SEMICOLON,
    EQ,
    ARROW,
    ELLIPSIS,

    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    AT_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMPERSAND_EQ,
    PIPE_EQ,
    CARET_EQ,
    LEFT_SHIFT_EQ,
    RIGHT_SHIFT_EQ,
    DOUBLE_STAR_EQ,
    DOUBLE_SLASH_EQ,

    NAME,
    NUMBER,
    STRING,

    NEWLINE,
    INDENT,
    DEDENT,
    UNKNOWN,
    EOF,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Looks up a reserved keyword by its spelling.
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "False" => FALSE_KW,
            "None" => NONE_KW,
            "True" => TRUE_KW,
            "and" => AND_KW,
            "as" => AS_KW,
            "assert" => ASSERT_KW,
            "async" => ASYNC_KW,
            "await" => AWAIT_KW,
            "break" => BREAK_KW,
            "class" => CLASS_KW,
            "continue" => CONTINUE_KW,
            "def" => DEF_KW,
            "del" => DEL_KW,
            "elif" => ELIF_KW,
            "else" => ELSE_KW,
            "except" => EXCEPT_KW,
            "finally" => FINALLY_KW,
            "for" => FOR_KW,
            "from" => FROM_KW,
            "global" => GLOBAL_KW,
            "if" => IF_KW,
            "import" => IMPORT_KW,
            "in" => IN_KW,
            "is" => IS_KW,
            "lambda" => LAMBDA_KW,
            "nonlocal" => NONLOCAL_KW,
            "not" => NOT_KW,
            "or" => OR_KW,
            "pass" => PASS_KW,
            "raise" => RAISE_KW,
            "return" => RETURN_KW,
            "try" => TRY_KW,
            "while" => WHILE_KW,
            "with" => WITH_KW,
            "yield" => YIELD_KW,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        self <= YIELD_KW
    }

    /// Augmented assignment operators such as `+=` and `//=`.
    pub fn is_augmented_assign(self) -> bool {
        (PLUS_EQ..=DOUBLE_SLASH_EQ).contains(&self)
    }

    /// Tokens that never cover any source text.
    pub fn is_zero_width(self) -> bool {
        matches!(self, INDENT | DEDENT | EOF)
    }

    /// The fixed spelling of keywords, operators and delimiters.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            FALSE_KW => "False",
            NONE_KW => "None",
            TRUE_KW => "True",
            AND_KW => "and",
            AS_KW => "as",
            ASSERT_KW => "assert",
            ASYNC_KW => "async",
            AWAIT_KW => "await",
            BREAK_KW => "break",
            CLASS_KW => "class",
            CONTINUE_KW => "continue",
            DEF_KW => "def",
            DEL_KW => "del",
            ELIF_KW => "elif",
            ELSE_KW => "else",
            EXCEPT_KW => "except",
            FINALLY_KW => "finally",
            FOR_KW => "for",
            FROM_KW => "from",
            GLOBAL_KW => "global",
            IF_KW => "if",
            IMPORT_KW => "import",
            IN_KW => "in",
            IS_KW => "is",
            LAMBDA_KW => "lambda",
            NONLOCAL_KW => "nonlocal",
            NOT_KW => "not",
            OR_KW => "or",
            PASS_KW => "pass",
            RAISE_KW => "raise",
            RETURN_KW => "return",
            TRY_KW => "try",
            WHILE_KW => "while",
            WITH_KW => "with",
            YIELD_KW => "yield",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            DOUBLE_STAR => "**",
            SLASH => "/",
            DOUBLE_SLASH => "//",
            PERCENT => "%",
            AT => "@",
            LEFT_SHIFT => "<<",
            RIGHT_SHIFT => ">>",
            AMPERSAND => "&",
            PIPE => "|",
            CARET => "^",
            TILDE => "~",
            COLON_EQ => ":=",
            LESS => "<",
            GREATER => ">",
            LESS_EQ => "<=",
            GREATER_EQ => ">=",
            EQ_EQ => "==",
            NOT_EQ => "!=",
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            COMMA => ",",
            COLON => ":",
            DOT => ".",
            SEMICOLON => ";",
            EQ => "=",
            ARROW => "->",
            ELLIPSIS => "...",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            AT_EQ => "@=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            AMPERSAND_EQ => "&=",
            PIPE_EQ => "|=",
            CARET_EQ => "^=",
            LEFT_SHIFT_EQ => "<<=",
            RIGHT_SHIFT_EQ => ">>=",
            DOUBLE_STAR_EQ => "**=",
            DOUBLE_SLASH_EQ => "//=",
            NAME | NUMBER | STRING | NEWLINE | INDENT | DEDENT | UNKNOWN | EOF => return None,
        };
        Some(text)
    }

    /// Human readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            NAME => "name",
            NUMBER => "number",
            STRING => "string",
            NEWLINE => "newline",
            INDENT => "indent",
            DEDENT => "dedent",
            UNKNOWN => "unknown token",
            EOF => "end of input",
            kind => kind.text().unwrap_or("token"),
        }
    }
}
