//! Reference tokenizer producing the indentation-aware token stream the
//! parser consumes.
//!
//! Blank lines, comments, line continuations and bracketed line breaks become
//! leading trivia of the next token. INDENT, DEDENT, the NEWLINE synthesized
//! before end of input and EOF itself are zero-width.

mod cursor;
mod escape;

use std::collections::VecDeque;

use cursor::Cursor;
pub use pycore_syntax::SyntaxKind;
use pycore_syntax::SyntaxKind::*;
use pycore_syntax::{Token, TriviaPiece, TriviaPieceKind};
use text_size::{TextLen, TextRange, TextSize};

const TAB_SIZE: u32 = 8;

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
    pending: VecDeque<Token>,
    trivia_pieces: Vec<TriviaPiece>,
    indents: Vec<u32>,
    nesting: u32,
    at_line_start: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::eof(TextSize::new(0)),
            pending: VecDeque::new(),
            trivia_pieces: Vec::with_capacity(4),
            indents: vec![0],
            nesting: 0,
            at_line_start: true,
            finished: false,
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Returns the current token and moves to the next one.
    pub fn next_token(&mut self) -> Token {
        if self.pending.is_empty() {
            self.lex();
        }
        let next = self.pending.pop_front().unwrap_or_else(|| Token::eof(self.offset()));
        std::mem::replace(&mut self.current, next)
    }

    fn offset(&self) -> TextSize {
        self.text.text_len() - self.cursor.len()
    }

    fn slice(&self, range: TextRange) -> &'a str {
        let text = self.text;
        &text[range]
    }

    fn take_trivia(&mut self) -> Box<[TriviaPiece]> {
        self.trivia_pieces.drain(..).collect()
    }

    fn push(&mut self, kind: SyntaxKind, start: TextSize, value: Option<Box<str>>) {
        let range = TextRange::new(start, self.offset());
        let mut token = self.token(kind, range);
        token.value = value;
        self.cursor.reset_pos_within_token();
        self.pending.push_back(token);
    }

    fn push_zero_width(&mut self, kind: SyntaxKind) {
        let token = self.token(kind, TextRange::empty(self.offset()));
        self.pending.push_back(token);
    }

    /// Builds a token over `range`, taking the pending trivia and the source
    /// text they cover together with the token.
    fn token(&mut self, kind: SyntaxKind, range: TextRange) -> Token {
        let token = Token::new(kind, range).with_leading(self.take_trivia());
        let text = self.slice(token.full_range());
        token.with_text(text)
    }

    fn flush_trivia(&mut self, kind: TriviaPieceKind) {
        let len = self.cursor.pos_within_token();
        if len > TextSize::new(0) {
            self.trivia_pieces.push(TriviaPiece::new(kind, len));
        }
        self.cursor.reset_pos_within_token();
    }

    fn lex(&mut self) {
        if self.finished {
            self.push_zero_width(EOF);
            return;
        }

        if self.at_line_start && self.nesting == 0 {
            let Some(column) = self.line_indentation() else {
                self.end_of_input();
                return;
            };
            self.at_line_start = false;
            if self.indentation_changed(column) {
                return;
            }
        }

        self.trivia();
        if self.cursor.is_eof() {
            self.end_of_input();
            return;
        }

        let start = self.offset();
        if matches!(self.cursor.peek(), '\n' | '\r') {
            self.line_break();
            self.at_line_start = true;
            self.push(NEWLINE, start, None);
            return;
        }

        let (kind, value) = self.token_kind(start);
        self.push(kind, start, value);
    }

    /// Skips blank and comment-only lines and measures the indentation of the
    /// next logical line. `None` at end of input.
    fn line_indentation(&mut self) -> Option<u32> {
        loop {
            let mut column = 0;
            loop {
                match self.cursor.peek() {
                    ' ' => column += 1,
                    '\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                    '\x0c' => column = 0,
                    _ => break,
                }
                self.cursor.advance();
            }
            self.flush_trivia(TriviaPieceKind::Whitespace);

            if self.cursor.is_eof() {
                return None;
            }

            match self.cursor.peek() {
                '#' => {
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    self.flush_trivia(TriviaPieceKind::Comment);
                    if self.cursor.is_eof() {
                        return None;
                    }
                    self.line_break();
                    self.flush_trivia(TriviaPieceKind::Newline);
                }
                '\n' | '\r' => {
                    self.line_break();
                    self.flush_trivia(TriviaPieceKind::Newline);
                }
                _ => return Some(column),
            }
        }
    }

    fn indentation_changed(&mut self, column: u32) -> bool {
        let current = self.indents.last().copied().unwrap_or(0);
        if column == current {
            return false;
        }

        if column > current {
            self.indents.push(column);
            self.push_zero_width(INDENT);
            return true;
        }

        while self.indents.last().is_some_and(|&top| column < top) {
            self.indents.pop();
            self.push_zero_width(DEDENT);
        }
        if self.indents.last().copied().unwrap_or(0) != column {
            self.push_zero_width(UNKNOWN);
        }
        true
    }

    fn end_of_input(&mut self) {
        if !self.at_line_start {
            self.at_line_start = true;
            self.push_zero_width(NEWLINE);
            return;
        }

        while self.indents.len() > 1 {
            self.indents.pop();
            self.push_zero_width(DEDENT);
        }
        self.push_zero_width(EOF);
        self.finished = true;
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                ' ' | '\t' | '\x0c' => {
                    self.cursor.advance_while(|c| matches!(c, ' ' | '\t' | '\x0c'));
                    TriviaPieceKind::Whitespace
                }
                '#' => {
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    TriviaPieceKind::Comment
                }
                '\\' if matches!(self.cursor.second(), '\n' | '\r') => {
                    self.cursor.advance();
                    self.line_break();
                    TriviaPieceKind::LineContinuation
                }
                '\n' | '\r' if self.nesting > 0 => {
                    self.line_break();
                    TriviaPieceKind::Newline
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn line_break(&mut self) {
        if !self.cursor.eat('\r') || self.cursor.matches('\n') {
            self.cursor.eat('\n');
        }
    }

    fn token_kind(&mut self, start: TextSize) -> (SyntaxKind, Option<Box<str>>) {
        let kind = match self.cursor.advance() {
            '(' => self.open(LEFT_PAREN),
            ')' => self.close(RIGHT_PAREN),
            '[' => self.open(LEFT_BRACKET),
            ']' => self.close(RIGHT_BRACKET),
            '{' => self.open(LEFT_BRACE),
            '}' => self.close(RIGHT_BRACE),
            ',' => COMMA,
            ';' => SEMICOLON,
            '~' => TILDE,
            ':' => self.with_eq(COLON_EQ, COLON),
            '.' if self.cursor.peek().is_ascii_digit() => self.number('.'),
            '.' if self.cursor.matches('.') && self.cursor.second() == '.' => {
                self.cursor.advance();
                self.cursor.advance();
                ELLIPSIS
            }
            '.' => DOT,
            first @ '0'..='9' => self.number(first),
            quote @ ('"' | '\'') => return self.string(quote, ""),
            first if is_identifier_start(first) => return self.identifier_or_string(start),
            '+' => self.with_eq(PLUS_EQ, PLUS),
            '-' if self.cursor.eat('>') => ARROW,
            '-' => self.with_eq(MINUS_EQ, MINUS),
            '*' if self.cursor.eat('*') => self.with_eq(DOUBLE_STAR_EQ, DOUBLE_STAR),
            '*' => self.with_eq(STAR_EQ, STAR),
            '/' if self.cursor.eat('/') => self.with_eq(DOUBLE_SLASH_EQ, DOUBLE_SLASH),
            '/' => self.with_eq(SLASH_EQ, SLASH),
            '%' => self.with_eq(PERCENT_EQ, PERCENT),
            '@' => self.with_eq(AT_EQ, AT),
            '&' => self.with_eq(AMPERSAND_EQ, AMPERSAND),
            '|' => self.with_eq(PIPE_EQ, PIPE),
            '^' => self.with_eq(CARET_EQ, CARET),
            '=' => self.with_eq(EQ_EQ, EQ),
            '<' if self.cursor.eat('<') => self.with_eq(LEFT_SHIFT_EQ, LEFT_SHIFT),
            '<' => self.with_eq(LESS_EQ, LESS),
            '>' if self.cursor.eat('>') => self.with_eq(RIGHT_SHIFT_EQ, RIGHT_SHIFT),
            '>' => self.with_eq(GREATER_EQ, GREATER),
            '!' if self.cursor.eat('=') => NOT_EQ,
            _ => UNKNOWN,
        };

        (kind, None)
    }

    fn with_eq(&mut self, with: SyntaxKind, without: SyntaxKind) -> SyntaxKind {
        if self.cursor.eat('=') { with } else { without }
    }

    fn open(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.nesting += 1;
        kind
    }

    fn close(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.nesting = self.nesting.saturating_sub(1);
        kind
    }

    fn identifier_or_string(&mut self, start: TextSize) -> (SyntaxKind, Option<Box<str>>) {
        self.cursor.advance_while(is_identifier_continue);
        let text = self.slice(TextRange::new(start, self.offset()));

        if matches!(self.cursor.peek(), '"' | '\'') && is_string_prefix(text) {
            let quote = self.cursor.advance();
            return self.string(quote, text);
        }

        match SyntaxKind::from_keyword(text) {
            Some(keyword) => (keyword, None),
            None => (NAME, Some(text.into())),
        }
    }

    /// Scans a string literal whose opening quote was just consumed.
    fn string(&mut self, quote: char, prefix: &str) -> (SyntaxKind, Option<Box<str>>) {
        let triple = self.cursor.matches(quote) && self.cursor.second() == quote;
        if triple {
            self.cursor.advance();
            self.cursor.advance();
        }

        let body_start = self.offset();
        let body_end = loop {
            if self.cursor.is_eof() {
                return (UNKNOWN, None);
            }

            let end = self.offset();
            match self.cursor.advance() {
                '\\' => {
                    if self.cursor.advance() == '\r' {
                        self.cursor.eat('\n');
                    }
                }
                '\n' | '\r' if !triple => return (UNKNOWN, None),
                c if c == quote => {
                    if !triple {
                        break end;
                    }
                    if self.cursor.matches(quote) && self.cursor.second() == quote {
                        self.cursor.advance();
                        self.cursor.advance();
                        break end;
                    }
                }
                _ => {}
            }
        };

        let body = self.slice(TextRange::new(body_start, body_end));
        let prefix = prefix.to_ascii_lowercase();
        let value = if prefix.contains('r') {
            body.to_owned()
        } else {
            escape::unescape(body, prefix.contains('b'))
        };

        (STRING, Some(value.into()))
    }

    fn number(&mut self, first: char) -> SyntaxKind {
        if first == '0' {
            let is_digit: Option<fn(char) -> bool> = match self.cursor.peek() {
                'x' | 'X' => Some(is_hex_digit),
                'o' | 'O' => Some(is_octal_digit),
                'b' | 'B' => Some(is_binary_digit),
                _ => None,
            };
            if let Some(is_digit) = is_digit {
                self.cursor.advance();
                self.cursor.advance_while(is_digit);
                return NUMBER;
            }
        }

        self.digits();
        if first != '.' && self.cursor.eat('.') {
            self.digits();
        }
        self.exponent();
        if matches!(self.cursor.peek(), 'j' | 'J') {
            self.cursor.advance();
        }

        NUMBER
    }

    fn digits(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
    }

    fn exponent(&mut self) {
        if !matches!(self.cursor.peek(), 'e' | 'E') {
            return;
        }
        let has_digits = match self.cursor.second() {
            '+' | '-' => self.cursor.third().is_ascii_digit(),
            second => second.is_ascii_digit(),
        };
        if has_digits {
            self.cursor.advance();
            if matches!(self.cursor.peek(), '+' | '-') {
                self.cursor.advance();
            }
            self.digits();
        }
    }
}

impl pycore_syntax::Cursor for Tokenizer<'_> {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> Token {
        self.next_token()
    }
}

/// Tokenizes the whole text, ending with the EOF token.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let done = token.kind == EOF;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_string_prefix(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit() || c == '_'
}

fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7' | '_')
}

fn is_binary_digit(c: char) -> bool {
    matches!(c, '0' | '1' | '_')
}

#[cfg(test)]
mod tests;
