//! JSON lexer - converts source text into tokens, one at a time
//!
//! Handles: structural punctuation, string literals (with the escapes
//! `\b \r \n \v \t \\ \"`), signed decimal numbers, and the keywords
//! `true`, `false`, `null`.
//!
//! Guarantees:
//! - Exactly one token of lookahead: `Lexer::new` lexes the first token
//! - Forward only: the cursor never moves backwards
//! - Every malformed input yields a `Token::Error` carrying line:column

use crate::error::{LexError, LexErrorKind};

/// Token types for JSON syntax
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    String(String),
    Number(f64),
    Boolean(bool),
    Null,

    // Symbols
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Comma,    // ,
    Colon,    // :

    // Other
    Error(LexError),
    Eof,
}

impl Token {
    /// Short description used in "expected X, found Y" messages
    pub fn describe(&self) -> String {
        match self {
            Token::String(s) => format!("string \"{}\"", s),
            Token::Number(n) => format!("number {}", n),
            Token::Boolean(b) => format!("boolean {}", b),
            Token::Null => "null".to_string(),
            Token::LBracket => "\"[\"".to_string(),
            Token::RBracket => "\"]\"".to_string(),
            Token::LBrace => "\"{\"".to_string(),
            Token::RBrace => "\"}\"".to_string(),
            Token::Comma => "\",\"".to_string(),
            Token::Colon => "\":\"".to_string(),
            Token::Error(e) => format!("invalid token ({})", e.kind),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Position in source text for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Span {
    /// Position just past the end of `text`
    pub(crate) fn end_of(text: &str) -> Span {
        let line = 1 + text.matches('\n').count();
        let last_line = text.rsplit('\n').next().unwrap_or(text);
        Span {
            line,
            column: 1 + last_line.chars().count(),
            offset: text.len(),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token with source position and the number of bytes it spans
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberState {
    DotOrDigit,
    FractionDigit,
    Digit,
}

/// On-demand lexer over a JSON source string
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    line: usize,
    column: usize,
    current: SpannedToken,
}

impl<'a> Lexer<'a> {
    /// Create a lexer and lex the first token
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer {
            source,
            position: 0,
            line: 1,
            column: 1,
            current: SpannedToken {
                token: Token::Eof,
                span: Span { line: 1, column: 1, offset: 0 },
                len: 0,
            },
        };
        lexer.current = lexer.lex();
        lexer
    }

    /// The token most recently produced
    pub fn current(&self) -> &SpannedToken {
        &self.current
    }

    /// Consume the current token and return the next one.
    ///
    /// Returns `Eof` forever once input is exhausted, and repeats an
    /// `Error` token forever once one has been produced.
    pub fn advance(&mut self) -> SpannedToken {
        if !matches!(self.current.token, Token::Error(_)) {
            self.current = self.lex();
        }
        self.current.clone()
    }

    /// Cursor position, used by the parser for diagnostics
    pub fn position(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    // ── Character helpers ──────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn spanned(&self, token: Token, start: Span) -> SpannedToken {
        SpannedToken {
            token,
            span: start,
            len: self.position - start.offset,
        }
    }

    fn error(&self, kind: LexErrorKind, at: Span, start: Span) -> SpannedToken {
        self.spanned(Token::Error(LexError { kind, span: at }), start)
    }

    // ── Main dispatch ──────────────────────────────────────

    fn lex(&mut self) -> SpannedToken {
        loop {
            let start = self.position();
            let Some(ch) = self.peek() else {
                return self.spanned(Token::Eof, start);
            };

            match ch {
                ' ' | '\t' | '\r' | '\n' | '\u{b}' | '\u{8}' => {
                    self.bump();
                }
                '[' => return self.symbol(Token::LBracket, start),
                ']' => return self.symbol(Token::RBracket, start),
                '{' => return self.symbol(Token::LBrace, start),
                '}' => return self.symbol(Token::RBrace, start),
                ',' => return self.symbol(Token::Comma, start),
                ':' => return self.symbol(Token::Colon, start),
                '"' => return self.lex_string(start),
                '-' | '+' | '0'..='9' => return self.lex_number(ch, start),
                _ => return self.lex_keyword(ch, start),
            }
        }
    }

    fn symbol(&mut self, token: Token, start: Span) -> SpannedToken {
        self.bump();
        self.spanned(token, start)
    }

    // ── String literals ────────────────────────────────────

    fn lex_string(&mut self, start: Span) -> SpannedToken {
        self.bump(); // opening "
        let mut value = String::new();

        loop {
            let at = self.position();
            match self.bump() {
                None => return self.error(LexErrorKind::UnterminatedString, at, start),
                Some('"') => break,
                Some('\\') => {
                    let escape_at = self.position();
                    match self.bump() {
                        Some('b') => value.push('\u{8}'),
                        Some('r') => value.push('\r'),
                        Some('n') => value.push('\n'),
                        Some('v') => value.push('\u{b}'),
                        Some('t') => value.push('\t'),
                        Some('\\') => value.push('\\'),
                        Some('"') => value.push('"'),
                        Some(c) => {
                            return self.error(LexErrorKind::InvalidEscape(c), escape_at, start)
                        }
                        None => {
                            return self.error(LexErrorKind::UnterminatedString, escape_at, start)
                        }
                    }
                }
                Some(c) => value.push(c),
            }
        }

        self.spanned(Token::String(value), start)
    }

    // ── Numbers ────────────────────────────────────────────

    // A leading '+' is consumed but never reaches the literal text.
    fn lex_number(&mut self, first: char, start: Span) -> SpannedToken {
        let mut text = String::new();
        if first == '-' || first == '+' {
            self.bump();
            if first == '-' {
                text.push('-');
            }
        }

        let mut state = NumberState::DotOrDigit;
        while let Some(ch) = self.peek() {
            match (state, ch) {
                (NumberState::FractionDigit, '0'..='9') => state = NumberState::Digit,
                (_, '0'..='9') => {}
                (NumberState::DotOrDigit, '.') => state = NumberState::FractionDigit,
                _ => break,
            }
            text.push(ch);
            self.bump();
        }

        if state == NumberState::FractionDigit {
            let at = self.position();
            return self.error(LexErrorKind::MissingFractionDigit, at, start);
        }

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => self.spanned(Token::Number(n), start),
            _ => self.error(LexErrorKind::InvalidNumber(text), start, start),
        }
    }

    // ── Keywords ───────────────────────────────────────────

    fn lex_keyword(&mut self, first: char, start: Span) -> SpannedToken {
        self.bump();

        let (rest, token) = match first {
            't' => ("rue", Token::Boolean(true)),
            'f' => ("alse", Token::Boolean(false)),
            'n' => ("ull", Token::Null),
            _ => return self.error(LexErrorKind::UnknownToken(first), start, start),
        };

        if self.match_keyword(rest) {
            self.spanned(token, start)
        } else {
            self.error(LexErrorKind::UnknownToken(first), start, start)
        }
    }

    fn match_keyword(&mut self, rest: &str) -> bool {
        for expected in rest.chars() {
            if self.peek() != Some(expected) {
                return false;
            }
            self.bump();
        }
        // Any Alphabetic char continues the word, marks included
        !self.peek().is_some_and(char::is_alphabetic)
    }
}
