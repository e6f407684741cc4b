//! JSON parser - lexer plus recursive descent over its token stream
//!
//! Grammar (LL(1), one token of lookahead):
//!
//! ```text
//! document := list | object
//! value    := string | number | boolean | null | list | object
//! list     := "[" ( value ( "," value )* )? "]"
//! object   := "{" ( string ":" value ( "," string ":" value )* )? "}"
//! ```
//!
//! A single error aborts the parse; no partial tree is ever returned.

pub mod lexer;

use tracing::{debug, trace};

use crate::value::{Object, Value};
use crate::{Error, Result};
use lexer::{Lexer, Span, Token};

/// Default nesting limit for lists and objects
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Hard ceiling on `ParseOptions::max_depth`. Each nesting level costs two
/// stack frames, so larger requests are clamped to keep recursion bounded.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Knobs for a single parse call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest list/object nesting accepted before `Error::DepthLimit`,
    /// clamped to `MAX_DEPTH_CEILING`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a JSON document whose root is a list or an object
///
/// # Errors
/// Returns `Lex` for malformed tokens, `Syntax` for grammar violations
/// (including a scalar root or text after the root), and `DepthLimit`
/// when nesting exceeds the default limit.
///
/// # Example
/// ```
/// let doc = plotjson_core::parse(r#"{"Type": "hist-plotter"}"#).unwrap();
/// assert_eq!(doc.get("Type").unwrap().as_str().unwrap(), "hist-plotter");
/// ```
pub fn parse(source: &str) -> Result<Value> {
    parse_with(source, &ParseOptions::default())
}

/// Parse with explicit options
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Value> {
    debug!(bytes = source.len(), max_depth = options.max_depth, "parsing document");
    let result = Parser::new(source, options.clone()).parse();
    if let Err(ref e) = result {
        debug!(error = %e, "parse failed");
    }
    result
}

/// Parse raw bytes, reporting invalid UTF-8 with its line:column
pub fn parse_bytes(bytes: &[u8]) -> Result<Value> {
    parse_bytes_with(bytes, &ParseOptions::default())
}

/// Parse raw bytes with explicit options
pub fn parse_bytes_with(bytes: &[u8], options: &ParseOptions) -> Result<Value> {
    match std::str::from_utf8(bytes) {
        Ok(source) => parse_with(source, options),
        Err(e) => {
            let valid = String::from_utf8_lossy(&bytes[..e.valid_up_to()]);
            Err(Error::Lex(crate::error::LexError {
                kind: crate::error::LexErrorKind::InvalidUtf8,
                span: Span::end_of(&valid),
            }))
        }
    }
}

/// Recursive descent parser driving a `Lexer`
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, mut options: ParseOptions) -> Self {
        options.max_depth = options.max_depth.min(MAX_DEPTH_CEILING);
        Parser {
            lexer: Lexer::new(source),
            options,
            depth: 0,
        }
    }

    /// Parse the whole document; the root must be a list or an object
    pub fn parse(mut self) -> Result<Value> {
        let root = match self.lexer.current().token {
            Token::LBracket => self.parse_list()?,
            Token::LBrace => self.parse_object()?,
            _ => return Err(self.unexpected("a list/object as root")),
        };

        match self.lexer.current().token {
            Token::Eof => Ok(root),
            _ => Err(self.unexpected("end of input after root value")),
        }
    }

    // ── Error helpers ──────────────────────────────────────

    // Lex errors win over syntax errors: an Error token means the text
    // could not be tokenized at all.
    fn unexpected(&self, expected: &str) -> Error {
        let current = self.lexer.current();
        match &current.token {
            Token::Error(e) => Error::Lex(e.clone()),
            other => Error::Syntax {
                expected: expected.to_string(),
                found: other.describe(),
                span: current.span,
            },
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimit {
                limit: self.options.max_depth,
                span: self.lexer.current().span,
            });
        }
        Ok(())
    }

    // ── Productions ────────────────────────────────────────

    fn parse_value(&mut self) -> Result<Value> {
        let value = match &self.lexer.current().token {
            Token::String(s) => Value::String(s.clone()),
            Token::Number(n) => Value::Number(*n),
            Token::Boolean(b) => Value::Boolean(*b),
            Token::Null => Value::Null,
            Token::LBracket => return self.parse_list(),
            Token::LBrace => return self.parse_object(),
            _ => return Err(self.unexpected("a string/number/boolean/null/list/object")),
        };
        self.lexer.advance();
        Ok(value)
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.enter()?;
        let mut items = Vec::new();

        if matches!(self.lexer.advance().token, Token::RBracket) {
            self.lexer.advance();
            self.depth -= 1;
            return Ok(Value::List(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.lexer.current().token {
                Token::Comma => {
                    self.lexer.advance();
                }
                Token::RBracket => {
                    self.lexer.advance();
                    break;
                }
                _ => return Err(self.unexpected("\"]\" or \",\" in list")),
            }
        }

        trace!(len = items.len(), depth = self.depth, "parsed list");
        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        let mut map = Object::new();

        if matches!(self.lexer.advance().token, Token::RBrace) {
            self.lexer.advance();
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match &self.lexer.current().token {
                Token::String(s) => s.clone(),
                _ => return Err(self.unexpected("a quoted string as object key")),
            };

            if !matches!(self.lexer.advance().token, Token::Colon) {
                return Err(self.unexpected("\":\" after object key"));
            }
            self.lexer.advance();

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.lexer.current().token {
                Token::Comma => {
                    self.lexer.advance();
                }
                Token::RBrace => {
                    self.lexer.advance();
                    break;
                }
                _ => return Err(self.unexpected("\"}\" or \",\" in object")),
            }
        }

        trace!(len = map.len(), depth = self.depth, "parsed object");
        self.depth -= 1;
        Ok(Value::Object(map))
    }
}
