//! Error types for plotjson
//!
//! All fallible operations return `Result<T, Error>`.
//! Parse errors (`Lex`, `Syntax`, `DepthLimit`) abort the whole document.
//! Accessor errors are local: callers routinely discard them and fall back
//! to a default value.

use thiserror::Error;

use crate::parser::lexer::Span;
use crate::value::Kind;

/// What went wrong while turning source text into tokens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("invalid UTF-8 byte sequence")]
    InvalidUtf8,

    #[error("string is not closed before end of input")]
    UnterminatedString,

    #[error("unknown escape character '\\{0}'")]
    InvalidEscape(char),

    #[error("expect a digit after the dot")]
    MissingFractionDigit,

    #[error("cannot parse '{0}' as a number")]
    InvalidNumber(String),

    #[error("unknown token starting with '{0}'")]
    UnknownToken(char),
}

/// A lexing failure with the position it was detected at
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// plotjson error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input at the token level
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    /// Grammar violation
    #[error("Syntax error at {span}: expected {expected}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        span: Span,
    },

    /// Document nests deeper than `ParseOptions::max_depth`
    #[error("Syntax error at {span}: nesting deeper than {limit} levels")]
    DepthLimit { limit: usize, span: Span },

    /// Value has a different variant than requested
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// None of the requested keys exist in the object
    #[error("Missing key: none of [{}] present in object", .keys.join(", "))]
    MissingKey { keys: Vec<String> },

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Failure converting a list element
    #[error("element {index}: {source}")]
    Element { index: usize, source: Box<Error> },

    /// Failure reading a named field
    #[error("field \"{field}\": {source}")]
    Field { field: String, source: Box<Error> },

    /// Color channel is not an integer in 0..=255
    #[error("color channel '{channel}' must be an integer in 0..=255, found {value}")]
    ColorRange { channel: char, value: f64 },

    #[error("no renderer registered as \"{0}\"")]
    UnknownRenderer(String),

    /// Renderer rejected a config value that type-checked
    #[error("{renderer}: {reason}")]
    InvalidConfig {
        renderer: &'static str,
        reason: String,
    },
}

impl Error {
    pub(crate) fn element(index: usize, source: Error) -> Self {
        Error::Element {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn field(field: impl Into<String>, source: Error) -> Self {
        Error::Field {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Source position for parse errors, `None` for accessor errors
    pub fn span(&self) -> Option<&Span> {
        match self {
            Error::Lex(e) => Some(&e.span),
            Error::Syntax { span, .. } | Error::DepthLimit { span, .. } => Some(span),
            _ => None,
        }
    }

    /// True for errors that reject a whole document
    pub fn is_parse_error(&self) -> bool {
        self.span().is_some()
    }
}

/// Result type alias for plotjson operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_syntax_error() {
        let err = Error::Syntax {
            expected: "\"]\" or \",\"".into(),
            found: "\":\"".into(),
            span: Span { line: 2, column: 7, offset: 12 },
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at 2:7: expected \"]\" or \",\", found \":\""
        );
    }

    #[test]
    fn test_display_missing_key_lists_all_keys() {
        let err = Error::MissingKey {
            keys: vec!["Title".into(), "title".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing key: none of [Title, title] present in object"
        );
    }

    #[test]
    fn test_display_nested_context() {
        let err = Error::field(
            "Data",
            Error::element(
                3,
                Error::TypeMismatch {
                    expected: Kind::Number,
                    found: Kind::String,
                },
            ),
        );
        assert_eq!(
            err.to_string(),
            "field \"Data\": element 3: Type mismatch: expected number, found string"
        );
    }

    #[test]
    fn test_span_only_for_parse_errors() {
        let lex = Error::Lex(LexError {
            kind: LexErrorKind::InvalidEscape('q'),
            span: Span { line: 1, column: 4, offset: 3 },
        });
        assert!(lex.is_parse_error());
        assert_eq!(lex.span().map(|s| s.column), Some(4));

        let access = Error::IndexOutOfRange { index: 2, len: 1 };
        assert!(!access.is_parse_error());
        assert_eq!(access.span(), None);
    }
}
