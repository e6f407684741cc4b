//! plotjson core - JSON parsing engine for chart jobs
//!
//! A hand-written lexer and recursive-descent parser build an immutable
//! value tree; a typed accessor layer reads fields out of it with
//! descriptive errors. Chart jobs are dispatched to renderers through the
//! same accessor layer.
//!
//! # Architecture
//!
//! ```text
//! JSON text → Lexer → Parser → Value tree → Accessors
//!                                  ↓
//!                             Job → Registry → Renderer → Chart
//! ```
//!
//! # Guarantees
//!
//! - **All-or-nothing**: a document either parses completely or yields one error
//! - **Positioned**: every parse error carries line:column
//! - **Immutable**: a parsed tree is never mutated; it is `Send + Sync`
//! - **Re-entrant**: no global state, each parse is independent

pub mod accessor;
pub mod error;
pub mod job;
pub mod parser;
pub mod render;
pub mod value;

#[cfg(test)]
mod arbitrary;

pub use accessor::{Point, Rgba};
pub use error::{Error, LexError, LexErrorKind, Result};
pub use job::{Document, Job};
pub use parser::lexer::Span;
pub use parser::{parse, parse_bytes, parse_bytes_with, parse_with, ParseOptions};
pub use render::{Chart, Registry, Renderer};
pub use value::{Kind, Object, Value};
