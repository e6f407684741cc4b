//! Chart jobs - the documents plotjson consumes
//!
//! A document is either one job object or a list of job objects:
//!
//! ```text
//! { "Type": "hist-plotter", "Path": "out.json", "Config": { "Data": [1, 2, 3] } }
//! ```
//!
//! `Type` selects a renderer, `Path` names the output file, and `Config` is
//! handed to the renderer untouched. Lowercase spellings are accepted too.

use tracing::debug;

use crate::value::{Kind, Value};
use crate::{Error, Result};

/// How the root of a document maps onto jobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Document<'a> {
    /// Root object: one job, whose failure fails the whole run
    Single(&'a Value),
    /// Root list: each job succeeds or fails on its own
    Batch(&'a [Value]),
}

impl<'a> Document<'a> {
    /// Classify a parsed root value
    pub fn from_root(root: &'a Value) -> Result<Self> {
        match root {
            Value::Object(_) => Ok(Document::Single(root)),
            Value::List(items) => Ok(Document::Batch(items)),
            other => Err(Error::TypeMismatch {
                expected: Kind::Object,
                found: other.kind(),
            }),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Document::Batch(_))
    }

    /// Job values in document order
    pub fn jobs(&self) -> Vec<&'a Value> {
        match self {
            Document::Single(value) => vec![*value],
            Document::Batch(items) => items.iter().collect(),
        }
    }
}

/// One chart job with its fields resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Job<'a> {
    pub index: usize,
    pub renderer: &'a str,
    pub path: &'a str,
    pub config: &'a Value,
}

impl<'a> Job<'a> {
    /// Read `Type`, `Path` and `Config` from a job object
    ///
    /// # Errors
    /// `Field` wrapping `MissingKey` or `TypeMismatch` for the first field
    /// that is absent or has the wrong type.
    pub fn from_value(index: usize, value: &'a Value) -> Result<Self> {
        let renderer = string_field(value, &["Type", "type"])?;
        let path = string_field(value, &["Path", "path"])?;
        let config = value
            .get_any_of(&["Config", "config"])
            .map_err(|e| Error::field("Config", e))?;

        debug!(index, renderer, path, "resolved job");
        Ok(Job {
            index,
            renderer,
            path,
            config,
        })
    }
}

fn string_field<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a str> {
    value
        .get_any_of(keys)
        .and_then(Value::as_str)
        .map_err(|e| Error::field(keys[0], e))
}
