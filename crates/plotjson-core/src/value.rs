//! Value tree - the in-memory DOM a parsed document becomes
//!
//! A `Value` owns every nested value; trees are built bottom-up by the
//! parser and never mutated afterwards.
//!
//! # Canonical text
//!
//! `Value::to_pretty` (and `Display`) print indented JSON that the parser
//! always accepts again:
//!
//! ```text
//! {
//!   "Path" : "out.png",
//!   "Size" : 4
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Object payload. Ordered for deterministic iteration and printing.
pub type Object = BTreeMap<String, Value>;

/// A parsed JSON value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Object(Object),
}

/// Variant tag of a `Value`, used in type-mismatch diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Null,
    Object,
    List,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Object => "object",
            Kind::List => "list",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Boolean(_) => Kind::Boolean,
            Value::Null => Kind::Null,
            Value::Object(_) => Kind::Object,
            Value::List(_) => Kind::List,
        }
    }

    /// Render as indented canonical JSON
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        write_value(&mut out, self, 0);
        out
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

// ── Canonical printer ─────────────────────────────────────

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn write_value(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::String(s) => write_quoted(out, s),
        Value::Number(n) => write_number(out, *n),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
        Value::Object(map) => write_object(out, map, level),
        Value::List(items) => write_list(out, items, level),
    }
}

fn write_object(out: &mut String, map: &Object, level: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (i, (key, value)) in map.iter().enumerate() {
        indent(out, level + 1);
        write_quoted(out, key);
        out.push_str(" : ");
        write_value(out, value, level + 1);
        if i + 1 < map.len() {
            out.push(',');
        }
        out.push('\n');
    }
    indent(out, level);
    out.push('}');
}

fn write_list(out: &mut String, items: &[Value], level: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    for (i, value) in items.iter().enumerate() {
        indent(out, level + 1);
        write_value(out, value, level + 1);
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    indent(out, level);
    out.push(']');
}

// `Display` for f64 is the shortest round-tripping decimal, never exponent
// notation. Non-finite numbers cannot come out of the lexer and have no JSON
// spelling, so they print as null.
fn write_number(out: &mut String, n: f64) {
    if n.is_finite() {
        out.push_str(&n.to_string());
    } else {
        out.push_str("null");
    }
}

// Only the escapes the lexer decodes are produced here; every other
// character, control characters included, is copied verbatim.
fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::from(1.5).kind().to_string(), "number");
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::List(vec![]).kind().name(), "list");
    }

    #[test]
    fn test_pretty_scalars() {
        assert_eq!(Value::Null.to_pretty(), "null");
        assert_eq!(Value::from(true).to_pretty(), "true");
        assert_eq!(Value::from(false).to_pretty(), "false");
        assert_eq!(Value::from(3.0).to_pretty(), "3");
        assert_eq!(Value::from(-0.25).to_pretty(), "-0.25");
        assert_eq!(Value::from(1e21).to_pretty(), "1000000000000000000000");
    }

    #[test]
    fn test_pretty_non_finite_prints_null() {
        assert_eq!(Value::from(f64::NAN).to_pretty(), "null");
        assert_eq!(Value::from(f64::INFINITY).to_pretty(), "null");
    }

    #[test]
    fn test_pretty_string_escapes() {
        let v = Value::from("a\"b\\c\nd\te\u{8}\u{b}\r");
        assert_eq!(v.to_pretty(), r#""a\"b\\c\nd\te\b\v\r""#);
    }

    #[test]
    fn test_pretty_empty_containers() {
        assert_eq!(Value::List(vec![]).to_pretty(), "[]");
        assert_eq!(Value::Object(Object::new()).to_pretty(), "{}");
    }

    #[test]
    fn test_pretty_nested_layout() {
        let v = obj(&[
            ("b", Value::List(vec![Value::from(1.0), Value::Null])),
            ("a", obj(&[("x", Value::from("y"))])),
        ]);
        let expected = "{\n  \"a\" : {\n    \"x\" : \"y\"\n  },\n  \"b\" : [\n    1,\n    null\n  ]\n}";
        assert_eq!(v.to_pretty(), expected);
        assert_eq!(v.to_string(), expected);
    }

    #[test]
    fn test_serde_untagged_shape() {
        let v = obj(&[
            ("n", Value::from(2.5)),
            ("l", Value::List(vec![Value::from(true), Value::Null])),
        ]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({"n": 2.5, "l": [true, null]}));

        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }
}
