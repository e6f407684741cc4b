//! Typed accessors - schema-aware, fail-fast reads from a `Value`
//!
//! Every accessor borrows the tree and either returns the requested payload
//! or a descriptive error (`TypeMismatch`, `MissingKey`, `IndexOutOfRange`).
//! Errors are cheap and expected: job configs are read with the pattern
//! "try `Title`, then `title`, else use a default".
//!
//! ```
//! use plotjson_core::parse;
//!
//! let config = parse(r#"{"title": "Latency", "Size": 6}"#).unwrap();
//! let title = config
//!     .get_any_of(&["Title", "title"])
//!     .and_then(|v| v.as_str())
//!     .unwrap_or("Plot");
//! assert_eq!(title, "Latency");
//! ```

use serde::Serialize;

use crate::value::{Kind, Object, Value};
use crate::{Error, Result};

/// An (x, y) pair read from a point list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An RGBA color read from an object with `r`, `g`, `b`, `a` channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Value {
    fn mismatch(&self, expected: Kind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    // ── Scalars ────────────────────────────────────────────

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(Kind::String)),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(other.mismatch(Kind::Number)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(Kind::Boolean)),
        }
    }

    pub fn as_null(&self) -> Result<()> {
        match self {
            Value::Null => Ok(()),
            other => Err(other.mismatch(Kind::Null)),
        }
    }

    // ── Containers ─────────────────────────────────────────

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(Kind::Object)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(Kind::List)),
        }
    }

    /// Element `index` of a list
    pub fn index(&self, index: usize) -> Result<&Value> {
        let items = self.as_list()?;
        items.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Field `key` of an object
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.get_any_of(&[key])
    }

    /// First of `keys` present in an object; order matters
    pub fn get_any_of(&self, keys: &[&str]) -> Result<&Value> {
        let map = self.as_object()?;
        keys.iter()
            .find_map(|key| map.get(*key))
            .ok_or_else(|| Error::MissingKey {
                keys: keys.iter().map(|k| k.to_string()).collect(),
            })
    }

    // ── Conversions ────────────────────────────────────────

    /// A list of numbers as a vector; fails at the first non-number
    pub fn to_number_vec(&self) -> Result<Vec<f64>> {
        self.as_list()?
            .iter()
            .enumerate()
            .map(|(i, item)| item.as_number().map_err(|e| Error::element(i, e)))
            .collect()
    }

    /// A list of points, either `[{"x": .., "y": ..}, ..]` or flat
    /// `[x0, y0, x1, y1, ..]`.
    ///
    /// The first element decides the shape. In the flat shape an odd
    /// trailing number is dropped: `[1, 2, 3]` yields one point.
    pub fn to_points(&self) -> Result<Vec<Point>> {
        let items = self.as_list()?;
        let Some(first) = items.first() else {
            return Ok(Vec::new());
        };

        match first {
            Value::Object(_) => items
                .iter()
                .enumerate()
                .map(|(i, item)| item.to_point().map_err(|e| Error::element(i, e)))
                .collect(),
            Value::Number(_) => items
                .chunks_exact(2)
                .enumerate()
                .map(|(pair, xy)| match (&xy[0], &xy[1]) {
                    (Value::Number(x), Value::Number(y)) => Ok(Point { x: *x, y: *y }),
                    // A bad pair is reported at the index it starts on
                    (Value::Number(_), other) | (other, _) => {
                        Err(Error::element(pair * 2, other.mismatch(Kind::Number)))
                    }
                })
                .collect(),
            other => Err(Error::element(0, other.mismatch(Kind::Object))),
        }
    }

    /// An object with numeric `x`/`X` and `y`/`Y` fields
    pub fn to_point(&self) -> Result<Point> {
        self.as_object()?;
        let x = number_field(self, &["x", "X"])?;
        let y = number_field(self, &["y", "Y"])?;
        Ok(Point { x, y })
    }

    /// An object with integer channels `r/R`, `g/G`, `b/B`, `a/A` in 0..=255
    pub fn to_color(&self) -> Result<Rgba> {
        self.as_object()?;
        Ok(Rgba {
            r: color_channel(self, 'r')?,
            g: color_channel(self, 'g')?,
            b: color_channel(self, 'b')?,
            a: color_channel(self, 'a')?,
        })
    }
}

fn number_field(value: &Value, keys: &[&str]) -> Result<f64> {
    value
        .get_any_of(keys)
        .and_then(Value::as_number)
        .map_err(|e| Error::field(keys[0], e))
}

fn color_channel(value: &Value, channel: char) -> Result<u8> {
    let lower = channel.to_string();
    let upper = channel.to_ascii_uppercase().to_string();
    let n = number_field(value, &[lower.as_str(), upper.as_str()])?;

    if n.fract() != 0.0 || !(0.0..=255.0).contains(&n) {
        return Err(Error::ColorRange { channel, value: n });
    }
    Ok(n as u8)
}
