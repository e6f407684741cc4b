//! `bar-plotter`: grouped bar chart
//!
//! ```text
//! "Config": {
//!   "Title": "Throughput", "Y": "req/s", "Width": 6,
//!   "Group": { "v1": { "Data": [10, 12] }, "v2": { "Data": [11, 15, 9] } }
//! }
//! ```

use serde::Serialize;

use super::{number_or, required, Chart, Frame, Renderer};
use crate::value::Value;
use crate::{Error, Result};

/// One legend entry: a named row of bar heights
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    #[serde(flatten)]
    pub frame: Frame,
    /// Requested width of a single bar, in points
    pub width: f64,
    pub groups: Vec<BarGroup>,
    /// Number of x positions: the length of the longest group
    pub columns: usize,
}

pub struct BarRenderer;

impl Renderer for BarRenderer {
    fn name(&self) -> &'static str {
        "bar-plotter"
    }

    fn render(&self, config: &Value) -> Result<Chart> {
        let frame = Frame::read(config, "Plot", "X", "Heights");
        let width = number_or(config, &["Width", "width"], 4.0);
        let entries = required(config, &["Group", "group"], Value::as_object)?;

        let mut groups = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            let values = required(entry, &["Data", "data"], Value::to_number_vec)
                .map_err(|e| Error::field(format!("Group.{}", name), e))?;
            groups.push(BarGroup {
                name: name.clone(),
                values,
            });
        }

        let columns = groups.iter().map(|g| g.values.len()).max().unwrap_or(0);
        Ok(Chart::Bar(BarChart {
            frame,
            width,
            groups,
            columns,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::value::Kind;

    fn render(input: &str) -> Result<BarChart> {
        match BarRenderer.render(&parse(input)?)? {
            Chart::Bar(chart) => Ok(chart),
            other => panic!("expected a bar chart, got {:?}", other),
        }
    }

    #[test]
    fn test_bar_groups() {
        let chart = render(
            r#"{"Group": {"b": {"Data": [1, 2, 3]}, "a": {"data": [4]}}, "Width": 2}"#,
        )
        .unwrap();
        assert_eq!(chart.groups, vec![
            BarGroup { name: "a".into(), values: vec![4.0] },
            BarGroup { name: "b".into(), values: vec![1.0, 2.0, 3.0] },
        ]);
        assert_eq!(chart.columns, 3);
        assert_eq!(chart.width, 2.0);
    }

    #[test]
    fn test_bar_defaults() {
        let chart = render(r#"{"group": {}}"#).unwrap();
        assert_eq!(chart.frame.title, "Plot");
        assert_eq!(chart.frame.y_label, "Heights");
        assert!(!chart.frame.grids);
        assert_eq!(chart.frame.size, 4.0);
        assert_eq!(chart.width, 4.0);
        assert_eq!(chart.columns, 0);
    }

    #[test]
    fn test_bar_requires_group() {
        let err = render(r#"{"Title": "t"}"#).unwrap_err();
        assert!(matches!(err, Error::Field { ref field, .. } if field == "Group"));
    }

    #[test]
    fn test_bar_group_must_be_object() {
        let err = render(r#"{"Group": [1, 2]}"#).unwrap_err();
        assert_eq!(
            err,
            Error::field("Group", Error::TypeMismatch {
                expected: Kind::Object,
                found: Kind::List,
            })
        );
    }

    #[test]
    fn test_bar_entry_needs_numeric_data() {
        let err = render(r#"{"Group": {"a": {"Data": [1, "x"]}}}"#).unwrap_err();
        assert_eq!(err.to_string(),
            "field \"Group.a\": field \"Data\": element 1: Type mismatch: expected number, found string");

        let err = render(r#"{"Group": {"a": 5}}"#).unwrap_err();
        assert!(matches!(err, Error::Field { ref field, .. } if field == "Group.a"));
    }
}
