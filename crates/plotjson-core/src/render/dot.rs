//! `dot-plotter`: named series of (x, y) points
//!
//! ```text
//! "Config": {
//!   "Title": "Latency", "X": "load", "Y": "ms",
//!   "Data": { "p50": [1, 3, 2, 4], "p99": [{"x": 1, "y": 9}, {"x": 2, "y": 12}] }
//! }
//! ```

use serde::Serialize;

use super::{number_or, optional, Chart, Frame, Renderer};
use crate::accessor::Point;
use crate::value::Value;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotChart {
    #[serde(flatten)]
    pub frame: Frame,
    pub series: Vec<Series>,
}

pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn name(&self) -> &'static str {
        "dot-plotter"
    }

    fn render(&self, config: &Value) -> Result<Chart> {
        let mut frame = Frame::read(config, "dot-plot", "X", "Y");
        // Unlike the other plotters, lowercase `size` wins here
        frame.size = number_or(config, &["size", "Size"], frame.size);

        // No Data means an empty plot, but Data of the wrong shape is an error
        let mut series = Vec::new();
        if let Some(data) = optional(config, &["Data", "data"], Ok) {
            let data = data.as_object().map_err(|e| Error::field("Data", e))?;
            for (name, points) in data {
                let points = points
                    .to_points()
                    .map_err(|e| Error::field(format!("Data.{}", name), e))?;
                series.push(Series {
                    name: name.clone(),
                    points,
                });
            }
        }

        Ok(Chart::Dot(DotChart { frame, series }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn render(input: &str) -> Result<DotChart> {
        match DotRenderer.render(&parse(input)?)? {
            Chart::Dot(chart) => Ok(chart),
            other => panic!("expected a dot chart, got {:?}", other),
        }
    }

    #[test]
    fn test_dot_series() {
        let chart = render(
            r#"{"Title": "t", "Data": {"flat": [1, 2, 3, 4, 5], "objs": [{"X": 0, "Y": -1}]}}"#,
        )
        .unwrap();
        assert_eq!(chart.frame.title, "t");
        assert_eq!(chart.series, vec![
            Series {
                name: "flat".into(),
                points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
            },
            Series {
                name: "objs".into(),
                points: vec![Point { x: 0.0, y: -1.0 }],
            },
        ]);
    }

    #[test]
    fn test_dot_without_data() {
        let chart = render("{}").unwrap();
        assert_eq!(chart.frame.title, "dot-plot");
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_dot_size_prefers_lowercase_key() {
        let chart = render(r#"{"Size": 3, "size": 7}"#).unwrap();
        assert_eq!(chart.frame.size, 7.0);

        let chart = render(r#"{"Size": 3}"#).unwrap();
        assert_eq!(chart.frame.size, 3.0);
    }

    #[test]
    fn test_dot_data_must_be_object() {
        let err = render(r#"{"Data": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, Error::Field { ref field, .. } if field == "Data"));
    }

    #[test]
    fn test_dot_bad_series_names_it() {
        let err = render(r#"{"Data": {"s": [{"x": 1}]}}"#).unwrap_err();
        assert!(matches!(err, Error::Field { ref field, .. } if field == "Data.s"));
    }
}
