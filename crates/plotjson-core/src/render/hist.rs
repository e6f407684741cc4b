//! `hist-plotter`: normalized histogram of a list of numbers

use serde::Serialize;

use super::{number_or, required, Chart, Frame, Renderer};
use crate::value::Value;
use crate::{Error, Result};

const DEFAULT_BINS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistChart {
    #[serde(flatten)]
    pub frame: Frame,
    pub bins: usize,
    pub values: Vec<f64>,
}

pub struct HistRenderer;

impl Renderer for HistRenderer {
    fn name(&self) -> &'static str {
        "hist-plotter"
    }

    fn render(&self, config: &Value) -> Result<Chart> {
        let frame = Frame::read(config, "plot", "X", "Y");

        // Bins is truncated toward zero like any other count
        let bins = number_or(config, &["Bins", "bins"], DEFAULT_BINS as f64).trunc();
        if bins < 1.0 {
            return Err(Error::InvalidConfig {
                renderer: self.name(),
                reason: format!("\"Bins\" must be at least 1, found {}", bins),
            });
        }

        let values = required(config, &["Data", "data"], Value::to_number_vec)?;
        if values.is_empty() {
            return Err(Error::InvalidConfig {
                renderer: self.name(),
                reason: "\"Data\" must contain at least one number".to_string(),
            });
        }

        Ok(Chart::Hist(HistChart {
            frame,
            bins: bins as usize,
            values,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn render(input: &str) -> Result<HistChart> {
        match HistRenderer.render(&parse(input)?)? {
            Chart::Hist(chart) => Ok(chart),
            other => panic!("expected a histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_hist_defaults() {
        let chart = render(r#"{"Data": [1, 2, 2, 3]}"#).unwrap();
        assert_eq!(chart.bins, 8);
        assert_eq!(chart.values, vec![1.0, 2.0, 2.0, 3.0]);
        assert_eq!(chart.frame.title, "plot");
        assert_eq!(chart.frame.x_label, "X");
    }

    #[test]
    fn test_hist_bins_truncated() {
        let chart = render(r#"{"bins": 3.9, "data": [1]}"#).unwrap();
        assert_eq!(chart.bins, 3);
    }

    #[test]
    fn test_hist_rejects_zero_bins() {
        let err = render(r#"{"Bins": 0.5, "Data": [1]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { renderer: "hist-plotter", .. }));
    }

    #[test]
    fn test_hist_requires_data() {
        let err = render(r#"{"Bins": 4}"#).unwrap_err();
        assert!(matches!(err, Error::Field { ref field, .. } if field == "Data"));

        let err = render(r#"{"Data": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
