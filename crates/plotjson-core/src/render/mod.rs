//! Renderers - turn a job's `Config` into a typed chart description
//!
//! Each renderer reads its fields through the accessor layer. Optional
//! fields fall back to a default when absent or mistyped; required fields
//! fail with an error naming the field.
//!
//! The chart description is what gets written to the job's `Path`;
//! drawing pixels is left to whatever consumes that file.

pub mod bar;
pub mod dot;
pub mod hist;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::job::Job;
use crate::value::Value;
use crate::{Error, Result};

pub use bar::{BarChart, BarGroup, BarRenderer};
pub use dot::{DotChart, DotRenderer, Series};
pub use hist::{HistChart, HistRenderer};

/// A resolved chart, tagged with the kind of plot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    Bar(BarChart),
    Dot(DotChart),
    Hist(HistChart),
}

/// Title, axis labels and canvas settings shared by every chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grids: bool,
    /// Edge length of the square canvas, in inches
    pub size: f64,
}

impl Frame {
    /// Read the shared fields, using the given defaults for
    /// title and axis labels
    pub fn read(config: &Value, title: &str, x_label: &str, y_label: &str) -> Self {
        Frame {
            title: string_or(config, &["Title", "title"], title),
            x_label: string_or(config, &["X", "x"], x_label),
            y_label: string_or(config, &["Y", "y"], y_label),
            grids: optional(config, &["Grids", "grids"], Value::as_bool).unwrap_or(false),
            size: number_or(config, &["Size", "size"], 4.0),
        }
    }
}

/// A chart kind that can be selected by a job's `Type`
pub trait Renderer: Send + Sync {
    /// Name jobs use to select this renderer
    fn name(&self) -> &'static str;

    /// Resolve `config` into a chart
    fn render(&self, config: &Value) -> Result<Chart>;
}

/// Renderers keyed by name
pub struct Registry {
    renderers: BTreeMap<&'static str, Box<dyn Renderer>>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Registry {
            renderers: BTreeMap::new(),
        }
    }

    /// Registry with `bar-plotter`, `dot-plotter` and `hist-plotter`
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();
        registry.register(Box::new(BarRenderer));
        registry.register(Box::new(DotRenderer));
        registry.register(Box::new(HistRenderer));
        registry
    }

    /// Add a renderer, replacing any with the same name
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.name(), renderer);
    }

    pub fn get(&self, name: &str) -> Result<&dyn Renderer> {
        self.renderers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| Error::UnknownRenderer(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.renderers.keys().copied()
    }

    /// Dispatch a job to the renderer its `Type` names
    pub fn render(&self, job: &Job<'_>) -> Result<Chart> {
        let renderer = self.get(job.renderer)?;
        debug!(index = job.index, renderer = renderer.name(), "rendering job");
        renderer.render(job.config)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ── Field helpers ─────────────────────────────────────────

/// Read an optional field. A present but unreadable value is logged and
/// treated as absent.
pub(crate) fn optional<'a, T>(
    config: &'a Value,
    keys: &[&str],
    read: impl FnOnce(&'a Value) -> Result<T>,
) -> Option<T> {
    let value = config.get_any_of(keys).ok()?;
    match read(value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(field = keys[0], error = %e, "ignoring field, using default");
            None
        }
    }
}

pub(crate) fn string_or(config: &Value, keys: &[&str], default: &str) -> String {
    optional(config, keys, Value::as_str)
        .unwrap_or(default)
        .to_string()
}

pub(crate) fn number_or(config: &Value, keys: &[&str], default: f64) -> f64 {
    optional(config, keys, Value::as_number).unwrap_or(default)
}

/// Read a required field, naming it in the error
pub(crate) fn required<'a, T>(
    config: &'a Value,
    keys: &[&str],
    read: impl FnOnce(&'a Value) -> Result<T>,
) -> Result<T> {
    config
        .get_any_of(keys)
        .and_then(read)
        .map_err(|e| Error::field(keys[0], e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_registry_defaults() {
        let registry = Registry::default();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["bar-plotter", "dot-plotter", "hist-plotter"]);
    }

    #[test]
    fn test_unknown_renderer() {
        let err = Registry::with_defaults().get("pie-plotter").err().unwrap();
        assert_eq!(err, Error::UnknownRenderer("pie-plotter".into()));
    }

    #[test]
    fn test_register_custom_renderer() {
        struct Fixed;
        impl Renderer for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }
            fn render(&self, _config: &Value) -> Result<Chart> {
                Ok(Chart::Hist(HistChart {
                    frame: Frame::read(&Value::Null, "t", "x", "y"),
                    bins: 1,
                    values: vec![1.0],
                }))
            }
        }

        let mut registry = Registry::new();
        registry.register(Box::new(Fixed));
        let root = parse(r#"{"Type": "fixed", "Path": "p", "Config": null}"#).unwrap();
        let job = Job::from_value(0, &root).unwrap();
        assert!(matches!(registry.render(&job), Ok(Chart::Hist(_))));
    }

    #[test]
    fn test_frame_defaults_and_overrides() {
        let config = parse(r#"{"title": "T", "Y": "count", "Grids": true, "Size": 6}"#).unwrap();
        let frame = Frame::read(&config, "Plot", "X", "Y");
        assert_eq!(frame, Frame {
            title: "T".into(),
            x_label: "X".into(),
            y_label: "count".into(),
            grids: true,
            size: 6.0,
        });
    }

    #[test]
    fn test_mistyped_optional_field_uses_default() {
        let config = parse(r#"{"Title": 12, "Grids": "yes", "Size": "large"}"#).unwrap();
        let frame = Frame::read(&config, "Plot", "X", "Y");
        assert_eq!(frame.title, "Plot");
        assert!(!frame.grids);
        assert_eq!(frame.size, 4.0);
    }

    #[test]
    fn test_frame_from_non_object_config() {
        let frame = Frame::read(&Value::List(vec![]), "Plot", "X", "Y");
        assert_eq!(frame.title, "Plot");
    }

    #[test]
    fn test_chart_serializes_with_kind_tag() {
        let chart = Chart::Hist(HistChart {
            frame: Frame::read(&Value::Null, "plot", "X", "Y"),
            bins: 2,
            values: vec![1.0, 2.0],
        });
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "hist");
        assert_eq!(json["title"], "plot");
        assert_eq!(json["bins"], 2);
    }
}
