//! The serializable figure payload handed to the rendering layer.
//!
//! Rendering itself is out of scope; the figure is an opaque artifact from
//! the caller's point of view, serialized with the layout keys the embedding
//! UI expects (`yaxis`, `yaxis2`, ..., `xaxis`, `barmode`, `title`).

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::axes::{AxisSpec, XAxisSpec};
use crate::core::options::{Barmode, ChartType};
use crate::error::ChartError;

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
    /// Category labels for label-driven charts (pie slices, word clouds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Axis reference (`y2`, `y3`, ...) for series on a secondary axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    #[must_use]
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z: None,
            labels: None,
            yaxis: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<Barmode>,
    pub xaxis: XAxisSpec,
    #[serde(flatten)]
    pub yaxes: IndexMap<String, AxisSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub id: String,
    pub chart_type: ChartType,
    pub layout: Layout,
    pub traces: Vec<Trace>,
}

/// Structured build failure surfaced to the caller instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFailure {
    pub error: String,
    pub traceback: String,
}

impl BuildFailure {
    /// Captures the failure plus enough context to diagnose it without a
    /// debugger attached to the interactive session.
    #[must_use]
    pub fn from_error(data_id: &str, chart_type: ChartType, err: &ChartError) -> Self {
        let error = match err {
            ChartError::Query(message) => message.clone(),
            ChartError::Build(message) => message.clone(),
            other => other.to_string(),
        };
        let traceback = format!(
            "chart build failed\n  data_id: {data_id}\n  chart_type: {chart_type}\n  cause: {err}"
        );
        Self { error, traceback }
    }
}

/// Outcome of a figure build: artifacts (one per group split) or a contained
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FigureResult {
    Figures(Vec<Figure>),
    Error(BuildFailure),
}

impl FigureResult {
    #[must_use]
    pub fn figures(&self) -> Option<&[Figure]> {
        match self {
            Self::Figures(figures) => Some(figures),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&BuildFailure> {
        match self {
            Self::Figures(_) => None,
            Self::Error(failure) => Some(failure),
        }
    }
}
