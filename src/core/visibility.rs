//! Control-visibility resolution.
//!
//! Maps the current option bundle to the set of optional controls the UI
//! should show, plus the allowed values for option-carrying controls. Every
//! rule is evaluated independently of the others, so changing any single
//! field (the chart type in particular) yields a complete, correct map
//! without resubmitting unrelated fields.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::options::{Aggregation, ChartOptions, ChartType};
use crate::core::ranges::{RangeMap, YAxisRanges};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlDisplay {
    Block,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlState {
    pub display: ControlDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ControlState {
    #[must_use]
    pub fn shown(show: bool) -> Self {
        Self {
            display: if show {
                ControlDisplay::Block
            } else {
                ControlDisplay::None
            },
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(show: bool, options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::shown(show)
        }
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.display == ControlDisplay::Block
    }
}

pub type VisibilityMap = IndexMap<&'static str, ControlState>;

/// Computes the visibility map for the given option bundle.
pub fn resolve_visibility(options: &ChartOptions) -> VisibilityMap {
    let chart_type = options.chart_type;
    let z_family = chart_type.uses_z();
    let grouped = options.grouped();
    let is_bar = chart_type == ChartType::Bar;

    // barsort orders the categorical x axis, so it may only name a currently
    // selected column.
    let barsort_options: Vec<String> = options
        .x
        .iter()
        .chain(options.y.iter())
        .cloned()
        .collect();

    let mut controls = VisibilityMap::new();
    controls.insert("y-input", ControlState::shown(!z_family));
    controls.insert("y-single-input", ControlState::shown(z_family));
    controls.insert("z-input", ControlState::shown(z_family));
    controls.insert("group-input", ControlState::shown(chart_type.supports_group()));
    controls.insert(
        "rolling-inputs",
        ControlState::shown(options.agg == Some(Aggregation::Rolling)),
    );
    controls.insert(
        "cpg-input",
        ControlState::shown(grouped && chart_type.supports_group()),
    );
    controls.insert("barmode-input", ControlState::shown(is_bar));
    controls.insert(
        "barsort-input",
        ControlState::with_options(is_bar, barsort_options),
    );
    controls.insert(
        "yaxis-input",
        ControlState::with_options(
            options.y.len() == 1 && chart_type != ChartType::Heatmap,
            options.y.clone(),
        ),
    );
    controls
}

/// Resolves the contents of the y-axis min/max editor.
///
/// Returns `(None, None)` when no column is selected, the column is not
/// currently plotted, or the chart type has no per-series range override
/// (heatmap). Otherwise the user's override wins over the data range.
#[must_use]
pub fn yaxis_range_values(
    options: &ChartOptions,
    selected: Option<&str>,
    overrides: &YAxisRanges,
    ranges: &RangeMap,
) -> (Option<f64>, Option<f64>) {
    let Some(column) = selected else {
        return (None, None);
    };
    if options.chart_type == ChartType::Heatmap || !options.y.iter().any(|c| c == column) {
        return (None, None);
    }

    if let Some(range) = overrides.get(column).or_else(|| ranges.get(column)) {
        (Some(range.min), Some(range.max))
    } else {
        (None, None)
    }
}
