//! Multi-axis layout geometry.
//!
//! When several y-series with independent scales share one plot, each series
//! beyond the first gets its own overlaid y axis and the x-axis domain
//! narrows to make room for the stacked axis rails. The accumulation order
//! of the 0.05 domain steps is part of the visual/shareable-URL contract and
//! must not be replaced with rounded arithmetic.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::ranges::{RangeMap, YAxisRanges};
use crate::core::ticks::SpacedTicks;

/// Fixed numeric tick format used unless the chart context dictates
/// category ticks.
pub const NUMERIC_TICKFORMAT: &str = ".0f";

const AXIS_INSET_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisAnchor {
    X,
    Free,
}

/// One y axis of the layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<AxisSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AxisAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    pub tickformat: &'static str,
}

impl AxisSpec {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            range: None,
            overlaying: None,
            side: None,
            anchor: None,
            position: None,
            tickformat: NUMERIC_TICKFORMAT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(flatten)]
    pub ticks: Option<SpacedTicks>,
    pub tickformat: &'static str,
}

impl XAxisSpec {
    fn plain() -> Self {
        Self {
            title: None,
            domain: None,
            ticks: None,
            tickformat: NUMERIC_TICKFORMAT,
        }
    }
}

/// The full axis assignment: y axes keyed `yaxis`, `yaxis2`, ... plus the
/// shared x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub y_axes: IndexMap<String, AxisSpec>,
    pub x_axis: XAxisSpec,
}

/// Computes the axis layout for the given ordered y columns.
///
/// A y axis carries an explicit `range` only when the user's override
/// differs from the data-derived range; an override equal to the data range
/// counts as cleared. With `z` set (heatmap family) the layout degenerates
/// to a single titled axis pair with no overlay geometry.
#[must_use]
pub fn build_axes(
    x: &str,
    y: &[String],
    overrides: &YAxisRanges,
    ranges: &RangeMap,
    z: Option<&str>,
) -> AxisLayout {
    if z.is_some() {
        let mut y_axes = IndexMap::new();
        if let Some(first) = y.first() {
            y_axes.insert("yaxis".to_owned(), AxisSpec::titled(first));
        }
        let mut x_axis = XAxisSpec::plain();
        x_axis.title = Some(x.to_owned());
        return AxisLayout { y_axes, x_axis };
    }

    let mut y_axes = IndexMap::with_capacity(y.len());
    let mut left_pos = 0.0_f64;
    let mut right_pos = 1.0_f64;
    let mut has_free_left = false;
    let mut has_free_right = false;

    for (index, column) in y.iter().enumerate() {
        let key = if index == 0 {
            "yaxis".to_owned()
        } else {
            format!("yaxis{}", index + 1)
        };

        let mut spec = AxisSpec::titled(column);
        if index == 1 {
            spec.overlaying = Some("y");
            spec.side = Some(AxisSide::Right);
            spec.anchor = Some(AxisAnchor::X);
        } else if index >= 2 {
            spec.overlaying = Some("y");
            spec.anchor = Some(AxisAnchor::Free);
            if index % 2 == 0 {
                left_pos += AXIS_INSET_STEP;
                spec.side = Some(AxisSide::Left);
                spec.position = Some(left_pos);
                has_free_left = true;
            } else {
                right_pos -= AXIS_INSET_STEP;
                spec.side = Some(AxisSide::Right);
                spec.position = Some(right_pos);
                has_free_right = true;
            }
        }

        if let Some(user_range) = overrides.get(column) {
            if ranges.get(column) != Some(user_range) {
                spec.range = Some([user_range.min, user_range.max]);
            }
        }

        y_axes.insert(key, spec);
    }

    let mut x_axis = XAxisSpec::plain();
    if has_free_left || has_free_right {
        let lower = if has_free_left {
            left_pos + AXIS_INSET_STEP
        } else {
            0.0
        };
        let upper = if has_free_right {
            right_pos - AXIS_INSET_STEP
        } else {
            1.0
        };
        x_axis.domain = Some([lower, upper]);
    }

    AxisLayout { y_axes, x_axis }
}
