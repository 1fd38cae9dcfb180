//! The option model: the declarative bundle of user selections driving a chart.
//!
//! `ChartOptions` is reconstructed on every interaction from client-held
//! state; it carries no server-side session data. `resolve_change` is the
//! single entry point for folding a batch of edits into a validated bundle
//! plus the control-visibility map the UI needs next.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::visibility::{VisibilityMap, resolve_visibility};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Scatter,
    Pie,
    Wordcloud,
    Heatmap,
    #[serde(rename = "3d_scatter")]
    ThreeDScatter,
    Surface,
    Maps,
    Candlestick,
}

impl ChartType {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Wordcloud => "wordcloud",
            Self::Heatmap => "heatmap",
            Self::ThreeDScatter => "3d_scatter",
            Self::Surface => "surface",
            Self::Maps => "maps",
            Self::Candlestick => "candlestick",
        }
    }

    /// Chart types whose value axis is a `z` column (weighting).
    #[must_use]
    pub fn uses_z(self) -> bool {
        matches!(self, Self::Heatmap | Self::ThreeDScatter | Self::Surface)
    }

    /// Chart types that accept grouping columns and multiple y-series.
    #[must_use]
    pub fn supports_group(self) -> bool {
        matches!(self, Self::Line | Self::Bar | Self::Scatter)
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        Ok(match raw {
            "line" => Self::Line,
            "bar" => Self::Bar,
            "scatter" => Self::Scatter,
            "pie" => Self::Pie,
            "wordcloud" => Self::Wordcloud,
            "heatmap" => Self::Heatmap,
            "3d_scatter" => Self::ThreeDScatter,
            "surface" => Self::Surface,
            "maps" => Self::Maps,
            "candlestick" => Self::Candlestick,
            _ => {
                return Err(ChartError::UnsupportedChartType {
                    chart_type: raw.to_owned(),
                });
            }
        })
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Count,
    First,
    Last,
    Mean,
    Median,
    Min,
    Max,
    Std,
    Var,
    Sum,
    Rolling,
}

impl Aggregation {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::First => "first",
            Self::Last => "last",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Std => "std",
            Self::Var => "var",
            Self::Sum => "sum",
            Self::Rolling => "rolling",
        }
    }
}

impl FromStr for Aggregation {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        Ok(match raw {
            "count" => Self::Count,
            "first" => Self::First,
            "last" => Self::Last,
            "mean" => Self::Mean,
            "median" => Self::Median,
            "min" => Self::Min,
            "max" => Self::Max,
            "std" => Self::Std,
            "var" => Self::Var,
            "sum" => Self::Sum,
            "rolling" => Self::Rolling,
            _ => return Err(ChartError::UnsupportedAggregation { agg: raw.to_owned() }),
        })
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Barmode {
    #[default]
    Group,
    Stack,
}

impl Barmode {
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Stack => "stack",
        }
    }
}

impl FromStr for Barmode {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        match raw {
            "group" => Ok(Self::Group),
            "stack" => Ok(Self::Stack),
            _ => Err(ChartError::MalformedQueryParam {
                field: "barmode",
                message: format!("expected `group` or `stack`, got `{raw}`"),
            }),
        }
    }
}

/// The full chart configuration bundle.
///
/// `y` is always an ordered sequence; a single column supplied by the client
/// is normalized into a one-element list on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub chart_type: ChartType,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub y: Vec<String>,
    #[serde(default)]
    pub z: Option<String>,
    #[serde(default)]
    pub group: Option<Vec<String>>,
    #[serde(default)]
    pub agg: Option<Aggregation>,
    #[serde(default)]
    pub window: Option<u32>,
    #[serde(default)]
    pub rolling_comp: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl ChartOptions {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            x: None,
            y: Vec::new(),
            z: None,
            group: None,
            agg: None,
            window: None,
            rolling_comp: None,
            query: None,
        }
    }

    #[must_use]
    pub fn grouped(&self) -> bool {
        self.group.as_ref().is_some_and(|g| !g.is_empty())
    }

    /// Enforces the rolling-window invariant: `window`/`rolling_comp` exist
    /// iff the aggregation is `rolling`.
    pub fn validate(mut self) -> ChartResult<Self> {
        if self.agg != Some(Aggregation::Rolling) {
            self.window = None;
            self.rolling_comp = None;
        }
        Ok(self)
    }
}

/// Chart-type-independent rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInputs {
    #[serde(default)]
    pub cpg: bool,
    #[serde(default)]
    pub barmode: Barmode,
    #[serde(default)]
    pub barsort: Option<String>,
}

impl Default for ChartInputs {
    fn default() -> Self {
        Self {
            cpg: false,
            barmode: Barmode::Group,
            barsort: None,
        }
    }
}

/// One edited field, as raw client values.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionChange {
    ChartType(String),
    X(Option<String>),
    Y(Vec<String>),
    Z(Option<String>),
    Group(Option<Vec<String>>),
    Agg(Option<String>),
    Window(Option<u32>),
    RollingComp(Option<String>),
    Query(Option<String>),
}

/// Folds a batch of edits into a new validated option bundle and the control
/// visibility derived from it.
///
/// Pure over its inputs: the "what changed" bookkeeping lives entirely in the
/// `changes` slice, so no UI callback graph is assumed.
pub fn resolve_change(
    prev: &ChartOptions,
    changes: &[OptionChange],
) -> ChartResult<(ChartOptions, VisibilityMap)> {
    let mut next = prev.clone();
    for change in changes {
        match change {
            OptionChange::ChartType(raw) => next.chart_type = raw.parse()?,
            OptionChange::X(value) => next.x = value.clone(),
            OptionChange::Y(value) => next.y = value.clone(),
            OptionChange::Z(value) => next.z = value.clone(),
            OptionChange::Group(value) => next.group = value.clone(),
            OptionChange::Agg(value) => {
                next.agg = match value {
                    Some(raw) => Some(raw.parse()?),
                    None => None,
                };
            }
            OptionChange::Window(value) => next.window = *value,
            OptionChange::RollingComp(value) => next.rolling_comp = value.clone(),
            OptionChange::Query(value) => next.query = value.clone(),
        }
    }

    let next = next.validate()?;
    let visibility = resolve_visibility(&next);
    Ok((next, visibility))
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let raw: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(OneOrMany::One(column)) => vec![column],
        Some(OneOrMany::Many(columns)) => columns,
    })
}

#[cfg(test)]
mod tests {
    use super::{ChartOptions, ChartType};

    #[test]
    fn single_y_column_normalizes_to_sequence() {
        let options: ChartOptions =
            serde_json::from_str(r#"{"chart_type": "line", "y": "b"}"#).expect("valid options");
        assert_eq!(options.y, vec!["b".to_owned()]);
    }

    #[test]
    fn null_y_normalizes_to_empty_sequence() {
        let options: ChartOptions =
            serde_json::from_str(r#"{"chart_type": "line", "y": null}"#).expect("valid options");
        assert!(options.y.is_empty());
    }

    #[test]
    fn three_d_scatter_uses_wire_name() {
        let chart_type: ChartType = "3d_scatter".parse().expect("valid type");
        assert_eq!(chart_type, ChartType::ThreeDScatter);
        assert_eq!(
            serde_json::to_string(&chart_type).expect("serializable"),
            r#""3d_scatter""#
        );
    }
}
