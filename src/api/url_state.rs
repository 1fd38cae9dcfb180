//! The shareable-URL codec.
//!
//! Encodes a `ChartOptions` + `ChartInputs` + y-axis-override bundle into an
//! ordered query string and back. Field names and encodings are a stable
//! contract: existing shared links must keep resolving. Sequence fields are
//! JSON-array strings, the override map a JSON-object string pruned to the
//! currently plotted columns.

use serde::Serialize;
use url::form_urlencoded;

use crate::core::options::{ChartInputs, ChartOptions, ChartType};
use crate::core::ranges::YAxisRanges;
use crate::error::{ChartError, ChartResult};

/// Everything a popup link needs to rebuild the exact chart.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlState {
    pub options: ChartOptions,
    pub inputs: ChartInputs,
    pub yaxis: YAxisRanges,
}

impl UrlState {
    #[must_use]
    pub fn new(options: ChartOptions, inputs: ChartInputs) -> Self {
        Self {
            options,
            inputs,
            yaxis: YAxisRanges::new(),
        }
    }

    #[must_use]
    pub fn with_yaxis(mut self, yaxis: YAxisRanges) -> Self {
        self.yaxis = yaxis;
        self
    }
}

/// Serializes the state into a query string (without the leading `?`).
pub fn encode_url_params(state: &UrlState) -> ChartResult<String> {
    let options = &state.options;
    let inputs = &state.inputs;
    let mut qs = form_urlencoded::Serializer::new(String::new());

    qs.append_pair("chart_type", options.chart_type.wire_name());
    if let Some(query) = &options.query {
        qs.append_pair("query", query);
    }
    if let Some(x) = &options.x {
        qs.append_pair("x", x);
    }
    if let Some(z) = &options.z {
        qs.append_pair("z", z);
    }
    if let Some(agg) = options.agg {
        qs.append_pair("agg", agg.wire_name());
    }
    if let Some(window) = options.window {
        qs.append_pair("window", &window.to_string());
    }
    if let Some(rolling_comp) = &options.rolling_comp {
        qs.append_pair("rolling_comp", rolling_comp);
    }
    qs.append_pair("cpg", if inputs.cpg { "true" } else { "false" });
    if options.chart_type == ChartType::Bar {
        qs.append_pair("barmode", inputs.barmode.wire_name());
        if let Some(barsort) = &inputs.barsort {
            qs.append_pair("barsort", barsort);
        }
    }
    if !options.y.is_empty() {
        qs.append_pair("y", &json_param("y", &options.y)?);
    }
    if let Some(group) = options.group.as_ref().filter(|g| !g.is_empty()) {
        qs.append_pair("group", &json_param("group", group)?);
    }

    // Overrides for columns no longer plotted are dropped here, so shared
    // links never resurrect stale axis state.
    let mut pruned = state.yaxis.clone();
    pruned.prune(&options.y);
    if !pruned.is_empty() {
        qs.append_pair("yaxis", &json_param("yaxis", &pruned)?);
    }

    Ok(qs.finish())
}

/// Parses a query string (with or without the leading `?`) back into state.
///
/// Missing fields decode to their defaults (empty `y`, no group, `cpg`
/// false); unknown keys are ignored; structurally invalid JSON sub-values
/// fail with [`ChartError::MalformedQueryParam`] naming the field.
pub fn decode_url_params(query: &str) -> ChartResult<UrlState> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut chart_type = None;
    let mut options = ChartOptions::new(ChartType::Line);
    let mut inputs = ChartInputs::default();
    let mut yaxis = YAxisRanges::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "chart_type" => chart_type = Some(value.parse::<ChartType>()?),
            "query" => options.query = Some(value.into_owned()),
            "x" => options.x = Some(value.into_owned()),
            "z" => options.z = Some(value.into_owned()),
            "agg" => options.agg = Some(value.parse()?),
            "window" => {
                options.window =
                    Some(
                        value
                            .parse()
                            .map_err(|_| ChartError::MalformedQueryParam {
                                field: "window",
                                message: format!("expected an integer, got `{value}`"),
                            })?,
                    );
            }
            "rolling_comp" => options.rolling_comp = Some(value.into_owned()),
            "cpg" => inputs.cpg = value == "true",
            "barmode" => inputs.barmode = value.parse()?,
            "barsort" => inputs.barsort = Some(value.into_owned()),
            "y" => options.y = json_field("y", &value)?,
            "group" => options.group = Some(json_field("group", &value)?),
            "yaxis" => yaxis = json_field("yaxis", &value)?,
            _ => {}
        }
    }

    let Some(chart_type) = chart_type else {
        return Err(ChartError::MalformedQueryParam {
            field: "chart_type",
            message: "missing required field".to_owned(),
        });
    };
    options.chart_type = chart_type;
    let options = options.validate()?;
    yaxis.prune(&options.y);

    Ok(UrlState {
        options,
        inputs,
        yaxis,
    })
}

/// Builds the shareable popup link for a session.
pub fn popup_url(data_id: &str, state: &UrlState) -> ChartResult<String> {
    Ok(format!(
        "/charts/popup/{data_id}?{}",
        encode_url_params(state)?
    ))
}

fn json_param<T: Serialize>(field: &'static str, value: &T) -> ChartResult<String> {
    serde_json::to_string(value).map_err(|e| ChartError::MalformedQueryParam {
        field,
        message: e.to_string(),
    })
}

fn json_field<T: serde::de::DeserializeOwned>(field: &'static str, raw: &str) -> ChartResult<T> {
    serde_json::from_str(raw).map_err(|e| ChartError::MalformedQueryParam {
        field,
        message: e.to_string(),
    })
}
