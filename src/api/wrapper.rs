//! Popup-link wrapping around built figures.
//!
//! The embedding UI shows every chart with an "open in new tab" affordance;
//! the link must reconstruct the exact chart, minus any state that is
//! redundant against the current data (an axis override equal to the
//! data-derived range carries no information).

use crate::api::figure::FigureResult;
use crate::api::url_state::{UrlState, popup_url};
use crate::core::ranges::RangeMap;
use crate::error::ChartResult;

/// A prepared wrapper: either a concrete popup link or the identity wrap
/// when no URL state was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartWrapper {
    popup: Option<String>,
}

impl ChartWrapper {
    #[must_use]
    pub fn popup_url(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    #[must_use]
    pub fn wrap(&self, content: FigureResult) -> WrappedChart {
        WrappedChart {
            popup_url: self.popup.clone(),
            content,
        }
    }
}

/// A figure payload plus the link that reopens it standalone.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedChart {
    pub popup_url: Option<String>,
    pub content: FigureResult,
}

/// Prepares the popup wrapper for a chart.
///
/// With no URL state the wrapper is the identity: content passes through
/// unchanged with no link attached. Otherwise the state is pruned against the
/// current data ranges before encoding, so overrides that merely restate the
/// data range never leak into shared links.
pub fn chart_wrapper(
    data_id: &str,
    data_ranges: &RangeMap,
    url_state: Option<&UrlState>,
) -> ChartResult<ChartWrapper> {
    let Some(state) = url_state else {
        return Ok(ChartWrapper { popup: None });
    };

    let mut state = state.clone();
    state.yaxis.prune_matching(data_ranges);
    Ok(ChartWrapper {
        popup: Some(popup_url(data_id, &state)?),
    })
}
