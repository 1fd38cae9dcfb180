//! datalens-charts: chart-configuration resolution and figure building for
//! interactive tabular-data exploration.
//!
//! The crate turns a declarative bundle of user-selected options (chart type,
//! axis/grouping columns, aggregation, bar settings) into validated
//! configuration, control-visibility state, multi-axis layout geometry and a
//! figure payload, and round-trips that configuration through a shareable
//! popup URL.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::api::{
    ChartWrapper, Dataset, DatasetStore, FigureResult, InMemoryStore, QueryOutcome, UrlState,
    build_figure_data, decode_url_params, encode_url_params, popup_url, run_query,
};
pub use crate::core::{Aggregation, Barmode, ChartInputs, ChartOptions, ChartType};
pub use crate::error::{ChartError, ChartResult};
