//! The interaction-facing surface: dataset access, query validation, the
//! shareable-URL codec, figure construction and popup wrapping.
//!
//! Everything here is stateless over injected inputs; the only persistent
//! state is the client-held [`UrlState`] round-tripping through the codec.

pub mod dispatch;
pub mod figure;
pub mod store;
pub mod url_state;
pub mod wrapper;

pub use dispatch::{BuildContext, build_chart, build_figure_data};
pub use figure::{BuildFailure, Figure, FigureResult, Layout, Trace};
pub use store::{
    Dataset, DatasetStore, InMemoryStore, QueryOutcome, apply_query, compute_data_ranges,
    run_query,
};
pub use url_state::{UrlState, decode_url_params, encode_url_params, popup_url};
pub use wrapper::{ChartWrapper, WrappedChart, chart_wrapper};
