use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("unsupported chart type: {chart_type}")]
    UnsupportedChartType { chart_type: String },

    #[error("unsupported aggregation: {agg}")]
    UnsupportedAggregation { agg: String },

    #[error("malformed query parameter `{field}`: {message}")]
    MalformedQueryParam { field: &'static str, message: String },

    #[error("{0}")]
    Query(String),

    #[error("chart build failed: {0}")]
    Build(String),
}
