//! Dataset access and the query collaborator boundary.
//!
//! The session-keyed dataset store is an injected read-only interface, never
//! a module-level global: each interaction touches only its own session's
//! immutable snapshot. Expected query failures travel as data
//! ([`QueryOutcome`]), not as panics.

use indexmap::IndexMap;

use crate::core::ranges::{AxisRange, RangeMap};
use crate::error::{ChartError, ChartResult};

/// An ordered column map. Data formatting/loading is owned by the embedding
/// application; the chart core only reads.
pub type Dataset = IndexMap<String, Vec<f64>>;

/// Read-only access to per-session datasets.
pub trait DatasetStore {
    fn dataset(&self, data_id: &str) -> Option<&Dataset>;
}

/// Simple owned store, used by embedders and throughout the test suite.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    datasets: IndexMap<String, Dataset>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, data_id: impl Into<String>, dataset: Dataset) {
        self.datasets.insert(data_id.into(), dataset);
    }
}

impl DatasetStore for InMemoryStore {
    fn dataset(&self, data_id: &str) -> Option<&Dataset> {
        self.datasets.get(data_id)
    }
}

/// Result of validating a filter expression against a session's dataset.
///
/// `Accepted` echoes the raw expression back (or `None` when no filter is
/// set); `Rejected` carries the message the UI surfaces next to the query
/// input. Rejection leaves downstream data untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Accepted { query: Option<String> },
    Rejected { error: String },
}

/// Validates `expr` against the dataset for `data_id`.
pub fn run_query(store: &dyn DatasetStore, data_id: &str, expr: Option<&str>) -> QueryOutcome {
    let expr = match expr.map(str::trim) {
        None | Some("") => return QueryOutcome::Accepted { query: None },
        Some(expr) => expr,
    };

    let Some(dataset) = store.dataset(data_id) else {
        return QueryOutcome::Rejected {
            error: format!("no dataset loaded for '{data_id}'"),
        };
    };

    match apply_query(dataset, expr) {
        Ok(_) => QueryOutcome::Accepted {
            query: Some(expr.to_owned()),
        },
        Err(err) => QueryOutcome::Rejected {
            error: match err {
                ChartError::Query(message) => message,
                other => other.to_string(),
            },
        },
    }
}

#[derive(Clone, Copy)]
enum Comparison {
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
}

impl Comparison {
    fn eval(self, left: f64, right: f64) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Le => left <= right,
            Self::Ge => left >= right,
            Self::Lt => left < right,
            Self::Gt => left > right,
        }
    }
}

// Two-character operators first so `<=` is not split as `<`.
const OPERATORS: [(&str, Comparison); 6] = [
    ("==", Comparison::Eq),
    ("!=", Comparison::Ne),
    ("<=", Comparison::Le),
    (">=", Comparison::Ge),
    ("<", Comparison::Lt),
    (">", Comparison::Gt),
];

/// Filters `dataset` by a comparison expression (`<column> <op> <literal>`)
/// or a bare truthy column reference.
///
/// A reference to an undefined column fails with
/// `name '<column>' is not defined`.
pub fn apply_query(dataset: &Dataset, expr: &str) -> ChartResult<Dataset> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Ok(dataset.clone());
    }

    for (token, comparison) in OPERATORS {
        let Some(position) = expr.find(token) else {
            continue;
        };
        let name = expr[..position].trim();
        let literal = expr[position + token.len()..].trim();
        let column = lookup_column(dataset, name)?;
        let value: f64 = literal.parse().map_err(|_| {
            ChartError::Query(format!("invalid literal in filter expression: '{literal}'"))
        })?;
        let mask: Vec<bool> = column.iter().map(|v| comparison.eval(*v, value)).collect();
        return Ok(apply_mask(dataset, &mask));
    }

    let column = lookup_column(dataset, expr)?;
    let mask: Vec<bool> = column.iter().map(|v| *v != 0.0).collect();
    Ok(apply_mask(dataset, &mask))
}

fn lookup_column<'a>(dataset: &'a Dataset, name: &str) -> ChartResult<&'a Vec<f64>> {
    dataset
        .get(name)
        .ok_or_else(|| ChartError::Query(format!("name '{name}' is not defined")))
}

fn apply_mask(dataset: &Dataset, mask: &[bool]) -> Dataset {
    dataset
        .iter()
        .map(|(name, values)| {
            let filtered = values
                .iter()
                .zip(mask)
                .filter_map(|(value, keep)| keep.then_some(*value))
                .collect();
            (name.clone(), filtered)
        })
        .collect()
}

/// Computes the data-derived `{min, max}` per requested column, skipping
/// columns with no finite values.
#[must_use]
pub fn compute_data_ranges(dataset: &Dataset, columns: &[String]) -> RangeMap {
    let mut ranges = RangeMap::new();
    for column in columns {
        let Some(values) = dataset.get(column) else {
            continue;
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.iter().copied().filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        if min <= max {
            ranges.insert(column.clone(), AxisRange::new(min, max));
        }
    }
    ranges
}
