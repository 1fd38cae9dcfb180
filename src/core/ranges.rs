//! Per-column numeric ranges and the user's y-axis range overrides.
//!
//! `YAxisRanges` is the only piece of state that survives across
//! interactions; it round-trips through the client on every request and is
//! pruned whenever the plotted `y` selection changes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Data-derived `{min, max}` per column, recomputed whenever the query or
/// data selection changes.
pub type RangeMap = IndexMap<String, AxisRange>;

/// User-set per-column range overrides, keyed by y-column name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YAxisRanges {
    overrides: RangeMap,
}

impl YAxisRanges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&AxisRange> {
        self.overrides.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, range: AxisRange) {
        self.overrides.insert(column.into(), range);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AxisRange)> {
        self.overrides.iter()
    }

    /// Applies an axis-range edit for `column`.
    ///
    /// Returns `false` when no column is selected: the edit event carries no
    /// target and the map is left untouched. Setting a pair equal to the
    /// data-derived range clears the override, as does clearing either bound.
    pub fn apply_edit(
        &mut self,
        column: Option<&str>,
        min: Option<f64>,
        max: Option<f64>,
        data_range: Option<AxisRange>,
    ) -> bool {
        let Some(column) = column else {
            return false;
        };

        match (min, max) {
            (Some(min), Some(max)) if data_range != Some(AxisRange { min, max }) => {
                self.overrides
                    .insert(column.to_owned(), AxisRange { min, max });
            }
            _ => {
                self.overrides.shift_remove(column);
            }
        }
        true
    }

    /// Drops overrides for columns that are no longer plotted, so the map
    /// cannot grow unbounded across an interactive session.
    pub fn prune(&mut self, y: &[String]) {
        self.overrides.retain(|column, _| y.iter().any(|c| c == column));
    }

    /// Drops overrides that match the data-derived range exactly; such an
    /// override is indistinguishable from "no override" and only bloats
    /// shared links.
    pub fn prune_matching(&mut self, ranges: &RangeMap) {
        self.overrides
            .retain(|column, range| ranges.get(column).is_none_or(|data| data != range));
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisRange, YAxisRanges};

    #[test]
    fn edit_matching_data_range_clears_override() {
        let mut ranges = YAxisRanges::new();
        ranges.insert("Col1", AxisRange::new(-1.52, 1.42));

        let applied = ranges.apply_edit(
            Some("Col1"),
            Some(-0.52),
            Some(0.42),
            Some(AxisRange::new(-0.52, 0.42)),
        );
        assert!(applied);
        assert!(ranges.is_empty());
    }

    #[test]
    fn edit_without_column_is_a_no_op() {
        let mut ranges = YAxisRanges::new();
        let applied = ranges.apply_edit(None, Some(0.0), Some(1.0), None);
        assert!(!applied);
        assert!(ranges.is_empty());
    }

    #[test]
    fn prune_drops_unplotted_columns() {
        let mut ranges = YAxisRanges::new();
        ranges.insert("b", AxisRange::new(3.0, 6.0));
        ranges.insert("d", AxisRange::new(7.0, 10.0));

        ranges.prune(&["b".to_owned(), "c".to_owned()]);
        assert_eq!(ranges.len(), 1);
        assert!(ranges.get("b").is_some());
    }
}
