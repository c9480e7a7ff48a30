//! Column-by-column reconciliation of a coincident pairing.
//!
//! Cells are never copied while scanning. Each data column keeps, per row, the
//! index of the original row whose value currently occupies that slot; copying
//! `cur` into `prev` rewrites one index. The working column is gathered from
//! the original data once the scan is finished.

use polars::prelude::{Column, IdxCa, IdxSize, Series};
use rollup_common::is_null_value;
use tracing::trace;

use crate::config::DataColumn;
use crate::error::Result;
use crate::state::ConflictTracker;

/// What happened to one cell of the predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellOutcome {
    /// Both cells null, or only the predecessor populated.
    Untouched,
    /// Null predecessor cell filled from the later row.
    Filled,
    /// Both populated on an override column; the later value won.
    Overridden,
    /// Both populated on a non-override column.
    Irresolvable,
}

#[derive(Debug)]
struct WorkingColumn {
    name: String,
    is_override: bool,
    nulls: Vec<bool>,
    source: Vec<IdxSize>,
}

impl WorkingColumn {
    fn new(data: &DataColumn<'_>) -> Result<Self> {
        let series = data.column.as_materialized_series();
        let height = series.len();
        let mut nulls = Vec::with_capacity(height);
        for row in 0..height {
            nulls.push(is_null_value(&series.get(row)?));
        }
        Ok(Self {
            name: data.name.to_string(),
            is_override: data.is_override,
            nulls,
            source: (0..height).map(|row| row as IdxSize).collect(),
        })
    }

    fn is_null(&self, row: usize) -> bool {
        self.nulls[self.source[row] as usize]
    }

    fn copy_into(&mut self, from: usize, into: usize) {
        self.source[into] = self.source[from];
    }

    fn reconcile(&mut self, cur: usize, prev: usize) -> CellOutcome {
        match (self.is_null(prev), self.is_null(cur)) {
            (false, false) if self.is_override => {
                self.copy_into(cur, prev);
                CellOutcome::Overridden
            }
            (false, false) => CellOutcome::Irresolvable,
            (true, false) => {
                self.copy_into(cur, prev);
                CellOutcome::Filled
            }
            _ => CellOutcome::Untouched,
        }
    }

    fn is_untouched(&self) -> bool {
        self.source
            .iter()
            .enumerate()
            .all(|(row, &source)| source as usize == row)
    }

    fn gather(&self, original: &Column) -> Result<Series> {
        let indices = IdxCa::from_vec("source".into(), self.source.clone());
        Ok(original.as_materialized_series().take(&indices)?)
    }
}

/// Reconciles the data columns of coincident pairings.
#[derive(Debug)]
pub(crate) struct ColumnReconciler {
    columns: Vec<WorkingColumn>,
}

impl ColumnReconciler {
    pub fn new(data: &[DataColumn<'_>]) -> Result<Self> {
        let columns = data
            .iter()
            .map(WorkingColumn::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Merge `cur` into `prev`, vetoing the merge on any irresolvable column.
    pub fn reconcile_pair(&mut self, cur: usize, prev: usize, tracker: &mut ConflictTracker) {
        tracker.begin_merge(cur);
        let mut irresolvable = false;
        for column in &mut self.columns {
            let outcome = column.reconcile(cur, prev);
            match outcome {
                CellOutcome::Untouched => continue,
                CellOutcome::Filled => tracker.record_fill(),
                CellOutcome::Overridden => {
                    tracker.record_override();
                    tracker.mark_conflict(cur, prev);
                }
                CellOutcome::Irresolvable => {
                    irresolvable = true;
                    tracker.mark_conflict(cur, prev);
                }
            }
            trace!(cur, prev, column = %column.name, ?outcome, "reconciled cell");
        }
        if irresolvable {
            tracker.veto_merge(cur);
        }
    }

    /// Working values for every column the scan changed, named after it.
    pub fn changed_columns(&self, data: &[DataColumn<'_>]) -> Result<Vec<Series>> {
        let mut changed = Vec::new();
        for (working, original) in self.columns.iter().zip(data) {
            if working.is_untouched() {
                continue;
            }
            changed.push(working.gather(original.column)?);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom};
    use rollup_model::ConflictMarking;

    use super::*;

    fn working(values: &[Option<i64>], is_override: bool) -> WorkingColumn {
        let column = Series::new("a".into(), values).into_column();
        WorkingColumn::new(&DataColumn {
            name: "a",
            column: &column,
            is_override,
        })
        .unwrap()
    }

    #[test]
    fn fills_null_predecessor() {
        let mut column = working(&[None, Some(7)], false);
        assert_eq!(column.reconcile(1, 0), CellOutcome::Filled);
        assert!(!column.is_null(0));
        assert_eq!(column.source, vec![1, 1]);
    }

    #[test]
    fn leaves_populated_predecessor_alone() {
        let mut column = working(&[Some(5), None], false);
        assert_eq!(column.reconcile(1, 0), CellOutcome::Untouched);
        assert!(column.is_untouched());

        let mut empty = working(&[None, None], false);
        assert_eq!(empty.reconcile(1, 0), CellOutcome::Untouched);
    }

    #[test]
    fn conflicts_depend_on_override() {
        let mut plain = working(&[Some(5), Some(9)], false);
        assert_eq!(plain.reconcile(1, 0), CellOutcome::Irresolvable);
        assert!(plain.is_untouched());

        let mut overriding = working(&[Some(5), Some(9)], true);
        assert_eq!(overriding.reconcile(1, 0), CellOutcome::Overridden);
        assert_eq!(overriding.source, vec![1, 1]);
    }

    #[test]
    fn equal_values_still_conflict() {
        let mut column = working(&[Some(5), Some(5)], false);
        assert_eq!(column.reconcile(1, 0), CellOutcome::Irresolvable);
    }

    #[test]
    fn veto_keeps_fills_from_other_columns() {
        let a = Series::new("a".into(), [Some(5i64), Some(9)]).into_column();
        let b = Series::new("b".into(), [None, Some(7i64)]).into_column();
        let data = [
            DataColumn {
                name: "a",
                column: &a,
                is_override: false,
            },
            DataColumn {
                name: "b",
                column: &b,
                is_override: false,
            },
        ];
        let mut reconciler = ColumnReconciler::new(&data).unwrap();
        let mut tracker = ConflictTracker::new(2, ConflictMarking::BothRows);

        reconciler.reconcile_pair(1, 0, &mut tracker);

        assert!(tracker.is_kept(1));
        assert_eq!(tracker.conflict_mask(), vec![true, true]);
        let changed = reconciler.changed_columns(&data).unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].name().as_str(), "b");
        assert_eq!(changed[0].i64().unwrap().get(0), Some(7));
    }
}
