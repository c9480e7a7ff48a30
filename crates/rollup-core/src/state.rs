//! Per-row state for one consolidation run.
//!
//! Flags live in an array parallel to the table rather than in table cells.
//! `coincident` and `conflict` only ever go from false to true; `keep` follows
//! the single-shot merge/veto transition of the row's own pairing.

use rollup_model::{ConflictMarking, ConsolidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowFlags {
    pub keep: bool,
    pub coincident: bool,
    pub conflict: bool,
}

impl Default for RowFlags {
    fn default() -> Self {
        Self {
            keep: true,
            coincident: false,
            conflict: false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ConflictTracker {
    rows: Vec<RowFlags>,
    marking: ConflictMarking,
    vetoed_pairings: usize,
    filled_cells: usize,
    overridden_cells: usize,
}

impl ConflictTracker {
    pub fn new(height: usize, marking: ConflictMarking) -> Self {
        Self {
            rows: vec![RowFlags::default(); height],
            marking,
            vetoed_pairings: 0,
            filled_cells: 0,
            overridden_cells: 0,
        }
    }

    pub fn is_kept(&self, row: usize) -> bool {
        self.rows[row].keep
    }

    pub fn mark_coincident(&mut self, cur: usize, prev: usize) {
        self.rows[cur].coincident = true;
        self.rows[prev].coincident = true;
    }

    /// `cur` is absorbed into its predecessor unless vetoed later in the pairing.
    pub fn begin_merge(&mut self, cur: usize) {
        self.rows[cur].keep = false;
    }

    pub fn veto_merge(&mut self, cur: usize) {
        self.rows[cur].keep = true;
        self.vetoed_pairings += 1;
    }

    pub fn mark_conflict(&mut self, cur: usize, prev: usize) {
        self.rows[cur].conflict = true;
        if self.marking == ConflictMarking::BothRows {
            self.rows[prev].conflict = true;
        }
    }

    pub fn record_fill(&mut self) {
        self.filled_cells += 1;
    }

    pub fn record_override(&mut self) {
        self.overridden_cells += 1;
    }

    pub fn keep_mask(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.keep).collect()
    }

    pub fn conflict_mask(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.conflict).collect()
    }

    pub fn coincident_mask(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.coincident).collect()
    }

    pub fn report(&self, output_rows: usize) -> ConsolidationReport {
        let count = |pred: fn(&RowFlags) -> bool| self.rows.iter().filter(|row| pred(row)).count();
        ConsolidationReport {
            input_rows: self.rows.len(),
            output_rows,
            coincident_rows: count(|row| row.coincident),
            conflict_rows: count(|row| row.conflict),
            merged_rows: count(|row| !row.keep),
            vetoed_pairings: self.vetoed_pairings,
            filled_cells: self.filled_cells,
            overridden_cells: self.overridden_cells,
        }
    }
}
