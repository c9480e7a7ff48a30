use serde::{Deserialize, Serialize};

/// Counts collected while consolidating one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Rows that took part in at least one timestamp-equal pairing.
    pub coincident_rows: usize,
    /// Rows carrying a conflict under the configured marking policy.
    pub conflict_rows: usize,
    /// Rows absorbed into a predecessor (`keep` ended false).
    pub merged_rows: usize,
    /// Pairings whose merge was vetoed by an irresolvable conflict.
    pub vetoed_pairings: usize,
    /// Null predecessor cells filled from the later row.
    pub filled_cells: usize,
    /// Predecessor cells replaced through an override column.
    pub overridden_cells: usize,
}

impl ConsolidationReport {
    pub fn removed_rows(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflict_rows > 0
    }
}
