//! Shared types for coincident-row consolidation.
//!
//! This crate holds the configuration consumed by the engine and the report
//! it produces, so that the engine, the CLI and any other front end agree on
//! one serializable vocabulary.

pub mod options;
pub mod report;

pub use options::{
    ConflictMarking, ConsolidateOptions, DEFAULT_COINCIDENT_COLUMN, DEFAULT_CONFLICT_COLUMN,
    DEFAULT_KEEP_COLUMN, MarkerColumns, OutputMode,
};
pub use report::ConsolidationReport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_rows_is_input_minus_output() {
        let report = ConsolidationReport {
            input_rows: 10,
            output_rows: 7,
            merged_rows: 3,
            ..ConsolidationReport::default()
        };
        assert_eq!(report.removed_rows(), 3);
        assert!(!report.has_conflicts());
    }

    #[test]
    fn delete_switch_maps_to_mode() {
        assert_eq!(OutputMode::from_delete_coincident(true), OutputMode::Cleaned);
        assert_eq!(OutputMode::from_delete_coincident(false), OutputMode::Flagged);
        assert!(OutputMode::Cleaned.deletes_coincident());
    }
}
