//! Coincident-row consolidation engine.
//!
//! Merges rows of a time-ordered Polars `DataFrame` that share a timestamp,
//! filling gaps in earlier rows from later ones while detecting conflicts:
//!
//! - **stamp**: exact timestamp equality over the column's physical values
//! - **scanner**: in-order walk pairing each row with the nearest surviving predecessor
//! - **reconcile**: per-column fill / override / veto decisions
//! - **state**: per-row keep / coincident / conflict flags and the run report
//! - **output**: flagged or cleaned rendering
//!
//! # Example
//!
//! ```ignore
//! use rollup_core::consolidate;
//! use rollup_model::ConsolidateOptions;
//!
//! let options = ConsolidateOptions::new("t", ["a", "b"]).with_flag_conflicts(true);
//! let cleaned = consolidate(&df, &options)?;
//! ```

mod config;
mod consolidate;
mod error;
mod output;
mod reconcile;
mod scanner;
mod stamp;
mod state;

pub use consolidate::{Consolidation, consolidate, consolidate_with_report};
pub use error::{ConsolidateError, Result};

pub use rollup_model::{
    ConflictMarking, ConsolidateOptions, ConsolidationReport, MarkerColumns, OutputMode,
};
