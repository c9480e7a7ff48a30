//! CSV ingest for the rollup tools.
//!
//! Reads headered CSV files into Polars `DataFrame`s with the Polars CSV
//! reader, after checking the header row and record widths, and writes frames
//! back out with nulls as empty cells.

mod csv_table;
mod error;

pub use csv_table::{IngestOptions, read_csv_frame, read_csv_headers, write_csv_frame};
pub use error::{IngestError, Result};
