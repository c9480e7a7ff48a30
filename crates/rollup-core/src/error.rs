//! Error types for the consolidation engine.

use thiserror::Error;

/// Errors that can occur while consolidating a table.
///
/// Configuration errors are detected before any row is processed; data
/// errors surface at the comparison that triggered them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsolidateError {
    // === Configuration Errors ===
    /// The timestamp column does not exist in the table.
    #[error("timestamp column not found: {0}")]
    TimestampColumnNotFound(String),

    /// The timestamp column was also listed among the data columns.
    #[error("timestamp column '{0}' is also listed as a data column")]
    TimestampIsDataColumn(String),

    /// A data column does not exist in the table.
    #[error("data column not found: {0}")]
    DataColumnNotFound(String),

    /// A data column was listed more than once.
    #[error("data column listed more than once: {0}")]
    DuplicateDataColumn(String),

    /// An override column is not one of the data columns.
    #[error("override column '{0}' is not one of the data columns")]
    OverrideNotDataColumn(String),

    /// A marker column would overwrite an input column.
    #[error("marker column '{0}' already exists in the table")]
    MarkerColumnExists(String),

    /// Two emitted marker columns share a name, or a name is empty.
    #[error("invalid marker column name: '{0}'")]
    InvalidMarkerColumn(String),

    // === Data Errors ===
    /// A timestamp value cannot take part in an equality test.
    #[error("cannot compare timestamp column '{column}' at row {row}: values of type {dtype}")]
    UncomparableTimestamp {
        column: String,
        row: usize,
        dtype: String,
    },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl ConsolidateError {
    /// True for errors caused by the options rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::TimestampColumnNotFound(_)
                | Self::TimestampIsDataColumn(_)
                | Self::DataColumnNotFound(_)
                | Self::DuplicateDataColumn(_)
                | Self::OverrideNotDataColumn(_)
                | Self::MarkerColumnExists(_)
                | Self::InvalidMarkerColumn(_)
        )
    }
}

/// Result type for consolidation operations.
pub type Result<T> = std::result::Result<T, ConsolidateError>;
