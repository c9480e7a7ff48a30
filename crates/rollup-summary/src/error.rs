//! Error types for the summary utilities.

use thiserror::Error;

/// Errors that can occur while summarizing, ranking or profiling a table.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SummaryError {
    /// Column not found in the input DataFrame.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A grouped summary needs at least one group-by column.
    #[error("At least one group-by column is required")]
    EmptyGrouping,

    /// An output field name clashes with another column of the result.
    #[error("Output field '{0}' collides with another column")]
    NameCollision(String),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

pub(crate) fn require_column(df: &polars::prelude::DataFrame, name: &str) -> Result<()> {
    if df.column(name).is_err() {
        return Err(SummaryError::ColumnNotFound(name.to_string()));
    }
    Ok(())
}
