//! Stateless table summaries.
//!
//! Companions to the consolidation engine, each a single pass over a Polars
//! `DataFrame` with no cross-row state:
//!
//! - **summarize**: count and sum of a measure per category combination
//! - **rank**: dense, tie-broken ranks by a totals column within optional subgroups
//! - **profile**: null counts, cardinality and numeric range per column

mod error;
mod profile;
mod rank;
mod summarize;

pub use error::{Result, SummaryError};
pub use profile::profile;
pub use rank::rank;
pub use summarize::summarize;
