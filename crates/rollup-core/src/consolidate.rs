//! Engine entry points.

use polars::prelude::DataFrame;
use rollup_model::{ConsolidateOptions, ConsolidationReport};
use tracing::{debug, info, info_span};

use crate::config::resolve;
use crate::error::Result;
use crate::output::render;
use crate::reconcile::ColumnReconciler;
use crate::scanner::scan;
use crate::stamp::StampColumn;
use crate::state::ConflictTracker;

/// A consolidated table together with the counts collected while building it.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub data: DataFrame,
    pub report: ConsolidationReport,
}

/// Consolidate coincident rows of `df`.
///
/// The input frame is never modified. See [`consolidate_with_report`].
pub fn consolidate(df: &DataFrame, options: &ConsolidateOptions) -> Result<DataFrame> {
    consolidate_with_report(df, options).map(|consolidation| consolidation.data)
}

/// Consolidate coincident rows of `df` and report what happened.
///
/// Rows are visited in table order. Each row whose timestamp equals that of
/// the nearest earlier surviving row is merged into it: null cells of the
/// predecessor are filled from the later row, override columns take the later
/// value, and a populated cell on both sides of any other data column vetoes
/// the merge so the later row survives.
///
/// # Errors
///
/// Configuration errors (unknown columns, overrides outside the data columns,
/// marker collisions) are returned before any row is processed. A timestamp
/// value that cannot be compared fails the whole call.
pub fn consolidate_with_report(
    df: &DataFrame,
    options: &ConsolidateOptions,
) -> Result<Consolidation> {
    let config = resolve(df, options)?;
    let height = df.height();
    let span = info_span!(
        "consolidate",
        rows = height,
        timestamp = %options.timestamp_column,
        data_columns = config.data.len(),
        mode = ?options.output_mode
    );
    let _guard = span.enter();

    let stamps = StampColumn::new(config.timestamp);
    let mut reconciler = ColumnReconciler::new(&config.data)?;
    let mut tracker = ConflictTracker::new(height, options.conflict_marking);
    scan(height, &stamps, &mut reconciler, &mut tracker)?;

    let mut working = df.clone();
    for series in reconciler.changed_columns(&config.data)? {
        debug!(column = %series.name(), "rewriting merged column");
        working.with_column(series)?;
    }

    let data = render(working, &tracker, options)?;
    let report = tracker.report(data.height());
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        merged = report.merged_rows,
        conflicts = report.conflict_rows,
        vetoed = report.vetoed_pairings,
        "consolidation complete"
    );
    Ok(Consolidation { data, report })
}
