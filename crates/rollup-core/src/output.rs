//! Flagged or cleaned rendering of the working table.

use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};
use rollup_model::{ConsolidateOptions, OutputMode};

use crate::error::Result;
use crate::state::ConflictTracker;

/// Marker columns the configured output will carry, in output order.
pub(crate) fn emitted_markers(options: &ConsolidateOptions) -> Vec<&str> {
    let markers = &options.markers;
    let flagged = !options.output_mode.deletes_coincident();
    let mut names = Vec::with_capacity(3);
    if flagged {
        names.push(markers.keep.as_str());
    }
    if options.flag_conflicts {
        names.push(markers.conflict.as_str());
    }
    if flagged {
        names.push(markers.coincident.as_str());
    }
    names
}

pub(crate) fn render(
    mut working: DataFrame,
    tracker: &ConflictTracker,
    options: &ConsolidateOptions,
) -> Result<DataFrame> {
    let markers = &options.markers;
    match options.output_mode {
        OutputMode::Flagged => {
            working.with_column(Series::new(
                markers.keep.as_str().into(),
                tracker.keep_mask(),
            ))?;
            if options.flag_conflicts {
                working.with_column(Series::new(
                    markers.conflict.as_str().into(),
                    tracker.conflict_mask(),
                ))?;
            }
            working.with_column(Series::new(
                markers.coincident.as_str().into(),
                tracker.coincident_mask(),
            ))?;
            Ok(working)
        }
        OutputMode::Cleaned => {
            if options.flag_conflicts {
                working.with_column(Series::new(
                    markers.conflict.as_str().into(),
                    tracker.conflict_mask(),
                ))?;
            }
            let mask = BooleanChunked::from_slice("keep".into(), &tracker.keep_mask());
            Ok(working.filter(&mask)?)
        }
    }
}
