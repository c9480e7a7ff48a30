//! In-order coincidence scan.
//!
//! Each row is compared once, against the nearest earlier row still kept.
//! That row is tracked as a single pointer: it only moves forward when the
//! row just processed survives its own pairing.

use tracing::trace;

use crate::error::Result;
use crate::reconcile::ColumnReconciler;
use crate::stamp::StampColumn;
use crate::state::ConflictTracker;

pub(crate) fn scan(
    height: usize,
    stamps: &StampColumn,
    reconciler: &mut ColumnReconciler,
    tracker: &mut ConflictTracker,
) -> Result<()> {
    let mut nearest_kept: Option<usize> = None;
    for row in 0..height {
        if let Some(prev) = nearest_kept
            && stamps.coincident(row, prev)?
        {
            tracker.mark_coincident(row, prev);
            reconciler.reconcile_pair(row, prev, tracker);
            trace!(row, prev, kept = tracker.is_kept(row), "coincident pairing");
        }
        if tracker.is_kept(row) {
            nearest_kept = Some(row);
        }
    }
    Ok(())
}
