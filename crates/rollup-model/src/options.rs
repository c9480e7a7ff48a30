//! Configuration options for row consolidation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default name of the survival marker column.
pub const DEFAULT_KEEP_COLUMN: &str = "keep";
/// Default name of the conflict marker column.
pub const DEFAULT_CONFLICT_COLUMN: &str = "conflict";
/// Default name of the coincidence marker column.
pub const DEFAULT_COINCIDENT_COLUMN: &str = "coincident";

/// Shape of the table returned by a consolidation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Every input row, annotated with marker columns. Nothing is removed.
    Flagged,
    /// Merged-away rows removed, marker columns stripped except the conflict
    /// marker when conflict flagging is enabled.
    #[default]
    Cleaned,
}

impl OutputMode {
    /// Map the `deleteCoincident` switch onto an output mode.
    pub fn from_delete_coincident(delete: bool) -> Self {
        if delete { Self::Cleaned } else { Self::Flagged }
    }

    pub fn deletes_coincident(self) -> bool {
        matches!(self, Self::Cleaned)
    }
}

/// Which rows of a conflicting pairing receive the conflict flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictMarking {
    /// Flag both the later row and the predecessor it was compared against.
    #[default]
    BothRows,
    /// Flag only the later row of the pairing.
    LaterRowOnly,
}

/// Names of the marker columns appended to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerColumns {
    pub keep: String,
    pub conflict: String,
    pub coincident: String,
}

impl Default for MarkerColumns {
    fn default() -> Self {
        Self {
            keep: DEFAULT_KEEP_COLUMN.to_string(),
            conflict: DEFAULT_CONFLICT_COLUMN.to_string(),
            coincident: DEFAULT_COINCIDENT_COLUMN.to_string(),
        }
    }
}

/// Options controlling a consolidation run.
///
/// `data_columns` is ordered: columns are reconciled in the order given.
/// `override_columns` must be a subset of `data_columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidateOptions {
    /// Column whose values decide coincidence.
    pub timestamp_column: String,

    /// Columns eligible for gap filling and conflict detection.
    pub data_columns: Vec<String>,

    /// Data columns where the later row's value wins a conflict.
    #[serde(default)]
    pub override_columns: BTreeSet<String>,

    /// Emit the conflict marker column.
    #[serde(default)]
    pub flag_conflicts: bool,

    /// Flagged or cleaned output.
    #[serde(default)]
    pub output_mode: OutputMode,

    /// Rows flagged when a pairing conflicts.
    #[serde(default)]
    pub conflict_marking: ConflictMarking,

    /// Marker column names.
    #[serde(default)]
    pub markers: MarkerColumns,
}

impl ConsolidateOptions {
    pub fn new<I, S>(timestamp_column: impl Into<String>, data_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            timestamp_column: timestamp_column.into(),
            data_columns: data_columns.into_iter().map(Into::into).collect(),
            override_columns: BTreeSet::new(),
            flag_conflicts: false,
            output_mode: OutputMode::default(),
            conflict_marking: ConflictMarking::default(),
            markers: MarkerColumns::default(),
        }
    }

    #[must_use]
    pub fn with_overrides<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.override_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_flag_conflicts(mut self, enable: bool) -> Self {
        self.flag_conflicts = enable;
        self
    }

    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Same as [`Self::with_output_mode`] using the boolean switch.
    #[must_use]
    pub fn with_delete_coincident(self, delete: bool) -> Self {
        self.with_output_mode(OutputMode::from_delete_coincident(delete))
    }

    #[must_use]
    pub fn with_conflict_marking(mut self, marking: ConflictMarking) -> Self {
        self.conflict_marking = marking;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: MarkerColumns) -> Self {
        self.markers = markers;
        self
    }

    pub fn is_override(&self, column: &str) -> bool {
        self.override_columns.contains(column)
    }
}
