//! Validation of consolidation options against a table.
//!
//! Every configuration error is reported here, before the scanner touches a
//! single row.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};
use rollup_model::ConsolidateOptions;
use tracing::debug;

use crate::error::{ConsolidateError, Result};
use crate::output::emitted_markers;

/// A data column resolved against the table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DataColumn<'a> {
    pub name: &'a str,
    pub column: &'a Column,
    pub is_override: bool,
}

/// Options checked against a concrete table.
#[derive(Debug)]
pub(crate) struct ResolvedConfig<'a> {
    pub timestamp: &'a Column,
    pub data: Vec<DataColumn<'a>>,
}

pub(crate) fn resolve<'a>(
    df: &'a DataFrame,
    options: &'a ConsolidateOptions,
) -> Result<ResolvedConfig<'a>> {
    let timestamp_name = options.timestamp_column.as_str();
    let timestamp = df
        .column(timestamp_name)
        .map_err(|_| ConsolidateError::TimestampColumnNotFound(timestamp_name.to_string()))?;

    let mut seen = BTreeSet::new();
    let mut data = Vec::with_capacity(options.data_columns.len());
    for name in &options.data_columns {
        if name == timestamp_name {
            return Err(ConsolidateError::TimestampIsDataColumn(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConsolidateError::DuplicateDataColumn(name.clone()));
        }
        let column = df
            .column(name)
            .map_err(|_| ConsolidateError::DataColumnNotFound(name.clone()))?;
        data.push(DataColumn {
            name: name.as_str(),
            column,
            is_override: options.is_override(name),
        });
    }

    if let Some(stray) = options
        .override_columns
        .iter()
        .find(|name| !seen.contains(name.as_str()))
    {
        return Err(ConsolidateError::OverrideNotDataColumn(stray.clone()));
    }

    let mut markers = BTreeSet::new();
    for marker in emitted_markers(options) {
        if marker.is_empty() || !markers.insert(marker) {
            return Err(ConsolidateError::InvalidMarkerColumn(marker.to_string()));
        }
        if df.column(marker).is_ok() {
            return Err(ConsolidateError::MarkerColumnExists(marker.to_string()));
        }
    }

    debug!(
        timestamp = timestamp_name,
        data_columns = data.len(),
        overrides = options.override_columns.len(),
        "resolved consolidation options"
    );
    Ok(ResolvedConfig { timestamp, data })
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use rollup_model::OutputMode;

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("t".into(), [1i64, 1]).into_column(),
            Series::new("a".into(), [Some(1i64), None]).into_column(),
            Series::new("b".into(), [None, Some(2i64)]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_columns_in_configured_order() {
        let df = frame();
        let options = ConsolidateOptions::new("t", ["b", "a"]).with_overrides(["a"]);
        let config = resolve(&df, &options).unwrap();
        let names: Vec<&str> = config.data.iter().map(|column| column.name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(!config.data[0].is_override);
        assert!(config.data[1].is_override);
    }

    #[test]
    fn rejects_missing_timestamp() {
        let df = frame();
        let options = ConsolidateOptions::new("when", ["a"]);
        let err = resolve(&df, &options).unwrap_err();
        assert!(matches!(err, ConsolidateError::TimestampColumnNotFound(name) if name == "when"));
    }

    #[test]
    fn rejects_timestamp_as_data_column() {
        let df = frame();
        let options = ConsolidateOptions::new("t", ["a", "t"]);
        let err = resolve(&df, &options).unwrap_err();
        assert!(matches!(err, ConsolidateError::TimestampIsDataColumn(_)));
    }

    #[test]
    fn rejects_duplicate_and_unknown_data_columns() {
        let df = frame();
        let duplicate = ConsolidateOptions::new("t", ["a", "a"]);
        assert!(matches!(
            resolve(&df, &duplicate).unwrap_err(),
            ConsolidateError::DuplicateDataColumn(_)
        ));
        let unknown = ConsolidateOptions::new("t", ["a", "z"]);
        assert!(matches!(
            resolve(&df, &unknown).unwrap_err(),
            ConsolidateError::DataColumnNotFound(name) if name == "z"
        ));
    }

    #[test]
    fn rejects_override_outside_data_columns() {
        let df = frame();
        let options = ConsolidateOptions::new("t", ["a"]).with_overrides(["b"]);
        assert!(matches!(
            resolve(&df, &options).unwrap_err(),
            ConsolidateError::OverrideNotDataColumn(name) if name == "b"
        ));
    }

    #[test]
    fn marker_collision_depends_on_emitted_markers() {
        let df = DataFrame::new(vec![
            Series::new("t".into(), [1i64]).into_column(),
            Series::new("keep".into(), [true]).into_column(),
        ])
        .unwrap();

        let cleaned = ConsolidateOptions::new("t", Vec::<String>::new());
        assert!(resolve(&df, &cleaned).is_ok());

        let flagged = cleaned.with_output_mode(OutputMode::Flagged);
        assert!(matches!(
            resolve(&df, &flagged).unwrap_err(),
            ConsolidateError::MarkerColumnExists(name) if name == "keep"
        ));
    }
}
