//! CSV reading through the Polars CSV reader, and CSV writing.

use std::collections::BTreeSet;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use rollup_common::any_to_string;

use crate::error::{IngestError, Result};

/// Options controlling how a CSV file becomes a `DataFrame`.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Let Polars infer `Int64`, `Float64` or `Boolean` columns from their
    /// cells. When off, every column is read as `String`.
    pub infer_types: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { infer_types: true }
    }
}

impl IngestOptions {
    /// Rows Polars scans for type inference: all of them, or none so that
    /// every column stays `String`.
    fn infer_schema_length(self) -> Option<usize> {
        if self.infer_types { None } else { Some(0) }
    }
}

fn normalize_header(raw: &str) -> String {
    raw.strip_prefix('\u{feff}').unwrap_or(raw).trim().to_string()
}

fn check_exists(path: &Path) -> Result<()> {
    std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(())
}

fn validate_headers(headers: &[String], path: &Path) -> Result<()> {
    let mut seen = BTreeSet::new();
    for (index, header) in headers.iter().enumerate() {
        if header.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                index,
            });
        }
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: header.clone(),
            });
        }
    }
    Ok(())
}

/// Read the header row and check that no record is wider than it.
///
/// Header names lose a leading BOM and surrounding whitespace, and must be
/// non-empty and unique.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    check_exists(path)?;
    let parse_error = |e: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(parse_error)?;
    let mut records = reader.records();

    let Some(first) = records.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = first
        .map_err(parse_error)?
        .iter()
        .map(normalize_header)
        .collect();
    validate_headers(&headers, path)?;

    for record in records {
        let record = record.map_err(parse_error)?;
        if record.len() > headers.len() {
            return Err(IngestError::SurplusFields {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |pos| pos.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
    }
    Ok(headers)
}

/// Read a headered CSV file into a `DataFrame`.
///
/// The header row is validated by [`read_csv_headers`]; the body is parsed
/// by Polars. Records with fewer cells than the header are padded with
/// nulls, records with more cells are rejected. Empty cells become null.
pub fn read_csv_frame(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let headers = read_csv_headers(path)?;
    let parse_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length())
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "read {} columns but the header names {}",
                df.width(),
                headers.len()
            ),
        });
    }
    df.set_column_names(headers.iter().map(String::as_str))?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    debug!(schema = ?df.schema(), "inferred column types");
    Ok(df)
}

/// Write `df` to `path` as CSV with a header row. Nulls and NaN become empty
/// cells; booleans are written as `true`/`false`.
pub fn write_csv_frame(df: &DataFrame, path: &Path) -> Result<()> {
    let csv_error = |source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
    writer
        .write_record(df.get_column_names().iter().map(|name| name.as_str()))
        .map_err(csv_error)?;

    let columns = df.get_columns();
    let mut row = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        row.clear();
        for column in columns {
            row.push(any_to_string(column.get(idx)?));
        }
        writer.write_record(&row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = df.height(), "wrote CSV table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataType, IntoColumn, NamedFrom, Series};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_infers_column_types() {
        let file = create_temp_csv("t,n,x,flag,label\n1,2,1.5,true,a\n2,,3,false,b\n");
        let df = read_csv_frame(file.path(), &IngestOptions::default()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("t").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("n").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("x").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("label").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("n").unwrap().null_count(), 1);
    }

    #[test]
    fn test_inference_disabled_reads_strings() {
        let file = create_temp_csv("t,n\n1,\n2,5\n");
        let options = IngestOptions { infer_types: false };
        let df = read_csv_frame(file.path(), &options).unwrap();

        assert_eq!(df.column("t").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("n").unwrap().null_count(), 1);
    }

    #[test]
    fn test_all_empty_column_is_null_strings() {
        let file = create_temp_csv("t,empty\n1,\n2,\n");
        let df = read_csv_frame(file.path(), &IngestOptions::default()).unwrap();

        let empty = df.column("empty").unwrap();
        assert_eq!(empty.dtype(), &DataType::String);
        assert_eq!(empty.null_count(), 2);
    }

    #[test]
    fn test_header_bom_and_whitespace_are_stripped() {
        let file = create_temp_csv("\u{feff} t , a\n1,x\n");
        let df = read_csv_frame(file.path(), &IngestOptions::default()).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["t", "a"]);
        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("x"));
    }

    #[test]
    fn test_leading_zeros_read_as_integers() {
        let file = create_temp_csv("id,t,a\n007,1,5\n010,1,\n");
        let df = read_csv_frame(file.path(), &IngestOptions::default()).unwrap();

        let ids: Vec<Option<i64>> = df
            .column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(7), Some(10)]);
        assert_eq!(df.column("a").unwrap().null_count(), 1);
    }

    #[test]
    fn test_surplus_fields_are_rejected() {
        let file = create_temp_csv("id,t,a\n007,1,5,EXTRA\n010,1,\n");
        let result = read_csv_frame(file.path(), &IngestOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::SurplusFields {
                line: 2,
                expected: 3,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_headers_read_without_body() {
        let file = create_temp_csv("\u{feff}id, t ,a\n");
        let headers = read_csv_headers(file.path()).unwrap();
        assert_eq!(headers, vec!["id", "t", "a"]);
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_frame(file.path(), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_frame(Path::new("/no/such/table.csv"), &IngestOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_rejects_bad_headers() {
        let file = create_temp_csv("t,t\n1,2\n");
        let result = read_csv_frame(file.path(), &IngestOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { column, .. }) if column == "t"
        ));

        let file = create_temp_csv("t,,a\n1,2,3\n");
        let result = read_csv_frame(file.path(), &IngestOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::EmptyColumnName { index: 1, .. })
        ));
    }

    #[test]
    fn test_written_frame_reads_back() {
        let df = DataFrame::new(vec![
            Series::new("t".into(), [1i64, 2]).into_column(),
            Series::new("x".into(), [Some(2.5f64), None]).into_column(),
            Series::new("keep".into(), [true, false]).into_column(),
        ])
        .unwrap();
        let file = NamedTempFile::new().unwrap();

        write_csv_frame(&df, file.path()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "t,x,keep\n1,2.5,true\n2,,false\n");

        let back = read_csv_frame(file.path(), &IngestOptions::default()).unwrap();
        assert!(back.equals_missing(&df));
    }
}
