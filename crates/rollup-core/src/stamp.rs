//! Timestamp equality for the coincidence scanner.
//!
//! Temporal columns are compared through their physical representation
//! (dates as `i32` days, datetimes and durations as `i64` ticks), so every
//! supported column reduces to integers, floats, strings or booleans.

use polars::prelude::{AnyValue, Column, Series};

use crate::error::{ConsolidateError, Result};

#[derive(Debug, Clone, PartialEq)]
enum StampKey {
    Int(i128),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// The timestamp column of one consolidation run.
pub(crate) struct StampColumn {
    name: String,
    values: Series,
}

impl StampColumn {
    pub fn new(column: &Column) -> Self {
        let values = column
            .as_materialized_series()
            .to_physical_repr()
            .into_owned();
        Self {
            name: column.name().to_string(),
            values,
        }
    }

    /// Exact equality of two timestamps. Missing timestamps never match.
    pub fn coincident(&self, row: usize, other: usize) -> Result<bool> {
        match (self.key(row)?, self.key(other)?) {
            (Some(left), Some(right)) => Ok(left == right),
            _ => Ok(false),
        }
    }

    fn key(&self, row: usize) -> Result<Option<StampKey>> {
        let key = match self.values.get(row)? {
            AnyValue::Null => None,
            AnyValue::Boolean(v) => Some(StampKey::Bool(v)),
            AnyValue::Int8(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::Int16(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::Int32(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::Int64(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::UInt8(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::UInt16(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::UInt32(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::UInt64(v) => Some(StampKey::Int(i128::from(v))),
            AnyValue::Float32(v) => (!v.is_nan()).then(|| StampKey::Float(f64::from(v))),
            AnyValue::Float64(v) => (!v.is_nan()).then_some(StampKey::Float(v)),
            AnyValue::String(s) => Some(StampKey::Text(s.to_string())),
            AnyValue::StringOwned(s) => Some(StampKey::Text(s.to_string())),
            other => {
                return Err(ConsolidateError::UncomparableTimestamp {
                    column: self.name.clone(),
                    row,
                    dtype: other.dtype().to_string(),
                });
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{DataType, IntoColumn, NamedFrom};

    use super::*;

    fn stamps(series: Series) -> StampColumn {
        StampColumn::new(&series.into_column())
    }

    #[test]
    fn integers_compare_exactly() {
        let column = stamps(Series::new("t".into(), [1i64, 1, 2]));
        assert!(column.coincident(1, 0).unwrap());
        assert!(!column.coincident(2, 1).unwrap());
    }

    #[test]
    fn nulls_and_nan_never_coincide() {
        let ints = stamps(Series::new("t".into(), [None::<i64>, None]));
        assert!(!ints.coincident(1, 0).unwrap());

        let floats = stamps(Series::new("t".into(), [f64::NAN, f64::NAN, 0.5, 0.5]));
        assert!(!floats.coincident(1, 0).unwrap());
        assert!(floats.coincident(3, 2).unwrap());
    }

    #[test]
    fn strings_compare_exactly() {
        let column = stamps(Series::new(
            "t".into(),
            ["2020-01-01 10:00", "2020-01-01 10:00", "2020-01-01 10:00:00"],
        ));
        assert!(column.coincident(1, 0).unwrap());
        assert!(!column.coincident(2, 1).unwrap());
    }

    #[test]
    fn dates_compare_on_physical_days() {
        let series = Series::new("t".into(), [18_000i32, 18_000, 18_001])
            .cast(&DataType::Date)
            .unwrap();
        let column = stamps(series);
        assert!(column.coincident(1, 0).unwrap());
        assert!(!column.coincident(2, 1).unwrap());
    }
}
