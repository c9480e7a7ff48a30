//! Per-column null counts, cardinality and numeric range.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Default)]
struct ProfileColumns {
    names: Vec<String>,
    n_null: Vec<u64>,
    n_non_null: Vec<u64>,
    n_unique: Vec<Option<u64>>,
    min: Vec<Option<f64>>,
    max: Vec<Option<f64>>,
    mean: Vec<Option<f64>>,
    dtypes: Vec<String>,
}

#[derive(Debug, Default)]
struct NumericStats {
    missing: usize,
    min: Option<f64>,
    max: Option<f64>,
    mean: Option<f64>,
}

fn numeric_stats(column: &Column) -> Result<NumericStats> {
    let values = column.as_materialized_series().cast(&DataType::Float64)?;
    let mut stats = NumericStats::default();
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.f64()?.into_iter() {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            stats.missing += 1;
            continue;
        };
        stats.min = Some(stats.min.map_or(value, |min| min.min(value)));
        stats.max = Some(stats.max.map_or(value, |max| max.max(value)));
        sum += value;
        count += 1;
    }
    if count > 0 {
        stats.mean = Some(sum / count as f64);
    }
    Ok(stats)
}

/// Profile every column of `df`.
///
/// Returns one row per input column with `col_name`, `n_null`, `n_non_null`,
/// `n_unique` (non-numeric columns only, nulls excluded), `min`, `max` and
/// `mean` (numeric columns only) and `dtype`. NaN counts as null.
pub fn profile(df: &DataFrame) -> Result<DataFrame> {
    let mut out = ProfileColumns::default();
    for column in df.get_columns() {
        let dtype = column.dtype();
        let height = column.len();
        let missing = if dtype.is_integer() || dtype.is_float() {
            let stats = numeric_stats(column)?;
            out.n_unique.push(None);
            out.min.push(stats.min);
            out.max.push(stats.max);
            out.mean.push(stats.mean);
            stats.missing
        } else {
            let nulls = column.null_count();
            let distinct = column.as_materialized_series().n_unique()?;
            out.n_unique
                .push(Some((distinct - usize::from(nulls > 0)) as u64));
            out.min.push(None);
            out.max.push(None);
            out.mean.push(None);
            nulls
        };
        out.names.push(column.name().to_string());
        out.n_null.push(missing as u64);
        out.n_non_null.push((height - missing) as u64);
        out.dtypes.push(dtype.to_string());
    }
    debug!(columns = out.names.len(), "profiled columns");

    let profiled = DataFrame::new(vec![
        Series::new("col_name".into(), out.names).into_column(),
        Series::new("n_null".into(), out.n_null).into_column(),
        Series::new("n_non_null".into(), out.n_non_null).into_column(),
        Series::new("n_unique".into(), out.n_unique).into_column(),
        Series::new("min".into(), out.min).into_column(),
        Series::new("max".into(), out.max).into_column(),
        Series::new("mean".into(), out.mean).into_column(),
        Series::new("dtype".into(), out.dtypes).into_column(),
    ])?;
    Ok(profiled)
}
