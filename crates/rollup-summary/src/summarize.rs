//! Count/sum summary of a measure per category combination.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, Expr, IntoLazy, SortMultipleOptions, col};
use tracing::debug;

use crate::error::{Result, SummaryError, require_column};

/// Summarize `measure` by the distinct combinations of `group_by`.
///
/// Produces one row per combination with the group columns, `count_name`
/// (rows in the group) and `sum_name` (sum of the non-null measure values).
/// Rows with a null in any group column are left out. The result is sorted by
/// the sum descending, then the group columns ascending.
///
/// # Errors
///
/// Fails when a column is missing, when no group column is given, or when the
/// output names clash with each other or with a group column.
pub fn summarize(
    df: &DataFrame,
    group_by: &[String],
    measure: &str,
    count_name: &str,
    sum_name: &str,
) -> Result<DataFrame> {
    let Some((first, rest)) = group_by.split_first() else {
        return Err(SummaryError::EmptyGrouping);
    };
    for name in group_by {
        require_column(df, name)?;
    }
    require_column(df, measure)?;

    let mut names: BTreeSet<&str> = group_by.iter().map(String::as_str).collect();
    for output in [count_name, sum_name] {
        if !names.insert(output) {
            return Err(SummaryError::NameCollision(output.to_string()));
        }
    }

    let keys: Vec<Expr> = group_by.iter().map(|name| col(name.as_str())).collect();
    let complete = rest.iter().fold(col(first.as_str()).is_not_null(), |acc, name| {
        acc.and(col(name.as_str()).is_not_null())
    });

    let mut sort_by = vec![col(sum_name)];
    sort_by.extend(keys.iter().cloned());
    let mut descending = vec![true];
    descending.extend(std::iter::repeat_n(false, group_by.len()));

    let summary = df
        .clone()
        .lazy()
        .filter(complete)
        .group_by(keys)
        .agg([
            col(measure).len().alias(count_name),
            col(measure).sum().alias(sum_name),
        ])
        .sort_by_exprs(
            sort_by,
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;

    debug!(
        groups = summary.height(),
        measure,
        group_by = ?group_by,
        "built grouped summary"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn rejects_empty_grouping() {
        let df = DataFrame::new(vec![Series::new("x".into(), [1i64]).into_column()]).unwrap();
        let err = summarize(&df, &[], "x", "n", "total").unwrap_err();
        assert!(matches!(err, SummaryError::EmptyGrouping));
    }

    #[test]
    fn rejects_colliding_output_names() {
        let df = DataFrame::new(vec![
            Series::new("g".into(), ["a"]).into_column(),
            Series::new("x".into(), [1i64]).into_column(),
        ])
        .unwrap();
        let err = summarize(&df, &["g".to_string()], "x", "g", "total").unwrap_err();
        assert!(matches!(err, SummaryError::NameCollision(name) if name == "g"));
        let err = summarize(&df, &["g".to_string()], "x", "n", "n").unwrap_err();
        assert!(matches!(err, SummaryError::NameCollision(name) if name == "n"));
    }
}
