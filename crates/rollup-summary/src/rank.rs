//! Dense, tie-broken ranking within optional subgroups.

use polars::lazy::dsl::int_range;
use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, SortMultipleOptions, col, lit};
use tracing::debug;

use crate::error::{Result, SummaryError, require_column};

/// Rank rows by `totals_name`, highest first, restarting within each subgroup.
///
/// The frame is returned sorted by the subgroup columns ascending, then the
/// totals descending (nulls last), with `rank_name` appended as an `Int32`
/// column. Equal totals receive distinct consecutive ranks in input order. An
/// existing `rank_name` column is replaced.
///
/// # Errors
///
/// Fails when a column is missing or when `rank_name` names the totals or a
/// subgroup column.
pub fn rank(
    df: &DataFrame,
    rank_name: &str,
    totals_name: &str,
    subgroups: &[String],
) -> Result<DataFrame> {
    require_column(df, totals_name)?;
    for name in subgroups {
        require_column(df, name)?;
    }
    if rank_name == totals_name || subgroups.iter().any(|name| name == rank_name) {
        return Err(SummaryError::NameCollision(rank_name.to_string()));
    }

    let base = if df.column(rank_name).is_ok() {
        debug!(rank_name, "replacing existing rank column");
        df.drop(rank_name)?
    } else {
        df.clone()
    };

    let groups: Vec<Expr> = subgroups.iter().map(|name| col(name.as_str())).collect();
    let mut sort_by = groups.clone();
    sort_by.push(col(totals_name));
    let mut descending = vec![false; subgroups.len()];
    descending.push(true);

    let position = int_range(lit(0), col(totals_name).len(), 1, DataType::Int64);
    let position = if groups.is_empty() {
        position
    } else {
        position.over(groups)
    };

    let ranked = base
        .lazy()
        .sort_by_exprs(
            sort_by,
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .with_column((position + lit(1)).cast(DataType::Int32).alias(rank_name))
        .collect()?;

    debug!(rows = ranked.height(), subgroups = subgroups.len(), "assigned ranks");
    Ok(ranked)
}
