//! Expression helpers shared by the normalizers.

use crate::error::{RaceStatsError, Result};
use polars::prelude::*;

/// Predicate true where `column` equals any of `values`
///
/// An empty value set yields a constant `false`, so filtering by it keeps
/// no rows. Callers wanting "no filter" must skip the filter instead.
pub fn is_one_of<T: Literal + Copy>(column: &str, values: &[T]) -> Expr {
    values
        .iter()
        .map(|value| col(column).eq(lit(*value)))
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| lit(false))
}

/// Replace null or empty-string cells of `column` with `default`
pub fn fill_missing(column: &str, default: &str) -> Expr {
    let text = col(column).cast(DataType::String);
    when(text.clone().is_null().or(text.clone().eq(lit(""))))
        .then(lit(default))
        .otherwise(text)
        .alias(column)
}

/// Fail with `MissingColumn` unless every column exists in `df`
pub fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    match columns.iter().find(|column| df.column(column).is_err()) {
        Some(missing) => Err(RaceStatsError::missing_column(table, *missing)),
        None => Ok(()),
    }
}
