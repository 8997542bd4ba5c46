//! Results table normalization.
//!
//! Keeps only result rows at the requested finishing positions and
//! defaults missing fastest lap times.

use super::filters::{fill_missing, is_one_of, require_columns};
use crate::constants::{
    DEFAULT_FASTEST_LAP, RESULTS_TABLE,
    columns::{FASTEST_LAP_TIME, POSITION},
};
use crate::error::{RaceStatsError, Result};
use polars::prelude::*;
use tracing::{debug, warn};

/// Filter results to `positions` and default `fastestLapTime`
///
/// Positions compare as stored: numeric `position` columns (integer or
/// float) are matched by value, while a column holding text
/// classifications cannot equal any requested integer and so retains no
/// rows.
pub fn normalize_results(results: DataFrame, positions: &[i64]) -> Result<DataFrame> {
    if positions.is_empty() {
        return Err(RaceStatsError::configuration(
            "at least one finishing position must be requested",
        ));
    }
    require_columns(&results, RESULTS_TABLE, &[POSITION, FASTEST_LAP_TIME])?;

    let position_dtype = results.column(POSITION)?.dtype().clone();
    let keep = if position_dtype.is_integer() {
        is_one_of(POSITION, positions)
    } else if position_dtype.is_float() {
        // Numeric equality by value: a stored 1.0 matches position 1
        let positions: Vec<f64> = positions.iter().map(|&p| p as f64).collect();
        is_one_of(POSITION, &positions)
    } else {
        warn!(
            "Column '{}' has type {} and cannot match integer positions {:?}; no results retained",
            POSITION, position_dtype, positions
        );
        lit(false)
    };

    let input_rows = results.height();
    let normalized = results
        .lazy()
        .filter(keep)
        .with_columns([fill_missing(FASTEST_LAP_TIME, DEFAULT_FASTEST_LAP)])
        .collect()?;

    debug!(
        "Normalized results: {} of {} rows retained (positions: {:?})",
        normalized.height(),
        input_rows,
        positions
    );

    Ok(normalized)
}
