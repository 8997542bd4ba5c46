//! Races table normalization.
//!
//! Applies the optional year filter, defaults missing start times and
//! derives `datetime_string` as `date + "T" + time`. Date and time strings
//! are concatenated as stored; they are never parsed or reformatted.

use super::filters::{fill_missing, is_one_of, require_columns};
use crate::constants::{
    DATETIME_SEPARATOR, DEFAULT_RACE_TIME, RACES_TABLE,
    columns::{DATE, DATETIME_STRING, TIME, YEAR},
};
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Filter races by `years` (None = keep all) and add `datetime_string`
pub fn normalize_races(races: DataFrame, years: Option<&[i64]>) -> Result<DataFrame> {
    require_columns(&races, RACES_TABLE, &[YEAR, DATE, TIME])?;

    let input_rows = races.height();
    let mut frame = races.lazy();

    if let Some(years) = years {
        frame = frame.filter(is_one_of(YEAR, years));
    }

    let normalized = frame
        .with_columns([fill_missing(TIME, DEFAULT_RACE_TIME)])
        .with_columns([concat_str(
            [
                col(DATE).cast(DataType::String),
                lit(DATETIME_SEPARATOR),
                col(TIME),
            ],
            "",
            false,
        )
        .alias(DATETIME_STRING)])
        .collect()?;

    debug!(
        "Normalized races: {} of {} rows retained (year filter: {:?})",
        normalized.height(),
        input_rows,
        years
    );

    Ok(normalized)
}
