//! Inner join of normalized races and results.
//!
//! Rows are matched on `raceId` and ordered by `(year, round)`. Rows sharing
//! a `(year, round)` keep races-table order first and results-table order
//! second, which makes the output independent of the join engine's own
//! ordering.

use super::filters::require_columns;
use crate::constants::{
    RACES_TABLE, RESULTS_TABLE,
    columns::{RACE_ID, RACES_ROW, RESULTS_ROW, ROUND, YEAR},
};
use crate::error::{RaceStatsError, Result};
use polars::prelude::*;
use tracing::debug;

/// Join races and results on `raceId`, sorted by year then round
pub fn join_race_results(races: DataFrame, results: DataFrame) -> Result<DataFrame> {
    for (table, frame) in [(RACES_TABLE, &races), (RESULTS_TABLE, &results)] {
        if frame.column(RACE_ID).is_err() {
            return Err(RaceStatsError::JoinKeyMissing {
                table: table.to_string(),
                key: RACE_ID.to_string(),
            });
        }
    }
    require_columns(&races, RACES_TABLE, &[YEAR, ROUND])?;

    let joined = races
        .lazy()
        .with_row_index(RACES_ROW, None)
        .join(
            results.lazy().with_row_index(RESULTS_ROW, None),
            [col(RACE_ID)],
            [col(RACE_ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort_by_exprs(
            [col(YEAR), col(ROUND), col(RACES_ROW), col(RESULTS_ROW)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?
        .drop(RACES_ROW)?
        .drop(RESULTS_ROW)?;

    debug!("Joined race results: {} rows", joined.height());

    Ok(joined)
}
