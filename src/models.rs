//! Core data structures and types for race stats processing.
//!
//! Defines the loaded source tables, the output record shape, per-year
//! partitions and the run statistics returned to callers.

use crate::constants::output_keys;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// The two source tables, with every original column and row order
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub races: DataFrame,
    pub results: DataFrame,
}

/// One entry of an output document
///
/// Values keep the type they had in the source table, so an integer
/// `round` stays a JSON integer and a textual one stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    #[serde(rename = "Race Name")]
    pub race_name: Value,
    #[serde(rename = "Race Round")]
    pub race_round: Value,
    #[serde(rename = "Race Datetime")]
    pub race_datetime: Value,
    #[serde(rename = "Race Winning driverId")]
    pub winning_driver_id: Value,
    #[serde(rename = "Race Fastest Lap")]
    pub fastest_lap: Value,
}

impl RaceSummary {
    /// Output keys in document order
    pub const KEYS: [&'static str; 5] = [
        output_keys::RACE_NAME,
        output_keys::RACE_ROUND,
        output_keys::RACE_DATETIME,
        output_keys::RACE_WINNING_DRIVER_ID,
        output_keys::RACE_FASTEST_LAP,
    ];
}

/// All records for one year, ordered by round
#[derive(Debug, Clone, PartialEq)]
pub struct YearPartition {
    pub year: i64,
    pub records: Vec<RaceSummary>,
}

/// A year whose document could not be written
#[derive(Debug, Clone)]
pub struct FailedWrite {
    pub year: i64,
    pub path: PathBuf,
    pub reason: String,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub races_loaded: usize,
    pub results_loaded: usize,
    pub races_retained: usize,
    pub results_retained: usize,
    pub joined_rows: usize,
    pub rows_without_year: usize,
    pub files_written: Vec<PathBuf>,
    pub failed_writes: Vec<FailedWrite>,
    pub pruned_files: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// True when every partition was written
    pub fn is_complete(&self) -> bool {
        self.failed_writes.is_empty()
    }
}
