//! Source table loading.
//!
//! Reads the races and results CSV files into data frames without
//! transforming them. Every original column and the file's row order are
//! preserved; the only interpretation applied is which cells count as
//! missing (empty cells, plus the configured null marker).

use crate::config::{PipelineConfig, PipelinePaths};
use crate::constants::{RACES_TABLE, RESULTS_TABLE};
use crate::error::{RaceStatsError, Result};
use crate::models::SourceTables;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load both source tables from the configured source directory
pub fn load_sources(paths: &PipelinePaths, config: &PipelineConfig) -> Result<SourceTables> {
    let null_marker = config.null_marker.as_deref();

    let races = read_csv_table(RACES_TABLE, &paths.races_file(), null_marker)?;
    let results = read_csv_table(RESULTS_TABLE, &paths.results_file(), null_marker)?;

    Ok(SourceTables { races, results })
}

/// Read one header-first CSV file into a data frame
pub fn read_csv_table(table: &str, path: &Path, null_marker: Option<&str>) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(RaceStatsError::SourceNotFound {
            table: table.to_string(),
            path: path.to_path_buf(),
        });
    }

    debug!("Reading {} table from {}", table, path.display());

    check_record_lengths(table, path)?;

    let null_values = null_marker.map(|marker| NullValues::AllColumnsSingle(marker.into()));
    let parse_options = CsvParseOptions::default().with_null_values(null_values);

    // Full-file inference so a late text value cannot be read under a numeric type
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| RaceStatsError::Load {
            table: table.to_string(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    info!(
        "Loaded {} table: {} rows, {} columns",
        table,
        df.height(),
        df.width()
    );

    Ok(df)
}

/// Reject any record whose field count differs from the header's
///
/// The CSV reader pads short rows with nulls, so ragged input has to be
/// caught before parsing.
fn check_record_lengths(table: &str, path: &Path) -> Result<()> {
    let load_error = |reason: String| RaceStatsError::Load {
        table: table.to_string(),
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| load_error(e.to_string()))?;

    let mut record = csv::ByteRecord::new();
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| load_error(e.to_string()))?
    {}

    Ok(())
}
