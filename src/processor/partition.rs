//! Year partitioning of the joined table.
//!
//! Splits the sorted joined table into one partition per distinct year, in
//! order of first appearance, and maps each row to a [`RaceSummary`].

use super::filters::require_columns;
use crate::constants::columns::{DATETIME_STRING, DRIVER_ID, FASTEST_LAP_TIME, NAME, ROUND, YEAR};
use crate::error::Result;
use crate::models::{RaceSummary, YearPartition};
use polars::prelude::*;
use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Table name used when reporting missing joined columns
const JOINED_TABLE: &str = "joined";

/// Result of partitioning, including rows that had no year
#[derive(Debug, Default)]
pub struct Partitioning {
    pub partitions: Vec<YearPartition>,
    pub rows_without_year: usize,
}

/// Group joined rows by year, keeping their existing order
pub fn partition_by_year(joined: &DataFrame) -> Result<Partitioning> {
    require_columns(
        joined,
        JOINED_TABLE,
        &[YEAR, NAME, ROUND, DATETIME_STRING, DRIVER_ID, FASTEST_LAP_TIME],
    )?;

    let years = joined
        .column(YEAR)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let years = years.i64()?;

    let name = joined.column(NAME)?.as_materialized_series();
    let round = joined.column(ROUND)?.as_materialized_series();
    let datetime = joined.column(DATETIME_STRING)?.as_materialized_series();
    let driver_id = joined.column(DRIVER_ID)?.as_materialized_series();
    let fastest_lap = joined.column(FASTEST_LAP_TIME)?.as_materialized_series();

    let mut partitioning = Partitioning::default();
    // Partition index per year
    let mut slots: HashMap<i64, usize> = HashMap::new();

    for (idx, year) in years.into_iter().enumerate() {
        let Some(year) = year else {
            partitioning.rows_without_year += 1;
            continue;
        };

        let record = RaceSummary {
            race_name: json_value(name.get(idx)?),
            race_round: json_value(round.get(idx)?),
            race_datetime: json_value(datetime.get(idx)?),
            winning_driver_id: json_value(driver_id.get(idx)?),
            fastest_lap: json_value(fastest_lap.get(idx)?),
        };

        match slots.get(&year).copied() {
            Some(slot) => partitioning.partitions[slot].records.push(record),
            None => {
                slots.insert(year, partitioning.partitions.len());
                partitioning.partitions.push(YearPartition {
                    year,
                    records: vec![record],
                });
            }
        }
    }

    if partitioning.rows_without_year > 0 {
        warn!(
            "Skipped {} joined rows with no year",
            partitioning.rows_without_year
        );
    }

    debug!(
        "Partitioned {} rows into {} years",
        joined.height(),
        partitioning.partitions.len()
    );

    Ok(partitioning)
}

/// Convert a cell to JSON, keeping its stored type
fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Bool(v),
        AnyValue::String(v) => Value::String(v.to_string()),
        AnyValue::StringOwned(v) => Value::String(v.to_string()),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_value(f64::from(v)),
        AnyValue::Float64(v) => float_value(v),
        other => Value::String(other.to_string()),
    }
}

/// Non-finite floats have no JSON form
fn float_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
