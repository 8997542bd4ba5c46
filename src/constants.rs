//! Application constants for the race stats pipeline
//!
//! File and directory names, column names used from each source table,
//! and the literal defaults substituted for missing values.

// =============================================================================
// Directory Layout
// =============================================================================

/// Directory holding the source CSV files, sibling of the base directory
pub const SOURCE_DIR_NAME: &str = "source-data";

/// Directory receiving the per-year JSON documents, sibling of the base directory
pub const OUTPUT_DIR_NAME: &str = "results";

/// Races source file name
pub const RACES_FILE_NAME: &str = "races.csv";

/// Results source file name
pub const RESULTS_FILE_NAME: &str = "results.csv";

/// Prefix and extension of per-year output documents (`stats_<year>.json`)
pub const OUTPUT_FILE_PREFIX: &str = "stats_";
pub const OUTPUT_FILE_EXTENSION: &str = "json";

/// Matches output document names and captures the year
pub const OUTPUT_FILE_PATTERN: &str = r"^stats_(\d+)\.json$";

// =============================================================================
// Table Names
// =============================================================================

pub const RACES_TABLE: &str = "races";
pub const RESULTS_TABLE: &str = "results";

// =============================================================================
// Column Names
// =============================================================================

/// Column names read from the source tables
pub mod columns {
    /// Shared join key
    pub const RACE_ID: &str = "raceId";

    // Races table
    pub const YEAR: &str = "year";
    pub const ROUND: &str = "round";
    pub const NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";

    /// Derived on the races table as `date + "T" + time`
    pub const DATETIME_STRING: &str = "datetime_string";

    // Results table
    pub const DRIVER_ID: &str = "driverId";
    pub const POSITION: &str = "position";
    pub const FASTEST_LAP_TIME: &str = "fastestLapTime";

    // Hidden ordering columns, dropped before the joined table leaves the joiner
    pub const RACES_ROW: &str = "__races_row";
    pub const RESULTS_ROW: &str = "__results_row";
}

// =============================================================================
// Default Values
// =============================================================================

/// Substituted for a missing race start time
pub const DEFAULT_RACE_TIME: &str = "00:00:00";

/// Substituted for a missing fastest lap time
pub const DEFAULT_FASTEST_LAP: &str = "00:00.0";

/// Separator between date and time in `datetime_string`
pub const DATETIME_SEPARATOR: &str = "T";

/// Missing-value marker used by the public motorsport results datasets
pub const DEFAULT_NULL_MARKER: &str = "\\N";

/// Finishing position kept when none is requested
pub const DEFAULT_POSITION: i64 = 1;

/// Indentation of output documents
pub const JSON_INDENT: &[u8] = b"    ";

// =============================================================================
// Output Record Keys
// =============================================================================

/// Keys of each output record, in document order
pub mod output_keys {
    pub const RACE_NAME: &str = "Race Name";
    pub const RACE_ROUND: &str = "Race Round";
    pub const RACE_DATETIME: &str = "Race Datetime";
    pub const RACE_WINNING_DRIVER_ID: &str = "Race Winning driverId";
    pub const RACE_FASTEST_LAP: &str = "Race Fastest Lap";
}
