//! Race Stats Library
//!
//! Turns a races table and a race results table (CSV) into one JSON
//! document per season listing the races whose results match the selected
//! finishing positions.
//!
//! This library provides tools for:
//! - Loading the `races.csv` and `results.csv` source tables into polars frames
//! - Filtering races by year and results by finishing position
//! - Defaulting missing start times and fastest lap times
//! - Joining both tables on `raceId` in `(year, round)` order
//! - Writing `stats_<year>.json` documents, optionally pruning stale ones
//!
//! ```no_run
//! use race_stats::{PipelineConfig, process_race_stats};
//!
//! let config = PipelineConfig::default().with_positions([1]).with_years([2021]);
//! let stats = process_race_stats("solution", config)?;
//! println!("wrote {} documents", stats.files_written.len());
//! # Ok::<(), race_stats::RaceStatsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod models;
pub mod processor;

// Re-export commonly used types
pub use config::{PipelineConfig, PipelinePaths, WriteFailurePolicy};
pub use error::{ErrorCategory, RaceStatsError, Result};
pub use models::{ProcessingStats, RaceSummary, YearPartition};
pub use processor::{RaceStatsProcessor, process_race_stats};
