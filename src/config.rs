//! Configuration management and validation.
//!
//! Provides the run parameters (positions, years), loader and writer
//! options, and the directory layout derived from a base directory.

use crate::constants::{
    DEFAULT_NULL_MARKER, DEFAULT_POSITION, OUTPUT_DIR_NAME, OUTPUT_FILE_EXTENSION,
    OUTPUT_FILE_PREFIX, RACES_FILE_NAME, RESULTS_FILE_NAME, SOURCE_DIR_NAME,
};
use crate::error::{RaceStatsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when one year's document cannot be written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteFailurePolicy {
    /// Stop at the first failing year and return its error
    #[default]
    Abort,
    /// Record the failure and keep writing the remaining years
    Continue,
}

/// Global configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Finishing positions to keep from the results table
    pub positions: Vec<i64>,

    /// Years to keep from the races table (None = all years)
    pub years: Option<Vec<i64>>,

    /// Extra cell value treated as missing when loading CSV
    pub null_marker: Option<String>,

    /// Escape non-ASCII characters in output documents
    pub ascii_json: bool,

    /// Create the output directory before the first write
    pub create_output_dir: bool,

    /// Delete `stats_<year>.json` files for years not written by this run
    pub prune_stale: bool,

    /// Behaviour when a document write fails
    pub write_failure_policy: WriteFailurePolicy,

    /// Print status lines and a progress bar to stdout
    pub report_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            positions: vec![DEFAULT_POSITION],
            years: None,
            null_marker: Some(DEFAULT_NULL_MARKER.to_string()),
            ascii_json: true,
            create_output_dir: true,
            prune_stale: false,
            write_failure_policy: WriteFailurePolicy::Abort,
            report_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Set the finishing positions to keep
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = i64>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    /// Restrict the run to the given years
    pub fn with_years(mut self, years: impl IntoIterator<Item = i64>) -> Self {
        self.years = Some(years.into_iter().collect());
        self
    }

    /// Include every year present in the races table
    pub fn with_all_years(mut self) -> Self {
        self.years = None;
        self
    }

    /// Set or clear the CSV null marker
    pub fn with_null_marker(mut self, marker: Option<impl Into<String>>) -> Self {
        self.null_marker = marker.map(Into::into);
        self
    }

    /// Write raw UTF-8 instead of `\uXXXX` escapes
    pub fn without_ascii_escaping(mut self) -> Self {
        self.ascii_json = false;
        self
    }

    /// Require the output directory to exist already
    pub fn without_output_dir_creation(mut self) -> Self {
        self.create_output_dir = false;
        self
    }

    /// Enable stale document cleanup
    pub fn with_prune_stale(mut self) -> Self {
        self.prune_stale = true;
        self
    }

    /// Set the write failure policy
    pub fn with_write_failure_policy(mut self, policy: WriteFailurePolicy) -> Self {
        self.write_failure_policy = policy;
        self
    }

    /// Enable stdout status lines and progress bar
    pub fn with_progress(mut self) -> Self {
        self.report_progress = true;
        self
    }

    /// Check the parameters before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(RaceStatsError::configuration(
                "at least one finishing position must be requested",
            ));
        }

        if self.null_marker.as_deref() == Some("") {
            return Err(RaceStatsError::configuration(
                "null marker must not be empty (empty cells are already missing)",
            ));
        }

        Ok(())
    }
}

/// Source and output locations for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PipelinePaths {
    /// Derive `<base>/../source-data` and `<base>/../results`
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let parent = base_dir.as_ref().join("..");
        Self {
            source_dir: parent.join(SOURCE_DIR_NAME),
            output_dir: parent.join(OUTPUT_DIR_NAME),
        }
    }

    /// Read sources from a different directory
    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    /// Write documents to a different directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn races_file(&self) -> PathBuf {
        self.source_dir.join(RACES_FILE_NAME)
    }

    pub fn results_file(&self) -> PathBuf {
        self.source_dir.join(RESULTS_FILE_NAME)
    }

    /// Path of the document for `year`
    pub fn output_file(&self, year: i64) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            OUTPUT_FILE_PREFIX, year, OUTPUT_FILE_EXTENSION
        ))
    }
}
