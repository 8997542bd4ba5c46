//! Removal of stale per-year documents.
//!
//! A run only overwrites documents for the years it writes. When enabled,
//! pruning deletes `stats_<year>.json` files left behind by earlier runs
//! for years the current run did not produce. Other files are never touched.

use crate::constants::{OUTPUT_FILE_EXTENSION, OUTPUT_FILE_PATTERN, OUTPUT_FILE_PREFIX};
use crate::error::{RaceStatsError, Result};
use glob::Pattern;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Documents in `output_dir` whose year is not in `keep_years`
pub fn find_stale_outputs(output_dir: &Path, keep_years: &HashSet<i64>) -> Result<Vec<PathBuf>> {
    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    let prune_error = |reason: String| RaceStatsError::Prune {
        path: output_dir.to_path_buf(),
        reason,
    };

    let name_pattern = Regex::new(OUTPUT_FILE_PATTERN).map_err(|e| prune_error(e.to_string()))?;
    let search = format!(
        "{}/{}*.{}",
        Pattern::escape(&output_dir.to_string_lossy()),
        OUTPUT_FILE_PREFIX,
        OUTPUT_FILE_EXTENSION
    );

    let mut stale = Vec::new();
    for entry in glob::glob(&search).map_err(|e| prune_error(e.to_string()))? {
        let path = entry.map_err(|e| prune_error(e.to_string()))?;
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(year) = name_pattern
            .captures(file_name)
            .and_then(|captures| captures[1].parse::<i64>().ok())
        else {
            debug!("Leaving non-document file {}", path.display());
            continue;
        };

        if !keep_years.contains(&year) {
            stale.push(path);
        }
    }

    stale.sort();
    Ok(stale)
}

/// Delete stale documents and return the removed paths
pub fn prune_stale_outputs(output_dir: &Path, keep_years: &HashSet<i64>) -> Result<Vec<PathBuf>> {
    let stale = find_stale_outputs(output_dir, keep_years)?;

    for path in &stale {
        fs::remove_file(path).map_err(|e| RaceStatsError::Prune {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!("Removed stale output {}", path.display());
    }

    Ok(stale)
}
