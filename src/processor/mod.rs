//! Main processing engine with modular architecture.
//!
//! Orchestrates the linear race stats workflow: load the two source
//! tables, normalize each, join them, partition by year and write one
//! document per year. Every stage runs to completion before the next.

pub mod filters;
pub mod join;
pub mod partition;
pub mod prune;
pub mod races;
pub mod results;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    join::join_race_results, partition::partition_by_year, prune::prune_stale_outputs,
    races::normalize_races, results::normalize_results, writer::JsonWriter,
};

use crate::config::{PipelineConfig, PipelinePaths};
use crate::error::Result;
use crate::loader::load_sources;
use crate::models::ProcessingStats;

use colored::*;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main processor for race stats generation
#[derive(Debug)]
pub struct RaceStatsProcessor {
    paths: PipelinePaths,
    config: PipelineConfig,
    writer: JsonWriter,
}

impl RaceStatsProcessor {
    /// Create a processor for explicit source and output locations
    pub fn new(paths: PipelinePaths, config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            writer: JsonWriter::new(paths.clone(), config.clone()),
            paths,
            config,
        })
    }

    /// Create a processor using the `<base>/../source-data` layout
    pub fn from_base_dir(base_dir: impl AsRef<Path>, config: PipelineConfig) -> Result<Self> {
        Self::new(PipelinePaths::from_base_dir(base_dir), config)
    }

    pub fn paths(&self) -> &PipelinePaths {
        &self.paths
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let mut stats = ProcessingStats::default();

        if self.config.report_progress {
            println!("{}", "Starting race stats generation".bright_green().bold());
            println!(
                "  {} {}",
                "Sources:".bright_cyan(),
                self.paths.source_dir.display()
            );
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                self.paths.output_dir.display()
            );
        }

        // Step 1: Load both source tables
        let tables = load_sources(&self.paths, &self.config)?;
        stats.races_loaded = tables.races.height();
        stats.results_loaded = tables.results.height();

        // Step 2: Normalize each table independently
        let races = normalize_races(tables.races, self.config.years.as_deref())?;
        let results = normalize_results(tables.results, &self.config.positions)?;
        stats.races_retained = races.height();
        stats.results_retained = results.height();

        // Step 3: Join and order by year, round
        let joined = join_race_results(races, results)?;
        stats.joined_rows = joined.height();

        // Step 4: Split into per-year documents
        let partitioning = partition_by_year(&joined)?;
        stats.rows_without_year = partitioning.rows_without_year;
        debug!(
            "Writing {} year documents to {}",
            partitioning.partitions.len(),
            self.paths.output_dir.display()
        );

        // Step 5: Write documents
        let outcome = self.writer.write_partitions(&partitioning.partitions)?;
        stats.files_written = outcome.written;
        stats.failed_writes = outcome.failed;

        // Step 6: Optionally remove documents for years this run did not produce
        if self.config.prune_stale {
            if stats.is_complete() {
                let keep_years: HashSet<i64> =
                    partitioning.partitions.iter().map(|p| p.year).collect();
                stats.pruned_files = prune_stale_outputs(&self.paths.output_dir, &keep_years)?;
            } else {
                warn!("Skipping stale output pruning because some writes failed");
            }
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Wrote {} documents from {} joined rows in {}ms",
            stats.files_written.len(),
            stats.joined_rows,
            stats.processing_time_ms
        );

        Ok(stats)
    }
}

/// Run the pipeline for a base directory
///
/// Reads `<base>/../source-data/{races,results}.csv` and writes
/// `<base>/../results/stats_<year>.json`.
pub fn process_race_stats(
    base_dir: impl AsRef<Path>,
    config: PipelineConfig,
) -> Result<ProcessingStats> {
    RaceStatsProcessor::from_base_dir(base_dir, config)?.process()
}
