//! Command-line interface components.

use crate::config::{PipelineConfig, PipelinePaths, WriteFailurePolicy};
use crate::constants::{DEFAULT_NULL_MARKER, DEFAULT_POSITION};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "race-stats")]
#[command(about = "Write per-year JSON summaries of race results at selected finishing positions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Base directory; sources are read from BASE_DIR/../source-data
    #[arg(value_name = "BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Finishing positions to keep
    #[arg(short, long, value_delimiter = ',', default_values_t = [DEFAULT_POSITION])]
    pub positions: Vec<i64>,

    /// Years to keep (default: all years)
    #[arg(short, long, value_delimiter = ',')]
    pub years: Option<Vec<i64>>,

    /// Read races.csv and results.csv from this directory instead
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Write stats_<year>.json files to this directory instead
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Delete stats_<year>.json files for years this run does not write
    #[arg(long)]
    pub prune_stale: bool,

    /// Keep writing remaining years when one fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Write raw UTF-8 instead of \uXXXX escapes
    #[arg(long)]
    pub no_ascii: bool,

    /// Cell value read as missing in the source CSV files
    #[arg(long, default_value = DEFAULT_NULL_MARKER, conflicts_with = "no_null_marker")]
    pub null_marker: String,

    /// Only empty cells count as missing
    #[arg(long)]
    pub no_null_marker: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors, no status output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Source and output locations, applying any overrides
    pub fn to_paths(&self) -> PipelinePaths {
        let mut paths = PipelinePaths::from_base_dir(&self.base_dir);
        if let Some(source_dir) = &self.source_dir {
            paths = paths.with_source_dir(source_dir);
        }
        if let Some(output_dir) = &self.output_dir {
            paths = paths.with_output_dir(output_dir);
        }
        paths
    }

    /// Pipeline configuration from the parsed flags
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default().with_positions(self.positions.iter().copied());

        if let Some(years) = &self.years {
            config = config.with_years(years.iter().copied());
        }
        config = config.with_null_marker(if self.no_null_marker {
            None
        } else {
            Some(self.null_marker.clone())
        });
        if self.no_ascii {
            config = config.without_ascii_escaping();
        }
        if self.prune_stale {
            config = config.with_prune_stale();
        }
        if self.continue_on_error {
            config = config.with_write_failure_policy(WriteFailurePolicy::Continue);
        }
        if !self.quiet {
            config = config.with_progress();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["race-stats"]);

        assert_eq!(args.base_dir, PathBuf::from("."));
        assert_eq!(args.positions, vec![1]);
        assert!(args.years.is_none());
        assert_eq!(args.get_log_level(), "info");

        let config = args.to_config();
        assert_eq!(config.positions, vec![1]);
        assert!(config.years.is_none());
        assert_eq!(config.null_marker.as_deref(), Some("\\N"));
        assert!(config.report_progress);
        assert_eq!(config.write_failure_policy, WriteFailurePolicy::Abort);
    }

    #[test]
    fn test_comma_separated_lists() {
        let args = Args::parse_from(["race-stats", "solution", "-p", "1,2,3", "--years", "2020,2021"]);

        let config = args.to_config();
        assert_eq!(config.positions, vec![1, 2, 3]);
        assert_eq!(config.years, Some(vec![2020, 2021]));
    }

    #[test]
    fn test_paths_and_overrides() {
        let args = Args::parse_from(["race-stats", "/data/solution", "--output-dir", "/tmp/out"]);
        let paths = args.to_paths();

        assert_eq!(
            paths.races_file(),
            PathBuf::from("/data/solution/../source-data/races.csv")
        );
        assert_eq!(paths.output_file(2021), PathBuf::from("/tmp/out/stats_2021.json"));
    }

    #[test]
    fn test_switches() {
        let args = Args::parse_from([
            "race-stats",
            "--prune-stale",
            "--continue-on-error",
            "--no-ascii",
            "--no-null-marker",
            "--quiet",
        ]);
        let config = args.to_config();

        assert!(config.prune_stale);
        assert_eq!(config.write_failure_policy, WriteFailurePolicy::Continue);
        assert!(!config.ascii_json);
        assert!(config.null_marker.is_none());
        assert!(!config.report_progress);
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["race-stats", "-v", "-q"]).is_err());
    }
}
