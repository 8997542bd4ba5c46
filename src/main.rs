use anyhow::Context;
use clap::Parser;
use colored::*;
use race_stats::cli::Args;
use race_stats::{ProcessingStats, RaceStatsProcessor};
use std::process;
use tracing::debug;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);

    match run(&args) {
        Ok(stats) => {
            if !args.quiet {
                report_summary(&stats);
            }
            if !stats.is_complete() {
                eprintln!(
                    "Error: {} of {} documents could not be written",
                    stats.failed_writes.len(),
                    stats.failed_writes.len() + stats.files_written.len()
                );
                process::exit(1);
            }
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ProcessingStats> {
    let paths = args.to_paths();
    let config = args.to_config();

    let processor =
        RaceStatsProcessor::new(paths, config).context("Invalid race stats parameters")?;

    processor.process().with_context(|| {
        format!(
            "Race stats generation failed (sources: {}, output: {})",
            processor.paths().source_dir.display(),
            processor.paths().output_dir.display()
        )
    })
}

/// Set up structured logging
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("race_stats={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

fn report_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} races, {} results",
        "Loaded:".bright_cyan(),
        stats.races_loaded,
        stats.results_loaded
    );
    println!(
        "  {} {}",
        "Joined rows:".bright_cyan(),
        stats.joined_rows.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Documents written:".bright_cyan(),
        stats.files_written.len().to_string().bright_white().bold()
    );
    if !stats.pruned_files.is_empty() {
        println!(
            "  {} {}",
            "Stale documents removed:".bright_cyan(),
            stats.pruned_files.len().to_string().bright_white()
        );
    }
    if !stats.failed_writes.is_empty() {
        println!(
            "  {} {}",
            "Documents failed:".bright_red(),
            stats.failed_writes.len().to_string().bright_red().bold()
        );
    }
}
