//! JSON document writing for year partitions
//!
//! Serializes each partition as a 4-space indented JSON array and writes
//! it to `stats_<year>.json` in the output directory, reporting each path
//! as it lands. Non-ASCII text is escaped as `\uXXXX` unless disabled, so
//! documents are byte-compatible with common JSON pretty-printers.

use crate::config::{PipelineConfig, PipelinePaths, WriteFailurePolicy};
use crate::constants::JSON_INDENT;
use crate::error::{RaceStatsError, Result};
use crate::models::{FailedWrite, RaceSummary, YearPartition};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Outcome of writing a set of partitions
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedWrite>,
}

/// Writer for per-year JSON documents
#[derive(Debug)]
pub struct JsonWriter {
    paths: PipelinePaths,
    config: PipelineConfig,
}

impl JsonWriter {
    /// Create a new JSON writer
    pub fn new(paths: PipelinePaths, config: PipelineConfig) -> Self {
        Self { paths, config }
    }

    /// Write one document per partition, in partition order
    pub fn write_partitions(&self, partitions: &[YearPartition]) -> Result<WriteOutcome> {
        let mut outcome = WriteOutcome::default();
        if partitions.is_empty() {
            debug!("No partitions to write");
            return Ok(outcome);
        }

        self.prepare_output_dir()?;

        let progress_bar = self.progress_bar(partitions.len());

        for partition in partitions {
            progress_bar.set_message(format!("stats_{}", partition.year));

            match self.write_partition(partition) {
                Ok(path) => {
                    if self.config.report_progress {
                        progress_bar.println(format!(
                            "{} {}",
                            "Output saved to".bright_green(),
                            path.display()
                        ));
                    }
                    outcome.written.push(path);
                }
                Err(e) => match self.config.write_failure_policy {
                    WriteFailurePolicy::Abort => {
                        progress_bar.abandon_with_message("Write failed");
                        return Err(e);
                    }
                    WriteFailurePolicy::Continue => {
                        error!("Failed to write year {}: {:#}", partition.year, e);
                        outcome.failed.push(FailedWrite {
                            year: partition.year,
                            path: self.paths.output_file(partition.year),
                            reason: e.to_string(),
                        });
                    }
                },
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        Ok(outcome)
    }

    /// Write a single partition and return its path
    pub fn write_partition(&self, partition: &YearPartition) -> Result<PathBuf> {
        let path = self.paths.output_file(partition.year);
        let document = render_document(&partition.records, self.config.ascii_json)?;

        fs::write(&path, document).map_err(|source| RaceStatsError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            "Output saved to {} ({} records)",
            path.display(),
            partition.records.len()
        );
        Ok(path)
    }

    fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.paths.output_dir;
        if self.config.create_output_dir {
            fs::create_dir_all(dir).map_err(|source| RaceStatsError::Write {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.report_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            progress_bar.set_style(style.progress_chars("#>-"));
        }
        progress_bar
    }
}

/// Render records as an indented JSON array
pub fn render_document(records: &[RaceSummary], ascii: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = DocumentFormatter {
        inner: PrettyFormatter::with_indent(JSON_INDENT),
        ascii,
    };
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Pretty formatter that can escape non-ASCII characters
struct DocumentFormatter<'a> {
    inner: PrettyFormatter<'a>,
    ascii: bool,
}

impl Formatter for DocumentFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.ascii {
            return writer.write_all(fragment.as_bytes());
        }

        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn summary(name: &str, round: i64) -> RaceSummary {
        RaceSummary {
            race_name: json!(name),
            race_round: json!(round),
            race_datetime: json!("2021-03-01T14:00:00"),
            winning_driver_id: json!(44),
            fastest_lap: json!("1:23.456"),
        }
    }

    fn create_test_writer(temp_dir: &TempDir, config: PipelineConfig) -> JsonWriter {
        let paths = PipelinePaths::from_base_dir(temp_dir.path())
            .with_output_dir(temp_dir.path().join("results"));
        JsonWriter::new(paths, config)
    }

    #[test]
    fn test_render_document_layout() {
        let bytes = render_document(&[summary("GP A", 1)], true).unwrap();

        let expected = "[
    {
        \"Race Name\": \"GP A\",
        \"Race Round\": 1,
        \"Race Datetime\": \"2021-03-01T14:00:00\",
        \"Race Winning driverId\": 44,
        \"Race Fastest Lap\": \"1:23.456\"
    }
]";
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_render_empty_document() {
        let bytes = render_document(&[], true).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_non_ascii_escaping() {
        let bytes = render_document(&[summary("São Paulo 🏁", 1)], true).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains(r#""S\u00e3o Paulo \ud83c\udfc1""#));
        assert!(text.is_ascii());

        // Escaped text decodes back to the original
        let parsed: Vec<RaceSummary> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0].race_name, json!("São Paulo 🏁"));
    }

    #[test]
    fn test_raw_utf8_when_escaping_disabled() {
        let bytes = render_document(&[summary("São Paulo", 1)], false).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"São Paulo\""));
    }

    #[test]
    fn test_control_characters_still_escaped() {
        let bytes = render_document(&[summary("GP\t\"A\"", 1)], true).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains(r#""GP\t\"A\"""#));
    }

    #[test]
    fn test_write_partitions_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let writer = create_test_writer(&temp_dir, PipelineConfig::default());

        let partitions = vec![
            YearPartition {
                year: 2020,
                records: vec![summary("GP Z", 7)],
            },
            YearPartition {
                year: 2021,
                records: vec![summary("GP A", 1), summary("GP B", 2)],
            },
        ];

        let outcome = writer.write_partitions(&partitions).unwrap();

        assert_eq!(outcome.written.len(), 2);
        assert!(outcome.failed.is_empty());
        assert!(temp_dir.path().join("results/stats_2020.json").exists());

        let text = fs::read_to_string(temp_dir.path().join("results/stats_2021.json")).unwrap();
        let records: Vec<RaceSummary> = serde_json::from_str(&text).unwrap();
        assert_eq!(records, vec![summary("GP A", 1), summary("GP B", 2)]);
    }

    #[test]
    fn test_no_partitions_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let writer = create_test_writer(&temp_dir, PipelineConfig::default());

        let outcome = writer.write_partitions(&[]).unwrap();

        assert!(outcome.written.is_empty());
        assert!(!temp_dir.path().join("results").exists());
    }

    #[test]
    fn test_missing_dir_without_creation_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let config = PipelineConfig::default().without_output_dir_creation();
        let writer = create_test_writer(&temp_dir, config);

        let partitions = vec![YearPartition {
            year: 2021,
            records: vec![summary("GP A", 1)],
        }];

        let err = writer.write_partitions(&partitions).unwrap_err();
        match err {
            RaceStatsError::Write { path, .. } => {
                assert!(path.ends_with("stats_2021.json"));
            }
            other => panic!("Expected Write error, got {other:?}"),
        }
    }

    #[test]
    fn test_continue_policy_records_failures() {
        let temp_dir = TempDir::new().unwrap();
        let config = PipelineConfig::default()
            .without_output_dir_creation()
            .with_write_failure_policy(WriteFailurePolicy::Continue);
        let writer = create_test_writer(&temp_dir, config);

        let partitions = vec![
            YearPartition {
                year: 2020,
                records: vec![summary("GP Z", 7)],
            },
            YearPartition {
                year: 2021,
                records: vec![summary("GP A", 1)],
            },
        ];

        let outcome = writer.write_partitions(&partitions).unwrap();

        assert!(outcome.written.is_empty());
        let failed_years: Vec<i64> = outcome.failed.iter().map(|f| f.year).collect();
        assert_eq!(failed_years, vec![2020, 2021]);
    }

    #[test]
    fn test_existing_document_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let writer = create_test_writer(&temp_dir, PipelineConfig::default());
        let output_dir = temp_dir.path().join("results");
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(output_dir.join("stats_2021.json"), "stale content that is longer").unwrap();

        let partition = YearPartition {
            year: 2021,
            records: vec![summary("GP A", 1)],
        };
        let path = writer.write_partition(&partition).unwrap();

        let bytes = fs::read(path).unwrap();
        assert_eq!(bytes, render_document(&partition.records, true).unwrap());
    }
}
