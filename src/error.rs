//! Error handling for race stats operations.
//!
//! Provides error types with context for source loading, schema checks,
//! joining and per-year document writes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaceStatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source file not found for {table} table: {path}")]
    SourceNotFound { table: String, path: PathBuf },

    #[error("Failed to load {table} table from {path} - {reason}")]
    Load {
        table: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Column '{column}' missing from {table} table")]
    MissingColumn { table: String, column: String },

    #[error("Join key '{key}' missing from {table} table")]
    JoinKeyMissing { table: String, key: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to prune stale output in {path} - {reason}")]
    Prune { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Broad failure classes a caller can act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Source missing, unreadable, malformed, or lacking a needed column
    Load,
    /// Join key absent from an input schema
    Join,
    /// Output directory or document could not be written
    Output,
    /// Invalid invocation parameters
    Configuration,
}

impl RaceStatsError {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. } | Self::Load { .. } | Self::MissingColumn { .. } => {
                ErrorCategory::Load
            }
            // Engine failures only surface while transforming loaded tables
            Self::Polars(_) => ErrorCategory::Load,
            Self::JoinKeyMissing { .. } => ErrorCategory::Join,
            Self::Io(_) | Self::Json(_) | Self::Write { .. } | Self::Prune { .. } => {
                ErrorCategory::Output
            }
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RaceStatsError>;
