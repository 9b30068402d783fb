//! Error types for txtsheet-core operations.

use thiserror::Error;
use txtsheet_archive::ArchiveError;
use txtsheet_data::DataError;

use crate::diagnostics::Notice;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicit config path does not exist
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::Settings`]
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Hard ingestion failures; per-file problems are reported as notices instead
#[derive(Debug, Error)]
pub enum IngestError {
    /// The chosen directory cannot be listed
    #[error("Directory not available: {path}: {reason}")]
    DirectoryUnavailable { path: String, reason: String },
}

/// Export failures
#[derive(Debug, Error)]
pub enum ExportError {
    /// One or more rows failed validation; nothing was written
    #[error("{} row problem(s) must be fixed before export", .0.len())]
    Invalid(Vec<Notice>),

    /// Archive could not be assembled or written
    #[error("Failed to package archive: {0}")]
    Packaging(#[from] ArchiveError),

    /// Spreadsheet could not be serialized or written
    #[error("Failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] DataError),
}

impl ExportError {
    /// Validation notices, when the export was blocked by validation
    pub fn violations(&self) -> &[Notice] {
        match self {
            ExportError::Invalid(notices) => notices,
            _ => &[],
        }
    }
}

/// Errors changing the working set
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Row position outside the working set
    #[error("Row {row} does not exist (working set has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Title column outside the sheet's title columns
    #[error("Title column {column} does not exist (sheet has {available} title columns)")]
    ColumnOutOfRange { column: usize, available: usize },
}
