//! Configuration settings
//!
//! Defines the configuration structures read from `txtsheet.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use txtsheet_archive::CollisionPolicy;

use crate::error::ConfigError;

/// Default cap on characters kept from each text file
pub const DEFAULT_MAX_CHARS: usize = 300_000;

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Text ingestion settings
    pub ingest: IngestSettings,
    /// Spreadsheet output settings
    pub sheet: SheetSettings,
    /// Archive export settings
    pub export: ExportSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Text ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestSettings {
    /// Characters kept from each file
    pub max_chars: usize,
    /// Accepted file extension, including the dot
    pub extension: String,
    /// Replace invalid UTF-8 with U+FFFD instead of skipping the file
    pub lossy_decode: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            extension: ".txt".to_string(),
            lossy_decode: false,
        }
    }
}

/// Spreadsheet output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SheetSettings {
    /// Worksheet name
    pub sheet_name: String,
    /// Header of the title column
    pub title_label: String,
    /// Header of the content column
    pub content_label: String,
    /// Prefix of the default output name (`<prefix>_<date>.xlsx`)
    pub file_prefix: String,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            sheet_name: "TXT".to_string(),
            title_label: "Title".to_string(),
            content_label: "Content".to_string(),
            file_prefix: "txt_export".to_string(),
        }
    }
}

/// Archive export configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Output archive file name
    pub archive_name: String,
    /// Handling of rows that map to the same file name
    pub collisions: CollisionPolicy,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            archive_name: "txt_files.zip".to_string(),
            collisions: CollisionPolicy::Rename,
        }
    }
}
