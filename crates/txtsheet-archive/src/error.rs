//! Error types for archive operations

use thiserror::Error;

/// Errors that can occur while packaging or reading archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Error reading or writing the ZIP container
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry name is not usable inside an archive
    #[error("Invalid entry name: {0:?}")]
    InvalidEntryName(String),
}

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;
