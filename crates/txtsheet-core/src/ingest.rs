//! Text ingestion
//!
//! Two entry points produce the same ordered list of [`TextRecord`]s:
//!
//! - [`Ingestor::read_files`] takes an explicit list of files. Reads fan out
//!   on the rayon pool and are joined back in input order.
//! - [`Ingestor::read_directory`] walks a chosen directory recursively, one
//!   entry at a time.
//!
//! Files that cannot be read or decoded are skipped and reported; they never
//! abort the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::IngestSettings;
use crate::diagnostics::{codes, Notice, Outcome};
use crate::error::IngestError;
use crate::names::{has_extension, infer_root_directory, title_from_filename, truncate_chars};
use crate::record::TextRecord;

/// Where a source file's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    /// Read from disk when ingested
    Disk(PathBuf),
    /// Already in memory
    Memory(Vec<u8>),
}

/// A file offered for ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Bare file name, used for filtering and the title
    pub name: String,
    /// Path relative to the selection root, used to infer the folder name
    pub relative_path: Option<String>,
    /// Byte source
    pub location: FileLocation,
}

impl SourceFile {
    /// A file on disk
    ///
    /// The relative path is `<parent folder>/<name>`, so a list of files
    /// from one folder infers that folder whatever the path prefix.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = path
            .parent()
            .and_then(Path::file_name)
            .map(|parent| format!("{}/{}", parent.to_string_lossy(), name));

        Self {
            name,
            relative_path,
            location: FileLocation::Disk(path),
        }
    }

    /// An in-memory file
    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            relative_path: None,
            location: FileLocation::Memory(bytes.into()),
        }
    }

    /// Set the relative path
    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    /// Full path for files on disk, bare name otherwise
    fn display_name(&self) -> String {
        match &self.location {
            FileLocation::Disk(path) => path.display().to_string(),
            FileLocation::Memory(_) => self.name.clone(),
        }
    }

    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.location {
            FileLocation::Disk(path) => fs::read(path),
            FileLocation::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Result of asking the user for a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySelection {
    /// A directory was chosen
    Picked(PathBuf),
    /// The user dismissed the picker
    Cancelled,
}

/// How an ingestion run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStatus {
    /// At least one record was produced
    Loaded,
    /// Matching files existed but none could be read
    Empty,
    /// No file matched the accepted extension
    NoMatches,
    /// Directory selection was cancelled; nothing happened
    Cancelled,
}

/// Records produced by an ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// Records in input (or traversal) order
    pub records: Vec<TextRecord>,
    /// Folder name shown to the user, if one could be determined
    pub root_name: Option<String>,
    pub status: IngestStatus,
    /// Matching files that could not be read or decoded
    ///
    /// Files on disk are listed by full path in both modes; in-memory files
    /// by their bare name.
    pub skipped: Vec<String>,
    /// Number of records whose content was truncated
    pub truncated: usize,
}

impl Ingested {
    fn cancelled() -> Self {
        Self {
            records: Vec::new(),
            root_name: None,
            status: IngestStatus::Cancelled,
            skipped: Vec::new(),
            truncated: 0,
        }
    }
}

/// Why a single file was dropped
#[derive(Debug)]
struct Skipped {
    name: String,
    reason: String,
}

/// Reads text files into [`TextRecord`]s
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    settings: IngestSettings,
}

impl Ingestor {
    pub fn new(settings: IngestSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IngestSettings {
        &self.settings
    }

    /// Ingest an explicit list of files (flat file-list mode)
    pub fn read_files(&self, files: &[SourceFile]) -> Outcome<Ingested> {
        let root_name = infer_root_directory(
            files
                .iter()
                .map(|f| f.relative_path.as_deref().unwrap_or(&f.name)),
        );

        let matching: Vec<&SourceFile> = files
            .iter()
            .filter(|f| has_extension(&f.name, &self.settings.extension))
            .collect();
        debug!(
            offered = files.len(),
            matching = matching.len(),
            "filtered input files"
        );

        if matching.is_empty() {
            return self.no_matches(root_name, "the selection");
        }

        // Collecting an indexed parallel iterator keeps input order
        let results: Vec<Result<(TextRecord, bool), Skipped>> = matching
            .par_iter()
            .map(|file| {
                let bytes = file.read_bytes().map_err(|e| Skipped {
                    name: file.display_name(),
                    reason: e.to_string(),
                })?;
                self.to_record(&file.name, bytes).map_err(|skip| Skipped {
                    name: file.display_name(),
                    ..skip
                })
            })
            .collect();

        let mut records = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        let mut truncated = 0;
        for result in results {
            match result {
                Ok((record, was_truncated)) => {
                    truncated += usize::from(was_truncated);
                    records.push(record);
                }
                Err(skip) => {
                    warn!(file = %skip.name, reason = %skip.reason, "skipping unreadable file");
                    skipped.push(skip.name);
                }
            }
        }

        self.finish(records, root_name, skipped, truncated)
    }

    /// Ingest every matching file below a chosen directory (directory-walk mode)
    pub fn read_directory(
        &self,
        selection: DirectorySelection,
    ) -> Result<Outcome<Ingested>, IngestError> {
        let root = match selection {
            DirectorySelection::Picked(root) => root,
            DirectorySelection::Cancelled => {
                debug!("directory selection cancelled");
                return Ok(Outcome::new(Ingested::cancelled()));
            }
        };

        Self::check_directory(&root)?;
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .or_else(|| Some(root.display().to_string()));

        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut truncated = 0;
        let mut matched = 0usize;

        for entry in WalkDir::new(&root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !has_extension(&name, &self.settings.extension) {
                continue;
            }
            matched += 1;

            let result = fs::read(entry.path())
                .map_err(|e| Skipped {
                    name: name.clone(),
                    reason: e.to_string(),
                })
                .and_then(|bytes| self.to_record(&name, bytes));

            match result {
                Ok((record, was_truncated)) => {
                    truncated += usize::from(was_truncated);
                    records.push(record);
                }
                Err(skip) => {
                    warn!(path = %entry.path().display(), reason = %skip.reason, "skipping unreadable file");
                    skipped.push(entry.path().display().to_string());
                }
            }
        }

        if matched == 0 {
            return Ok(self.no_matches(root_name, "the folder"));
        }

        Ok(self.finish(records, root_name, skipped, truncated))
    }

    /// Decode file bytes as text
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String, std::string::FromUtf8Error> {
        let text = if self.settings.lossy_decode {
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::from_utf8(bytes)?
        };

        Ok(match text.strip_prefix('\u{FEFF}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    fn to_record(&self, name: &str, bytes: Vec<u8>) -> Result<(TextRecord, bool), Skipped> {
        let mut content = self.decode(bytes).map_err(|e| Skipped {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let was_truncated = truncate_chars(&mut content, self.settings.max_chars);

        Ok((
            TextRecord::new(title_from_filename(name), content),
            was_truncated,
        ))
    }

    fn check_directory(root: &Path) -> Result<(), IngestError> {
        let unavailable = |reason: String| IngestError::DirectoryUnavailable {
            path: root.display().to_string(),
            reason,
        };

        let meta = fs::metadata(root).map_err(|e| unavailable(e.to_string()))?;
        if !meta.is_dir() {
            return Err(unavailable("not a directory".to_string()));
        }
        fs::read_dir(root).map_err(|e| unavailable(e.to_string()))?;
        Ok(())
    }

    fn no_matches(&self, root_name: Option<String>, place: &str) -> Outcome<Ingested> {
        let ext = &self.settings.extension;
        Outcome::new(Ingested {
            records: Vec::new(),
            root_name,
            status: IngestStatus::NoMatches,
            skipped: Vec::new(),
            truncated: 0,
        })
        .with_notice(
            Notice::warning(format!("No {} files found in {}", ext, place))
                .with_code(codes::NO_MATCHES),
        )
    }

    fn finish(
        &self,
        records: Vec<TextRecord>,
        root_name: Option<String>,
        skipped: Vec<String>,
        truncated: usize,
    ) -> Outcome<Ingested> {
        let ext = &self.settings.extension;
        let mut notices = Vec::new();

        if !skipped.is_empty() {
            let mut notice = Notice::warning(format!("Skipped {} unreadable file(s)", skipped.len()))
                .with_code(codes::UNREADABLE_FILE);
            for name in &skipped {
                notice = notice.with_note(name.clone());
            }
            notices.push(notice);
        }

        let status = if records.is_empty() {
            notices.push(
                Notice::warning(format!("Could not read any {} files", ext))
                    .with_code(codes::NOTHING_READ),
            );
            IngestStatus::Empty
        } else {
            let mut notice = Notice::success(format!("Read {} file(s)", records.len()))
                .with_code(codes::FILES_READ);
            if truncated > 0 {
                notice = notice.with_note(format!(
                    "{} file(s) truncated to {} characters",
                    truncated, self.settings.max_chars
                ));
            }
            notices.push(notice);
            IngestStatus::Loaded
        };

        info!(
            records = records.len(),
            skipped = skipped.len(),
            truncated,
            "ingestion finished"
        );

        Outcome {
            data: Ingested {
                records,
                root_name,
                status,
                skipped,
                truncated,
            },
            notices,
        }
    }
}
