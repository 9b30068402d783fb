//! In-memory archive of named text entries, written out as ZIP.

use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{ArchiveError, Result};

/// What to do when an entry name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Keep both entries, appending " (2)", " (3)", ... to the later one
    #[default]
    Rename,
    /// Later entry replaces the earlier one in place
    Overwrite,
}

/// How an entry ended up in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Stored under the requested name
    Added(String),
    /// Requested name was taken; stored under a new name
    Renamed { requested: String, stored: String },
    /// Requested name was taken; previous contents replaced
    Replaced(String),
}

impl Placement {
    /// Name the entry is stored under
    pub fn stored_name(&self) -> &str {
        match self {
            Placement::Added(name) | Placement::Replaced(name) => name,
            Placement::Renamed { stored, .. } => stored,
        }
    }
}

/// One named file inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Ordered collection of archive entries with unique names
#[derive(Debug, Default)]
pub struct TextArchive {
    /// Entries in insertion order
    entries: Vec<ArchiveEntry>,
}

impl TextArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a ZIP file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            entries.push(ArchiveEntry { name, contents });
        }

        Ok(Self { entries })
    }

    /// Add a text entry, resolving name clashes with `policy`
    pub fn add_text(
        &mut self,
        name: impl Into<String>,
        contents: impl Into<String>,
        policy: CollisionPolicy,
    ) -> Result<Placement> {
        self.add(name, contents.into().into_bytes(), policy)
    }

    /// Add a raw entry, resolving name clashes with `policy`
    pub fn add(
        &mut self,
        name: impl Into<String>,
        contents: Vec<u8>,
        policy: CollisionPolicy,
    ) -> Result<Placement> {
        let name = name.into();
        if name.is_empty() || name.ends_with('/') {
            return Err(ArchiveError::InvalidEntryName(name));
        }

        let Some(existing) = self.position(&name) else {
            self.entries.push(ArchiveEntry {
                name: name.clone(),
                contents,
            });
            return Ok(Placement::Added(name));
        };

        match policy {
            CollisionPolicy::Overwrite => {
                debug!(entry = %name, "replacing archive entry");
                self.entries[existing].contents = contents;
                Ok(Placement::Replaced(name))
            }
            CollisionPolicy::Rename => {
                let stored = self.free_name(&name);
                debug!(requested = %name, stored = %stored, "renaming archive entry");
                self.entries.push(ArchiveEntry {
                    name: stored.clone(),
                    contents,
                });
                Ok(Placement::Renamed {
                    requested: name,
                    stored,
                })
            }
        }
    }

    /// Get an entry's contents by name
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.position(name)
            .map(|i| self.entries[i].contents.as_slice())
    }

    /// Get an entry's contents as a string
    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Check if an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Entry names in insertion order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Serialize the archive into ZIP bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// First "stem (n).ext" variant of `name` not yet taken, n starting at 2
    fn free_name(&self, name: &str) -> String {
        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
            _ => (name, ""),
        };

        (2..)
            .map(|n| format!("{} ({}){}", stem, n, ext))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}
