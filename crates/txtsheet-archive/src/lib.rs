//! txtsheet-archive - package named text entries into a ZIP archive
//!
//! Entries keep their insertion order. Name clashes are resolved by a
//! [`CollisionPolicy`]: either the later entry is renamed (`x (2).txt`) or it
//! replaces the earlier one.
//!
//! # Example
//!
//! ```
//! use txtsheet_archive::{CollisionPolicy, TextArchive};
//!
//! let mut archive = TextArchive::new();
//! archive.add_text("a.txt", "hello", CollisionPolicy::Rename).unwrap();
//! let bytes = archive.to_bytes().unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod archive;
pub mod error;

pub use archive::{ArchiveEntry, CollisionPolicy, Placement, TextArchive};
pub use error::{ArchiveError, Result};
