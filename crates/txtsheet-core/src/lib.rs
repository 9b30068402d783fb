//! txtsheet-core - text files to spreadsheet rows and back
//!
//! Converts a batch of `.txt` files into a two-column sheet (title, content),
//! and converts a sheet of title candidates plus content back into an archive
//! of `.txt` files once every row has a chosen title.
//!
//! # Example
//!
//! ```
//! use txtsheet_core::config::ExportSettings;
//! use txtsheet_core::export::package_rows;
//! use txtsheet_core::mapping::map_grid;
//!
//! let grid = vec![
//!     vec!["Short".to_string(), "Long".to_string(), "Content".to_string()],
//!     vec!["intro".to_string(), "introduction".to_string(), "Hello".to_string()],
//! ];
//!
//! let mut sheet = map_grid(&grid).data;
//! sheet.rows[0].select_title(1);
//!
//! let archive = package_rows(&sheet.rows, &ExportSettings::default())
//!     .unwrap()
//!     .data
//!     .unwrap();
//! assert_eq!(archive.get_string("introduction.txt").as_deref(), Some("Hello"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod ingest;
pub mod mapping;
pub mod names;
pub mod record;
pub mod validate;
pub mod workset;

// Re-export main types and functions
pub use config::{load_settings, Settings};
pub use diagnostics::{codes, Notice, Outcome, Severity};
pub use error::{ConfigError, ExportError, IngestError, SelectionError};
pub use export::{export_spreadsheet, package_rows, write_archive};
pub use ingest::{DirectorySelection, IngestStatus, Ingested, Ingestor, SourceFile};
pub use mapping::{map_grid, records_to_table, HeaderInference, MappedSheet};
pub use record::{SpreadsheetRow, TextRecord, TITLE_SLOTS};
pub use validate::{validate_rows, RowValidator};
pub use workset::{SheetSession, WorkingSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
