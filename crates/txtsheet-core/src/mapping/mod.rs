//! Row mapping between text records and spreadsheet rows.
//!
//! - [`forward`]: [`crate::record::TextRecord`]s to a two-column sheet
//! - [`reverse`]: a parsed sheet grid to [`crate::record::SpreadsheetRow`]s

pub mod forward;
pub mod reverse;

pub use forward::{default_file_name, output_file_name, records_to_table, SheetLabels};
pub use reverse::{infer_headers, map_grid, HeaderInference, MappedSheet, RECOMMENDED_COLUMNS};
