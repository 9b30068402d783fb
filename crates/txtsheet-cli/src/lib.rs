//! txtsheet CLI - Command-line interface library
//!
//! This library provides the CLI functionality for txtsheet, including:
//! - to-sheet: Collect text files into an xlsx sheet
//! - to-txt: Turn sheet rows into a zip of text files
//! - inspect: Show how a sheet's columns and rows are read
//!
//! # Library Usage
//!
//! ```ignore
//! use txtsheet_cli::{run_cli, to_sheet_command};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! to_sheet_command(&files, None, Some(Path::new("notes.xlsx")), &settings)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Every .txt file below notes/ into one sheet
//! txtsheet to-sheet --dir notes/ --output notes.xlsx
//!
//! # Use the second title column for every row, except row 3
//! txtsheet to-txt notes.xlsx --title-column 2 --select 3=1
//!
//! # Check the layout first
//! txtsheet inspect notes.xlsx --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{apply_selection, inspect_command, to_sheet_command, to_txt_command};
pub use app::{
    init_logging, parse_row_choice, run_cli, CollisionArg, OutputFormat, Overrides, RowChoice,
    SelectionArgs,
};
