//! # txtsheet-data
//!
//! Spreadsheet I/O for txtsheet - parse workbooks and delimited files into a
//! grid of string cells, and write single-sheet xlsx workbooks.
//!
//! ## Features
//!
//! - **Workbook Support**: Read `.xlsx`, `.xls` and `.ods` using `calamine`
//! - **Delimited Text**: Read `.csv` / `.tsv` using `csv`
//! - **Writing**: Emit `.xlsx` using `rust_xlsxwriter`
//!
//! ## Example
//!
//! ```rust,ignore
//! use txtsheet_data::{parse_spreadsheet_file, SheetTable, SheetWriter};
//!
//! let parsed = parse_spreadsheet_file("titles.xlsx")?;
//! println!("{} rows in {}", parsed.grid.len(), parsed.sheet);
//!
//! let mut table = SheetTable::new(vec!["Title".into(), "Content".into()]);
//! table.push_row(vec!["notes".into(), "hello".into()]);
//! SheetWriter::new("TXT").write_to_file(&table, "out.xlsx")?;
//! ```

pub mod error;
pub mod sources;
pub mod writer;

use std::path::Path;

// Re-exports
pub use error::{DataError, Result};
pub use sources::{CsvOptions, CsvSource, ExcelSource, SheetFormat, SheetSource};
pub use writer::{SheetTable, SheetWriter, MAX_CELL_CHARS};

/// Rows of string cells, first index is the row
pub type Grid = Vec<Vec<String>>;

/// The first sheet of a parsed spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSheet {
    /// All sheet names in the workbook, in workbook order
    pub sheet_names: Vec<String>,
    /// Name of the sheet that was read
    pub sheet: String,
    /// Cell contents of that sheet
    pub grid: Grid,
}

/// Parse spreadsheet bytes of the given format, reading the first sheet
pub fn parse_spreadsheet_bytes(bytes: Vec<u8>, format: SheetFormat) -> Result<ParsedSheet> {
    let mut source = sources::open_bytes(bytes, format)?;
    read_first_sheet(source.as_mut())
}

/// Parse a spreadsheet file, detecting the format from its extension
pub fn parse_spreadsheet_file(path: impl AsRef<Path>) -> Result<ParsedSheet> {
    let path = path.as_ref();
    let format = SheetFormat::from_path(path)?;
    if !path.exists() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    parse_spreadsheet_bytes(bytes, format)
}

fn read_first_sheet(source: &mut dyn SheetSource) -> Result<ParsedSheet> {
    let sheet = source
        .default_sheet()
        .ok_or_else(|| DataError::SheetNotFound("No sheets in workbook".to_string()))?;
    let grid = source.read_sheet(&sheet)?;

    Ok(ParsedSheet {
        sheet_names: source.sheet_names(),
        sheet,
        grid,
    })
}
