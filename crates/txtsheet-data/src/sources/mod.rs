//! Spreadsheet source implementations.
//!
//! This module contains adapters that turn workbook or delimited-text bytes
//! into a grid of string cells.

pub mod csv;
pub mod excel;

use std::path::Path;

pub use csv::{CsvOptions, CsvSource};
pub use excel::ExcelSource;

use crate::error::{DataError, Result};
use crate::Grid;

/// Trait for sources that can provide a grid of string cells
pub trait SheetSource {
    /// Read every populated cell of a sheet, row by row
    fn read_sheet(&mut self, sheet: &str) -> Result<Grid>;

    /// List available sheets
    fn sheet_names(&self) -> Vec<String>;

    /// Get the default (first) sheet name
    fn default_sheet(&self) -> Option<String> {
        self.sheet_names().into_iter().next()
    }
}

/// Container format of a spreadsheet input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// xlsx, xlsm, xlsb, xls or ods, read through calamine
    Workbook,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl SheetFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
            "csv" => Ok(SheetFormat::Csv),
            "tsv" => Ok(SheetFormat::Tsv),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open a source over in-memory bytes
pub fn open_bytes(bytes: Vec<u8>, format: SheetFormat) -> Result<Box<dyn SheetSource>> {
    match format {
        SheetFormat::Workbook => Ok(Box::new(ExcelSource::from_bytes(bytes)?)),
        SheetFormat::Csv => Ok(Box::new(CsvSource::from_bytes(bytes, CsvOptions::default()))),
        SheetFormat::Tsv => Ok(Box::new(CsvSource::from_bytes(bytes, CsvOptions::tsv()))),
    }
}
