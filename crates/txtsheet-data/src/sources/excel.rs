//! Workbook data source (xlsx, xls, ods) using calamine.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::sources::SheetSource;
use crate::Grid;

/// Workbook data source backed by an in-memory copy of the file
pub struct ExcelSource {
    workbook: Sheets<Cursor<Vec<u8>>>,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", path.display(), e)))
    }

    /// Open a workbook from raw bytes; the container format is sniffed
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| DataError::WorkbookOpen(e.to_string()))?;
        let sheet_names = workbook.sheet_names().to_vec();
        debug!(sheets = sheet_names.len(), "opened workbook");

        Ok(Self {
            workbook,
            sheet_names,
        })
    }

    /// Cell text as shown in the sheet; blanks read as ""
    ///
    /// Whole floats print without a fraction and error cells print their
    /// Excel code, e.g. `#DIV/0!`.
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Extract every row of a calamine Range as strings
    fn extract_grid(sheet_range: &Range<Data>) -> Grid {
        sheet_range
            .rows()
            .map(|row| row.iter().map(Self::cell_text).collect())
            .collect()
    }
}

impl SheetSource for ExcelSource {
    fn read_sheet(&mut self, sheet: &str) -> Result<Grid> {
        let sheet_range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| DataError::SheetNotFound(format!("{}: {}", sheet, e)))?;

        Ok(Self::extract_grid(&sheet_range))
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }
}
