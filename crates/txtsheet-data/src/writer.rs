//! Workbook writer - serializes a header + rows table into a single-sheet xlsx.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::{DataError, Result};

/// Maximum number of characters Excel stores in one cell
pub const MAX_CELL_CHARS: usize = 32_767;

/// Widest column width applied when auto-sizing
const MAX_COLUMN_WIDTH: f64 = 80.0;

/// A table ready for emission: one header row followed by data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    /// Header labels, one per column
    pub headers: Vec<String>,
    /// Data rows; each row should have `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Create a table with the given header labels and no rows
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Writes [`SheetTable`]s as xlsx workbooks
#[derive(Debug, Clone)]
pub struct SheetWriter {
    sheet_name: String,
    bold_header: bool,
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new("Sheet1")
    }
}

impl SheetWriter {
    /// Create a writer producing a single sheet with the given name
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            bold_header: true,
        }
    }

    /// Toggle bold formatting of the header row
    pub fn with_bold_header(mut self, bold: bool) -> Self {
        self.bold_header = bold;
        self
    }

    /// Serialize the table into xlsx bytes
    pub fn to_bytes(&self, table: &SheetTable) -> Result<Vec<u8>> {
        Self::check_cell_limits(table)?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = if self.bold_header {
            Format::new().set_bold()
        } else {
            Format::new()
        };

        for (col, label) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, label, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet.write_string(excel_row, col as u16, value)?;
            }
        }

        for (col, width) in Self::column_widths(table).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width)?;
        }

        let bytes = workbook.save_to_buffer()?;
        debug!(
            rows = table.rows.len(),
            bytes = bytes.len(),
            "serialized workbook"
        );
        Ok(bytes)
    }

    /// Serialize the table and write it to a file
    pub fn write_to_file(&self, table: &SheetTable, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes(table)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reject cells Excel would not be able to store
    fn check_cell_limits(table: &SheetTable) -> Result<()> {
        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                // Cheap byte-length pre-check before counting chars
                if value.len() <= MAX_CELL_CHARS {
                    continue;
                }
                let chars = value.chars().count();
                if chars > MAX_CELL_CHARS {
                    return Err(DataError::CellTooLong {
                        row: row_idx + 1,
                        column: col + 1,
                        chars,
                        limit: MAX_CELL_CHARS,
                    });
                }
            }
        }
        Ok(())
    }

    /// Column widths from the longest first line in each column
    fn column_widths(table: &SheetTable) -> Vec<f64> {
        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();

        for row in &table.rows {
            for (col, value) in row.iter().enumerate() {
                let width = value.lines().next().map(|l| l.chars().count()).unwrap_or(0);
                if col >= widths.len() {
                    widths.push(width);
                } else if width > widths[col] {
                    widths[col] = width;
                }
            }
        }

        widths
            .into_iter()
            .map(|w| ((w + 2) as f64).min(MAX_COLUMN_WIDTH))
            .collect()
    }
}
