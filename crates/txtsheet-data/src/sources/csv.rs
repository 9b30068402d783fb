//! CSV/TSV data source.

use std::fs;
use std::path::Path;

use crate::error::{DataError, Result};
use crate::sources::SheetSource;
use crate::Grid;

/// Name reported for the single "sheet" of a delimited file
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// How delimited text is split into cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    /// Strip surrounding whitespace from every cell
    pub trim: bool,
}

impl CsvOptions {
    /// Comma-separated, double-quoted, untrimmed
    pub const COMMA: Self = Self {
        delimiter: b',',
        quote: b'"',
        trim: false,
    };

    /// Tab-separated
    pub fn tsv() -> Self {
        Self::COMMA.with_delimiter(b'\t')
    }

    /// Same options with another delimiter
    pub fn with_delimiter(self, delimiter: u8) -> Self {
        Self { delimiter, ..self }
    }

    fn reader(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .trim(if self.trim { csv::Trim::All } else { csv::Trim::None })
            // The header row belongs to the grid; row widths may differ
            .has_headers(false)
            .flexible(true);
        builder
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::COMMA
    }
}

/// Delimited-text data source; rows may have differing lengths
pub struct CsvSource {
    bytes: Vec<u8>,
    options: CsvOptions,
}

impl CsvSource {
    /// Load a delimited file from disk
    pub fn new(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }
        Ok(Self::from_bytes(fs::read(path)?, options))
    }

    /// Create a CSV source over in-memory bytes
    pub fn from_bytes(bytes: Vec<u8>, options: CsvOptions) -> Self {
        Self { bytes, options }
    }

    /// Every record as a row of cells
    ///
    /// Short rows are padded with empty cells to the widest row, so the grid
    /// is rectangular like a workbook range.
    pub fn read_all(&self) -> Result<Grid> {
        let mut grid = self
            .options
            .reader()
            .from_reader(self.bytes.as_slice())
            .records()
            .map(|record| -> Result<Vec<String>> {
                Ok(record?.iter().map(str::to_string).collect())
            })
            .collect::<Result<Grid>>()?;

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut grid {
            row.resize(width, String::new());
        }
        Ok(grid)
    }
}

impl SheetSource for CsvSource {
    fn read_sheet(&mut self, sheet: &str) -> Result<Grid> {
        if sheet != CSV_SHEET_NAME {
            return Err(DataError::SheetNotFound(sheet.to_string()));
        }
        self.read_all()
    }

    fn sheet_names(&self) -> Vec<String> {
        vec![CSV_SHEET_NAME.to_string()]
    }
}
