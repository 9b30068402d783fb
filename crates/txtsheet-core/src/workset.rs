//! Session-scoped working sets
//!
//! A working set is replaced wholesale when a read or parse finishes; only
//! row deletion and title selection edit it in place.

use tracing::debug;

use crate::error::SelectionError;
use crate::mapping::{HeaderInference, MappedSheet};
use crate::record::SpreadsheetRow;

/// The currently loaded items of one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSet<T> {
    items: Vec<T>,
}

impl<T> Default for WorkingSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> WorkingSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a completed load, returning the previous contents
    pub fn replace(&mut self, items: Vec<T>) -> Vec<T> {
        std::mem::replace(&mut self.items, items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Remove the item at `index` (0-based)
    pub fn remove(&mut self, index: usize) -> Result<T, SelectionError> {
        if index >= self.items.len() {
            return Err(SelectionError::RowOutOfRange {
                row: index + 1,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for WorkingSet<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Parsed spreadsheet rows awaiting title selection and export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSession {
    headers: HeaderInference,
    rows: WorkingSet<SpreadsheetRow>,
}

impl SheetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with a freshly mapped sheet
    pub fn load(&mut self, sheet: MappedSheet) {
        debug!(rows = sheet.rows.len(), "loading sheet session");
        self.headers = sheet.headers;
        self.rows.replace(sheet.rows);
    }

    pub fn headers(&self) -> &HeaderInference {
        &self.headers
    }

    pub fn rows(&self) -> &[SpreadsheetRow] {
        self.rows.as_slice()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Select title column `column` for row `row` (both 0-based)
    pub fn select_title(&mut self, row: usize, column: usize) -> Result<(), SelectionError> {
        self.check_column(column)?;
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(SelectionError::RowOutOfRange { row: row + 1, len })?;
        target.selected_title = Some(column);
        Ok(())
    }

    /// Select title column `column` for every row
    pub fn select_all(&mut self, column: usize) -> Result<(), SelectionError> {
        self.check_column(column)?;
        for index in 0..self.rows.len() {
            if let Some(row) = self.rows.get_mut(index) {
                row.selected_title = Some(column);
            }
        }
        Ok(())
    }

    /// Drop one row (0-based)
    pub fn delete_row(&mut self, row: usize) -> Result<SpreadsheetRow, SelectionError> {
        self.rows.remove(row)
    }

    /// Drop every row and the header layout
    pub fn clear(&mut self) {
        self.headers = HeaderInference::default();
        self.rows.clear();
    }

    fn check_column(&self, column: usize) -> Result<(), SelectionError> {
        if column >= self.headers.title_column_count {
            return Err(SelectionError::ColumnOutOfRange {
                column: column + 1,
                available: self.headers.title_column_count,
            });
        }
        Ok(())
    }
}
