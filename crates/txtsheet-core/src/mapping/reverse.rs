//! Spreadsheet grid to title/content rows.
//!
//! The first grid row is the header. Up to [`TITLE_SLOTS`] leading columns
//! are title candidates; the last column is always the content, even when
//! more than `TITLE_SLOTS + 1` columns exist.

use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{codes, Notice, Outcome};
use crate::record::{SpreadsheetRow, TITLE_SLOTS};

/// Column count of the recommended layout: every title slot plus content
pub const RECOMMENDED_COLUMNS: usize = TITLE_SLOTS + 1;

/// What the header row says about the sheet layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderInference {
    /// Display label per title column
    pub title_headers: Vec<String>,
    /// Leading columns read as titles
    pub title_column_count: usize,
    /// Width of the header row
    pub total_columns: usize,
}

impl HeaderInference {
    /// Index of the content column, if the sheet has any columns
    pub fn content_column(&self) -> Option<usize> {
        self.total_columns.checked_sub(1)
    }
}

/// Header inference plus the retained data rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappedSheet {
    pub headers: HeaderInference,
    pub rows: Vec<SpreadsheetRow>,
}

/// Work out title columns and labels from the header row
pub fn infer_headers(header_row: &[String]) -> HeaderInference {
    let total_columns = header_row.len();
    let title_column_count = total_columns.saturating_sub(1).min(TITLE_SLOTS);

    let title_headers = header_row
        .iter()
        .take(title_column_count)
        .enumerate()
        .map(|(i, cell)| {
            if cell.trim().is_empty() {
                format!("Title {}", i + 1)
            } else {
                cell.clone()
            }
        })
        .collect();

    HeaderInference {
        title_headers,
        title_column_count,
        total_columns,
    }
}

/// Map a parsed grid into rows awaiting a title selection
pub fn map_grid(grid: &[Vec<String>]) -> Outcome<MappedSheet> {
    let header_row: &[String] = grid.first().map(Vec::as_slice).unwrap_or(&[]);
    let headers = infer_headers(header_row);
    let mut notices = Vec::new();

    if headers.total_columns < RECOMMENDED_COLUMNS {
        notices.push(
            Notice::warning(format!(
                "Expected at least {} columns ({} title columns + 1 content column), found {}",
                RECOMMENDED_COLUMNS, TITLE_SLOTS, headers.total_columns
            ))
            .with_code(codes::NARROW_SHEET),
        );
    }

    let rows: Vec<SpreadsheetRow> = match headers.content_column() {
        Some(content_col) => grid
            .iter()
            .skip(1)
            .map(|cells| map_row(cells, headers.title_column_count, content_col))
            .filter(|row| !row.is_blank())
            .collect(),
        None => Vec::new(),
    };

    debug!(
        data_rows = grid.len().saturating_sub(1),
        retained = rows.len(),
        title_columns = headers.title_column_count,
        "mapped sheet rows"
    );

    if rows.is_empty() {
        notices.push(
            Notice::warning("No usable rows found in the spreadsheet").with_code(codes::NO_ROWS),
        );
    } else {
        notices.push(
            Notice::success(format!(
                "Loaded {} row(s); choose a title for each row",
                rows.len()
            ))
            .with_code(codes::ROWS_LOADED),
        );
    }

    Outcome {
        data: MappedSheet { headers, rows },
        notices,
    }
}

fn map_row(cells: &[String], title_columns: usize, content_col: usize) -> SpreadsheetRow {
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
    SpreadsheetRow::new((0..title_columns).map(&cell), cell(content_col))
}
