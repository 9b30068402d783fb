//! Validation-gated archive export and spreadsheet emission.

use std::path::Path;

use tracing::{error, info, warn};
use txtsheet_archive::{Placement, TextArchive};
use txtsheet_data::{SheetWriter, MAX_CELL_CHARS};

use crate::config::{ExportSettings, SheetSettings};
use crate::diagnostics::{codes, Notice, Outcome};
use crate::error::ExportError;
use crate::mapping::{records_to_table, SheetLabels};
use crate::names::{sanitize_file_name, truncate_chars};
use crate::record::{SpreadsheetRow, TextRecord};
use crate::validate::validate_rows;

/// Archive entry name for a validated row; `position` is 1-based
///
/// A blank active title falls back to `row_<position>` before sanitizing.
pub fn entry_file_name(row: &SpreadsheetRow, position: usize) -> String {
    let title = row
        .active_title()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("row_{}", position));
    format!("{}.txt", sanitize_file_name(&title))
}

/// Validate `rows` and package one text entry per row.
///
/// Returns `Ok(None)` with an info notice when there is nothing to export.
/// Any validation failure returns [`ExportError::Invalid`] carrying every
/// violation, and no archive is built.
pub fn package_rows(
    rows: &[SpreadsheetRow],
    settings: &ExportSettings,
) -> Result<Outcome<Option<TextArchive>>, ExportError> {
    if rows.is_empty() {
        return Ok(Outcome::new(None).with_notice(Notice::info("No rows to export")));
    }

    let violations = validate_rows(rows);
    if !violations.is_empty() {
        info!(problems = violations.len(), "export blocked by validation");
        return Err(ExportError::Invalid(violations));
    }

    let mut archive = TextArchive::new();
    let mut notices = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let name = entry_file_name(row, i + 1);
        let placement = archive
            .add_text(name, row.content.clone(), settings.collisions)
            .map_err(|e| {
                error!(error = %e, row = i + 1, "failed to add archive entry");
                ExportError::from(e)
            })?;

        match placement {
            Placement::Added(_) => {}
            Placement::Renamed { requested, stored } => notices.push(
                Notice::warning(format!(
                    "Row {}: {} already exists, stored as {}",
                    i + 1,
                    requested,
                    stored
                ))
                .with_code(codes::NAME_COLLISION)
                .with_row(i + 1),
            ),
            Placement::Replaced(name) => notices.push(
                Notice::warning(format!(
                    "Row {}: replaced earlier entry {}",
                    i + 1,
                    name
                ))
                .with_code(codes::NAME_COLLISION)
                .with_row(i + 1),
            ),
        }
    }

    notices.push(
        Notice::success(format!("Exported {} file(s)", archive.len())).with_code(codes::EXPORTED),
    );
    info!(entries = archive.len(), "packaged archive");

    Ok(Outcome {
        data: Some(archive),
        notices,
    })
}

/// Write a packaged archive to disk
pub fn write_archive(archive: &TextArchive, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    archive.write_to_file(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to write archive");
        ExportError::from(e)
    })
}

/// Serialize records into a single-sheet workbook.
///
/// Titles or contents longer than [`MAX_CELL_CHARS`] are clipped to fit and
/// reported per record; the other rows are unaffected. Returns `None` data
/// when there are no records.
pub fn export_spreadsheet(
    records: &[TextRecord],
    settings: &SheetSettings,
) -> Result<Outcome<Option<Vec<u8>>>, ExportError> {
    if records.is_empty() {
        return Ok(Outcome::new(None));
    }

    let mut notices = Vec::new();
    let fitted: Vec<TextRecord> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut fitted = record.clone();
            let clipped_title = truncate_chars(&mut fitted.title, MAX_CELL_CHARS);
            let clipped_content = truncate_chars(&mut fitted.content, MAX_CELL_CHARS);
            if clipped_title || clipped_content {
                warn!(title = %record.title, row = i + 1, "clipping oversize cell");
                notices.push(
                    Notice::warning(format!(
                        "{}: clipped to {} characters per cell",
                        record.title, MAX_CELL_CHARS
                    ))
                    .with_code(codes::CELL_TRUNCATED)
                    .with_row(i + 1),
                );
            }
            fitted
        })
        .collect();

    let table = records_to_table(&fitted, &SheetLabels::from(settings));
    let bytes = SheetWriter::new(settings.sheet_name.as_str())
        .to_bytes(&table)
        .map_err(|e| {
            error!(error = %e, "failed to build spreadsheet");
            ExportError::from(e)
        })?;

    info!(rows = records.len(), bytes = bytes.len(), "built spreadsheet");
    Ok(Outcome {
        data: Some(bytes),
        notices,
    })
}

/// The notice a front-end shows for a failed export
pub fn failure_notice(err: &ExportError) -> Notice {
    match err {
        ExportError::Invalid(violations) => Notice::error(format!(
            "Export blocked: {} problem(s) to fix",
            violations.len()
        ))
        .with_code(codes::EXPORT_FAILED),
        other => Notice::error("Export failed")
            .with_code(codes::EXPORT_FAILED)
            .with_note(other.to_string()),
    }
}
