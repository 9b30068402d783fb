//! Text records to spreadsheet rows.

use chrono::NaiveDate;
use txtsheet_data::SheetTable;

use crate::config::SheetSettings;
use crate::record::TextRecord;

/// Column header labels of the emitted sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLabels {
    pub title: String,
    pub content: String,
}

impl Default for SheetLabels {
    fn default() -> Self {
        Self::from(&SheetSettings::default())
    }
}

impl From<&SheetSettings> for SheetLabels {
    fn from(settings: &SheetSettings) -> Self {
        Self {
            title: settings.title_label.clone(),
            content: settings.content_label.clone(),
        }
    }
}

/// One row per record: title then content, values unchanged
pub fn records_to_table(records: &[TextRecord], labels: &SheetLabels) -> SheetTable {
    let mut table = SheetTable::new(vec![labels.title.clone(), labels.content.clone()]);
    for record in records {
        table.push_row(vec![record.title.clone(), record.content.clone()]);
    }
    table
}

/// `<prefix>_<YYYY-MM-DD>.xlsx`
pub fn default_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

/// Output name from an optional caller-supplied base name
///
/// A blank base name falls back to [`default_file_name`]. A base that already
/// ends in `.xlsx` is used as is.
pub fn output_file_name(base: Option<&str>, prefix: &str, date: NaiveDate) -> String {
    match base.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) if base.to_lowercase().ends_with(".xlsx") => base.to_string(),
        Some(base) => format!("{}.xlsx", base),
        None => default_file_name(prefix, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[test]
    fn test_records_to_table() {
        let records = vec![
            TextRecord::new("a", "alpha"),
            TextRecord::new("b", "beta\nmore"),
        ];
        let table = records_to_table(&records, &SheetLabels::default());

        assert_eq!(table.headers, vec!["Title", "Content"]);
        assert_eq!(table.rows[0], vec!["a", "alpha"]);
        assert_eq!(table.rows[1], vec!["b", "beta\nmore"]);
    }

    #[test]
    fn test_custom_labels() {
        let settings = SheetSettings {
            title_label: "标题".to_string(),
            content_label: "内容".to_string(),
            ..Default::default()
        };
        let table = records_to_table(&[], &SheetLabels::from(&settings));
        assert_eq!(table.headers, vec!["标题", "内容"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            default_file_name("txt_export", date()),
            "txt_export_2026-10-15.xlsx"
        );
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(Some("chapters"), "txt_export", date()),
            "chapters.xlsx"
        );
        assert_eq!(
            output_file_name(Some("book.XLSX"), "txt_export", date()),
            "book.XLSX"
        );
        assert_eq!(
            output_file_name(Some("  "), "txt_export", date()),
            "txt_export_2026-10-15.xlsx"
        );
        assert_eq!(
            output_file_name(None, "txt_export", date()),
            "txt_export_2026-10-15.xlsx"
        );
    }
}
