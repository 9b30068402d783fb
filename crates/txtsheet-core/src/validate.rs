//! Export validation
//!
//! Each [`RowRule`] checks one property of a row and reports at most one
//! notice per row. The [`RowValidator`] runs every rule over every row and
//! returns all notices; it never stops at the first problem.

use crate::diagnostics::{codes, Notice};
use crate::record::SpreadsheetRow;

/// A single export requirement on a row
pub trait RowRule: Send + Sync {
    /// Notice code this rule emits
    fn code(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Check one row; `position` is 1-based
    fn check(&self, row: &SpreadsheetRow, position: usize) -> Option<Notice>;
}

/// A title must be selected and must not be blank
pub struct TitleSelectedRule;

impl RowRule for TitleSelectedRule {
    fn code(&self) -> &'static str {
        codes::MISSING_SELECTION
    }

    fn name(&self) -> &'static str {
        "title-selected"
    }

    fn check(&self, row: &SpreadsheetRow, position: usize) -> Option<Notice> {
        if row.selected_title.is_none() {
            return Some(
                Notice::error(format!("Row {}: no title selected", position))
                    .with_code(codes::MISSING_SELECTION)
                    .with_row(position),
            );
        }

        let title = row.active_title().unwrap_or_default();
        if title.trim().is_empty() {
            return Some(
                Notice::error(format!("Row {}: selected title is empty", position))
                    .with_code(codes::EMPTY_TITLE)
                    .with_row(position),
            );
        }

        None
    }
}

/// Content must not be blank
pub struct ContentPresentRule;

impl RowRule for ContentPresentRule {
    fn code(&self) -> &'static str {
        codes::EMPTY_CONTENT
    }

    fn name(&self) -> &'static str {
        "content-present"
    }

    fn check(&self, row: &SpreadsheetRow, position: usize) -> Option<Notice> {
        if row.content.trim().is_empty() {
            Some(
                Notice::error(format!("Row {}: content is empty", position))
                    .with_code(codes::EMPTY_CONTENT)
                    .with_row(position),
            )
        } else {
            None
        }
    }
}

/// Runs a set of row rules
pub struct RowValidator {
    rules: Vec<Box<dyn RowRule>>,
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RowValidator {
    /// Create a validator with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with the export rules
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(TitleSelectedRule));
        validator.add_rule(Box::new(ContentPresentRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn RowRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// All violations, row by row in input order
    pub fn validate(&self, rows: &[SpreadsheetRow]) -> Vec<Notice> {
        rows.iter()
            .enumerate()
            .flat_map(|(i, row)| self.rules.iter().filter_map(move |r| r.check(row, i + 1)))
            .collect()
    }
}

/// Validate rows with the default export rules
pub fn validate_rows(rows: &[SpreadsheetRow]) -> Vec<Notice> {
    RowValidator::with_defaults().validate(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(titles: &[&str], content: &str, slot: usize) -> SpreadsheetRow {
        let mut row = SpreadsheetRow::new(titles.iter().copied(), content);
        row.selected_title = Some(slot);
        row
    }

    #[test]
    fn test_validator_defaults() {
        let validator = RowValidator::with_defaults();
        assert_eq!(validator.rule_count(), 2);
        assert_eq!(
            validator.rule_names(),
            vec!["title-selected", "content-present"]
        );
        assert_eq!(RowValidator::new().rule_count(), 0);
    }

    #[test]
    fn test_valid_rows_pass() {
        let rows = vec![selected(&["a", "b"], "body", 1)];
        assert!(validate_rows(&rows).is_empty());
    }

    #[test]
    fn test_selected_empty_title_single_error() {
        let rows = vec![selected(&["a", "b", ""], "body", 2)];
        let notices = validate_rows(&rows);

        assert_eq!(notices.len(), 1);
        assert!(notices[0].has_code(codes::EMPTY_TITLE));
        assert_eq!(notices[0].row, Some(1));
        assert!(notices[0].message.contains("Row 1"));
        assert!(notices[0].message.contains("title"));
    }

    #[test]
    fn test_all_errors_collected_in_row_order() {
        let rows = vec![
            SpreadsheetRow::new(["a"], ""),
            selected(&["ok"], "fine", 0),
            selected(&["  "], "body", 0),
        ];
        let notices = validate_rows(&rows);

        let summary: Vec<(Option<usize>, Option<&str>)> = notices
            .iter()
            .map(|n| (n.row, n.code.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), Some(codes::MISSING_SELECTION)),
                (Some(1), Some(codes::EMPTY_CONTENT)),
                (Some(3), Some(codes::EMPTY_TITLE)),
            ]
        );
        assert!(notices.iter().all(Notice::is_error));
    }

    #[test]
    fn test_whitespace_content_rejected() {
        let rows = vec![selected(&["a"], " \n\t", 0)];
        let notices = validate_rows(&rows);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].has_code(codes::EMPTY_CONTENT));
    }

    #[test]
    fn test_out_of_range_selection_counts_as_empty_title() {
        let mut row = SpreadsheetRow::new(["a"], "body");
        row.selected_title = Some(42);
        let notices = validate_rows(&[row]);
        assert!(notices[0].has_code(codes::EMPTY_TITLE));
    }
}
