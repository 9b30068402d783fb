//! Record types flowing between ingestion, mapping and export.

use serde::{Deserialize, Serialize};

/// Number of title slots a spreadsheet row carries
pub const TITLE_SLOTS: usize = 10;

/// One text file as (title, content)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// File name without extension
    pub title: String,
    /// Decoded text, possibly truncated
    pub content: String,
}

impl TextRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One parsed spreadsheet data row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetRow {
    /// Title candidates; slots beyond the sheet's title columns stay empty
    pub titles: [String; TITLE_SLOTS],
    /// Body text for the exported file
    pub content: String,
    /// 0-based index into `titles` chosen by the user
    pub selected_title: Option<usize>,
}

impl SpreadsheetRow {
    /// Build a row from leading title values and content
    ///
    /// Extra titles beyond [`TITLE_SLOTS`] are ignored.
    pub fn new<I, S>(titles: I, content: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self {
            content: content.into(),
            ..Default::default()
        };
        for (slot, title) in row.titles.iter_mut().zip(titles) {
            *slot = title.into();
        }
        row
    }

    /// Title in slot `index` (0-based), if the slot exists
    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    /// Title in the selected slot
    pub fn active_title(&self) -> Option<&str> {
        self.selected_title.and_then(|i| self.title(i))
    }

    /// Choose the active title slot; returns false for an out-of-range index
    pub fn select_title(&mut self, index: usize) -> bool {
        if index >= TITLE_SLOTS {
            return false;
        }
        self.selected_title = Some(index);
        true
    }

    /// Whether every title and the content are blank after trimming
    pub fn is_blank(&self) -> bool {
        self.titles.iter().all(|t| t.trim().is_empty()) && self.content.trim().is_empty()
    }
}
