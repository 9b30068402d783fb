//! Structured operation outcomes
//!
//! Every user-facing operation returns an [`Outcome`]: the data it produced
//! plus the [`Notice`]s a front-end should show. Nothing in the core talks to
//! a terminal or dialog directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifiers for notices, usable by front-ends and tests
pub mod codes {
    /// Spreadsheet has fewer columns than the recommended layout
    pub const NARROW_SHEET: &str = "narrow-sheet";
    /// Spreadsheet produced no usable rows
    pub const NO_ROWS: &str = "no-rows";
    /// Spreadsheet rows loaded
    pub const ROWS_LOADED: &str = "rows-loaded";
    /// No input file matched the accepted extension
    pub const NO_MATCHES: &str = "no-matches";
    /// Matching files existed but none could be read
    pub const NOTHING_READ: &str = "nothing-read";
    /// A single file could not be read or decoded
    pub const UNREADABLE_FILE: &str = "unreadable-file";
    /// Text files ingested
    pub const FILES_READ: &str = "files-read";
    /// Row has no title selected
    pub const MISSING_SELECTION: &str = "missing-selection";
    /// Row's selected title is blank
    pub const EMPTY_TITLE: &str = "empty-title";
    /// Row's content is blank
    pub const EMPTY_CONTENT: &str = "empty-content";
    /// Archive entry was renamed or replaced because of a name clash
    pub const NAME_COLLISION: &str = "name-collision";
    /// A cell was clipped to the spreadsheet cell limit
    pub const CELL_TRUNCATED: &str = "cell-truncated";
    /// Export finished
    pub const EXPORTED: &str = "exported";
    /// Export failed while serializing
    pub const EXPORT_FAILED: &str = "export-failed";
}

/// A user-facing message attached to an operation result
///
/// # Example
///
/// ```
/// use txtsheet_core::diagnostics::{Notice, Severity};
///
/// let notice = Notice::error("Row 3: selected title is empty")
///     .with_code("empty-title")
///     .with_row(3);
/// assert_eq!(notice.severity, Severity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity level
    pub severity: Severity,

    /// The message shown to the user
    pub message: String,

    /// Optional stable code (see [`codes`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// 1-based row or item position the notice refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// Related notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Severity level of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Operation completed
    Success,

    /// Something the user should look at; processing continued
    Warning,

    /// Operation blocked or failed
    Error,
}

impl Notice {
    /// Create a new notice
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            row: None,
            notes: Vec::new(),
        }
    }

    /// Create an info notice
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Create a success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Create a warning notice
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set the notice code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the 1-based row position
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Check if this is an error-level notice
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning-level notice
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Check whether the notice carries the given code
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl Severity {
    /// Lowercase label used in terminal output
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `label[code]: message`, then one indented line per note
impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.severity, code, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }
        self.notes
            .iter()
            .try_for_each(|note| write!(f, "\n    - {}", note))
    }
}

/// Result of an operation together with its notices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    /// What the operation produced
    pub data: T,
    /// Messages for the user, in the order they were raised
    pub notices: Vec<Notice>,
}

impl<T> Outcome<T> {
    /// Wrap data with no notices
    pub fn new(data: T) -> Self {
        Self {
            data,
            notices: Vec::new(),
        }
    }

    /// Append a notice
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Builder-style [`Outcome::push`]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.push(notice);
        self
    }

    /// Overall kind: the most severe notice, or `Success` when there are none
    pub fn kind(&self) -> Severity {
        self.notices
            .iter()
            .map(|n| n.severity)
            .max()
            .unwrap_or(Severity::Success)
    }

    /// Check if any notice is an error
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }

    /// Check if any notice is a warning
    pub fn has_warnings(&self) -> bool {
        self.notices.iter().any(Notice::is_warning)
    }

    /// Transform the data, keeping the notices
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            data: f(self.data),
            notices: self.notices,
        }
    }
}
