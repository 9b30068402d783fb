//! Configuration
//!
//! Settings are loaded from `txtsheet.toml` (or `.txtsheet.toml`) in the
//! working directory, or from an explicit path:
//!
//! ```toml
//! [ingest]
//! max_chars = 300000
//! extension = ".txt"
//! lossy_decode = false
//!
//! [sheet]
//! sheet_name = "TXT"
//! title_label = "Title"
//! content_label = "Content"
//! file_prefix = "txt_export"
//!
//! [export]
//! archive_name = "txt_files.zip"
//! collisions = "rename"
//! ```

mod settings;


use std::path::Path;

use tracing::{debug, warn};

pub use settings::{
    ExportSettings, IngestSettings, Settings, SheetSettings, DEFAULT_MAX_CHARS,
};

use crate::error::ConfigError;

/// File names probed, in order, when no explicit config path is given
pub const CONFIG_CANDIDATES: [&str; 2] = ["txtsheet.toml", ".txtsheet.toml"];

/// Load settings from `explicit`, or from the first candidate in `dir`.
///
/// An explicit path must exist and parse. Candidate files that fail to parse
/// are skipped with a warning; with no usable file the defaults apply.
pub fn load_settings(explicit: Option<&Path>, dir: &Path) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "loading config");
        return Settings::from_file(path);
    }

    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if !path.exists() {
            continue;
        }
        match Settings::from_file(&path) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded config");
                return Ok(settings);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring config"),
        }
    }

    Ok(Settings::default())
}
