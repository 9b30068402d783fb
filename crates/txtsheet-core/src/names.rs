//! File name helpers: titles from names, safe output names, shared roots.

/// Characters replaced by `_` in output file names
const RESERVED_CHARS: [char; 12] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\n', '\r', '\t'];

/// Name used when sanitizing leaves nothing behind
pub const UNTITLED: &str = "untitled";

/// Drop the extension from a file name.
///
/// Everything from the last `.` onward is removed, unless that dot is the
/// first character (dotfiles keep their name).
///
/// ```
/// use txtsheet_core::names::title_from_filename;
///
/// assert_eq!(title_from_filename("a.b.txt"), "a.b");
/// assert_eq!(title_from_filename(".bashrc"), ".bashrc");
/// assert_eq!(title_from_filename("README"), "README");
/// ```
pub fn title_from_filename(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// Make a string usable as a single file name component.
///
/// Each reserved character (`\ / : * ? " < > |`, newline, carriage return,
/// tab) becomes `_`, surrounding whitespace is trimmed, and an empty result
/// becomes [`UNTITLED`].
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Infer the folder all relative paths share as their first segment.
///
/// Returns `None` when no path contains a separator, or when the first
/// segments disagree. Backslashes are treated as separators too.
pub fn infer_root_directory<I, S>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root: Option<String> = None;

    for path in paths {
        let path = path.as_ref().replace('\\', "/");
        let Some((first, _)) = path.split_once('/') else {
            continue;
        };
        if first.is_empty() {
            continue;
        }
        match &root {
            None => root = Some(first.to_string()),
            Some(existing) if existing != first => return None,
            Some(_) => {}
        }
    }

    root
}

/// Case-insensitive check that `name` ends with `extension` (e.g. `.txt`)
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.to_lowercase().ends_with(&extension.to_lowercase())
}

/// Keep the first `max_chars` characters of `text`
pub fn truncate_chars(text: &mut String, max_chars: usize) -> bool {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            text.truncate(byte_idx);
            true
        }
        None => false,
    }
}
