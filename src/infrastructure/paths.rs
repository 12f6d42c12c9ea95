//! Path utilities for locating diagnostic output.
//!
//! Follows the XDG base directory convention: data goes under
//! `$XDG_DATA_HOME/dropzone`, falling back to `~/.local/share/dropzone` and
//! finally to the system temporary directory when no home is known.

use std::path::PathBuf;

/// File name used when the trace file is set to `"default"`.
pub const DEFAULT_TRACE_FILE: &str = "dropzone-otlp.json";

/// Returns the data directory for dropzone output.
///
/// The directory is not created.
#[must_use]
pub fn data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("dropzone")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths are returned unchanged when `HOME` is unset.
///
/// # Examples
///
/// ```
/// use dropzone::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}

/// Resolves the configured trace file option to a concrete path.
///
/// `"default"` maps to [`DEFAULT_TRACE_FILE`] inside [`data_dir`]; other
/// values are tilde-expanded.
#[must_use]
pub fn resolve_trace_file(option: &str) -> PathBuf {
    if option.trim() == "default" {
        data_dir().join(DEFAULT_TRACE_FILE)
    } else {
        PathBuf::from(expand_tilde(option.trim()))
    }
}
