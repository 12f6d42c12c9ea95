//! Parsing and matching of `accept` patterns.
//!
//! An accept pattern is the comma-separated list used by native file inputs,
//! e.g. `"image/*,.pdf,application/zip"`. Entries are whitespace-trimmed and
//! compared case-insensitively. Entries that cannot be interpreted never
//! match; they do not make the whole pattern fail.

use crate::domain::FileDescriptor;

/// A single entry of an accept pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptEntry {
    /// `.png`: matches when the file name ends with the literal suffix.
    Extension(String),
    /// `image/*`: matches any MIME type with the given top-level type.
    Wildcard(String),
    /// `image/png`: matches the full MIME type.
    Mime(String),
    /// Anything else. Kept so logging can report it; never matches.
    Malformed(String),
}

impl AcceptEntry {
    fn parse(raw: &str) -> Option<Self> {
        let entry = raw.trim().to_lowercase();
        if entry.is_empty() {
            return None;
        }

        if entry.starts_with('.') {
            return Some(if entry.len() > 1 {
                Self::Extension(entry)
            } else {
                Self::Malformed(entry)
            });
        }

        let parsed = match entry.split_once('/') {
            Some((base, "*")) if is_token(base) => Self::Wildcard(base.to_string()),
            Some((base, sub)) if is_token(base) && is_token(sub) => Self::Mime(entry.clone()),
            _ => Self::Malformed(entry),
        };
        Some(parsed)
    }

    /// Whether this entry admits the file.
    #[must_use]
    pub fn matches(&self, file: &FileDescriptor) -> bool {
        match self {
            Self::Extension(suffix) => file.name.to_lowercase().ends_with(suffix.as_str()),
            Self::Wildcard(base) => file
                .base_mime_type()
                .is_some_and(|file_base| file_base.eq_ignore_ascii_case(base)),
            Self::Mime(full) => file.mime_type.trim().eq_ignore_ascii_case(full),
            Self::Malformed(_) => false,
        }
    }
}

fn is_token(part: &str) -> bool {
    !part.is_empty() && !part.contains(['/', '*']) && !part.chars().any(char::is_whitespace)
}

/// Parsed accept pattern.
///
/// An empty pattern (no usable entries at all, not even malformed ones)
/// accepts every file.
///
/// ```
/// use dropzone::classify::AcceptPattern;
/// use dropzone::FileDescriptor;
///
/// let pattern = AcceptPattern::parse("image/*, .PDF");
/// assert!(pattern.matches(&FileDescriptor::new("cat.png", 1, "image/png")));
/// assert!(pattern.matches(&FileDescriptor::new("paper.pdf", 1, "")));
/// assert!(!pattern.matches(&FileDescriptor::new("notes.txt", 1, "text/plain")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptPattern {
    entries: Vec<AcceptEntry>,
}

impl AcceptPattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let entries: Vec<AcceptEntry> = pattern.split(',').filter_map(AcceptEntry::parse).collect();

        for entry in &entries {
            if let AcceptEntry::Malformed(raw) = entry {
                tracing::debug!(entry = %raw, "ignoring malformed accept entry");
            }
        }

        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn matches(&self, file: &FileDescriptor) -> bool {
        self.is_empty() || self.entries.iter().any(|entry| entry.matches(file))
    }
}
