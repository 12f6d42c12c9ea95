//! File descriptor domain model.
//!
//! A [`FileDescriptor`] is the controller's view of a candidate file: enough
//! metadata to classify it, plus an optional preview handle created by the
//! host. Content is never read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Revocable reference to a file's binary content, created by the host.
///
/// On web hosts this is an object URL. The controller records every handle it
/// asks the host to create and revokes them all on teardown.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewHandle(pub String);

impl PreviewHandle {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file offered to the dropzone by a drag or by the native file input.
///
/// During a drag some hosts only expose the MIME type of each item, so `name`
/// may be empty and `size` zero until the drop happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub size: u64,

    /// MIME type as reported by the host, possibly empty.
    #[serde(default, rename = "type")]
    pub mime_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    /// Set on drop unless previews are disabled or the host failed to create one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewHandle>,
}

impl FileDescriptor {
    /// Creates a descriptor with the given name, size and MIME type.
    ///
    /// ```
    /// use dropzone::FileDescriptor;
    ///
    /// let file = FileDescriptor::new("cat.png", 2048, "image/png");
    /// assert_eq!(file.base_mime_type(), Some("image"));
    /// assert!(file.preview.is_none());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            last_modified: None,
            preview: None,
        }
    }

    /// Descriptor for a drag item whose only known property is its type.
    #[must_use]
    pub fn typed(mime_type: impl Into<String>) -> Self {
        Self::new(String::new(), 0, mime_type)
    }

    #[must_use]
    pub fn with_last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Top-level MIME type (`image` for `image/png`).
    #[must_use]
    pub fn base_mime_type(&self) -> Option<&str> {
        self.mime_type
            .split_once('/')
            .map(|(base, _)| base)
            .filter(|base| !base.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_mime_type_requires_a_slash() {
        assert_eq!(FileDescriptor::typed("image/png").base_mime_type(), Some("image"));
        assert_eq!(FileDescriptor::typed("image").base_mime_type(), None);
        assert_eq!(FileDescriptor::typed("/png").base_mime_type(), None);
    }

    #[test]
    fn deserializes_browser_style_type_field() {
        let file: FileDescriptor =
            serde_json::from_str(r#"{"name":"a.txt","size":3,"type":"text/plain"}"#).unwrap();
        assert_eq!(file, FileDescriptor::new("a.txt", 3, "text/plain"));
    }
}
