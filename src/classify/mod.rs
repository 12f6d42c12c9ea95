//! File classification rules.
//!
//! Pure functions deciding whether candidate files are accepted or rejected by
//! type, size and multiplicity. Nothing here holds state, so every function is
//! safe to call repeatedly and from any number of dropzones at once.
//!
//! # Rules
//!
//! 1. **Type**: the file must match the accept pattern (see [`accept`]).
//! 2. **Size**: `min_size <= size <= max_size`, each bound optional.
//! 3. **Multiplicity**: in single-file mode only the first accepted file
//!    survives; the others are demoted to the rejected list.
//!
//! The type rule alone also drives live drag feedback through
//! [`all_files_accepted`], since sizes are not reliably known mid-drag.

pub mod accept;

pub use accept::{AcceptEntry, AcceptPattern};

use crate::domain::FileDescriptor;
use serde::Serialize;

/// Returns `true` if the file's type or name satisfies the accept pattern.
///
/// An absent or blank pattern accepts every file.
///
/// ```
/// use dropzone::classify::file_accepted;
/// use dropzone::FileDescriptor;
///
/// let photo = FileDescriptor::new("cat.png", 10, "image/png");
/// assert!(file_accepted(&photo, None));
/// assert!(file_accepted(&photo, Some("image/*")));
/// assert!(!file_accepted(&photo, Some("video/*")));
/// ```
#[must_use]
pub fn file_accepted(file: &FileDescriptor, accept: Option<&str>) -> bool {
    accept.map_or(true, |pattern| AcceptPattern::parse(pattern).matches(file))
}

/// Returns `true` if the file size lies within the inclusive bounds.
#[must_use]
pub fn file_match_size(file: &FileDescriptor, min_size: Option<u64>, max_size: Option<u64>) -> bool {
    min_size.map_or(true, |min| file.size >= min) && max_size.map_or(true, |max| file.size <= max)
}

/// Returns `true` if there is at least one file and every file passes
/// [`file_accepted`]. Size is ignored.
#[must_use]
pub fn all_files_accepted(files: &[FileDescriptor], accept: Option<&str>) -> bool {
    if files.is_empty() {
        return false;
    }
    let pattern = accept.map(AcceptPattern::parse).unwrap_or_default();
    files.iter().all(|file| pattern.matches(file))
}

/// The rules a drop is classified against, borrowed from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules<'a> {
    pub accept: Option<&'a str>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub multiple: bool,
}

impl Default for Rules<'_> {
    fn default() -> Self {
        Self {
            accept: None,
            min_size: None,
            max_size: None,
            multiple: true,
        }
    }
}

/// Partition of dropped files into accepted and rejected, each in drop order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub accepted: Vec<FileDescriptor>,
    pub rejected: Vec<FileDescriptor>,
}

impl ClassificationResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Classifies files by type and size, then applies the multiplicity policy.
///
/// ```
/// use dropzone::classify::{classify, Rules};
/// use dropzone::FileDescriptor;
///
/// let files = vec![
///     FileDescriptor::new("a.png", 10, "image/png"),
///     FileDescriptor::new("b.png", 10, "image/png"),
/// ];
/// let rules = Rules { multiple: false, ..Rules::default() };
///
/// let result = classify(files, &rules);
/// assert_eq!(result.accepted.len(), 1);
/// assert_eq!(result.rejected[0].name, "b.png");
/// ```
#[must_use]
pub fn classify(files: Vec<FileDescriptor>, rules: &Rules<'_>) -> ClassificationResult {
    let pattern = rules.accept.map(AcceptPattern::parse).unwrap_or_default();

    let (accepted, rejected): (Vec<_>, Vec<_>) = files.into_iter().partition(|file| {
        pattern.matches(file) && file_match_size(file, rules.min_size, rules.max_size)
    });

    tracing::debug!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "files classified by type and size"
    );

    apply_multiplicity(ClassificationResult { accepted, rejected }, rules.multiple)
}

/// Demotes every accepted file after the first to the rejected list when
/// `multiple` is off. Demoted files keep their relative order and follow the
/// files that were already rejected.
#[must_use]
pub fn apply_multiplicity(mut result: ClassificationResult, multiple: bool) -> ClassificationResult {
    if !multiple && result.accepted.len() > 1 {
        let demoted = result.accepted.split_off(1);
        tracing::debug!(demoted = demoted.len(), "single-file mode, demoting extra files");
        result.rejected.extend(demoted);
    }
    result
}
