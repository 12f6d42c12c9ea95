//! View model types representing renderable dropzone state.
//!
//! View models are computed from a [`Dropzone`](crate::app::Dropzone) on
//! demand and consumed by whatever renders the zone. They contain no logic,
//! only display-ready data, and serialize to the camelCase names web
//! renderers expect.

use crate::classify::all_files_accepted;
use crate::domain::FileDescriptor;
use serde::Serialize;

/// Complete state surface exposed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropzoneView {
    /// Accepted files of the last drop, in drop order.
    pub accepted_files: Vec<FileDescriptor>,

    /// Rejected files of the last drop, in drop order.
    pub rejected_files: Vec<FileDescriptor>,

    /// Files of the drag currently over the zone.
    pub dragged_files: Vec<FileDescriptor>,

    pub is_drag_active: bool,
    pub is_drag_accept: bool,
    pub is_drag_reject: bool,
    pub is_file_dialog_active: bool,

    /// Mirrors the `disabled` option for accessibility markup.
    pub is_disabled: bool,
}

/// Acceptance preview for an in-progress drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DragFeedback {
    /// Every dragged file matches the accept pattern.
    pub is_drag_accept: bool,
    /// The drop would produce at least one rejection.
    pub is_drag_reject: bool,
}

impl DragFeedback {
    /// Derives the feedback flags from the dragged files.
    ///
    /// Nothing is reported while no file is dragged. In single-file mode a
    /// drag of several files counts as a rejection even if every file
    /// matches.
    ///
    /// ```
    /// use dropzone::view::DragFeedback;
    /// use dropzone::FileDescriptor;
    ///
    /// let files = vec![FileDescriptor::typed("image/png"), FileDescriptor::typed("image/gif")];
    /// let feedback = DragFeedback::compute(&files, Some("image/*"), false);
    /// assert!(feedback.is_drag_accept);
    /// assert!(feedback.is_drag_reject);
    /// ```
    #[must_use]
    pub fn compute(dragged: &[FileDescriptor], accept: Option<&str>, multiple: bool) -> Self {
        let count = dragged.len();
        let is_drag_accept = count > 0 && all_files_accepted(dragged, accept);
        let is_drag_reject = count > 0 && (!is_drag_accept || (!multiple && count > 1));
        Self {
            is_drag_accept,
            is_drag_reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragged(types: &[&str]) -> Vec<FileDescriptor> {
        types.iter().map(|t| FileDescriptor::typed(*t)).collect()
    }

    #[test]
    fn no_files_means_no_feedback() {
        assert_eq!(DragFeedback::compute(&[], Some("image/*"), true), DragFeedback::default());
    }

    #[test]
    fn matching_drag_is_accepted() {
        let feedback = DragFeedback::compute(&dragged(&["image/png"]), Some("image/*"), false);
        assert!(feedback.is_drag_accept);
        assert!(!feedback.is_drag_reject);
    }

    #[test]
    fn one_mismatch_rejects_the_drag() {
        let feedback = DragFeedback::compute(&dragged(&["image/png", "text/plain"]), Some("image/*"), true);
        assert!(!feedback.is_drag_accept);
        assert!(feedback.is_drag_reject);
    }

    #[test]
    fn view_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(DropzoneView::default()).unwrap();
        assert_eq!(json["isDragActive"], false);
        assert!(json["acceptedFiles"].as_array().unwrap().is_empty());
    }
}
