//! Host binding seam.
//!
//! The controller never touches a UI toolkit directly. Queries it needs
//! answered synchronously while handling an event go through
//! [`DropzoneHost`]; side effects the host may perform at its own pace are
//! returned as [`Action`](crate::app::Action)s instead.
//!
//! [`HeadlessHost`] is an in-memory implementation used by the test suite and
//! the replay tool.

pub mod headless;

pub use headless::HeadlessHost;

use crate::domain::{FileDescriptor, PreviewHandle, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Drop-effect hint shown to the user while dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

impl DropEffect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        }
    }
}

/// Queries and fallible operations the controller delegates to the host UI.
///
/// Errors returned from these methods are logged and absorbed; none of them
/// aborts an interaction.
pub trait DropzoneHost {
    /// Handle to a node of the host's element tree.
    type Node: Clone + PartialEq + Debug;

    /// Whether `node` is `root` or one of its descendants.
    fn contains(&self, root: &Self::Node, node: &Self::Node) -> bool;

    /// Sets the drop-effect hint of the drag currently being processed.
    ///
    /// # Errors
    ///
    /// Hosts may refuse the assignment under their security policy.
    fn set_drop_effect(&mut self, effect: DropEffect) -> Result<()>;

    /// Creates a preview reference for a dropped file.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot allocate the reference.
    fn create_preview(&mut self, file: &FileDescriptor) -> Result<PreviewHandle>;

    /// Releases a reference created by [`create_preview`](Self::create_preview).
    fn revoke_preview(&mut self, handle: &PreviewHandle);

    /// Number of files currently held by the native file input.
    fn selected_file_count(&self) -> usize;
}
