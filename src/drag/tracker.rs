//! Nested drag-enter/drag-leave tracking.
//!
//! Hosts fire a drag-enter and a drag-leave for every node the pointer
//! crosses, descendants included. Keeping a set of entered targets, rather
//! than a single flag, stops the active signal from flickering when the
//! pointer moves between children of the dropzone.

use super::arena::TargetId;
use std::collections::BTreeSet;

/// Set of targets currently entered by a drag.
///
/// The drag is active exactly when the set is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragTracker {
    entered: BTreeSet<TargetId>,
}

impl DragTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `target` as entered. Idempotent. Returns the active flag,
    /// which is always `true` afterwards.
    pub fn enter(&mut self, target: TargetId) -> bool {
        self.entered.insert(target);
        self.is_active()
    }

    /// Handles a leave of `target`.
    ///
    /// Keeps only the targets that are not `target` and that the root still
    /// contains according to `still_contains`. Returns the new active flag.
    pub fn leave(&mut self, target: TargetId, still_contains: impl Fn(TargetId) -> bool) -> bool {
        self.entered.retain(|&id| id != target && still_contains(id));
        self.is_active()
    }

    /// Forgets every entered target.
    pub fn reset(&mut self) {
        self.entered.clear();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.entered.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty()
    }

    #[must_use]
    pub fn contains(&self, target: TargetId) -> bool {
        self.entered.contains(&target)
    }
}
