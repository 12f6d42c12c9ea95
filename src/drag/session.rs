//! Per-interaction drag session.

use super::arena::TargetArena;
use super::tracker::DragTracker;
use crate::domain::FileDescriptor;

/// State of one drag interaction, from the first enter to the drop or the
/// final leave.
///
/// Owns the arena of entered nodes, so ids never outlive the session that
/// issued them.
#[derive(Debug, Clone)]
pub struct DragSession<N> {
    arena: TargetArena<N>,
    tracker: DragTracker,
    dragged_files: Vec<FileDescriptor>,
}

impl<N> Default for DragSession<N> {
    fn default() -> Self {
        Self {
            arena: TargetArena::default(),
            tracker: DragTracker::default(),
            dragged_files: Vec::new(),
        }
    }
}

impl<N: PartialEq + Clone> DragSession<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `node` and replaces the dragged-file snapshot.
    pub fn enter(&mut self, node: &N, files: Vec<FileDescriptor>) -> bool {
        let id = self.arena.intern(node);
        self.dragged_files = files;
        self.tracker.enter(id)
    }

    /// Leaves `node`, keeping the entered nodes for which `root_contains`
    /// still holds. Clears the dragged files once nothing is entered.
    pub fn leave(&mut self, node: &N, root_contains: impl Fn(&N) -> bool) -> bool {
        let departing = self.arena.intern(node);
        let arena = &self.arena;
        let active = self
            .tracker
            .leave(departing, |id| arena.get(id).is_some_and(&root_contains));

        if !active {
            self.dragged_files.clear();
        }
        active
    }

    /// Forgets every entered node without touching the dragged files.
    pub fn reset_targets(&mut self) {
        self.tracker.reset();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    #[must_use]
    pub fn entered_count(&self) -> usize {
        self.tracker.len()
    }

    #[must_use]
    pub fn dragged_files(&self) -> &[FileDescriptor] {
        &self.dragged_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pngs(count: usize) -> Vec<FileDescriptor> {
        (0..count).map(|_| FileDescriptor::typed("image/png")).collect()
    }

    #[test]
    fn nested_enter_and_leave() {
        let mut session = DragSession::new();
        assert!(session.enter(&"root", pngs(2)));
        assert!(session.enter(&"child", pngs(2)));

        assert!(session.leave(&"child", |_| true));
        assert_eq!(session.dragged_files().len(), 2);

        assert!(!session.leave(&"root", |_| true));
        assert!(session.dragged_files().is_empty());
    }

    #[test]
    fn nodes_outside_root_are_discarded() {
        let mut session = DragSession::new();
        session.enter(&"root", pngs(1));
        session.enter(&"portal", pngs(1));

        let active = session.leave(&"root", |node| *node != "portal");
        assert!(!active);
        assert_eq!(session.entered_count(), 0);
    }

    #[test]
    fn reset_keeps_snapshot() {
        let mut session = DragSession::new();
        session.enter(&1u8, pngs(3));
        session.reset_targets();

        assert!(!session.is_active());
        assert_eq!(session.dragged_files().len(), 3);
    }
}
