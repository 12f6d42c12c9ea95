//! Arena interning host nodes into stable target identifiers.
//!
//! Hosts hand the controller live element handles that may not be hashable or
//! cheap to compare. The arena assigns each distinct node an opaque
//! [`TargetId`] the first time it is seen in a drag session, so the tracker
//! can own a plain set of ids instead of external handles.

use serde::Serialize;

/// Opaque identifier for a node entered during a drag session.
///
/// Ids are only meaningful within the arena that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TargetId(u32);

impl TargetId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only store of host nodes, indexed by [`TargetId`].
#[derive(Debug, Clone)]
pub struct TargetArena<N> {
    nodes: Vec<N>,
}

impl<N> Default for TargetArena<N> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N: PartialEq + Clone> TargetArena<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `node`, issuing a new one if it was never seen.
    pub fn intern(&mut self, node: &N) -> TargetId {
        if let Some(id) = self.lookup(node) {
            return id;
        }
        let id = TargetId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node.clone());
        id
    }

    /// Id previously issued for `node`, if any.
    #[must_use]
    pub fn lookup(&self, node: &N) -> Option<TargetId> {
        self.nodes
            .iter()
            .position(|known| known == node)
            .and_then(|index| u32::try_from(index).ok())
            .map(TargetId)
    }

    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&N> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
