//! Reference-counted registration of process-wide listeners.
//!
//! Document-level drag suppression and window focus tracking are host-wide
//! listeners shared by every mounted dropzone. The registry counts how many
//! dropzones need each [`ListenerKind`], so the host listener is attached on
//! the first acquisition and detached on the last release, never twice.
//!
//! The registry is single-threaded, like the event loop that drives it.
//! [`ListenerRegistry::global`] returns the per-thread shared instance.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A host-level listener shared between dropzones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// `dragover` on the document, suppressed so drops are allowed at all.
    DocumentDragOver,
    /// `drop` on the document, suppressed outside dropzones.
    DocumentDrop,
    /// `focus` on the window, used to detect a closed file dialog.
    WindowFocus,
}

type Counts = Rc<RefCell<BTreeMap<ListenerKind, usize>>>;

thread_local! {
    static GLOBAL: ListenerRegistry = ListenerRegistry::new();
}

/// Shared subscription counter. Clones share the same counts.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Counts,
}

impl ListenerRegistry {
    /// Creates an isolated registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every dropzone on this thread.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    /// Subscribes to `kind`.
    ///
    /// The returned flag is `true` when this is the first subscription and
    /// the host listener must be attached now.
    #[must_use]
    pub fn acquire(&self, kind: ListenerKind) -> (Registration, bool) {
        let mut counts = self.counts.borrow_mut();
        let count = counts.entry(kind).or_insert(0);
        *count += 1;
        let attach = *count == 1;
        drop(counts);

        tracing::debug!(kind = ?kind, attach, "listener acquired");

        (
            Registration {
                kind,
                counts: Rc::clone(&self.counts),
                released: false,
            },
            attach,
        )
    }

    /// Number of live registrations for `kind`.
    #[must_use]
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }
}

/// Live subscription to a [`ListenerKind`].
///
/// Release it with [`Registration::release`] to learn whether the host
/// listener must be detached. Dropping it releases too, but the caller then
/// cannot act on the detach.
#[derive(Debug)]
pub struct Registration {
    kind: ListenerKind,
    counts: Counts,
    released: bool,
}

impl Registration {
    #[must_use]
    pub const fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Releases the subscription. Returns `true` if it was the last one and
    /// the host listener must be detached.
    #[must_use]
    pub fn release(mut self) -> bool {
        self.decrement()
    }

    fn decrement(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        let mut counts = self.counts.borrow_mut();
        let Some(count) = counts.get_mut(&self.kind) else {
            return false;
        };
        *count = count.saturating_sub(1);
        let detach = *count == 0;
        if detach {
            counts.remove(&self.kind);
        }
        drop(counts);

        tracing::debug!(kind = ?self.kind, detach, "listener released");
        detach
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.decrement() {
            tracing::warn!(kind = ?self.kind, "last listener registration dropped without release, host listener left attached");
        }
    }
}
