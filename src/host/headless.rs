//! In-memory host.
//!
//! [`HeadlessHost`] models the parts of a UI runtime the controller relies
//! on: a node tree addressed by string ids, preview references, the native
//! input's selection, listener attachment and a virtual clock for timers.
//! It executes returned [`Action`]s and records what they did, which makes
//! it the driver of choice for tests and for `dropzone-replay`.

use super::{DropEffect, DropzoneHost};
use crate::app::{Action, Dropzone, Event, Timer};
use crate::domain::{DropzoneError, FileDescriptor, PreviewHandle, Result};
use crate::registry::ListenerKind;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due: Duration,
    seq: u64,
    timer: Timer,
}

/// Headless [`DropzoneHost`] over a tree of string node ids.
///
/// ```
/// use dropzone::app::{Callbacks, Dropzone, Event};
/// use dropzone::host::HeadlessHost;
/// use dropzone::registry::{ListenerKind, ListenerRegistry};
/// use dropzone::Config;
///
/// let mut host = HeadlessHost::new();
/// host.add_node("label", "zone");
///
/// let mut zone = Dropzone::with_registry(Config::default(), Callbacks::new(), ListenerRegistry::new());
/// host.dispatch(&mut zone, &Event::Mount { root: "zone".to_string() })?;
///
/// assert!(host.is_attached(ListenerKind::DocumentDrop));
/// # Ok::<(), dropzone::DropzoneError>(())
/// ```
#[derive(Debug, Default)]
pub struct HeadlessHost {
    parents: HashMap<String, String>,
    restrict_drop_effect: bool,
    fail_previews: bool,
    drop_effect: DropEffect,
    next_preview: u64,
    previews: BTreeSet<PreviewHandle>,
    revoked: usize,
    selection: Vec<FileDescriptor>,
    listeners: BTreeSet<ListenerKind>,
    now: Duration,
    next_seq: u64,
    timers: Vec<Scheduled>,
    prevented: usize,
    stopped: usize,
    picker_opens: usize,
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `child` as a child of `parent`.
    pub fn add_node(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        self.parents.insert(child.into(), parent.into());
        self
    }

    /// Makes every drop-effect assignment fail, like a host enforcing a
    /// restrictive security policy.
    #[must_use]
    pub fn with_restricted_drop_effect(mut self) -> Self {
        self.restrict_drop_effect = true;
        self
    }

    /// Makes every preview allocation fail.
    #[must_use]
    pub fn with_failing_previews(mut self) -> Self {
        self.fail_previews = true;
        self
    }

    #[must_use]
    pub const fn drop_effect(&self) -> DropEffect {
        self.drop_effect
    }

    /// Preview references created and not yet revoked.
    #[must_use]
    pub const fn live_previews(&self) -> &BTreeSet<PreviewHandle> {
        &self.previews
    }

    #[must_use]
    pub const fn revoked_previews(&self) -> usize {
        self.revoked
    }

    /// Simulates the user picking files in the native dialog.
    ///
    /// Only the input's value changes; deliver the matching
    /// [`Event::InputChange`] separately to model host delivery order.
    pub fn select_files(&mut self, files: Vec<FileDescriptor>) {
        self.selection = files;
    }

    #[must_use]
    pub fn selected_files(&self) -> &[FileDescriptor] {
        &self.selection
    }

    #[must_use]
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(&kind)
    }

    #[must_use]
    pub const fn attached_listeners(&self) -> &BTreeSet<ListenerKind> {
        &self.listeners
    }

    /// Number of [`Action::PreventDefault`] executed so far.
    #[must_use]
    pub const fn prevented(&self) -> usize {
        self.prevented
    }

    #[must_use]
    pub const fn propagation_stops(&self) -> usize {
        self.stopped
    }

    #[must_use]
    pub const fn picker_opens(&self) -> usize {
        self.picker_opens
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Executes `actions` in order.
    ///
    /// # Errors
    ///
    /// Returns [`DropzoneError::Host`] when a listener is attached twice or
    /// detached while not attached.
    pub fn apply(&mut self, actions: &[Action]) -> Result<()> {
        for action in actions {
            match action {
                Action::PreventDefault => self.prevented += 1,
                Action::StopPropagation => self.stopped += 1,
                Action::ResetInputValue => self.selection.clear(),
                Action::OpenFilePicker => self.picker_opens += 1,
                Action::ScheduleTimer { timer, delay } => {
                    self.timers.push(Scheduled {
                        due: self.now + *delay,
                        seq: self.next_seq,
                        timer: *timer,
                    });
                    self.next_seq += 1;
                }
                Action::AttachListener(kind) => {
                    if !self.listeners.insert(*kind) {
                        return Err(DropzoneError::Host(format!("{kind:?} listener attached twice")));
                    }
                }
                Action::DetachListener(kind) => {
                    if !self.listeners.remove(kind) {
                        return Err(DropzoneError::Host(format!("{kind:?} listener was not attached")));
                    }
                }
            }
        }
        Ok(())
    }

    /// Delivers `event` to `zone` and executes the resulting actions.
    ///
    /// Returns whether the zone asked for a render.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`apply`](Self::apply).
    pub fn dispatch(&mut self, zone: &mut Dropzone<String>, event: &Event<String>) -> Result<bool> {
        let (render, actions) = zone.handle_event(self, event);
        self.apply(&actions)?;
        Ok(render)
    }

    /// Moves the virtual clock forward by `by`, firing every timer that
    /// comes due, including ones scheduled by fired timers.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`apply`](Self::apply).
    pub fn advance(&mut self, zone: &mut Dropzone<String>, by: Duration) -> Result<bool> {
        self.now += by;
        let mut render = false;
        while let Some(timer) = self.pop_due() {
            render |= self.dispatch(zone, &Event::TimerFired(timer))?;
        }
        Ok(render)
    }

    /// `node` followed by its ancestors, nearest first.
    ///
    /// Stops after one pass over the tree, so a parent cycle cannot loop.
    fn ancestors<'a>(&'a self, node: &'a String) -> impl Iterator<Item = &'a String> + 'a {
        std::iter::successors(Some(node), |current| self.parents.get(*current)).take(self.parents.len() + 1)
    }

    /// A node whose parent chain loops back on itself, if any.
    #[must_use]
    pub fn cyclic_node(&self) -> Option<&str> {
        let mut children: Vec<&String> = self.parents.keys().collect();
        children.sort_unstable();
        children
            .into_iter()
            .find(|child| self.ancestors(child).skip(1).any(|ancestor| ancestor == *child))
            .map(String::as_str)
    }

    fn pop_due(&mut self) -> Option<Timer> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= self.now)
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))?;
        Some(self.timers.remove(index).timer)
    }
}

impl DropzoneHost for HeadlessHost {
    type Node = String;

    fn contains(&self, root: &String, node: &String) -> bool {
        self.ancestors(node).any(|ancestor| ancestor == root)
    }

    fn set_drop_effect(&mut self, effect: DropEffect) -> Result<()> {
        if self.restrict_drop_effect {
            return Err(DropzoneError::DropEffect(format!(
                "assigning '{}' is not allowed",
                effect.as_str()
            )));
        }
        self.drop_effect = effect;
        Ok(())
    }

    fn create_preview(&mut self, file: &FileDescriptor) -> Result<PreviewHandle> {
        if self.fail_previews {
            return Err(DropzoneError::Preview(format!("no preview available for '{}'", file.name)));
        }
        self.next_preview += 1;
        let handle = PreviewHandle(format!("blob:dropzone/{}", self.next_preview));
        self.previews.insert(handle.clone());
        Ok(handle)
    }

    fn revoke_preview(&mut self, handle: &PreviewHandle) {
        if self.previews.remove(handle) {
            self.revoked += 1;
        } else {
            tracing::warn!(handle = %handle, "revoking unknown preview");
        }
    }

    fn selected_file_count(&self) -> usize {
        self.selection.len()
    }
}
