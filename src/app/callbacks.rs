//! Consumer callback slots.
//!
//! Callbacks are registered with a builder and owned by the dropzone. They
//! always observe final state: drop callbacks receive files that are already
//! classified and previewed, and they fire in a fixed order (`on_drop`, then
//! `on_drop_rejected`, then `on_drop_accepted`).

use super::handler::Event;
use crate::domain::FileDescriptor;

type EventHook<N> = Box<dyn FnMut(&Event<N>)>;
type FilesHook<N> = Box<dyn FnMut(&[FileDescriptor], &Event<N>)>;
type DropHook<N> = Box<dyn FnMut(&[FileDescriptor], &[FileDescriptor], &Event<N>)>;
type CancelHook = Box<dyn FnMut()>;

/// Optional consumer hooks, all empty by default.
///
/// ```
/// use dropzone::app::Callbacks;
///
/// let callbacks: Callbacks<u32> = Callbacks::new()
///     .on_drop(|accepted, rejected, _event| {
///         println!("{} accepted, {} rejected", accepted.len(), rejected.len());
///     })
///     .on_file_dialog_cancel(|| println!("dialog cancelled"));
///
/// assert!(callbacks.has_file_dialog_cancel());
/// ```
pub struct Callbacks<N> {
    drag_start: Option<EventHook<N>>,
    drag_enter: Option<EventHook<N>>,
    drag_over: Option<EventHook<N>>,
    drag_leave: Option<EventHook<N>>,
    drop: Option<DropHook<N>>,
    drop_accepted: Option<FilesHook<N>>,
    drop_rejected: Option<FilesHook<N>>,
    click: Option<EventHook<N>>,
    file_dialog_cancel: Option<CancelHook>,
}

impl<N> Default for Callbacks<N> {
    fn default() -> Self {
        Self {
            drag_start: None,
            drag_enter: None,
            drag_over: None,
            drag_leave: None,
            drop: None,
            drop_accepted: None,
            drop_rejected: None,
            click: None,
            file_dialog_cancel: None,
        }
    }
}

impl<N> Callbacks<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_drag_start(mut self, hook: impl FnMut(&Event<N>) + 'static) -> Self {
        self.drag_start = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_drag_enter(mut self, hook: impl FnMut(&Event<N>) + 'static) -> Self {
        self.drag_enter = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_drag_over(mut self, hook: impl FnMut(&Event<N>) + 'static) -> Self {
        self.drag_over = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_drag_leave(mut self, hook: impl FnMut(&Event<N>) + 'static) -> Self {
        self.drag_leave = Some(Box::new(hook));
        self
    }

    /// Receives `(accepted, rejected, event)` after every drop.
    #[must_use]
    pub fn on_drop(
        mut self,
        hook: impl FnMut(&[FileDescriptor], &[FileDescriptor], &Event<N>) + 'static,
    ) -> Self {
        self.drop = Some(Box::new(hook));
        self
    }

    /// Receives the accepted files, only when there are some.
    #[must_use]
    pub fn on_drop_accepted(mut self, hook: impl FnMut(&[FileDescriptor], &Event<N>) + 'static) -> Self {
        self.drop_accepted = Some(Box::new(hook));
        self
    }

    /// Receives the rejected files, only when there are some.
    #[must_use]
    pub fn on_drop_rejected(mut self, hook: impl FnMut(&[FileDescriptor], &Event<N>) + 'static) -> Self {
        self.drop_rejected = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_click(mut self, hook: impl FnMut(&Event<N>) + 'static) -> Self {
        self.click = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_file_dialog_cancel(mut self, hook: impl FnMut() + 'static) -> Self {
        self.file_dialog_cancel = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub const fn has_file_dialog_cancel(&self) -> bool {
        self.file_dialog_cancel.is_some()
    }

    pub(crate) fn drag_start(&mut self, event: &Event<N>) {
        if let Some(hook) = self.drag_start.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn drag_enter(&mut self, event: &Event<N>) {
        if let Some(hook) = self.drag_enter.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn drag_over(&mut self, event: &Event<N>) {
        if let Some(hook) = self.drag_over.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn drag_leave(&mut self, event: &Event<N>) {
        if let Some(hook) = self.drag_leave.as_mut() {
            hook(event);
        }
    }

    /// Fires the drop hooks in their contractual order.
    pub(crate) fn dropped(&mut self, accepted: &[FileDescriptor], rejected: &[FileDescriptor], event: &Event<N>) {
        if let Some(hook) = self.drop.as_mut() {
            hook(accepted, rejected, event);
        }
        if !rejected.is_empty() {
            if let Some(hook) = self.drop_rejected.as_mut() {
                hook(rejected, event);
            }
        }
        if !accepted.is_empty() {
            if let Some(hook) = self.drop_accepted.as_mut() {
                hook(accepted, event);
            }
        }
    }

    pub(crate) fn click(&mut self, event: &Event<N>) {
        if let Some(hook) = self.click.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn file_dialog_cancel(&mut self) {
        if let Some(hook) = self.file_dialog_cancel.as_mut() {
            hook();
        }
    }
}

impl<N> std::fmt::Debug for Callbacks<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_drag_start", &self.drag_start.is_some())
            .field("on_drag_enter", &self.drag_enter.is_some())
            .field("on_drag_over", &self.drag_over.is_some())
            .field("on_drag_leave", &self.drag_leave.is_some())
            .field("on_drop", &self.drop.is_some())
            .field("on_drop_accepted", &self.drop_accepted.is_some())
            .field("on_drop_rejected", &self.drop_rejected.is_some())
            .field("on_click", &self.click.is_some())
            .field("on_file_dialog_cancel", &self.file_dialog_cancel.is_some())
            .finish()
    }
}
