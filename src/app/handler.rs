//! Event handling and state transition logic.
//!
//! This module implements the event coordinator's transitions: it applies host
//! events to a [`Dropzone`], consults the drag tracker, classifier and file
//! dialog controller, fires consumer callbacks and returns the actions the
//! host must execute.
//!
//! # Architecture
//!
//! 1. The host translates a native event into an [`Event`]
//! 2. [`handle_event`] pattern-matches it and mutates the dropzone
//! 3. Callbacks fire once state is final
//! 4. `(should_render, actions)` is returned for the host to execute
//!
//! Handlers never return errors. Host failures (preview creation, drop-effect
//! assignment) are logged and the interaction continues.

use super::actions::{Action, Timer};
use super::modes::InteractionPhase;
use super::state::Dropzone;
use crate::classify;
use crate::dialog::{CheckOutcome, CANCEL_CHECK_DELAY};
use crate::domain::FileDescriptor;
use crate::drag::DragSession;
use crate::host::{DropEffect, DropzoneHost};
use crate::registry::ListenerKind;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// Events delivered by the host.
///
/// `N` is the host's node handle type. Zone events (`Drag*`, `Drop`,
/// `Click`, `Input*`) come from the dropzone's own element; `Document*` and
/// `WindowFocus` from the host-wide listeners the zone registered on mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event<N> {
    /// The zone's root element is attached to the host tree.
    Mount { root: N },
    /// The zone is being torn down.
    Unmount,

    /// A drag originating inside the zone started on `target`.
    DragStart { target: N, files: Vec<FileDescriptor> },
    /// A drag entered `target`, the root or one of its descendants.
    DragEnter { target: N, files: Vec<FileDescriptor> },
    DragOver { target: N },
    DragLeave { target: N },
    /// Files were dropped on `target`.
    Drop { target: N, files: Vec<FileDescriptor> },

    /// The native input reported a selection.
    InputChange { files: Vec<FileDescriptor> },
    /// The native input itself was clicked.
    InputClick,
    /// The zone was clicked.
    Click,

    DocumentDragOver { target: N },
    DocumentDrop { target: N },
    /// The window regained focus, typically after a modal dialog closed.
    WindowFocus,

    /// A timer scheduled through [`Action::ScheduleTimer`] elapsed.
    TimerFired(Timer),
}

impl<N> Event<N> {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount { .. } => "mount",
            Self::Unmount => "unmount",
            Self::DragStart { .. } => "drag_start",
            Self::DragEnter { .. } => "drag_enter",
            Self::DragOver { .. } => "drag_over",
            Self::DragLeave { .. } => "drag_leave",
            Self::Drop { .. } => "drop",
            Self::InputChange { .. } => "input_change",
            Self::InputClick => "input_click",
            Self::Click => "click",
            Self::DocumentDragOver { .. } => "document_drag_over",
            Self::DocumentDrop { .. } => "document_drop",
            Self::WindowFocus => "window_focus",
            Self::TimerFired(_) => "timer_fired",
        }
    }

    /// Whether the event is delivered by the zone's own element handlers,
    /// which are not attached at all while the zone is disabled.
    #[must_use]
    pub const fn is_zone_event(&self) -> bool {
        matches!(
            self,
            Self::DragStart { .. }
                | Self::DragEnter { .. }
                | Self::DragOver { .. }
                | Self::DragLeave { .. }
                | Self::Drop { .. }
                | Self::InputChange { .. }
                | Self::InputClick
                | Self::Click
        )
    }
}

/// Processes an event, mutates the dropzone and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the exposed state changed, and the
/// side effects for the host, in order.
///
/// # Example
///
/// ```rust
/// use dropzone::app::{handle_event, Action, Callbacks, Dropzone, Event};
/// use dropzone::host::HeadlessHost;
/// use dropzone::registry::ListenerRegistry;
/// use dropzone::{Config, FileDescriptor};
///
/// let mut host = HeadlessHost::new();
/// let mut zone = Dropzone::with_registry(Config::default(), Callbacks::new(), ListenerRegistry::new());
/// handle_event(&mut zone, &mut host, &Event::Mount { root: "zone".to_string() });
///
/// let enter = Event::DragEnter {
///     target: "zone".to_string(),
///     files: vec![FileDescriptor::typed("image/png")],
/// };
/// let (render, actions) = handle_event(&mut zone, &mut host, &enter);
/// assert!(render);
/// assert_eq!(actions, vec![Action::PreventDefault]);
/// assert!(zone.is_drag_active());
/// ```
pub fn handle_event<N, H>(zone: &mut Dropzone<N>, host: &mut H, event: &Event<N>) -> (bool, Vec<Action>)
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if zone.config.disabled && event.is_zone_event() {
        tracing::trace!("dropzone disabled, no handler attached");
        return (false, vec![]);
    }

    match event {
        Event::Mount { root } => mount(zone, root),
        Event::Unmount => unmount(zone, host),
        Event::DragStart { target, files } => {
            zone.session
                .get_or_insert_with(DragSession::new)
                .enter(target, files.clone());
            zone.phase = InteractionPhase::DragEntered;
            zone.callbacks.drag_start(event);
            (true, vec![])
        }
        Event::DragEnter { target, files } => {
            let session = zone.session.get_or_insert_with(DragSession::new);
            session.enter(target, files.clone());
            tracing::debug!(
                entered = session.entered_count(),
                dragged_files = files.len(),
                "drag entered"
            );
            zone.phase = InteractionPhase::DragEntered;
            zone.callbacks.drag_enter(event);
            (true, vec![Action::PreventDefault])
        }
        Event::DragOver { .. } => {
            if let Err(e) = host.set_drop_effect(DropEffect::Copy) {
                tracing::trace!(error = %e, "drop effect hint rejected by host");
            }
            zone.callbacks.drag_over(event);
            (false, vec![Action::PreventDefault])
        }
        Event::DragLeave { target } => drag_leave(zone, host, target, event),
        Event::Drop { files, .. } => {
            let render = drop_files(zone, host, files.clone(), event);
            (render, vec![Action::PreventDefault])
        }
        Event::InputChange { files } => (drop_files(zone, host, files.clone(), event), vec![]),
        Event::InputClick => (false, vec![Action::StopPropagation]),
        Event::Click => click(zone, event),
        Event::DocumentDragOver { .. } => {
            if zone.config.prevent_drop_on_document {
                (false, vec![Action::PreventDefault])
            } else {
                (false, vec![])
            }
        }
        Event::DocumentDrop { target } => document_drop(zone, host, target),
        Event::WindowFocus => window_focus(zone),
        Event::TimerFired(timer) => timer_fired(zone, host, *timer),
    }
}

fn mount<N: Clone + PartialEq + Debug>(zone: &mut Dropzone<N>, root: &N) -> (bool, Vec<Action>) {
    if zone.root.is_some() {
        tracing::debug!(root = ?root, "dropzone already mounted, ignoring");
        return (false, vec![]);
    }
    zone.root = Some(root.clone());

    let mut kinds = Vec::new();
    if zone.config.prevent_drop_on_document {
        kinds.extend([ListenerKind::DocumentDragOver, ListenerKind::DocumentDrop]);
    }
    if zone.callbacks.has_file_dialog_cancel() {
        kinds.push(ListenerKind::WindowFocus);
    }

    let mut actions = Vec::new();
    for kind in kinds {
        let (registration, attach) = zone.registry.acquire(kind);
        zone.registrations.push(registration);
        if attach {
            actions.push(Action::AttachListener(kind));
        }
    }

    tracing::debug!(root = ?root, listeners = zone.registrations.len(), "dropzone mounted");
    (true, actions)
}

fn unmount<N, H>(zone: &mut Dropzone<N>, host: &mut H) -> (bool, Vec<Action>)
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    let actions: Vec<Action> = zone
        .registrations
        .drain(..)
        .filter_map(|registration| {
            let kind = registration.kind();
            registration.release().then_some(Action::DetachListener(kind))
        })
        .collect();

    let revoked = zone.previews.len();
    for handle in zone.previews.drain(..) {
        host.revoke_preview(&handle);
    }

    zone.dialog.abandon();
    zone.session = None;
    zone.phase = InteractionPhase::Idle;
    let was_mounted = zone.root.take().is_some();

    tracing::debug!(revoked_previews = revoked, detached = actions.len(), "dropzone unmounted");
    (was_mounted, actions)
}

fn drag_leave<N, H>(zone: &mut Dropzone<N>, host: &H, target: &N, event: &Event<N>) -> (bool, Vec<Action>)
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    let actions = vec![Action::PreventDefault];
    let Some(session) = zone.session.as_mut() else {
        tracing::trace!("drag leave without a session");
        return (false, actions);
    };

    let root = zone.root.as_ref();
    let active = session.leave(target, |node| root.is_some_and(|root| host.contains(root, node)));
    if active {
        tracing::trace!(entered = session.entered_count(), "still inside dropzone");
        return (false, actions);
    }

    zone.session = None;
    zone.phase = InteractionPhase::Idle;
    tracing::debug!("drag left dropzone");
    zone.callbacks.drag_leave(event);
    (true, actions)
}

/// Classifies dropped or selected files and publishes the result.
fn drop_files<N, H>(zone: &mut Dropzone<N>, host: &mut H, mut files: Vec<FileDescriptor>, event: &Event<N>) -> bool
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    zone.phase = InteractionPhase::Dropped;
    if let Some(session) = zone.session.as_mut() {
        session.reset_targets();
    }

    if !zone.config.disable_preview {
        for file in &mut files {
            match host.create_preview(file) {
                Ok(handle) => {
                    zone.previews.push(handle.clone());
                    file.preview = Some(handle);
                }
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "failed to create preview");
                }
            }
        }
    }

    let result = classify::classify(files, &zone.config.rules());
    tracing::debug!(
        accepted = result.accepted.len(),
        rejected = result.rejected.len(),
        "drop classified"
    );

    zone.callbacks.dropped(&result.accepted, &result.rejected, event);

    zone.session = None;
    zone.result = result;
    zone.dialog.complete_selection();
    zone.phase = InteractionPhase::Idle;
    true
}

fn click<N>(zone: &mut Dropzone<N>, event: &Event<N>) -> (bool, Vec<Action>) {
    if zone.config.disable_click {
        return (false, vec![]);
    }
    zone.callbacks.click(event);
    (
        false,
        vec![
            Action::StopPropagation,
            Action::ScheduleTimer {
                timer: Timer::OpenFileDialog,
                delay: Duration::ZERO,
            },
        ],
    )
}

fn document_drop<N, H>(zone: &mut Dropzone<N>, host: &H, target: &N) -> (bool, Vec<Action>)
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    if !zone.config.prevent_drop_on_document {
        return (false, vec![]);
    }
    if zone.root.as_ref().is_some_and(|root| host.contains(root, target)) {
        tracing::trace!("document drop inside dropzone, deferring to zone handler");
        return (false, vec![]);
    }

    let was_active = zone.is_drag_active();
    if let Some(session) = zone.session.as_mut() {
        session.reset_targets();
    }
    zone.phase = InteractionPhase::Idle;
    tracing::debug!(target = ?target, "suppressed drop outside dropzone");
    (was_active, vec![Action::PreventDefault])
}

fn window_focus<N>(zone: &Dropzone<N>) -> (bool, Vec<Action>) {
    let actions = zone
        .dialog
        .on_window_focus(zone.callbacks.has_file_dialog_cancel())
        .map(|generation| Action::ScheduleTimer {
            timer: Timer::FileDialogCancelCheck { generation },
            delay: CANCEL_CHECK_DELAY,
        })
        .into_iter()
        .collect();
    (false, actions)
}

fn timer_fired<N, H>(zone: &mut Dropzone<N>, host: &H, timer: Timer) -> (bool, Vec<Action>)
where
    N: Clone + PartialEq + Debug,
    H: DropzoneHost<Node = N>,
{
    if zone.root.is_none() {
        tracing::debug!(timer = ?timer, "timer fired after unmount, ignoring");
        return (false, vec![]);
    }

    match timer {
        Timer::OpenFileDialog => {
            let actions = zone.open();
            (!actions.is_empty(), actions)
        }
        Timer::FileDialogCancelCheck { generation } => {
            match zone.dialog.check_cancelled(generation, host.selected_file_count()) {
                CheckOutcome::Cancelled => {
                    zone.callbacks.file_dialog_cancel();
                    (true, vec![])
                }
                CheckOutcome::SelectionPending | CheckOutcome::Stale => (false, vec![]),
            }
        }
    }
}

impl<N: Clone + PartialEq + Debug> Dropzone<N> {
    /// Method form of [`handle_event`].
    pub fn handle_event<H>(&mut self, host: &mut H, event: &Event<N>) -> (bool, Vec<Action>)
    where
        H: DropzoneHost<Node = N>,
    {
        handle_event(self, host, event)
    }
}
