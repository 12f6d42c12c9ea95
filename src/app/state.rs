//! Dropzone state container and view computation.
//!
//! [`Dropzone`] is the event coordinator: it owns the configuration, the
//! consumer callbacks, the current drag session, the file dialog controller,
//! the last classification result and every host resource acquired while
//! mounted. Events are applied by [`handle_event`](super::handle_event);
//! this module holds the data and the read-side API.
//!
//! # Example
//!
//! ```rust
//! use dropzone::app::{Callbacks, Dropzone};
//! use dropzone::Config;
//!
//! let zone: Dropzone<String> = Dropzone::new(Config::default(), Callbacks::new());
//! let view = zone.view();
//! assert!(!view.is_drag_active);
//! assert!(view.accepted_files.is_empty());
//! ```

use super::actions::Action;
use super::callbacks::Callbacks;
use super::modes::InteractionPhase;
use crate::classify::ClassificationResult;
use crate::dialog::FileDialogController;
use crate::domain::{FileDescriptor, PreviewHandle};
use crate::drag::DragSession;
use crate::registry::{ListenerRegistry, Registration};
use crate::view::{DragFeedback, DropzoneView, InputAttributes};
use crate::Config;

/// The event coordinator for one dropzone instance.
///
/// `N` is the host's node handle type.
#[derive(Debug)]
pub struct Dropzone<N> {
    pub(crate) config: Config,
    pub(crate) callbacks: Callbacks<N>,
    pub(crate) registry: ListenerRegistry,
    pub(crate) registrations: Vec<Registration>,
    pub(crate) root: Option<N>,
    pub(crate) phase: InteractionPhase,
    pub(crate) session: Option<DragSession<N>>,
    pub(crate) result: ClassificationResult,
    pub(crate) dialog: FileDialogController,
    pub(crate) previews: Vec<PreviewHandle>,
}

impl<N: Clone + PartialEq> Dropzone<N> {
    /// Creates an unmounted dropzone sharing the thread's listener registry.
    #[must_use]
    pub fn new(config: Config, callbacks: Callbacks<N>) -> Self {
        Self::with_registry(config, callbacks, ListenerRegistry::global())
    }

    /// Creates an unmounted dropzone counting listeners in `registry`.
    #[must_use]
    pub fn with_registry(config: Config, callbacks: Callbacks<N>, registry: ListenerRegistry) -> Self {
        tracing::debug!(
            disabled = config.disabled,
            multiple = config.multiple,
            accept = ?config.accept,
            "dropzone created"
        );
        Self {
            config,
            callbacks,
            registry,
            registrations: Vec::new(),
            root: None,
            phase: InteractionPhase::Idle,
            session: None,
            result: ClassificationResult::default(),
            dialog: FileDialogController::new(),
            previews: Vec::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> InteractionPhase {
        self.phase
    }

    #[must_use]
    pub const fn root(&self) -> Option<&N> {
        self.root.as_ref()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    #[must_use]
    pub fn is_drag_active(&self) -> bool {
        self.session.as_ref().is_some_and(DragSession::is_active)
    }

    #[must_use]
    pub fn dragged_files(&self) -> &[FileDescriptor] {
        self.session.as_ref().map_or(&[][..], |session| session.dragged_files())
    }

    #[must_use]
    pub fn accepted_files(&self) -> &[FileDescriptor] {
        &self.result.accepted
    }

    #[must_use]
    pub fn rejected_files(&self) -> &[FileDescriptor] {
        &self.result.rejected
    }

    #[must_use]
    pub const fn is_file_dialog_active(&self) -> bool {
        self.dialog.is_active()
    }

    /// Preview references created so far and not yet revoked.
    #[must_use]
    pub fn live_previews(&self) -> &[PreviewHandle] {
        &self.previews
    }

    /// Opens the native file dialog programmatically.
    ///
    /// Works even with `disable_click`; does nothing when the zone is
    /// disabled.
    pub fn open(&mut self) -> Vec<Action> {
        if self.config.disabled {
            tracing::debug!("dropzone disabled, not opening file dialog");
            return vec![];
        }
        self.dialog.open();
        vec![Action::ResetInputValue, Action::OpenFilePicker]
    }

    /// Live drag feedback for the files currently dragged over the zone.
    ///
    /// Empty while no drag is active, even if a file snapshot is still held.
    #[must_use]
    pub fn drag_feedback(&self) -> DragFeedback {
        if !self.is_drag_active() {
            return DragFeedback::default();
        }
        DragFeedback::compute(self.dragged_files(), self.config.accept.as_deref(), self.config.multiple)
    }

    /// Computes the state surface consumed by the rendering layer.
    #[must_use]
    pub fn view(&self) -> DropzoneView {
        let feedback = self.drag_feedback();
        DropzoneView {
            accepted_files: self.result.accepted.clone(),
            rejected_files: self.result.rejected.clone(),
            dragged_files: self.dragged_files().to_vec(),
            is_drag_active: self.is_drag_active(),
            is_drag_accept: feedback.is_drag_accept,
            is_drag_reject: feedback.is_drag_reject,
            is_file_dialog_active: self.is_file_dialog_active(),
            is_disabled: self.config.disabled,
        }
    }

    /// Attributes for the native file input backing the click-to-open path.
    #[must_use]
    pub fn input_attributes(&self) -> InputAttributes {
        InputAttributes::from_config(&self.config)
    }
}
