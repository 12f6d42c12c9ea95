//! Native file dialog lifecycle.
//!
//! Native file pickers are modal and report a selection through the input's
//! change event, but say nothing when the user cancels. The controller infers
//! cancellation: when the window regains focus after the dialog closes, a
//! check is scheduled for [`CANCEL_CHECK_DELAY`] later. If the input still
//! holds no files at that point, the dialog was cancelled.
//!
//! Selection and timeout race to resolve the same open request. Each
//! [`open`](FileDialogController::open) starts a new generation; whichever of
//! the two outcomes arrives first for the current generation closes the
//! dialog, and the other one then finds nothing to do.

use serde::Serialize;
use std::time::Duration;

/// Delay between the window regaining focus and the cancellation check.
///
/// Leaves the host time to deliver the input's change event first when the
/// user did pick something.
pub const CANCEL_CHECK_DELAY: Duration = Duration::from_millis(300);

/// Whether a native file dialog is currently expected to be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DialogState {
    #[default]
    Closed,
    /// Waiting for the dialog opened as `generation` to resolve.
    AwaitingSelection { generation: u64 },
}

/// Outcome of a cancellation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No selection arrived: the dialog is now closed and the cancel
    /// callback must fire.
    Cancelled,
    /// The input holds files whose change event has not been processed yet.
    /// The dialog stays open until it is.
    SelectionPending,
    /// The check belongs to a dialog that was already resolved or reopened.
    Stale,
}

/// Tracks the open/close state of the native file dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDialogController {
    state: DialogState,
    generation: u64,
}

impl FileDialogController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DialogState::AwaitingSelection { .. })
    }

    /// Marks the dialog as open and returns its generation.
    ///
    /// Opening while already waiting restarts the wait: checks scheduled for
    /// the previous generation become stale.
    pub fn open(&mut self) -> u64 {
        self.generation += 1;
        self.state = DialogState::AwaitingSelection {
            generation: self.generation,
        };
        tracing::debug!(generation = self.generation, "file dialog opened");
        self.generation
    }

    /// Called when the window regains focus.
    ///
    /// Returns the generation to check after [`CANCEL_CHECK_DELAY`], or `None`
    /// when no dialog is pending or nobody listens for cancellation.
    #[must_use]
    pub fn on_window_focus(&self, cancel_listener: bool) -> Option<u64> {
        match self.state {
            DialogState::AwaitingSelection { generation } if cancel_listener => Some(generation),
            DialogState::AwaitingSelection { .. } => {
                tracing::trace!("no cancel listener, skipping dialog check");
                None
            }
            DialogState::Closed => None,
        }
    }

    /// Resolves the pending dialog with a selection. Returns `true` if this
    /// call closed it.
    pub fn complete_selection(&mut self) -> bool {
        let was_open = self.is_active();
        self.state = DialogState::Closed;
        if was_open {
            tracing::debug!(generation = self.generation, "file dialog resolved by selection");
        }
        was_open
    }

    /// Runs the cancellation check for `generation`.
    pub fn check_cancelled(&mut self, generation: u64, selected_files: usize) -> CheckOutcome {
        match self.state {
            DialogState::AwaitingSelection { generation: current } if current == generation => {
                if selected_files == 0 {
                    self.state = DialogState::Closed;
                    tracing::debug!(generation, "file dialog resolved by cancellation");
                    CheckOutcome::Cancelled
                } else {
                    CheckOutcome::SelectionPending
                }
            }
            _ => CheckOutcome::Stale,
        }
    }

    /// Drops any pending wait without resolving it.
    pub fn abandon(&mut self) {
        self.state = DialogState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_without_selection_cancels_once() {
        let mut dialog = FileDialogController::new();
        let generation = dialog.open();

        assert_eq!(dialog.on_window_focus(true), Some(generation));
        assert_eq!(dialog.check_cancelled(generation, 0), CheckOutcome::Cancelled);
        assert!(!dialog.is_active());
        assert_eq!(dialog.check_cancelled(generation, 0), CheckOutcome::Stale);
    }

    #[test]
    fn selection_first_makes_check_stale() {
        let mut dialog = FileDialogController::new();
        let generation = dialog.open();

        assert!(dialog.complete_selection());
        assert_eq!(dialog.check_cancelled(generation, 0), CheckOutcome::Stale);
        assert!(!dialog.complete_selection());
    }

    #[test]
    fn pending_selection_keeps_dialog_open() {
        let mut dialog = FileDialogController::new();
        let generation = dialog.open();

        assert_eq!(dialog.check_cancelled(generation, 2), CheckOutcome::SelectionPending);
        assert!(dialog.is_active());
        assert!(dialog.complete_selection());
    }

    #[test]
    fn reopening_restarts_the_wait() {
        let mut dialog = FileDialogController::new();
        let first = dialog.open();
        let second = dialog.open();

        assert_ne!(first, second);
        assert_eq!(dialog.check_cancelled(first, 0), CheckOutcome::Stale);
        assert_eq!(dialog.check_cancelled(second, 0), CheckOutcome::Cancelled);
    }

    #[test]
    fn focus_without_listener_schedules_nothing() {
        let mut dialog = FileDialogController::new();
        assert_eq!(dialog.on_window_focus(true), None);

        dialog.open();
        assert_eq!(dialog.on_window_focus(false), None);
        assert!(dialog.is_active());
    }
}
