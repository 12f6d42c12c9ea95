//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! host executes them in order against the native event and its UI runtime.
//! Timers are part of this protocol: the host schedules them and delivers
//! [`Event::TimerFired`](crate::app::Event::TimerFired) when they elapse.
//!
//! # Example
//!
//! ```rust
//! use dropzone::app::{Action, Timer};
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::StopPropagation,
//!     Action::ScheduleTimer { timer: Timer::OpenFileDialog, delay: Duration::ZERO },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::registry::ListenerKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deferred work the controller asks the host to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timer {
    /// Open the native file dialog on the next scheduling tick.
    ///
    /// Deferred so UI updates made by the click callback commit before a
    /// blocking dialog freezes the caller.
    OpenFileDialog,

    /// Check whether the dialog opened as `generation` was cancelled.
    FileDialogCancelCheck { generation: u64 },
}

/// Commands the host executes on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Suppress the host's default handling of the current event.
    PreventDefault,

    /// Stop the current event from bubbling to ancestors.
    StopPropagation,

    /// Clear the native input's value so picking the same file again still
    /// fires a change.
    ResetInputValue,

    /// Trigger the native file picker.
    OpenFilePicker,

    /// Deliver `timer` back as an event after `delay`.
    ScheduleTimer { timer: Timer, delay: Duration },

    /// Attach the host-wide listener of the given kind.
    AttachListener(ListenerKind),

    /// Detach the host-wide listener of the given kind.
    DetachListener(ListenerKind),
}
