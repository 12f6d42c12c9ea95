//! Application layer: the event coordinator.
//!
//! This layer sits between the host binding and the pure components (drag
//! tracking, classification, dialog lifecycle). It implements the
//! event-driven state machine that produces the dropzone's exposed state.
//!
//! # Architecture
//!
//! ```text
//! Host events → Event → handle_event → Dropzone mutations → Callbacks
//!                  ↑                                         ↓
//!                  └──────── TimerFired ◀── Actions ◀────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects and timers requested from the host
//! - [`callbacks`]: Consumer hook slots
//! - [`handler`]: Event types and state transitions
//! - [`modes`]: Interaction phase of the state machine
//! - [`state`]: The [`Dropzone`] container and its read-side API

pub mod actions;
pub mod callbacks;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, Timer};
pub use callbacks::Callbacks;
pub use handler::{handle_event, Event};
pub use modes::InteractionPhase;
pub use state::Dropzone;
