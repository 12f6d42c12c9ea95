//! Interaction phase of the dropzone state machine.
//!
//! ```text
//!            dragenter                    drop
//!   Idle ──────────────▶ DragEntered ──────────▶ Dropped ──▶ Idle
//!    ▲                      │   ▲  dragover            (classification)
//!    └──── final leave ─────┘   └─ dragleave (still inside)
//! ```

use serde::Serialize;

/// Where the dropzone is in a drag interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum InteractionPhase {
    /// Nothing is being dragged over the zone.
    #[default]
    Idle,

    /// At least one target inside the zone has been entered.
    DragEntered,

    /// A drop is being classified. Folds back to `Idle` before the handler
    /// returns.
    Dropped,
}
