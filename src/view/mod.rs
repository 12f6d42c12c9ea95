//! Rendering-facing state.
//!
//! Everything here is derived from a [`Dropzone`](crate::app::Dropzone) and
//! recomputed whenever the handler reports that a render is due.
//!
//! - [`viewmodel`]: Exposed state flags and file lists
//! - [`input`]: Attributes of the hidden native file input

pub mod input;
pub mod viewmodel;

pub use input::InputAttributes;
pub use viewmodel::{DragFeedback, DropzoneView};
