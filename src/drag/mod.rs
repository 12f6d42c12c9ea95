//! Drag activity tracking.
//!
//! Turns the host's per-node drag-enter/drag-leave stream into one reliable
//! "a drag is over the dropzone" signal.
//!
//! # Modules
//!
//! - [`arena`]: Interns host nodes into stable [`TargetId`]s
//! - [`tracker`]: Set of entered targets and the derived active flag
//! - [`session`]: One drag interaction (targets plus dragged files)

pub mod arena;
pub mod session;
pub mod tracker;

pub use arena::{TargetArena, TargetId};
pub use session::DragSession;
pub use tracker::DragTracker;
