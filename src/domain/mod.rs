//! Domain layer for the dropzone controller.
//!
//! Core value types shared by every other layer, independent of any host UI
//! runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`file`]: File descriptors and preview handles

pub mod error;
pub mod file;

pub use error::{DropzoneError, Result};
pub use file::{FileDescriptor, PreviewHandle};
