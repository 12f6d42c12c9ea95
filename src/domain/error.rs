//! Error types for the dropzone controller.
//!
//! This module defines the centralized error type [`DropzoneError`] and a type
//! alias [`Result`]. Errors only escape the crate from configuration loading and
//! the replay tool; failures raised by a host binding during event handling are
//! logged and absorbed by the coordinator.

use thiserror::Error;

/// The main error type for dropzone operations.
///
/// # Examples
///
/// ```
/// use dropzone::DropzoneError;
///
/// fn restricted() -> Result<(), DropzoneError> {
///     Err(DropzoneError::DropEffect("dataTransfer is read-only".to_string()))
/// }
///
/// assert!(restricted().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DropzoneError {
    /// Configuration is invalid or could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON document (replay script or output) could not be processed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The host could not create a preview reference for a file.
    ///
    /// Never fatal: the file is still classified.
    #[error("Preview error: {0}")]
    Preview(String),

    /// The host refused to set the drop-effect hint.
    ///
    /// Some platforms make the hint read-only during certain phases of a drag.
    #[error("Drop effect error: {0}")]
    DropEffect(String),

    /// Any other failure reported by the host binding.
    #[error("Host error: {0}")]
    Host(String),
}

/// A specialized `Result` type for dropzone operations.
pub type Result<T> = std::result::Result<T, DropzoneError>;
