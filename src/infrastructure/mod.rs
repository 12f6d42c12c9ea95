//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where diagnostic output lands on the local machine.

pub mod paths;

pub use paths::{data_dir, expand_tilde, resolve_trace_file};
