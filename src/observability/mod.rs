//! Tracing setup with optional file-based span export.
//!
//! Diagnostics always go through `tracing`. [`init_tracing`] installs the
//! subscriber: a human-readable stderr layer by default, or an OpenTelemetry
//! layer whose exporter appends OTLP-style JSON lines to a rotating file when
//! `trace_file` is configured.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → file
//! ```
//!
//! # Filter resolution
//!
//! 1. `RUST_LOG`, when set
//! 2. `trace_level` from [`Config`](crate::Config)
//! 3. `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `tracer`: Tracer provider and span exporter
//! - `span_formatter`: Span to JSON conversion
//! - `file_writer`: Size-rotated line writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
