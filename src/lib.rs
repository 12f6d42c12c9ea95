//! Dropzone: a headless drag-and-drop file ingestion controller.
//!
//! The crate turns a host UI's low-level drag, drop, click and focus events
//! into a small, consistent state surface:
//! - Whether a drag is over the zone, and whether its files would be accepted
//! - Accepted and rejected files of the last drop or dialog selection
//! - Whether the native file dialog is open, with inferred cancellation
//! - Hooks fired at each interaction step, after state is final

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host binding (host/)                               │  ← UI runtime seam
//! │  - DropzoneHost trait, HeadlessHost                 │
//! └─────────────────────────────────────────────────────┘
//!                        │ Event          ▲ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Callbacks                                        │
//! │  - View computation (view/)                         │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Drag tracking │   │ Classification│   │ File dialog   │
//! │ (drag/)       │   │ (classify/)   │   │ (dialog/)     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, registry & infrastructure                  │
//! │  - File descriptors, errors (domain/)               │
//! │  - Shared listener counting (registry/)             │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event coordinator with event/action model
//! - [`classify`]: Accept patterns, size limits and the multiplicity policy
//! - [`dialog`]: Native file dialog lifecycle
//! - [`domain`]: File descriptors and errors
//! - [`drag`]: Nested enter/leave tracking
//! - [`host`]: Host binding trait and the in-memory host
//! - [`registry`]: Reference-counted host listeners
//! - [`view`]: Rendering-facing state
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing setup with file export
//!
//! # Configuration
//!
//! Options are read from markup-style attributes or from TOML:
//!
//! ```toml
//! accept = "image/*,.pdf"
//! max_size = 10485760
//! multiple = false
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use dropzone::app::{Callbacks, Dropzone, Event};
//! use dropzone::host::HeadlessHost;
//! use dropzone::registry::ListenerRegistry;
//! use dropzone::{Config, FileDescriptor};
//!
//! let config = Config::from_toml_str(r#"accept = "image/*""#)?;
//! let mut zone = Dropzone::with_registry(config, Callbacks::new(), ListenerRegistry::new());
//! let mut host = HeadlessHost::new();
//!
//! host.dispatch(&mut zone, &Event::Mount { root: "zone".to_string() })?;
//! host.dispatch(&mut zone, &Event::Drop {
//!     target: "zone".to_string(),
//!     files: vec![
//!         FileDescriptor::new("cat.png", 2048, "image/png"),
//!         FileDescriptor::new("notes.txt", 12, "text/plain"),
//!     ],
//! })?;
//!
//! assert_eq!(zone.accepted_files().len(), 1);
//! assert_eq!(zone.rejected_files()[0].name, "notes.txt");
//! # Ok::<(), dropzone::DropzoneError>(())
//! ```

pub mod app;
pub mod classify;
pub mod dialog;
pub mod domain;
pub mod drag;
pub mod host;
pub mod infrastructure;
pub mod registry;
pub mod view;

pub mod observability;

pub use app::{handle_event, Action, Callbacks, Dropzone, Event};
pub use domain::{DropzoneError, FileDescriptor, PreviewHandle, Result};
pub use host::{DropzoneHost, HeadlessHost};

use classify::Rules;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Dropzone options.
///
/// Every field has a default, so partial TOML documents and attribute maps
/// are valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comma-separated MIME types, wildcard MIME types (`image/*`) and
    /// extensions (`.pdf`). `None` or blank accepts everything.
    pub accept: Option<String>,

    /// Inclusive lower size bound in bytes.
    pub min_size: Option<u64>,

    /// Inclusive upper size bound in bytes.
    pub max_size: Option<u64>,

    /// Allow more than one file per drop. Default: `true`
    pub multiple: bool,

    /// Ignore every zone interaction.
    pub disabled: bool,

    /// Suppress the host's default drop handling outside dropzones, so a
    /// missed drop does not navigate away. Default: `true`
    pub prevent_drop_on_document: bool,

    /// Skip preview creation on drop.
    pub disable_preview: bool,

    /// Clicking the zone does not open the file dialog.
    pub disable_click: bool,

    /// `name` attribute forwarded to the native input.
    pub name: Option<String>,

    /// Extra attributes for the native input; controller-owned keys win.
    pub input_props: BTreeMap<String, String>,

    /// Tracing filter directive, e.g. `debug` or `dropzone=trace`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// Path of the JSON span export file. `"default"` selects the platform
    /// data directory; see [`infrastructure::resolve_trace_file`].
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accept: None,
            min_size: None,
            max_size: None,
            multiple: true,
            disabled: false,
            prevent_drop_on_document: true,
            disable_preview: false,
            disable_click: false,
            name: None,
            input_props: BTreeMap::new(),
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from string attributes, as host markup provides
    /// them.
    ///
    /// Keys are kebab-case or snake_case. Boolean attributes are true when
    /// present with an empty value, `true` or the attribute's own name.
    /// Attributes prefixed `input-` are forwarded to the native input.
    /// Unparsable values keep their default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dropzone::Config;
    ///
    /// let mut attrs = BTreeMap::new();
    /// attrs.insert("accept".to_string(), "image/*".to_string());
    /// attrs.insert("max-size".to_string(), "1024".to_string());
    /// attrs.insert("multiple".to_string(), "false".to_string());
    /// attrs.insert("disable-click".to_string(), String::new());
    /// attrs.insert("input-id".to_string(), "upload".to_string());
    ///
    /// let config = Config::from_attributes(&attrs);
    /// assert_eq!(config.accept.as_deref(), Some("image/*"));
    /// assert_eq!(config.max_size, Some(1024));
    /// assert!(!config.multiple);
    /// assert!(config.disable_click);
    /// assert_eq!(config.input_props["id"], "upload");
    /// ```
    #[must_use]
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();

        for (raw_key, value) in attributes {
            let key = raw_key.trim().to_ascii_lowercase().replace('_', "-");
            if let Some(input_key) = key.strip_prefix("input-") {
                config.input_props.insert(input_key.to_string(), value.clone());
                continue;
            }

            match key.as_str() {
                "accept" => config.accept = Some(value.clone()),
                "min-size" => config.min_size = parse_size(&key, value).or(config.min_size),
                "max-size" => config.max_size = parse_size(&key, value).or(config.max_size),
                "multiple" => config.multiple = parse_flag(&key, value, config.multiple),
                "disabled" => config.disabled = parse_flag(&key, value, config.disabled),
                "prevent-drop-on-document" => {
                    config.prevent_drop_on_document = parse_flag(&key, value, config.prevent_drop_on_document);
                }
                "disable-preview" => config.disable_preview = parse_flag(&key, value, config.disable_preview),
                "disable-click" => config.disable_click = parse_flag(&key, value, config.disable_click),
                "name" => config.name = Some(value.clone()),
                "trace-level" => config.trace_level = Some(value.clone()),
                "trace-file" => config.trace_file = Some(value.clone()),
                _ => tracing::debug!(attribute = %raw_key, "ignoring unknown attribute"),
            }
        }

        config
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DropzoneError::Toml`] on malformed TOML or mistyped values,
    /// and [`DropzoneError::Config`] when the size bounds are inverted.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DropzoneError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded dropzone config");
        Self::from_toml_str(&source)
    }

    /// Checks option combinations that no drop could ever satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`DropzoneError::Config`] when `min_size` exceeds `max_size`.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(DropzoneError::Config(format!(
                    "min_size ({min}) is greater than max_size ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Classification rules derived from these options.
    #[must_use]
    pub fn rules(&self) -> Rules<'_> {
        Rules {
            accept: self.accept.as_deref(),
            min_size: self.min_size,
            max_size: self.max_size,
            multiple: self.multiple,
        }
    }
}

fn parse_flag(key: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" => true,
        "false" => false,
        other if other == key => true,
        other => {
            tracing::debug!(attribute = %key, value = %other, "invalid boolean attribute, using default");
            default
        }
    }
}

fn parse_size(key: &str, value: &str) -> Option<u64> {
    value.trim().parse::<u64>().map_or_else(
        |e| {
            tracing::debug!(attribute = %key, value = %value, error = %e, "invalid size attribute, using default");
            None
        },
        Some,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.multiple);
        assert!(config.prevent_drop_on_document);
        assert!(!config.disabled);
        assert_eq!(config.accept, None);
    }

    #[test]
    fn attribute_flags() {
        let config = Config::from_attributes(&attrs(&[
            ("disabled", "disabled"),
            ("prevent_drop_on_document", "false"),
            ("disable-preview", "TRUE"),
        ]));
        assert!(config.disabled);
        assert!(!config.prevent_drop_on_document);
        assert!(config.disable_preview);
    }

    #[test]
    fn invalid_attribute_values_keep_defaults() {
        let config = Config::from_attributes(&attrs(&[
            ("multiple", "sometimes"),
            ("max-size", "ten"),
            ("min-size", "-1"),
        ]));
        assert!(config.multiple);
        assert_eq!(config.max_size, None);
        assert_eq!(config.min_size, None);
    }

    #[test]
    fn toml_partial_document() {
        let config = Config::from_toml_str(
            r#"
            accept = ".pdf"
            min_size = 10
            disable_click = true

            [input_props]
            capture = "environment"
            "#,
        )
        .unwrap();
        assert_eq!(config.accept.as_deref(), Some(".pdf"));
        assert_eq!(config.min_size, Some(10));
        assert!(config.disable_click);
        assert!(config.multiple);
        assert_eq!(config.input_props["capture"], "environment");
    }

    #[test]
    fn toml_type_errors_surface() {
        let err = Config::from_toml_str("multiple = \"yes\"").unwrap_err();
        assert!(matches!(err, DropzoneError::Toml(_)));
    }

    #[test]
    fn inverted_size_bounds_are_rejected() {
        let err = Config::from_toml_str("min_size = 100\nmax_size = 10").unwrap_err();
        assert!(matches!(err, DropzoneError::Config(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropzone.toml");
        std::fs::write(&path, "multiple = false\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.multiple);

        let missing = Config::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, DropzoneError::Io(_)));
    }

    #[test]
    fn rules_borrow_config() {
        let config = Config {
            accept: Some("image/*".to_string()),
            max_size: Some(5),
            multiple: false,
            ..Config::default()
        };
        let rules = config.rules();
        assert_eq!(rules.accept, Some("image/*"));
        assert_eq!(rules.max_size, Some(5));
        assert!(!rules.multiple);
    }
}
