//! Attributes of the native file input.
//!
//! The dropzone renders a hidden `<input type="file">` (or the host's
//! equivalent) for the click-to-open path. Consumer-supplied `input_props`
//! are laid down first and the controller-owned attributes on top, so the
//! controller wins every conflicting key.

use crate::Config;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute map for the native file input, as string key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputAttributes(BTreeMap<String, String>);

impl InputAttributes {
    /// Builds the attribute map for `config`.
    ///
    /// ```
    /// use dropzone::view::InputAttributes;
    /// use dropzone::Config;
    ///
    /// let mut config = Config::default();
    /// config.input_props.insert("type".to_string(), "text".to_string());
    /// config.input_props.insert("id".to_string(), "upload".to_string());
    ///
    /// let attrs = InputAttributes::from_config(&config);
    /// assert_eq!(attrs.get("type"), Some("file"));
    /// assert_eq!(attrs.get("id"), Some("upload"));
    /// ```
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut attrs = config.input_props.clone();

        for (key, value) in [("type", "file"), ("style", "display: none"), ("autocomplete", "off")] {
            attrs.insert(key.to_string(), value.to_string());
        }

        // Boolean attributes: presence means true.
        for (key, set) in [("multiple", config.multiple), ("disabled", config.disabled)] {
            if set {
                attrs.insert(key.to_string(), String::new());
            } else {
                attrs.remove(key);
            }
        }

        match config.accept.as_deref().map(str::trim) {
            Some(accept) if !accept.is_empty() => {
                attrs.insert("accept".to_string(), accept.to_string());
            }
            _ => {
                attrs.remove("accept");
            }
        }

        if let Some(name) = config.name.as_deref().filter(|name| !name.is_empty()) {
            attrs.insert("name".to_string(), name.to_string());
        }

        Self(attrs)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}
