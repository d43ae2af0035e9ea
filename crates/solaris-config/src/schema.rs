//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use solaris_common::{LanguageCode, LoggingConfig};
use std::path::PathBuf;

/// Main configuration structure for the i18n runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Language selection.
    pub languages: LanguageConfig,
    /// Where translation resources live.
    pub resources: ResourceConfig,
    /// Persisted language preference.
    pub storage: StorageConfig,
    /// DOM marker attribute names.
    pub markers: MarkerConfig,
    /// Logging output.
    pub logging: LoggingSection,
}

/// Language selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language used when no preference has been persisted.
    pub default_language: String,
    /// Language consulted when a key is missing; fixed for the session.
    pub fallback_language: String,
}

/// Translation resource location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory path or `http(s)` URL that `<code>.json` is resolved against.
    pub base: String,
}

/// Persisted language preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key under which the chosen language is stored.
    pub preference_key: String,
    /// Backing JSON file for native hosts; browsers use `localStorage`.
    pub preference_file: Option<PathBuf>,
}

/// Names of the marker attributes the binder looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Marks an element whose text (or named attribute) is translated.
    pub key: String,
    /// Names the attribute to write instead of the text content.
    pub attribute: String,
    /// Marks an element whose `placeholder` attribute is translated.
    pub placeholder: String,
    /// Marks the element whose key becomes the document title.
    pub title: String,
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level filter directive.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Config {
    /// Parsed default language.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the configured code is invalid.
    pub fn default_language(&self) -> solaris_common::Result<LanguageCode> {
        LanguageCode::new(self.languages.default_language.as_str())
    }

    /// Parsed fallback language.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the configured code is invalid.
    pub fn fallback_language(&self) -> solaris_common::Result<LanguageCode> {
        LanguageCode::new(self.languages.fallback_language.as_str())
    }

    /// Converts the `[logging]` section into a subscriber configuration.
    #[must_use]
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            ..LoggingConfig::default()
        }
    }
}
