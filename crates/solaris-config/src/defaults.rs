//! Default values matching the Solaris page conventions.

use crate::schema::{LanguageConfig, LoggingSection, MarkerConfig, ResourceConfig, StorageConfig};

/// Language shown when the visitor has not chosen one.
pub const DEFAULT_LANGUAGE: &str = "et";

/// Language consulted for keys missing from the current language.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Storage key holding the chosen language.
pub const PREFERENCE_KEY: &str = "solaris_language";

/// Translation resources sit next to the module loading them.
pub const RESOURCE_BASE: &str = "translations/";

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            fallback_language: FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base: RESOURCE_BASE.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preference_key: PREFERENCE_KEY.to_string(),
            preference_file: None,
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            key: "data-i18n".to_string(),
            attribute: "data-i18n-attr".to_string(),
            placeholder: "data-i18n-placeholder".to_string(),
            title: "data-i18n-title".to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
