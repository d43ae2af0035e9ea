//! Runtime validation of a loaded configuration.

use solaris_common::{LanguageCode, SolarisError};
use tracing_subscriber::EnvFilter;

use crate::schema::Config;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    ///
    /// # Errors
    ///
    /// Returns [`SolarisError::Validation`] naming the field that failed.
    pub fn validate(config: &Config) -> Result<(), SolarisError> {
        LanguageCode::new(config.languages.default_language.as_str()).map_err(|e| {
            SolarisError::validation_field(e.to_string(), "languages.default_language")
        })?;
        LanguageCode::new(config.languages.fallback_language.as_str()).map_err(|e| {
            SolarisError::validation_field(e.to_string(), "languages.fallback_language")
        })?;

        if config.resources.base.trim().is_empty() {
            return Err(SolarisError::validation_field(
                "resource base cannot be empty",
                "resources.base",
            ));
        }

        if config.storage.preference_key.is_empty() {
            return Err(SolarisError::validation_field(
                "preference key cannot be empty",
                "storage.preference_key",
            ));
        }

        let markers = [
            ("markers.key", &config.markers.key),
            ("markers.attribute", &config.markers.attribute),
            ("markers.placeholder", &config.markers.placeholder),
            ("markers.title", &config.markers.title),
        ];
        for (i, (field, name)) in markers.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SolarisError::validation_field(
                    "marker attribute name cannot be empty",
                    *field,
                ));
            }
            if markers[..i].iter().any(|(_, other)| other == name) {
                return Err(SolarisError::validation_field(
                    format!("marker attribute '{name}' is used twice"),
                    *field,
                ));
            }
        }

        EnvFilter::try_new(&config.logging.level).map_err(|e| {
            SolarisError::validation_field(format!("invalid log level: {e}"), "logging.level")
        })?;

        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`ConfigValidator::validate`].
    pub fn validate(&self) -> Result<(), SolarisError> {
        ConfigValidator::validate(self)
    }
}
