//! Error types for internationalization operations

use solaris_common::{LanguageCode, SolarisError};
use thiserror::Error;

/// Errors that can occur during internationalization operations
///
/// Every variant except the location, preference and configuration ones is
/// a resource load failure: the language stays unloaded and lookups degrade
/// to the fallback tree or the literal key.
#[derive(Error, Debug)]
pub enum I18nError {
    /// The resource for a language does not exist
    #[error("Translation resource for '{language}' not found at {location}")]
    ResourceNotFound {
        /// Requested language
        language: LanguageCode,
        /// File path or URL that was tried
        location: String,
    },

    /// The server answered with a non-success status
    #[error("Translation resource for '{language}' returned HTTP {status} from {location}")]
    ResourceStatus {
        /// Requested language
        language: LanguageCode,
        /// URL that was fetched
        location: String,
        /// Response status code
        status: u16,
    },

    /// The request itself failed
    #[error("Failed to fetch translation resource for '{language}' from {location}: {source}")]
    Network {
        /// Requested language
        language: LanguageCode,
        /// URL that was fetched
        location: String,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// Reading a local resource failed
    #[error("Failed to read translation resource for '{language}' at {location}: {source}")]
    Io {
        /// Requested language
        language: LanguageCode,
        /// File path that was read
        location: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The resource body is not valid JSON
    #[error("Failed to parse translation resource for '{language}': {source}")]
    ResourceParse {
        /// Requested language
        language: LanguageCode,
        /// JSON syntax error
        #[source]
        source: serde_json::Error,
    },

    /// The resource is JSON but not a translation document
    #[error("Invalid translation resource for '{language}': {reason}")]
    InvalidResource {
        /// Requested language
        language: LanguageCode,
        /// What was wrong with it
        reason: String,
    },

    /// A base URL or location could not be used
    #[error("Invalid resource location '{location}': {reason}")]
    InvalidLocation {
        /// Offending location
        location: String,
        /// What was wrong with it
        reason: String,
    },

    /// Reading or writing the persisted language preference failed
    #[error("Language preference storage failed: {0}")]
    Preference(#[source] SolarisError),

    /// The runtime configuration could not be used
    #[error("Invalid i18n configuration: {0}")]
    Config(#[from] SolarisError),
}

impl I18nError {
    /// Language the failed load was for, if this is a load failure
    #[must_use]
    pub fn language(&self) -> Option<&LanguageCode> {
        match self {
            Self::ResourceNotFound { language, .. }
            | Self::ResourceStatus { language, .. }
            | Self::Network { language, .. }
            | Self::Io { language, .. }
            | Self::ResourceParse { language, .. }
            | Self::InvalidResource { language, .. } => Some(language),
            Self::InvalidLocation { .. } | Self::Preference(_) | Self::Config(_) => None,
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
