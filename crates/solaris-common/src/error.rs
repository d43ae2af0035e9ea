//! Error types and utilities for Solaris

use thiserror::Error;

/// Result type alias for Solaris operations
pub type Result<T> = std::result::Result<T, SolarisError>;

/// Main error type shared across the workspace
#[derive(Error, Debug)]
pub enum SolarisError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Field that failed validation
        field: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Durable storage errors (preference files, browser storage)
    #[error("Storage error: {message}")]
    Storage {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SolarisError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new storage error with source
    pub fn storage_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Field name attached to a validation error, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = SolarisError::config("missing field");
        assert_eq!(config_error.to_string(), "Configuration error: missing field");

        let validation_error = SolarisError::validation_field("bad code", "fallback_language");
        assert!(validation_error.to_string().contains("Validation error"));
        assert_eq!(validation_error.field(), Some("fallback_language"));

        let storage_error = SolarisError::storage("quota exceeded");
        assert_eq!(storage_error.to_string(), "Storage error: quota exceeded");
        assert_eq!(storage_error.field(), None);
    }

    #[test]
    fn test_error_with_source() {
        let wrapped = SolarisError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(wrapped.to_string().contains("Config loading failed"));
        assert!(wrapped.source().is_some());

        let storage = SolarisError::storage_with_source(
            "write failed",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(storage.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: SolarisError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: SolarisError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }
}
