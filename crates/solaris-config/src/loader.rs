//! Configuration loading utilities

use solaris_common::{Result as SolarisResult, SolarisError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::Config;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "SOLARIS_CONFIG_PATH";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "solaris.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] SolarisError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for SolarisError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            ConfigError::IoError(e) => SolarisError::Io(e),
            other => SolarisError::config(other.to_string()),
        }
    }
}

/// Configuration loader for the i18n runtime
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, an override does not
    /// parse, or the result does not validate.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!(path = %path.as_ref().display(), "Loading configuration file");
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_with_env(&content, |name| env::var(name).ok())
    }

    /// Parse configuration from TOML text, without environment overrides.
    ///
    /// # Errors
    ///
    /// Fails when the text does not parse or validate.
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Self::from_toml_with_env(content, |_| None)
    }

    /// Parse configuration from TOML text, applying overrides from `lookup`.
    ///
    /// # Errors
    ///
    /// Fails when the text or an override does not parse, or validation fails.
    pub fn from_toml_with_env<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = toml::from_str(content)?;
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from the environment and well-known files
    ///
    /// `SOLARIS_CONFIG_PATH` wins, then `solaris.toml` in the working
    /// directory, then built-in defaults. Overrides apply in every case.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_config`].
    pub fn load() -> SolarisResult<Config> {
        let path = env::var(CONFIG_PATH_VAR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()));

        let config = if let Some(path) = path {
            Self::load_config(&path)?
        } else {
            info!("No configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config, |name| env::var(name).ok())?;
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup("SOLARIS_DEFAULT_LANGUAGE") {
            config.languages.default_language = language;
        }

        if let Some(language) = lookup("SOLARIS_FALLBACK_LANGUAGE") {
            config.languages.fallback_language = language;
        }

        if let Some(base) = lookup("SOLARIS_RESOURCE_BASE") {
            config.resources.base = base;
        }

        if let Some(key) = lookup("SOLARIS_PREFERENCE_KEY") {
            config.storage.preference_key = key;
        }

        if let Some(file) = lookup("SOLARIS_PREFERENCE_FILE") {
            config.storage.preference_file = Some(PathBuf::from(file));
        }

        if let Some(level) = lookup("SOLARIS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("SOLARIS_LOG_JSON") {
            config.logging.json = json.parse().map_err(|e| ConfigError::EnvParseError {
                var: "SOLARIS_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}
