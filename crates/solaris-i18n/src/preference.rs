//! Persisted language preference.
//!
//! The chosen language is read once when the service is built and written on
//! every language change. Storage failures never block a change.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use solaris_common::{LanguageCode, SolarisError};
use solaris_config::StorageConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{I18nError, I18nResult};

/// Durable key-value storage for the chosen language.
pub trait PreferenceStore {
    /// The stored language, if one was saved and is still a valid code.
    fn load(&self) -> Option<LanguageCode>;

    /// Stores `language` as the preference.
    ///
    /// # Errors
    ///
    /// [`crate::I18nError::Preference`] when the backing storage fails.
    fn save(&self, language: &LanguageCode) -> I18nResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self) -> Option<LanguageCode> {
        (**self).load()
    }

    fn save(&self, language: &LanguageCode) -> I18nResult<()> {
        (**self).save(language)
    }
}

/// File-backed preferences when a file is configured, session-only otherwise.
#[must_use]
pub fn preferences_for(config: &StorageConfig) -> Box<dyn PreferenceStore + Send + Sync> {
    match &config.preference_file {
        Some(path) => Box::new(FilePreferences::new(path.clone(), config.preference_key.clone())),
        None => Box::new(MemoryPreferences::new()),
    }
}

/// Keeps the preference for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    value: Mutex<Option<LanguageCode>>,
}

impl MemoryPreferences {
    /// No stored preference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `language` already stored.
    #[must_use]
    pub fn with_language(language: LanguageCode) -> Self {
        Self {
            value: Mutex::new(Some(language)),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<LanguageCode> {
        self.value.lock().clone()
    }

    fn save(&self, language: &LanguageCode) -> I18nResult<()> {
        *self.value.lock() = Some(language.clone());
        Ok(())
    }
}

/// Stores preferences as one JSON object in a file, under a fixed key.
///
/// Other keys in the file are left untouched, so several settings can share
/// it the way they share browser storage.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    key: String,
}

impl FilePreferences {
    /// Creates a store writing `key` into the JSON object at `path`.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File content, or `None` when there is no file yet.
    fn read_file(&self) -> std::io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn parse_map(content: &str) -> Option<Map<String, Value>> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SolarisError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Option<LanguageCode> {
        let content = match self.read_file() {
            Ok(content) => content?,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable preference file");
                return None;
            }
        };
        let Some(map) = Self::parse_map(&content) else {
            warn!(path = %self.path.display(), "Ignoring preference file that is not a JSON object");
            return None;
        };

        let raw = map.get(&self.key)?.as_str()?;
        match LanguageCode::new(raw) {
            Ok(language) => {
                debug!(language = %language, "Loaded language preference");
                Some(language)
            }
            Err(e) => {
                warn!(value = raw, error = %e, "Ignoring invalid stored language");
                None
            }
        }
    }

    fn save(&self, language: &LanguageCode) -> I18nResult<()> {
        let content = self.read_file().map_err(|e| {
            I18nError::Preference(SolarisError::storage_with_source(
                format!("cannot read preference file {}", self.path.display()),
                e,
            ))
        })?;

        let mut map = match content.as_deref().map(Self::parse_map) {
            None => Map::new(),
            Some(Some(map)) => map,
            Some(None) => {
                warn!(path = %self.path.display(), "Replacing preference file that is not a JSON object");
                Map::new()
            }
        };

        map.insert(self.key.clone(), Value::String(language.to_string()));
        self.write_map(&map).map_err(I18nError::Preference)?;
        debug!(language = %language, path = %self.path.display(), "Saved language preference");
        Ok(())
    }
}
