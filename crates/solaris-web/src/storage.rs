//! Language preference in `window.localStorage`.

use solaris_common::{LanguageCode, SolarisError};
use solaris_i18n::{I18nError, I18nResult, PreferenceStore};
use tracing::{debug, warn};
use web_sys::Storage;

/// Stores the chosen language under a fixed `localStorage` key.
///
/// When storage is unavailable (disabled, sandboxed frame) loads return
/// nothing and saves fail without affecting the language change.
#[derive(Debug, Clone)]
pub struct LocalStoragePreferences {
    key: String,
}

impl LocalStoragePreferences {
    /// Creates a store using `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn load(&self) -> Option<LanguageCode> {
        let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
        match LanguageCode::new(&raw) {
            Ok(language) => {
                debug!(language = %language, "Loaded language preference");
                Some(language)
            }
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring invalid stored language");
                None
            }
        }
    }

    fn save(&self, language: &LanguageCode) -> I18nResult<()> {
        let storage =
            Self::storage().ok_or_else(|| I18nError::Preference(SolarisError::storage("localStorage is unavailable")))?;

        storage
            .set_item(&self.key, language.as_str())
            .map_err(|e| I18nError::Preference(SolarisError::storage(format!("localStorage write failed: {e:?}"))))
    }
}
