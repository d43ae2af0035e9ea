//! The page-wide translation service

use parking_lot::{Mutex, MutexGuard};
use solaris_common::LanguageCode;
use solaris_config::{Config, MarkerConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::binder::{apply_translations, SweepReport};
use crate::document::Document;
use crate::error::I18nResult;
use crate::preference::{preferences_for, PreferenceStore};
use crate::resolver::{Replacements, Translation};
use crate::source::ResourceSource;
use crate::store::LanguageStore;

/// Result of [`I18n::init`] or [`I18n::change_language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChange {
    /// The language was committed and the document swept. `loaded` says
    /// whether a tree for it is available; when it is not, lookups fall back.
    Applied {
        /// Whether the language has a cached tree
        loaded: bool,
    },
    /// A later request arrived while this one was loading, so this one did
    /// not touch the current language, the preference or the document.
    Superseded,
}

/// Translation service constructed once at startup and shared by reference.
///
/// Owns the [`LanguageStore`], the persisted preference and the document
/// being translated. Every `init`/`change_language` call takes a ticket; a
/// call whose ticket has been overtaken by the time its load finishes is
/// discarded, so the most recently requested language always wins.
pub struct I18n<S, P, D> {
    store: LanguageStore<S>,
    preferences: P,
    document: Mutex<D>,
    markers: MarkerConfig,
    sequence: AtomicU64,
}

impl<D: Document> I18n<ResourceSource, Box<dyn PreferenceStore + Send + Sync>, D> {
    /// Builds a service wired from configuration: resources from
    /// `resources.base`, preferences from `storage`.
    ///
    /// # Errors
    ///
    /// Fails when a configured language code or the resource base is invalid.
    pub fn from_config(config: &Config, document: D) -> I18nResult<Self> {
        let source = ResourceSource::for_base(&config.resources.base)?;
        let preferences = preferences_for(&config.storage);
        Self::new(config, source, preferences, document)
    }
}

impl<S, P, D> I18n<S, P, D>
where
    P: PreferenceStore,
    D: Document,
{
    /// Creates the service. The persisted preference is read here, once;
    /// without one the configured default language is current.
    ///
    /// # Errors
    ///
    /// Fails when a configured language code is invalid.
    pub fn new(config: &Config, source: S, preferences: P, document: D) -> I18nResult<Self> {
        let default_language = config.default_language()?;
        let fallback_language = config.fallback_language()?;
        Ok(Self::with_languages(
            default_language,
            fallback_language,
            config.markers.clone(),
            source,
            preferences,
            document,
        ))
    }

    /// Creates the service from already parsed parts.
    pub fn with_languages(
        default_language: LanguageCode,
        fallback_language: LanguageCode,
        markers: MarkerConfig,
        source: S,
        preferences: P,
        document: D,
    ) -> Self {
        let current = preferences.load().unwrap_or(default_language);
        info!(current = %current, fallback = %fallback_language, "I18n service created");

        Self {
            store: LanguageStore::new(source, current, fallback_language),
            preferences,
            document: Mutex::new(document),
            markers,
            sequence: AtomicU64::new(0),
        }
    }

    /// The current language code.
    pub fn current_language(&self) -> LanguageCode {
        self.store.current_language()
    }

    /// The fixed fallback language code.
    pub fn fallback_language(&self) -> &LanguageCode {
        self.store.fallback_language()
    }

    /// Resolves `key` to display text under the current language.
    pub fn t(&self, key: &str, replacements: &Replacements) -> String {
        self.store.snapshot().resolver().translate(key, replacements)
    }

    /// Resolves `key`, keeping a section result as a tree node.
    pub fn resolve(&self, key: &str, replacements: &Replacements) -> Translation {
        self.store.snapshot().resolver().resolve(key, replacements)
    }

    /// Sweeps the whole document with the trees loaded right now.
    pub fn apply_translations(&self) -> SweepReport {
        let snapshot = self.store.snapshot();
        let mut document = self.document.lock();
        apply_translations(&snapshot.resolver(), &self.markers, &mut *document)
    }

    /// Locks the document for inspection or edits between sweeps.
    pub fn document(&self) -> MutexGuard<'_, D> {
        self.document.lock()
    }

    /// The language store.
    pub fn store(&self) -> &LanguageStore<S> {
        &self.store
    }

    /// The preference store.
    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    /// Marker attribute names used by sweeps.
    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    fn next_ticket(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_superseded(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) != ticket
    }

    /// Commits `language` unless `ticket` has been overtaken.
    ///
    /// The document lock doubles as the commit lock: the ticket check, the
    /// current language, the saved preference, the `lang` attribute and the
    /// sweep all change together, so a request that passed the check can
    /// never land after a newer one.
    fn commit(&self, ticket: u64, language: &LanguageCode, persist: bool) -> Option<SweepReport> {
        let mut document = self.document.lock();
        if self.is_superseded(ticket) {
            return None;
        }

        self.store.set_current(language.clone());
        if persist {
            if let Err(e) = self.preferences.save(language) {
                warn!(language = %language, error = %e, "Failed to persist language preference");
            }
        }

        let snapshot = self.store.snapshot();
        document.set_language(language);
        Some(apply_translations(&snapshot.resolver(), &self.markers, &mut *document))
    }
}

impl<S, P, D> I18n<S, P, D>
where
    S: crate::source::TranslationSource,
    P: PreferenceStore,
    D: Document,
{
    /// Loads `language` (or the current language), then the fallback
    /// language if it differs, then commits it as current and sweeps the
    /// document.
    ///
    /// Load failures are logged and never abort: the sweep uses whatever
    /// trees are available, down to literal keys.
    pub async fn init(&self, language: Option<LanguageCode>) -> LanguageChange {
        let ticket = self.next_ticket();
        let current = language.unwrap_or_else(|| self.store.current_language());

        // A failed reload keeps a tree cached earlier, so ask the cache
        let _ = self.store.load_language(&current).await;
        let loaded = self.store.is_loaded(&current);

        let fallback = self.store.fallback_language().clone();
        if current != fallback && self.store.load_language(&fallback).await.is_err() {
            warn!(fallback = %fallback, "Fallback language unavailable, missing keys will show literally");
        }

        let Some(report) = self.commit(ticket, &current, false) else {
            debug!(language = %current, "Initial sweep superseded by a later language change");
            return LanguageChange::Superseded;
        };

        info!(language = %current, loaded, writes = report.total(), "I18n initialized");
        LanguageChange::Applied { loaded }
    }

    /// Switches to `language`, loading its tree first if it is not cached.
    ///
    /// The language is committed, persisted and swept even when its load
    /// fails, unless a later request supersedes this one while loading.
    pub async fn change_language(&self, language: LanguageCode) -> LanguageChange {
        let ticket = self.next_ticket();

        if !self.store.is_loaded(&language) {
            let _ = self.store.load_language(&language).await;
        }
        let loaded = self.store.is_loaded(&language);

        let Some(report) = self.commit(ticket, &language, true) else {
            debug!(language = %language, "Language change superseded by a later request");
            return LanguageChange::Superseded;
        };

        info!(language = %language, loaded, writes = report.total(), "Language changed");
        LanguageChange::Applied { loaded }
    }
}

impl<S, P, D> std::fmt::Debug for I18n<S, P, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current", &self.store.current_language())
            .field("fallback", self.store.fallback_language())
            .field("loaded", &self.store.loaded_languages())
            .finish_non_exhaustive()
    }
}
