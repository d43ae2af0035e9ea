//! Language store: current and fallback codes plus the tree cache.

use parking_lot::RwLock;
use solaris_common::LanguageCode;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::I18nResult;
use crate::resolver::Resolver;
use crate::source::TranslationSource;
use crate::tree::TranslationTree;

/// Owns the current and fallback language codes and caches one
/// [`TranslationTree`] per successfully loaded language.
///
/// The cache has no per-language lock: two loads of the same language may
/// both fetch, and the later one overwrites the earlier with equal content.
#[derive(Debug)]
pub struct LanguageStore<S> {
    source: S,
    fallback: LanguageCode,
    current: RwLock<LanguageCode>,
    translations: RwLock<HashMap<LanguageCode, Arc<TranslationTree>>>,
}

impl<S> LanguageStore<S> {
    /// Creates an empty store. The fallback code never changes afterwards.
    pub fn new(source: S, current: LanguageCode, fallback: LanguageCode) -> Self {
        Self {
            source,
            fallback,
            current: RwLock::new(current),
            translations: RwLock::new(HashMap::new()),
        }
    }

    /// The language currently selected.
    pub fn current_language(&self) -> LanguageCode {
        self.current.read().clone()
    }

    /// The language consulted for missing keys.
    pub fn fallback_language(&self) -> &LanguageCode {
        &self.fallback
    }

    pub(crate) fn set_current(&self, language: LanguageCode) {
        *self.current.write() = language;
    }

    /// Whether a tree is cached for `language`.
    pub fn is_loaded(&self, language: &LanguageCode) -> bool {
        self.translations.read().contains_key(language)
    }

    /// The cached tree for `language`.
    pub fn tree(&self, language: &LanguageCode) -> Option<Arc<TranslationTree>> {
        self.translations.read().get(language).cloned()
    }

    /// Caches a tree obtained elsewhere, replacing any previous one.
    pub fn insert_tree(&self, language: LanguageCode, tree: TranslationTree) -> Arc<TranslationTree> {
        let tree = Arc::new(tree);
        self.translations.write().insert(language, Arc::clone(&tree));
        tree
    }

    /// Languages with a cached tree, sorted.
    pub fn loaded_languages(&self) -> Vec<LanguageCode> {
        let mut languages: Vec<_> = self.translations.read().keys().cloned().collect();
        languages.sort();
        languages
    }

    /// Current and fallback trees as of now.
    pub fn snapshot(&self) -> TreeSnapshot {
        let current = self.current_language();
        let translations = self.translations.read();
        TreeSnapshot {
            current: translations.get(&current).cloned(),
            fallback: translations.get(&self.fallback).cloned(),
            language: current,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: TranslationSource> LanguageStore<S> {
    /// Fetches the tree for `language` and caches it.
    ///
    /// On failure the error is logged and returned, and any tree cached by
    /// an earlier successful load stays in place.
    pub async fn load_language(&self, language: &LanguageCode) -> I18nResult<Arc<TranslationTree>> {
        debug!(language = %language, location = %self.source.location(language), "Loading language");

        match self.source.fetch(language).await {
            Ok(tree) => {
                let tree = self.insert_tree(language.clone(), tree);
                info!(language = %language, entries = tree.len(), "Loaded language");
                Ok(tree)
            }
            Err(e) => {
                error!(language = %language, error = %e, "Error loading language");
                Err(e)
            }
        }
    }
}

/// Trees captured for one resolution or sweep.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    language: LanguageCode,
    current: Option<Arc<TranslationTree>>,
    fallback: Option<Arc<TranslationTree>>,
}

impl TreeSnapshot {
    /// Current language at capture time.
    #[must_use]
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Resolver borrowing the captured trees.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.current.as_deref(), self.fallback.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Replacements;
    use crate::source::StaticSource;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::new(code).unwrap()
    }

    fn store() -> LanguageStore<StaticSource> {
        let source = StaticSource::new()
            .with_document(lang("et"), r#"{"nav": {"home": "Avaleht"}}"#)
            .with_document(lang("en"), r#"{"nav": {"home": "Home", "about": "About"}}"#)
            .with_document(lang("xx"), "{oops");
        LanguageStore::new(source, lang("et"), lang("en"))
    }

    #[tokio::test]
    async fn test_load_caches_tree() {
        let store = store();
        assert!(!store.is_loaded(&lang("et")));

        let tree = store.load_language(&lang("et")).await.unwrap();
        assert_eq!(tree.len(), 1);
        assert!(store.is_loaded(&lang("et")));
        assert_eq!(store.loaded_languages(), vec![lang("et")]);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_language_absent() {
        let store = store();

        assert!(store.load_language(&lang("fi")).await.is_err());
        assert!(!store.is_loaded(&lang("fi")));

        assert!(store.load_language(&lang("xx")).await.is_err());
        assert!(store.tree(&lang("xx")).is_none());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_tree() {
        let store = store();
        let earlier = TranslationTree::from_json_str(&lang("xx"), r#"{"kept": "yes"}"#).unwrap();
        store.insert_tree(lang("xx"), earlier.clone());

        assert!(store.load_language(&lang("xx")).await.is_err());
        assert_eq!(store.tree(&lang("xx")).as_deref(), Some(&earlier));
    }

    #[tokio::test]
    async fn test_snapshot_resolves_with_fallback() {
        let store = store();
        store.load_language(&lang("et")).await.unwrap();
        store.load_language(&lang("en")).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.language(), &lang("et"));

        let resolver = snapshot.resolver();
        let none = Replacements::new();
        assert_eq!(resolver.translate("nav.home", &none), "Avaleht");
        assert_eq!(resolver.translate("nav.about", &none), "About");
        assert_eq!(resolver.translate("nav.missing", &none), "nav.missing");
    }

    #[test]
    fn test_current_language_is_independent_of_cache() {
        let store = store();
        store.set_current(lang("fi"));
        assert_eq!(store.current_language(), lang("fi"));
        assert_eq!(store.fallback_language(), &lang("en"));
        assert!(store.snapshot().resolver().lookup("nav.home").is_none());
    }
}
