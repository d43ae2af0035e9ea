//! Integration tests for the translation service over on-disk resources

use async_trait::async_trait;
use solaris_common::test_utils::translation_fixtures::{EN_JSON, ET_JSON, MALFORMED_JSON};
use solaris_common::test_utils::{create_temp_dir, init_test_logging, lang};
use solaris_common::LanguageCode;
use solaris_config::{Config, MarkerConfig, StorageConfig};
use solaris_i18n::{
    FilePreferences, FileSource, I18n, I18nResult, LanguageChange, MemoryDocument, MemoryElement, MemoryPreferences,
    PreferenceStore, Replacements, ResourceSource, TranslationSource, TranslationTree,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a temporary directory with `et.json`, `en.json` and a broken `xx.json`
fn create_test_resources() -> TempDir {
    let temp_dir = create_temp_dir();
    fs::write(temp_dir.path().join("et.json"), ET_JSON).unwrap();
    fs::write(temp_dir.path().join("en.json"), EN_JSON).unwrap();
    fs::write(temp_dir.path().join("xx.json"), MALFORMED_JSON).unwrap();
    temp_dir
}

fn page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.push(MemoryElement::new("a").with_attribute("data-i18n", "nav.home"));
    doc.push(MemoryElement::new("a").with_attribute("data-i18n", "nav.about"));
    doc.push(MemoryElement::new("input").with_attribute("data-i18n-placeholder", "form.search"));
    doc.push(
        MemoryElement::new("button")
            .with_attribute("data-i18n", "nav.settings")
            .with_attribute("data-i18n-attr", "aria-label")
            .with_text("⚙"),
    );
    doc.push(MemoryElement::new("span").with_attribute("data-i18n", "missing.key"));
    doc.push(MemoryElement::new("meta").with_attribute("data-i18n-title", "page.title"));
    doc
}

fn service(dir: &TempDir, preferences: MemoryPreferences) -> I18n<FileSource, MemoryPreferences, MemoryDocument> {
    I18n::with_languages(
        lang("et"),
        lang("en"),
        MarkerConfig::default(),
        FileSource::new(dir.path()),
        preferences,
        page(),
    )
}

/// Wraps a source and records every fetch it serves
struct CountingSource<S> {
    inner: S,
    fetches: Mutex<Vec<LanguageCode>>,
}

impl<S> CountingSource<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: Mutex::new(Vec::new()),
        }
    }

    fn fetches_of(&self, language: &LanguageCode) -> usize {
        self.fetches.lock().unwrap().iter().filter(|l| *l == language).count()
    }
}

#[async_trait]
impl<S: TranslationSource + Send + Sync> TranslationSource for CountingSource<S> {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        self.fetches.lock().unwrap().push(language.clone());
        self.inner.fetch(language).await
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.inner.location(language)
    }
}

#[tokio::test]
async fn test_init_sweeps_document_with_fallback() {
    init_test_logging();
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::new());

    let outcome = i18n.init(None).await;
    assert_eq!(outcome, LanguageChange::Applied { loaded: true });
    assert_eq!(i18n.store().loaded_languages(), vec![lang("en"), lang("et")]);

    let doc = i18n.document();
    let texts: Vec<&str> = doc.elements().iter().map(MemoryElement::text).collect();
    assert_eq!(texts[0], "Avaleht");
    assert_eq!(texts[1], "About");
    assert_eq!(texts[4], "missing.key");
    assert_eq!(doc.elements()[2].attribute("placeholder"), Some("Otsi..."));
    assert_eq!(doc.elements()[3].attribute("aria-label"), Some("Seaded"));
    assert_eq!(doc.elements()[3].text(), "⚙");
    assert_eq!(doc.title(), "Solaris juhtpaneel");
    assert_eq!(doc.language(), Some("et"));
}

#[tokio::test]
async fn test_init_with_override_language() {
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::new());

    i18n.init(Some(lang("en"))).await;

    assert_eq!(i18n.current_language(), lang("en"));
    assert_eq!(i18n.store().loaded_languages(), vec![lang("en")]);
    assert_eq!(i18n.document().title(), "Solaris dashboard");
    assert_eq!(i18n.document().language(), Some("en"));
}

#[tokio::test]
async fn test_init_proceeds_when_everything_fails() {
    let dir = create_temp_dir();
    let i18n = service(&dir, MemoryPreferences::new());

    let outcome = i18n.init(None).await;
    assert_eq!(outcome, LanguageChange::Applied { loaded: false });

    let doc = i18n.document();
    assert_eq!(doc.elements()[0].text(), "nav.home");
    assert_eq!(doc.title(), "page.title");
    assert_eq!(doc.language(), Some("et"));
}

#[tokio::test]
async fn test_init_reports_cached_tree_when_reload_fails() {
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::new());
    i18n.store()
        .insert_tree(lang("et"), TranslationTree::from_json_str(&lang("et"), ET_JSON).unwrap());
    fs::remove_file(dir.path().join("et.json")).unwrap();

    let outcome = i18n.init(None).await;

    assert_eq!(outcome, LanguageChange::Applied { loaded: true });
    assert!(i18n.store().is_loaded(&lang("et")));
    assert_eq!(i18n.document().elements()[0].text(), "Avaleht");
}

#[tokio::test]
async fn test_resolution_scenarios() {
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::new());
    i18n.init(None).await;

    let name = Replacements::new().with("name", "Mart");
    assert_eq!(i18n.t("greeting.hello", &name), "Tere, Mart!");
    assert_eq!(i18n.t("status.offline", &Replacements::new()), "Server unreachable");
    assert_eq!(i18n.t("missing.key", &Replacements::new()), "missing.key");

    let counts = Replacements::new().with("count", 3).with("total", 10);
    assert_eq!(i18n.t("greeting.count", &counts), "3 of 10 items, 3 shown");

    let section = i18n.resolve("nav", &Replacements::new());
    assert!(section.as_text().is_none());
    assert!(section.to_string().contains("\"home\":\"Avaleht\""));
}

#[tokio::test]
async fn test_change_language_loads_once_and_persists_even_on_failure() {
    let dir = create_test_resources();
    let source = CountingSource::new(FileSource::new(dir.path().join("empty")));
    let i18n = I18n::with_languages(
        lang("et"),
        lang("en"),
        MarkerConfig::default(),
        source,
        MemoryPreferences::new(),
        page(),
    );

    let outcome = i18n.change_language(lang("en")).await;

    assert_eq!(outcome, LanguageChange::Applied { loaded: false });
    assert_eq!(i18n.store().source().fetches_of(&lang("en")), 1);
    assert_eq!(i18n.current_language(), lang("en"));
    assert_eq!(i18n.preferences().load(), Some(lang("en")));
    assert_eq!(i18n.document().language(), Some("en"));
}

#[tokio::test]
async fn test_change_language_uses_cache() {
    let dir = create_test_resources();
    let source = CountingSource::new(FileSource::new(dir.path()));
    let i18n = I18n::with_languages(
        lang("et"),
        lang("en"),
        MarkerConfig::default(),
        source,
        MemoryPreferences::new(),
        page(),
    );

    i18n.init(None).await;
    i18n.change_language(lang("en")).await;
    i18n.change_language(lang("et")).await;

    let source = i18n.store().source();
    assert_eq!(source.fetches_of(&lang("et")), 1);
    assert_eq!(source.fetches_of(&lang("en")), 1);
    assert_eq!(i18n.document().elements()[0].text(), "Avaleht");
}

#[tokio::test]
async fn test_malformed_resource_keeps_language_unloaded() {
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::new());
    i18n.init(None).await;

    let outcome = i18n.change_language(lang("xx")).await;

    assert_eq!(outcome, LanguageChange::Applied { loaded: false });
    assert!(!i18n.store().is_loaded(&lang("xx")));
    assert_eq!(i18n.current_language(), lang("xx"));
    // Nothing for "xx", so the fallback language fills in
    assert_eq!(i18n.document().elements()[0].text(), "Home");
}

#[tokio::test]
async fn test_stored_preference_wins_over_default() {
    let dir = create_test_resources();
    let i18n = service(&dir, MemoryPreferences::with_language(lang("en")));

    assert_eq!(i18n.current_language(), lang("en"));
    i18n.init(None).await;
    assert_eq!(i18n.document().elements()[0].text(), "Home");
}

#[tokio::test]
async fn test_from_config_with_file_preferences() {
    let resources = create_test_resources();
    let state = create_temp_dir();
    let prefs_path = state.path().join("prefs.json");

    let mut config = Config {
        storage: StorageConfig {
            preference_file: Some(prefs_path.clone()),
            ..StorageConfig::default()
        },
        ..Config::default()
    };
    config.resources.base = resources.path().display().to_string();

    let i18n = I18n::from_config(&config, page()).unwrap();
    assert!(matches!(i18n.store().source(), ResourceSource::File(_)));

    i18n.init(None).await;
    i18n.change_language(lang("en")).await;

    let stored = FilePreferences::new(&prefs_path, "solaris_language").load();
    assert_eq!(stored, Some(lang("en")));

    // A second service picks the stored language up
    let reopened = I18n::from_config(&config, page()).unwrap();
    assert_eq!(reopened.current_language(), lang("en"));
}

#[test]
fn test_from_config_rejects_invalid_language() {
    let mut config = Config::default();
    config.languages.default_language = "../etc".to_string();

    assert!(I18n::from_config(&config, MemoryDocument::new()).is_err());
}
