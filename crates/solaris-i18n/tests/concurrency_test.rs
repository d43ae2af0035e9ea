//! Overlapping language changes: the most recent request always wins

use async_trait::async_trait;
use solaris_common::test_utils::translation_fixtures::{EN_JSON, ET_JSON};
use solaris_common::test_utils::{init_test_logging, lang};
use solaris_common::LanguageCode;
use solaris_config::MarkerConfig;
use solaris_i18n::{
    I18n, I18nResult, LanguageChange, MemoryDocument, MemoryElement, MemoryPreferences, PreferenceStore,
    StaticSource, TranslationSource, TranslationTree,
};
use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

/// Serves static documents after a per-language delay
struct DelayedSource {
    inner: StaticSource,
    delays: HashMap<LanguageCode, Duration>,
}

impl DelayedSource {
    fn new(delays: &[(&str, u64)]) -> Self {
        let inner = StaticSource::new()
            .with_document(lang("et"), ET_JSON)
            .with_document(lang("en"), EN_JSON)
            .with_document(lang("fi"), r#"{"nav": {"home": "Koti"}}"#);
        let delays = delays
            .iter()
            .map(|(code, ms)| (lang(code), Duration::from_millis(*ms)))
            .collect();
        Self { inner, delays }
    }
}

#[async_trait]
impl TranslationSource for DelayedSource {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        if let Some(delay) = self.delays.get(language) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.fetch(language).await
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.inner.location(language)
    }
}

fn service(source: DelayedSource) -> I18n<DelayedSource, MemoryPreferences, MemoryDocument> {
    let mut doc = MemoryDocument::new();
    doc.push(MemoryElement::new("a").with_attribute("data-i18n", "nav.home"));
    I18n::with_languages(
        lang("et"),
        lang("en"),
        MarkerConfig::default(),
        source,
        MemoryPreferences::new(),
        doc,
    )
}

#[tokio::test]
async fn test_slow_earlier_change_is_superseded() {
    init_test_logging();
    let i18n = service(DelayedSource::new(&[("fi", 200), ("en", 10)]));

    let (slow, fast) = tokio::join!(i18n.change_language(lang("fi")), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        i18n.change_language(lang("en")).await
    });

    assert_eq!(slow, LanguageChange::Superseded);
    assert_eq!(fast, LanguageChange::Applied { loaded: true });
    assert_eq!(i18n.current_language(), lang("en"));
    assert_eq!(i18n.preferences().load(), Some(lang("en")));
    assert_eq!(i18n.document().language(), Some("en"));
    assert_eq!(i18n.document().elements()[0].text(), "Home");

    // The superseded load still populated the cache
    assert!(i18n.store().is_loaded(&lang("fi")));
}

#[tokio::test]
async fn test_later_change_wins_even_when_it_finishes_last() {
    let i18n = service(DelayedSource::new(&[("fi", 10), ("en", 200)]));

    let (first, second) = tokio::join!(i18n.change_language(lang("fi")), async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        i18n.change_language(lang("en")).await
    });

    assert_eq!(first, LanguageChange::Superseded);
    assert_eq!(second, LanguageChange::Applied { loaded: true });
    assert_eq!(i18n.current_language(), lang("en"));
    assert_eq!(i18n.document().elements()[0].text(), "Home");
}

#[tokio::test]
async fn test_change_during_init_supersedes_initial_sweep() {
    let i18n = service(DelayedSource::new(&[("et", 200)]));

    let (initial, change) = tokio::join!(i18n.init(None), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        i18n.change_language(lang("fi")).await
    });

    assert_eq!(initial, LanguageChange::Superseded);
    assert_eq!(change, LanguageChange::Applied { loaded: true });
    assert_eq!(i18n.current_language(), lang("fi"));
    assert_eq!(i18n.document().elements()[0].text(), "Koti");
}

#[tokio::test]
async fn test_sequential_changes_all_apply() {
    let i18n = service(DelayedSource::new(&[]));

    assert_eq!(i18n.init(None).await, LanguageChange::Applied { loaded: true });
    assert_eq!(
        i18n.change_language(lang("fi")).await,
        LanguageChange::Applied { loaded: true }
    );
    assert_eq!(
        i18n.change_language(lang("et")).await,
        LanguageChange::Applied { loaded: true }
    );
    assert_eq!(i18n.document().elements()[0].text(), "Avaleht");
}

/// Blocks inside `save` for one language until the test releases it
struct GatedPreferences {
    inner: MemoryPreferences,
    gated: LanguageCode,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl PreferenceStore for GatedPreferences {
    fn load(&self) -> Option<LanguageCode> {
        self.inner.load()
    }

    fn save(&self, language: &LanguageCode) -> I18nResult<()> {
        if *language == self.gated {
            self.entered.lock().unwrap().send(()).unwrap();
            let _ = self.release.lock().unwrap().recv_timeout(Duration::from_secs(5));
        }
        self.inner.save(language)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_change_committing_on_another_thread_cannot_overwrite_newer_change() {
    init_test_logging();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let preferences = GatedPreferences {
        inner: MemoryPreferences::new(),
        gated: lang("fi"),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };

    let mut doc = MemoryDocument::new();
    doc.push(MemoryElement::new("a").with_attribute("data-i18n", "nav.home"));
    let i18n = Arc::new(I18n::with_languages(
        lang("et"),
        lang("en"),
        MarkerConfig::default(),
        DelayedSource::new(&[]),
        preferences,
        doc,
    ));

    let first = tokio::spawn({
        let i18n = Arc::clone(&i18n);
        async move { i18n.change_language(lang("fi")).await }
    });
    // The "fi" change has passed its ticket check and is persisting
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    let second = tokio::spawn({
        let i18n = Arc::clone(&i18n);
        async move { i18n.change_language(lang("en")).await }
    });
    std::thread::sleep(Duration::from_millis(50));
    release_tx.send(()).unwrap();

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    // "fi" committed before "en" took its ticket; "en" was requested last
    assert_eq!(first, LanguageChange::Applied { loaded: true });
    assert_eq!(second, LanguageChange::Applied { loaded: true });
    assert_eq!(i18n.current_language(), lang("en"));
    assert_eq!(i18n.preferences().load(), Some(lang("en")));
    assert_eq!(i18n.document().language(), Some("en"));
    assert_eq!(i18n.document().elements()[0].text(), "Home");
}
