//! `wasm-bindgen` exports.
//!
//! Exposes [`SolarisI18n`] to JavaScript:
//!
//! ```js
//! const i18n = new SolarisI18n(undefined, import.meta.url);
//! await i18n.init();
//! i18n.t("greeting.hello", { name: "Mart" });
//! await i18n.changeLanguage("en");
//! ```

use js_sys::{Object, Promise};
use solaris_common::LanguageCode;
use solaris_config::{Config, ConfigLoader};
use solaris_i18n::{HttpSource, I18n, LanguageChange, Replacements, ResourceSource};
use std::rc::Rc;
use std::sync::Once;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::console::init_console_logging;
use crate::dom::WebDocument;
use crate::location::resolve_resource_base;
use crate::storage::LocalStoragePreferences;

type WebI18n = I18n<ResourceSource, LocalStoragePreferences, WebDocument>;

fn install_logging(config: &Config) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        if let Err(e) = init_console_logging(&config.logging_config()) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }
    });
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn language_arg(code: &str) -> Result<LanguageCode, JsValue> {
    LanguageCode::new(code).map_err(js_error)
}

fn js_text(value: &JsValue) -> Option<String> {
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if let Some(number) = value.as_f64() {
        return Some(number.to_string());
    }
    if let Some(flag) = value.as_bool() {
        return Some(flag.to_string());
    }
    js_sys::JSON::stringify(value).ok()?.as_string()
}

/// Converts a plain JS object into replacements. Numbers and booleans are
/// rendered as text, other values as JSON; `undefined` entries are skipped.
fn replacements_from_js(value: &JsValue) -> Replacements {
    if value.is_undefined() || value.is_null() {
        return Replacements::new();
    }

    Object::entries(&Object::from(value.clone()))
        .iter()
        .filter_map(|entry| {
            let pair = js_sys::Array::from(&entry);
            let name = pair.get(0).as_string()?;
            Some((name, js_text(&pair.get(1))?))
        })
        .collect()
}

fn applied(outcome: LanguageChange) -> JsValue {
    JsValue::from_bool(matches!(outcome, LanguageChange::Applied { loaded: true }))
}

/// Page translation service for JavaScript callers.
#[wasm_bindgen]
pub struct SolarisI18n {
    inner: Rc<WebI18n>,
}

#[wasm_bindgen]
impl SolarisI18n {
    /// Creates the service for the current page.
    ///
    /// `config_toml` overrides the built-in defaults using the same TOML
    /// layout as `solaris.toml`. Pass the calling module's `import.meta.url`
    /// as `module_url` to resolve a relative resource base next to that
    /// script; without it the base is resolved against the document base URI.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>, module_url: Option<String>) -> Result<SolarisI18n, JsValue> {
        let config = match config_toml {
            Some(content) => ConfigLoader::from_toml_str(&content).map_err(js_error)?,
            None => Config::default(),
        };
        install_logging(&config);

        let document = WebDocument::current().ok_or_else(|| js_error("no document available"))?;
        let base = resolve_resource_base(
            module_url.as_deref(),
            document.base_uri().as_deref(),
            &config.resources.base,
        )
        .map_err(js_error)?;
        let source = ResourceSource::Http(HttpSource::from_url(base));
        let preferences = LocalStoragePreferences::new(config.storage.preference_key.clone());

        let inner = I18n::new(&config, source, preferences, document).map_err(js_error)?;
        Ok(Self { inner: Rc::new(inner) })
    }

    /// Loads the current (or given) language and the fallback, then sweeps
    /// the page. Resolves to `true` when the current language loaded.
    pub fn init(&self, language: Option<String>) -> Result<Promise, JsValue> {
        let language = language.as_deref().map(language_arg).transpose()?;
        let inner = Rc::clone(&self.inner);
        Ok(future_to_promise(async move {
            let outcome = inner.init(language).await;
            Ok(applied(outcome))
        }))
    }

    /// Switches language, persists it and sweeps the page. Resolves to
    /// `false` when the language failed to load or a later change won.
    #[wasm_bindgen(js_name = changeLanguage)]
    pub fn change_language(&self, language: &str) -> Result<Promise, JsValue> {
        let language = language_arg(language)?;
        let inner = Rc::clone(&self.inner);
        Ok(future_to_promise(async move {
            let outcome = inner.change_language(language).await;
            if outcome == LanguageChange::Superseded {
                warn!("Language change superseded by a later one");
            }
            Ok(applied(outcome))
        }))
    }

    /// Resolves a key with optional `{name}` replacements.
    pub fn t(&self, key: &str, replacements: JsValue) -> String {
        self.inner.t(key, &replacements_from_js(&replacements))
    }

    /// The current language code.
    #[wasm_bindgen(js_name = getCurrentLanguage)]
    pub fn current_language(&self) -> String {
        self.inner.current_language().to_string()
    }

    /// Re-sweeps the page, e.g. after inserting marked elements. Returns the
    /// number of writes.
    #[wasm_bindgen(js_name = applyTranslations)]
    pub fn apply_translations(&self) -> u32 {
        u32::try_from(self.inner.apply_translations().total()).unwrap_or(u32::MAX)
    }
}
