//! [`Document`] over the live browser DOM.

use solaris_common::LanguageCode;
use solaris_i18n::Document;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// The page document, addressed through attribute selectors.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// Wraps a DOM document.
    #[must_use]
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    #[must_use]
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// The wrapped DOM document.
    #[must_use]
    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }

    /// Base URI relative resource paths are resolved against.
    #[must_use]
    pub fn base_uri(&self) -> Option<String> {
        self.document.base_uri().ok().flatten()
    }
}

fn selector(attribute: &str) -> String {
    format!("[{attribute}]")
}

impl Document for WebDocument {
    type Element = Element;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(&selector(attribute)) {
            Ok(list) => list,
            Err(e) => {
                warn!(attribute, error = ?e, "Marker query failed");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn first_element_with_attribute(&self, attribute: &str) -> Option<Element> {
        self.document.query_selector(&selector(attribute)).ok().flatten()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            warn!(attribute = name, error = ?e, "Failed to set attribute");
        }
    }

    fn set_text_content(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn set_language(&mut self, language: &LanguageCode) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute("lang", language.as_str()) {
            warn!(language = %language, error = ?e, "Failed to set document language");
        }
    }
}
