//! The slice of a DOM the binder reads and writes.

use solaris_common::LanguageCode;
use std::collections::BTreeMap;

/// A document whose elements carry translation marker attributes.
///
/// Element handles are whatever the host uses to address an element; they
/// are only valid for the sweep that produced them.
pub trait Document {
    /// Handle to one element.
    type Element;

    /// Every element carrying `attribute`, in document order.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<Self::Element>;

    /// The first element carrying `attribute`.
    fn first_element_with_attribute(&self, attribute: &str) -> Option<Self::Element> {
        self.elements_with_attribute(attribute).into_iter().next()
    }

    /// Value of `name` on `element`.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Sets `name` on `element`.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Replaces the text content of `element`.
    fn set_text_content(&mut self, element: &Self::Element, text: &str);

    /// Replaces the document title.
    fn set_title(&mut self, title: &str);

    /// Sets the language attribute of the root element.
    fn set_language(&mut self, language: &LanguageCode);
}

/// Index of an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
}

impl MemoryElement {
    /// An element with no attributes and no text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text content, builder style.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// An in-memory document for native hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    title: String,
    language: Option<String>,
}

impl MemoryDocument {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element at the end of the document.
    pub fn push(&mut self, element: MemoryElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Looks up an element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.elements.get(id.0)
    }

    /// All elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[MemoryElement] {
        &self.elements
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Language attribute of the root element.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl Document for MemoryDocument {
    type Element = ElementId;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.attributes.contains_key(attribute))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn first_element_with_attribute(&self, attribute: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|element| element.attributes.contains_key(attribute))
            .map(ElementId)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.element(*element)
            .and_then(|element| element.attribute(name))
            .map(str::to_string)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_text_content(&mut self, element: &ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.text = text.to_string();
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_language(&mut self, language: &LanguageCode) {
        self.language = Some(language.to_string());
    }
}
