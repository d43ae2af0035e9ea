//! Key resolution with fallback and placeholder substitution.

use std::fmt;
use tracing::trace;

use crate::tree::{KeyPath, TranslationTree, TreeNode};

/// Placeholder values for one lookup, applied in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    /// An empty replacement map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overwrites a placeholder, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a placeholder. Re-inserting a name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Entries in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to substitute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (name, value) in iter {
            replacements.insert(name, value);
        }
        replacements
    }
}

/// Replaces every `{name}` in `template`, one entry at a time in order.
///
/// Names match literally. Tokens without a matching entry stay in place.
#[must_use]
pub fn substitute(template: &str, replacements: &Replacements) -> String {
    let mut text = template.to_string();
    for (name, value) in replacements.iter() {
        let token = format!("{{{name}}}");
        if text.contains(&token) {
            text = text.replace(&token, value);
        }
    }
    text
}

/// Outcome of resolving a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Leaf text after substitution, or the literal key on a miss.
    Text(String),
    /// The key named a section rather than a leaf.
    Branch(TreeNode),
}

impl Translation {
    /// Text for display; branches render as compact JSON.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Branch(node) => node.to_display_string(),
        }
    }

    /// The text, if this is a leaf result.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Branch(_) => None,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Branch(node) => f.write_str(&node.to_display_string()),
        }
    }
}

/// Resolves keys against the current tree, then the fallback tree.
///
/// Either tree may be absent when its language failed to load.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver<'a> {
    current: Option<&'a TranslationTree>,
    fallback: Option<&'a TranslationTree>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the given trees.
    #[must_use]
    pub fn new(current: Option<&'a TranslationTree>, fallback: Option<&'a TranslationTree>) -> Self {
        Self { current, fallback }
    }

    /// Finds the node for `key`: a complete walk of the current tree wins,
    /// otherwise the fallback tree is walked from the top.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'a TreeNode> {
        let path = KeyPath::new(key);
        self.current
            .and_then(|tree| tree.lookup(path))
            .or_else(|| self.fallback.and_then(|tree| tree.lookup(path)))
    }

    /// Resolves `key`, substituting placeholders in leaf text.
    ///
    /// A key found in neither tree resolves to itself so that missing
    /// translations stay visible on the page.
    #[must_use]
    pub fn resolve(&self, key: &str, replacements: &Replacements) -> Translation {
        match self.lookup(key) {
            Some(TreeNode::Leaf(text)) => Translation::Text(substitute(text, replacements)),
            Some(branch @ TreeNode::Branch(_)) => Translation::Branch(branch.clone()),
            None => {
                trace!(key, "Translation key not found, using key literal");
                Translation::Text(substitute(key, replacements))
            }
        }
    }

    /// Resolves `key` straight to display text.
    #[must_use]
    pub fn translate(&self, key: &str, replacements: &Replacements) -> String {
        self.resolve(key, replacements).into_string()
    }
}
