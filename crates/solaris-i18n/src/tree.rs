//! Translation trees and key path traversal.
//!
//! A translation document is a JSON object whose values are either nested
//! objects or leaf strings. Beyond requiring an object at the root nothing is
//! validated: numbers and booleans become leaves holding their JSON text,
//! arrays become branches keyed by index and `null` entries are dropped.

use serde::Serialize;
use serde_json::Value;
use solaris_common::LanguageCode;
use std::collections::BTreeMap;

use crate::error::{I18nError, I18nResult};

/// One node of a translation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Display text, possibly containing `{placeholder}` tokens.
    Leaf(String),
    /// Nested section.
    Branch(BTreeMap<String, TreeNode>),
}

impl TreeNode {
    /// Text of a leaf node.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Branch(_) => None,
        }
    }

    /// Child of a branch node.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&TreeNode> {
        match self {
            Self::Branch(children) => children.get(segment),
            Self::Leaf(_) => None,
        }
    }

    /// Renders the node for display. Branches become compact JSON.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Leaf(text) => text.clone(),
            Self::Branch(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// Converts a JSON value, returning `None` for `null`.
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(Self::Leaf(text)),
            Value::Bool(flag) => Some(Self::Leaf(flag.to_string())),
            Value::Number(number) => Some(Self::Leaf(number.to_string())),
            Value::Array(items) => Some(Self::Branch(
                items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, item)| Self::from_value(item).map(|node| (i.to_string(), node)))
                    .collect(),
            )),
            Value::Object(map) => Some(Self::Branch(convert_object(map))),
        }
    }
}

fn convert_object(map: serde_json::Map<String, Value>) -> BTreeMap<String, TreeNode> {
    map.into_iter()
        .filter_map(|(key, value)| TreeNode::from_value(value).map(|node| (key, node)))
        .collect()
}

/// A dotted lookup key such as `"section.subsection.key"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath<'a>(&'a str);

impl<'a> KeyPath<'a> {
    /// Wraps a raw key.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// The key as written.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Segments in lookup order. Empty segments are literal empty keys.
    pub fn segments(&self) -> std::str::Split<'a, char> {
        self.0.split('.')
    }
}

impl<'a> From<&'a str> for KeyPath<'a> {
    fn from(raw: &'a str) -> Self {
        Self(raw)
    }
}

/// The parsed translation document for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTree {
    root: BTreeMap<String, TreeNode>,
}

impl TranslationTree {
    /// Builds a tree from an already converted root mapping.
    #[must_use]
    pub fn new(root: BTreeMap<String, TreeNode>) -> Self {
        Self { root }
    }

    /// Parses a JSON document for `language`.
    ///
    /// # Errors
    ///
    /// [`I18nError::ResourceParse`] for invalid JSON and
    /// [`I18nError::InvalidResource`] when the root is not an object.
    pub fn from_json_str(language: &LanguageCode, json: &str) -> I18nResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|source| I18nError::ResourceParse {
            language: language.clone(),
            source,
        })?;
        Self::from_value(language, value)
    }

    /// Parses a JSON document from raw bytes.
    ///
    /// # Errors
    ///
    /// Same as [`TranslationTree::from_json_str`].
    pub fn from_json_slice(language: &LanguageCode, json: &[u8]) -> I18nResult<Self> {
        let value: Value = serde_json::from_slice(json).map_err(|source| I18nError::ResourceParse {
            language: language.clone(),
            source,
        })?;
        Self::from_value(language, value)
    }

    /// Converts a JSON value whose root must be an object.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidResource`] when the root is not an object.
    pub fn from_value(language: &LanguageCode, value: Value) -> I18nResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(convert_object(map))),
            other => Err(I18nError::InvalidResource {
                language: language.clone(),
                reason: format!("document root must be an object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Walks the tree segment by segment. Returns `None` as soon as a segment
    /// is missing or the walk reaches a leaf with segments left over.
    #[must_use]
    pub fn lookup<'k>(&self, key: impl Into<KeyPath<'k>>) -> Option<&TreeNode> {
        let mut segments = key.into().segments();
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Top-level entries.
    #[must_use]
    pub fn root(&self) -> &BTreeMap<String, TreeNode> {
        &self.root
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Whether the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Dotted paths of every leaf, in key order.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        fn collect(prefix: &str, children: &BTreeMap<String, TreeNode>, out: &mut Vec<String>) {
            for (key, node) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match node {
                    TreeNode::Leaf(_) => out.push(path),
                    TreeNode::Branch(nested) => collect(&path, nested, out),
                }
            }
        }

        let mut keys = Vec::new();
        collect("", &self.root, &mut keys);
        keys
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
