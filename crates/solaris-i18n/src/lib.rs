//! # Solaris I18n
//!
//! Client-side translation support for the Solaris web page. It provides:
//!
//! - Language store: current and fallback languages plus a cache of loaded
//!   translation trees, fetched from files or over HTTP
//! - Key resolution with fallback and `{name}` placeholder substitution
//! - A binder that sweeps a document and writes translations into elements
//!   carrying `data-i18n*` marker attributes
//! - A persisted language preference
//!
//! Missing keys never fail: they resolve from the fallback language, and
//! otherwise to the key itself.
//!
//! # Example
//!
//! ```rust
//! use solaris_common::LanguageCode;
//! use solaris_config::MarkerConfig;
//! use solaris_i18n::{I18n, MemoryDocument, MemoryElement, MemoryPreferences, Replacements, StaticSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let et = LanguageCode::new("et")?;
//! let en = LanguageCode::new("en")?;
//! let source = StaticSource::new()
//!     .with_document(et.clone(), r#"{"greeting": {"hello": "Tere, {name}!"}}"#)
//!     .with_document(en.clone(), r#"{"greeting": {"hello": "Hello, {name}!"}}"#);
//!
//! let mut document = MemoryDocument::new();
//! document.push(MemoryElement::new("h1").with_attribute("data-i18n", "greeting.hello"));
//!
//! let i18n = I18n::with_languages(et, en, MarkerConfig::default(), source, MemoryPreferences::new(), document);
//! i18n.init(None).await;
//!
//! let greeting = i18n.t("greeting.hello", &Replacements::new().with("name", "Mari"));
//! assert_eq!(greeting, "Tere, Mari!");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binder;
pub mod document;
pub mod error;
pub mod manager;
pub mod preference;
pub mod resolver;
pub mod source;
pub mod store;
pub mod tree;

pub use binder::{apply_translations, SweepReport};
pub use document::{Document, ElementId, MemoryDocument, MemoryElement};
pub use error::{I18nError, I18nResult};
pub use manager::{I18n, LanguageChange};
pub use preference::{preferences_for, FilePreferences, MemoryPreferences, PreferenceStore};
pub use resolver::{substitute, Replacements, Resolver, Translation};
#[cfg(not(target_arch = "wasm32"))]
pub use source::FileSource;
pub use source::{HttpSource, ResourceSource, StaticSource, TranslationSource};
pub use store::{LanguageStore, TreeSnapshot};
pub use tree::{KeyPath, TranslationTree, TreeNode};
