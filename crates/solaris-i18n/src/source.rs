//! Translation resource sources.
//!
//! Every language lives in its own `<code>.json` resource resolved against a
//! fixed base: a directory on native hosts, a URL in the browser.

use async_trait::async_trait;
use solaris_common::LanguageCode;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::error::{I18nError, I18nResult};
use crate::tree::TranslationTree;

/// Somewhere translation documents can be fetched from.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait TranslationSource {
    /// Fetches and parses the document for `language`.
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree>;

    /// Human readable location of the document, for logs.
    fn location(&self, language: &LanguageCode) -> String;
}

/// Reads `<base_dir>/<code>.json` from the local filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSource {
    base_dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSource {
    /// Creates a source rooted at `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the resources are read from.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resource_path(&self, language: &LanguageCode) -> PathBuf {
        self.base_dir.join(language.resource_file())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl TranslationSource for FileSource {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        let path = self.resource_path(language);
        debug!(language = %language, path = %path.display(), "Reading translation resource");

        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            let location = path.display().to_string();
            if source.kind() == std::io::ErrorKind::NotFound {
                I18nError::ResourceNotFound {
                    language: language.clone(),
                    location,
                }
            } else {
                I18nError::Io {
                    language: language.clone(),
                    location,
                    source,
                }
            }
        })?;

        TranslationTree::from_json_slice(language, &bytes)
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.resource_path(language).display().to_string()
    }
}

/// Fetches `<base>/<code>.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source for an absolute base URL.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://host/i18n` resolves `et.json` to `https://host/i18n/et.json`.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidLocation`] when `base` is not an absolute URL.
    pub fn new(base: &str) -> I18nResult<Self> {
        let url = Url::parse(base).map_err(|e| I18nError::InvalidLocation {
            location: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_url(url))
    }

    /// Creates a source from an already parsed base URL.
    #[must_use]
    pub fn from_url(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    /// Uses a preconfigured client (proxies, headers, timeouts).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Base URL resources are resolved against.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// URL of the resource for `language`.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidLocation`] if the join fails.
    pub fn resource_url(&self, language: &LanguageCode) -> I18nResult<Url> {
        self.base
            .join(&language.resource_file())
            .map_err(|e| I18nError::InvalidLocation {
                location: self.base.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl TranslationSource for HttpSource {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        let url = self.resource_url(language)?;
        let location = url.to_string();
        debug!(language = %language, location = %location, "Fetching translation resource");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| I18nError::Network {
                language: language.clone(),
                location: location.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::ResourceStatus {
                language: language.clone(),
                location,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| I18nError::Network {
            language: language.clone(),
            location,
            source,
        })?;

        TranslationTree::from_json_slice(language, &body)
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.resource_url(language)
            .map_or_else(|_| self.base.to_string(), |url| url.to_string())
    }
}

/// Serves JSON documents held in memory, e.g. bundled with the binary.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<LanguageCode, String>,
}

impl StaticSource {
    /// An empty source; every fetch is not-found.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, builder style.
    #[must_use]
    pub fn with_document(mut self, language: LanguageCode, json: impl Into<String>) -> Self {
        self.insert(language, json);
        self
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, language: LanguageCode, json: impl Into<String>) {
        self.documents.insert(language, json.into());
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl TranslationSource for StaticSource {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        let json = self
            .documents
            .get(language)
            .ok_or_else(|| I18nError::ResourceNotFound {
                language: language.clone(),
                location: self.location(language),
            })?;
        TranslationTree::from_json_str(language, json)
    }

    fn location(&self, language: &LanguageCode) -> String {
        format!("static:{}", language.resource_file())
    }
}

/// The source picked for a configured resource base.
#[derive(Debug, Clone)]
pub enum ResourceSource {
    /// Local directory.
    #[cfg(not(target_arch = "wasm32"))]
    File(FileSource),
    /// Remote base URL.
    Http(HttpSource),
}

impl ResourceSource {
    /// `http://` and `https://` bases are fetched over HTTP, anything else
    /// is a directory. In the browser only URLs are accepted.
    ///
    /// # Errors
    ///
    /// [`I18nError::InvalidLocation`] for an unusable base.
    pub fn for_base(base: &str) -> I18nResult<Self> {
        let lowered = base.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            return HttpSource::new(base).map(Self::Http);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let source = Ok(Self::File(FileSource::new(base)));

        #[cfg(target_arch = "wasm32")]
        let source = Err(I18nError::InvalidLocation {
            location: base.to_string(),
            reason: "browser resource base must be an absolute http(s) URL".to_string(),
        });

        source
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl TranslationSource for ResourceSource {
    async fn fetch(&self, language: &LanguageCode) -> I18nResult<TranslationTree> {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(source) => source.fetch(language).await,
            Self::Http(source) => source.fetch(language).await,
        }
    }

    fn location(&self, language: &LanguageCode) -> String {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(source) => source.location(language),
            Self::Http(source) => source.location(language),
        }
    }
}
