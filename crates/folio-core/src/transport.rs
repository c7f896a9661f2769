//! Retrieval of manifests and raw post documents.
//!
//! Content is laid out per language:
//!
//! ```text
//! <root>/en/index.json     ["second-post", "first-post"]
//! <root>/en/first-post.md
//! <root>/es/index.json
//! ...
//! ```
//!
//! [`HttpTransport`] serves that tree from a web host and [`FsTransport`]
//! from a local directory. Both reject identifiers that could address
//! anything outside their language directory.

use crate::{Error, Language, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// File name of the per-language manifest.
pub const MANIFEST_FILE: &str = "index.json";
/// Extension of post documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Source of manifests and documents.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the ordered list of post identifiers for `language`.
    async fn fetch_manifest(&self, language: Language) -> Result<Vec<String>>;

    /// Fetch the raw text of post `id` in `language`.
    async fn fetch_document(&self, language: Language, id: &str) -> Result<String>;
}

/// Reject identifiers that are empty, could traverse out of the language
/// directory, or carry URL query, fragment or escape characters.
pub fn validate_identifier(id: &str) -> Result<()> {
    let invalid = id.trim().is_empty()
        || id.contains(['/', '\\', '\0', '?', '#', '%'])
        || id.contains("..")
        || id.starts_with('.');
    if invalid {
        return Err(Error::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Decode a manifest body: a JSON array of identifier strings.
pub fn parse_manifest(body: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(body)?)
}

/// Serves content over HTTP(S) from a base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url` with a 30 second timeout.
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(mut base_url: Url, timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client, base_url })
    }

    fn url_for(&self, relative: &str) -> Result<Url> {
        self.base_url
            .join(relative)
            .map_err(|e| Error::InvalidUrl(format!("{relative}: {e}")))
    }

    async fn fetch_text(&self, url: Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("No content at '{url}'")));
            }
            return Err(response
                .error_for_status()
                .map_or_else(Error::Network, |_| {
                    Error::Other(format!("Unexpected status {status} for '{url}'"))
                }));
        }

        let body = response.text().await?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_manifest(&self, language: Language) -> Result<Vec<String>> {
        let url = self.url_for(&format!("{language}/{MANIFEST_FILE}"))?;
        parse_manifest(&self.fetch_text(url).await?)
    }

    async fn fetch_document(&self, language: Language, id: &str) -> Result<String> {
        validate_identifier(id)?;
        let url = self.url_for(&format!("{language}/{id}.{DOCUMENT_EXTENSION}"))?;
        self.fetch_text(url).await
    }
}

/// Serves content from a directory on the local filesystem.
pub struct FsTransport {
    root: PathBuf,
}

impl FsTransport {
    /// Creates a transport rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, path: PathBuf) -> Result<String> {
        debug!("Reading {}", path.display());
        match tokio::fs::read_to_string(&path).await {
            // Drop a UTF-8 byte order mark.
            Ok(text) => Ok(match text.strip_prefix('\u{feff}') {
                Some(stripped) => stripped.to_string(),
                None => text,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(path.display().to_string()))
            },
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[async_trait]
impl Transport for FsTransport {
    async fn fetch_manifest(&self, language: Language) -> Result<Vec<String>> {
        let path = self.root.join(language.as_str()).join(MANIFEST_FILE);
        parse_manifest(&self.read(path).await?)
    }

    async fn fetch_document(&self, language: Language, id: &str) -> Result<String> {
        validate_identifier(id)?;
        let path = self
            .root
            .join(language.as_str())
            .join(format!("{id}.{DOCUMENT_EXTENSION}"));
        self.read(path).await
    }
}

/// Where content lives, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A web host serving the content tree
    Http(Url),
    /// A local directory holding the content tree
    Directory(PathBuf),
}

impl ContentSource {
    /// Interpret a location string: `http://` and `https://` prefixes are URLs,
    /// everything else is a directory path.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::Config("content source is empty".into()));
        }
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(location)
                .map_err(|e| Error::InvalidUrl(format!("{location}: {e}")))?;
            return Ok(Self::Http(url));
        }
        Ok(Self::Directory(PathBuf::from(location)))
    }

    /// Build the matching transport.
    pub fn into_transport(self, timeout: Duration) -> Result<Arc<dyn Transport>> {
        Ok(match self {
            Self::Http(url) => Arc::new(HttpTransport::with_timeout(url, timeout)?),
            Self::Directory(root) => Arc::new(FsTransport::new(root)),
        })
    }
}
