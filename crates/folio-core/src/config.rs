//! Configuration for the folio content pipeline.
//!
//! Settings are stored as TOML. Every field has a default, so a partial file
//! (or no file at all) is valid.
//!
//! ## Resolution order
//!
//! 1. `FOLIO_CONFIG`: explicit path to a config file
//! 2. `FOLIO_CONFIG_DIR`: directory holding `config.toml`
//! 3. The platform config directory (`directories::ProjectDirs`)
//!
//! After the file is read, `FOLIO_CONTENT_SOURCE` and `FOLIO_LANG` override
//! the matching fields.
//!
//! ## Example
//!
//! ```toml
//! [content]
//! source = "https://example.com/assets/posts"
//! default_language = "en"
//!
//! [render]
//! words_per_minute = 220
//!
//! [fetch]
//! timeout_secs = 10
//! ```

use crate::loader::{DEFAULT_WORDS_PER_MINUTE, PostLoader};
use crate::render::MarkdownRenderer;
use crate::store::PostStore;
use crate::transport::ContentSource;
use crate::types::DEFAULT_POST_IMAGE_URL;
use crate::{Error, Language, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where content comes from and which language to show
    pub content: ContentConfig,
    /// Rendering and derived-field settings
    pub render: RenderConfig,
    /// Transport settings
    pub fetch: FetchConfig,
}

/// Content location settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory path or `http(s)://` base URL of the content tree.
    pub source: String,

    /// Language to show when none is requested explicitly.
    ///
    /// When unset, the language is detected from the process locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<Language>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: "./content/posts".to_string(),
            default_language: None,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Reading speed used to estimate `reading_time`.
    pub words_per_minute: u32,
    /// Image shown for posts without their own.
    pub fallback_image_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            fallback_image_url: DEFAULT_POST_IMAGE_URL.to_string(),
        }
    }
}

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout for remote content, in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Config {
    /// Load from the resolved location, falling back to defaults when no file
    /// exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Where [`Config::load`] looks for the file, if a location can be determined.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(file) = non_empty_env("FOLIO_CONFIG") {
            return Some(PathBuf::from(file));
        }
        if let Some(dir) = non_empty_env("FOLIO_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join(CONFIG_FILE));
        }
        directories::ProjectDirs::from("dev", "folio", "folio")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply `FOLIO_CONTENT_SOURCE` and `FOLIO_LANG` from `env`.
    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let env = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(source) = env("FOLIO_CONTENT_SOURCE") {
            self.content.source = source;
        }
        if let Some(lang) = env("FOLIO_LANG") {
            self.content.default_language = Some(
                lang.parse()
                    .map_err(|_| Error::Config(format!("FOLIO_LANG has unsupported value '{lang}'")))?,
            );
        }
        Ok(())
    }

    /// The configured content source.
    pub fn content_source(&self) -> Result<ContentSource> {
        ContentSource::parse(&self.content.source)
    }

    /// Request timeout for remote content.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }

    /// Assemble a loader from these settings.
    pub fn build_loader(&self, renderer: Arc<MarkdownRenderer>) -> Result<PostLoader> {
        let transport = self.content_source()?.into_transport(self.timeout())?;
        Ok(PostLoader::new(transport, renderer).with_words_per_minute(self.render.words_per_minute))
    }

    /// Assemble a store with the default syntect-backed renderer.
    pub fn build_store(&self) -> Result<PostStore> {
        let renderer = Arc::new(MarkdownRenderer::with_syntect());
        Ok(PostStore::new(self.build_loader(renderer)?))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.content.source, "./content/posts");
        assert_eq!(config.content.default_language, None);
        assert_eq!(config.render.words_per_minute, 200);
        assert_eq!(config.render.fallback_image_url, DEFAULT_POST_IMAGE_URL);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[content]\nsource = \"https://example.com/posts\"\ndefault_language = \"en\"\n",
        )?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.content.source, "https://example.com/posts");
        assert_eq!(config.content.default_language, Some(Language::En));
        assert_eq!(config.render.words_per_minute, 200);
        assert_eq!(config.fetch.timeout_secs, 30);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[content\nsource = ")?;
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        fs::write(&path, "[content]\ndefault_language = \"fr\"\n")?;
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::load_from(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_reload() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.content.default_language = Some(Language::Es);
        config.render.words_per_minute = 250;

        config.save_to(&path)?;
        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| match key {
                "FOLIO_CONTENT_SOURCE" => Some(" /srv/posts ".to_string()),
                "FOLIO_LANG" => Some("en-US".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.content.source, "/srv/posts");
        assert_eq!(config.content.default_language, Some(Language::En));

        let mut untouched = Config::default();
        untouched.apply_env_overrides(no_env).unwrap();
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_bad_env_language_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == "FOLIO_LANG").then(|| "klingon".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_content_source_from_config() {
        let mut config = Config::default();
        assert!(matches!(
            config.content_source().unwrap(),
            ContentSource::Directory(_)
        ));
        config.content.source = "https://example.com/assets/posts".to_string();
        assert!(matches!(config.content_source().unwrap(), ContentSource::Http(_)));
    }

    proptest! {
        #[test]
        fn test_words_per_minute_roundtrip(words_per_minute in 1u32..10_000) {
            let config = Config {
                render: RenderConfig {
                    words_per_minute,
                    ..RenderConfig::default()
                },
                ..Config::default()
            };
            let text = toml::to_string_pretty(&config).unwrap();
            let parsed: Config = toml::from_str(&text).unwrap();
            prop_assert_eq!(parsed, config);
        }
    }
}
