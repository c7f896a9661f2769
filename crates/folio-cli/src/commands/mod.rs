//! Command implementations.
//!
//! Every command reads through a [`Context`]: the loaded configuration plus the
//! cached store built from it.

mod list;
mod show;
mod tags;

pub use list::execute as list;
pub use show::execute as show;
pub use tags::execute as tags;

use anyhow::{Context as _, Result};
use folio_core::{Config, Language, LocaleStore, PostStore};
use std::path::Path;
use tracing::debug;

/// Configuration and store shared by a single command run.
pub struct Context {
    pub config: Config,
    pub store: PostStore,
}

impl Context {
    /// Load configuration (from `config_file` when given) and assemble the store.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                let mut config = Config::load_from(path)?;
                config.apply_env_overrides(|key| std::env::var(key).ok())?;
                config
            },
            None => Config::load()?,
        };
        debug!(source = %config.content.source, "Using content source");
        let store = config
            .build_store()
            .with_context(|| format!("Invalid content source '{}'", config.content.source))?;
        Ok(Self { config, store })
    }

    /// Language for this run: the flag, else the configured default, else the locale.
    pub fn language(&self, flag: Option<Language>) -> Language {
        flag.or(self.config.content.default_language)
            .unwrap_or_else(|| LocaleStore::detect(None).current())
    }

    /// Image shown for posts without their own.
    pub fn fallback_image(&self) -> &str {
        &self.config.render.fallback_image_url
    }
}
