//! Loading a single post: fetch, parse, render, derive.

use crate::frontmatter::parse_document;
use crate::render::MarkdownRenderer;
use crate::transport::{Transport, validate_identifier};
use crate::{Language, Post, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::warn;

/// Reading speed used for `reading_time` unless configured otherwise.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Turns `(id, language)` into a [`Post`].
///
/// Stateless apart from its collaborators, so one loader can serve any
/// number of concurrent loads.
pub struct PostLoader {
    transport: Arc<dyn Transport>,
    renderer: Arc<MarkdownRenderer>,
    words_per_minute: u32,
}

impl PostLoader {
    /// Create a loader reading through `transport` and rendering with `renderer`.
    pub fn new(transport: Arc<dyn Transport>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            transport,
            renderer,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    /// Override the reading speed. Zero is treated as one word per minute.
    #[must_use]
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute.max(1);
        self
    }

    /// The transport this loader reads through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Load a post, logging and swallowing any failure.
    ///
    /// One bad document must not take down a whole collection, so every
    /// error ends here as a warning and `None`.
    pub async fn load(&self, id: &str, language: Language) -> Option<Post> {
        match self.try_load(id, language).await {
            Ok(post) => Some(post),
            Err(e) => {
                warn!(
                    id,
                    %language,
                    category = e.category(),
                    recoverable = e.is_recoverable(),
                    "Failed to load post: {e}"
                );
                None
            },
        }
    }

    /// Load a post, returning the error instead of logging it.
    pub async fn try_load(&self, id: &str, language: Language) -> Result<Post> {
        validate_identifier(id)?;
        let raw = self.transport.fetch_document(language, id).await?;
        let document = parse_document(&raw);
        let metadata = document.metadata;

        let content = self.renderer.render(&document.body);
        let reading_time = reading_time(&document.body, self.words_per_minute);
        let date = resolve_date(metadata.date.as_deref());
        let slug = if metadata.slug.is_empty() {
            id.to_string()
        } else {
            metadata.slug
        };

        Ok(Post {
            id: id.to_string(),
            slug,
            title: metadata.title,
            date,
            description: metadata.description,
            tags: metadata.tags,
            content,
            language,
            author: metadata.author,
            reading_time,
            image_url: metadata.image_url,
        })
    }
}

/// Minutes needed to read `body`: whitespace-separated words divided by
/// `words_per_minute`, rounded up, never less than one.
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = u32::try_from(body.split_whitespace().count()).unwrap_or(u32::MAX);
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Resolve a metadata date string to a calendar date.
///
/// `YYYY-MM-DD` is taken as written, with no time zone involved. RFC 3339
/// timestamps use their UTC date; naive timestamps and `YYYY/MM/DD` use their
/// date part. Missing or unparseable dates fall back to today's UTC date.
pub fn resolve_date(raw: Option<&str>) -> NaiveDate {
    let today = || Utc::now().date_naive();
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return today();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return stamp.with_timezone(&Utc).date_naive();
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return stamp.date();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return date;
    }

    warn!(date = raw, "Unrecognized post date, using today");
    today()
}
