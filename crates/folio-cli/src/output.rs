//! Output formats and the serialized shapes the commands print.

use folio_core::{Language, Post};
use serde::Serialize;

/// Output format options supported by the CLI
///
/// - **Text**: human-readable, colored when stdout is a terminal
/// - **Json**: one pretty-printed JSON document
/// - **Jsonl**: one compact JSON object per line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default on a terminal)
    Text,
    /// Single JSON document
    Json,
    /// Newline-delimited JSON
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Whether this format is meant for other programs rather than people.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

/// Listing view of a post: everything except the rendered body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub date: chrono::NaiveDate,
    pub description: &'a str,
    pub tags: &'a [String],
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a str>,
    pub reading_time: u32,
    pub image_url: &'a str,
}

impl<'a> PostSummary<'a> {
    /// Summary of `post`, with `fallback_image` standing in for a missing image.
    pub fn new(post: &'a Post, fallback_image: &'a str) -> Self {
        Self {
            id: &post.id,
            slug: &post.slug,
            title: &post.title,
            date: post.date,
            description: &post.description,
            tags: &post.tags,
            language: post.language,
            author: post.author.as_deref(),
            reading_time: post.reading_time,
            image_url: post.image_url_or(fallback_image),
        }
    }
}

/// Full view of a post, including the rendered HTML.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail<'a> {
    #[serde(flatten)]
    pub summary: PostSummary<'a>,
    pub content: &'a str,
}
