//! Metadata block extraction for post documents.
//!
//! A document may open with a block delimited by `---` lines holding
//! `key: value` pairs:
//!
//! ```text
//! ---
//! title: "Shipping a cache"
//! date: 2024-05-01
//! tags: [rust, async]
//! ---
//! Body starts here.
//! ```
//!
//! Parsing is pure and total. A document without a block is not an error:
//! it gets [`PostMetadata::untitled`] and the whole text becomes the body.

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z").unwrap());

const UNTITLED: &str = "Untitled";
const BOM: char = '\u{feff}';

/// Fixed-shape metadata record with per-field defaults.
///
/// Unknown keys in the block are ignored so that new fields can be added to
/// documents before the parser learns about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    /// `Untitled` unless the block sets a non-empty title
    pub title: String,
    /// Raw date string as written; resolution to a calendar date happens in the loader
    pub date: Option<String>,
    pub description: String,
    /// Deduplicated, in the order written
    pub tags: Vec<String>,
    /// Empty when the document does not override its identifier
    pub slug: String,
    pub author: Option<String>,
    /// From `imageUrl`, `image_url` or `image`
    pub image_url: Option<String>,
}

impl PostMetadata {
    /// Metadata for a document that has no metadata block: `Untitled`, stamped
    /// with the current instant.
    #[must_use]
    pub fn untitled() -> Self {
        Self {
            date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..Self::empty()
        }
    }

    /// Starting point for a document that does have a block; fields absent from
    /// the block keep these values.
    fn empty() -> Self {
        Self {
            title: UNTITLED.to_string(),
            date: None,
            description: String::new(),
            tags: Vec::new(),
            slug: String::new(),
            author: None,
            image_url: None,
        }
    }

    fn apply(&mut self, key: &str, value: Value) {
        match key {
            "title" => {
                let title = value.into_text();
                if !title.is_empty() {
                    self.title = title;
                }
            },
            "date" => self.date = Some(value.into_text()).filter(|d| !d.is_empty()),
            "description" => self.description = value.into_text(),
            "tags" => self.tags = dedup(value.into_list()),
            "slug" => self.slug = value.into_text(),
            "author" => self.author = Some(value.into_text()).filter(|a| !a.is_empty()),
            "imageUrl" | "image_url" | "image" => {
                self.image_url = Some(value.into_text()).filter(|u| !u.is_empty());
            },
            _ => {},
        }
    }
}

/// A document split into its metadata and its unrendered markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub metadata: PostMetadata,
    /// Everything after the closing delimiter, untouched
    pub body: String,
}

/// Split raw document text into metadata and body.
///
/// A leading byte order mark is dropped before looking for the block.
pub fn parse_document(raw: &str) -> ParsedDocument {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);
    let Some(captures) = FRONTMATTER_RE.captures(raw) else {
        return ParsedDocument {
            metadata: PostMetadata::untitled(),
            body: raw.to_string(),
        };
    };

    let block = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let mut metadata = PostMetadata::empty();
    for (key, value) in block.lines().filter_map(parse_line) {
        metadata.apply(key, value);
    }

    ParsedDocument {
        metadata,
        body: body.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::List(items) => items.join(", "),
        }
    }

    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(text) => split_items(&text),
        }
    }
}

/// Parse one `key: value` line. Only the first colon separates, so URLs survive.
fn parse_line(line: &str) -> Option<(&str, Value)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = value.trim();
    let parsed = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => Value::List(split_items(inner)),
        None => Value::Text(unquote(value).to_string()),
    };
    Some((key, parsed))
}

fn split_items(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(|item| unquote(item.trim()).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
