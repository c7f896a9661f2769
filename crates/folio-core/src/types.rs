use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Image shown for posts that do not declare their own `imageUrl`.
pub const DEFAULT_POST_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=600&h=192&fit=crop";

/// The two locales the site publishes content in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Spanish, the site's default locale
    #[default]
    Es,
}

impl Language {
    /// Every supported language, in a fixed order.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// The lowercase code used in content paths (`en`, `es`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Map a locale tag such as `en-US`, `es_ES.UTF-8` or `EN` to its base language.
    ///
    /// Returns `None` for empty tags and for languages the site does not publish.
    #[must_use]
    pub fn normalize(tag: &str) -> Option<Self> {
        let base = tag
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match base.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| Error::InvalidLanguage(s.to_string()))
    }
}

/// A parsed and rendered blog post, ready for presentation code.
///
/// `content` is always rendered HTML, never the raw markdown body. Within one
/// language's collection `id` is unique. Equality treats `tags` as a set.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier from the manifest
    pub id: String,
    /// URL-safe identifier; the metadata `slug` when set, else `id`
    pub slug: String,
    pub title: String,
    /// Publication date as a calendar date, no time zone attached
    pub date: NaiveDate,
    pub description: String,
    /// Set-like: duplicates are dropped at parse time
    pub tags: Vec<String>,
    /// Rendered HTML
    pub content: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Estimated minutes to read the body
    pub reading_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.slug == other.slug
            && self.title == other.title
            && self.date == other.date
            && self.description == other.description
            && self.content == other.content
            && self.language == other.language
            && self.author == other.author
            && self.reading_time == other.reading_time
            && self.image_url == other.image_url
            && self.tags.iter().collect::<BTreeSet<_>>()
                == other.tags.iter().collect::<BTreeSet<_>>()
    }
}

impl Post {
    /// Exact, case-sensitive tag membership.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The post's own image, or `fallback` when it has none.
    #[must_use]
    pub fn image_url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(fallback)
    }

    /// The post's own image, or [`DEFAULT_POST_IMAGE_URL`].
    #[must_use]
    pub fn header_image(&self) -> &str {
        self.image_url_or(DEFAULT_POST_IMAGE_URL)
    }
}
