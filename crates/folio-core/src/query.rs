//! Pure queries over an already-loaded collection.
//!
//! Nothing here performs I/O or mutates its input; results borrow from the
//! collection they were computed over.

use crate::Post;
use std::collections::BTreeSet;

/// Posts whose title, description, or any tag contains `query`, ignoring case.
///
/// Callers skip the empty query themselves; see [`PostFilter`].
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts.iter().filter(|post| matches_query(post, &needle)).collect()
}

/// Posts carrying exactly `tag` (case-sensitive).
pub fn filter_by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|post| post.has_tag(tag)).collect()
}

/// Every tag used in the collection, deduplicated and sorted.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `needle` must already be lowercase.
fn matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.description.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Listing filter combining free-text search and tag selection.
///
/// Empty criteria are skipped. Search runs first, then the tag filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Free-text search, matched like [`search`]
    pub query: Option<String>,
    /// Selected tag, matched like [`filter_by_tag`]
    pub tag: Option<String>,
}

impl PostFilter {
    /// Filter matching every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `query` to match (ignored when blank).
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Require `tag` to be present (ignored when empty).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Select `tag`, or clear the selection if `tag` is already selected.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tag.as_deref() == Some(tag) {
            self.tag = None;
        } else {
            self.tag = Some(tag.to_string());
        }
    }

    /// Drop both criteria.
    pub fn clear(&mut self) {
        self.query = None;
        self.tag = None;
    }

    /// Whether no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.active_query().is_none() && self.active_tag().is_none()
    }

    /// Posts passing every active criterion, in collection order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let needle = self.active_query().map(str::to_lowercase);
        let tag = self.active_tag();
        posts
            .iter()
            .filter(|post| needle.as_deref().is_none_or(|n| matches_query(post, n)))
            .filter(|post| tag.is_none_or(|t| post.has_tag(t)))
            .collect()
    }

    fn active_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn active_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }
}
