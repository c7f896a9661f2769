//! # folio-core
//!
//! Content pipeline behind the folio site's blog: localized posts are fetched
//! from a static content tree, parsed, rendered to HTML, and cached per
//! language for the lifetime of the process.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **Frontmatter**: splits a document into a metadata block and a body
//! - **Render**: markdown to HTML with pluggable code highlighting
//! - **Transport**: reads manifests and documents over HTTP or from disk
//! - **Loader**: one post from `(id, language)`, with derived fields
//! - **Store**: the per-language cache with in-flight de-duplication
//! - **Query**: search and tag filtering over a loaded collection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio_core::{Config, Language, query};
//!
//! # async fn run() -> folio_core::Result<()> {
//! let store = Config::load()?.build_store()?;
//! let posts = store.get_all(Language::En).await;
//! for post in query::search(&posts, "rust") {
//!     println!("{} ({} min)", post.title, post.reading_time);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The content pipeline degrades instead of failing: [`PostStore::get_all`]
//! returns an empty collection when the manifest is unavailable and skips posts
//! that fail to load. Use [`PostLoader::try_load`] when the error itself matters.

/// Configuration loading and pipeline assembly
pub mod config;
/// Error types and result aliases
pub mod error;
/// Metadata block parsing
pub mod frontmatter;
/// Single-post loading and derived fields
pub mod loader;
/// Current language and date display
pub mod locale;
/// Search and filtering over collections
pub mod query;
/// Markdown rendering and code highlighting
pub mod render;
/// Per-language collection cache
pub mod store;
/// Manifest and document retrieval
pub mod transport;
/// Core data types
pub mod types;

pub use config::{Config, ContentConfig, FetchConfig, RenderConfig};
pub use error::{Error, Result};
pub use frontmatter::{ParsedDocument, PostMetadata, parse_document};
pub use loader::PostLoader;
pub use locale::LocaleStore;
pub use query::{PostFilter, all_tags, filter_by_tag, search};
pub use render::{Highlighter, MarkdownRenderer, SyntectHighlighter};
pub use store::{Collection, PostStore};
pub use transport::{ContentSource, FsTransport, HttpTransport, Transport};
pub use types::*;
