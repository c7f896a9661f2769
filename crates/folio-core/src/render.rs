//! Markdown to HTML rendering with pluggable code highlighting.
//!
//! [`MarkdownRenderer`] drives pulldown-cmark with the GitHub-flavoured
//! extensions and treats every single newline as a line break. Fenced and
//! indented code blocks are pulled out of the event stream and handed to a
//! [`Highlighter`]; the result is wrapped in `<pre><code class="hljs ...">`
//! so stylesheets can theme it.
//!
//! Highlighting never fails a render. An unknown or failing language falls
//! back to automatic detection, and a failing detection falls back to the
//! escaped source text.
//!
//! ```rust
//! use folio_core::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::with_syntect();
//! let html = renderer.render("line one\nline two");
//! assert!(html.contains("<br />"));
//! ```

use crate::{Error, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html::push_html};
use std::sync::Arc;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

/// Syntax highlighting engine used for code blocks.
///
/// Implementations return HTML fragments meant to sit inside a `<code>`
/// element; they must escape the source text themselves.
pub trait Highlighter: Send + Sync {
    /// Whether `language` names a grammar this engine knows.
    fn is_language_supported(&self, language: &str) -> bool;

    /// Highlight `code` as `language`.
    fn highlight(&self, code: &str, language: &str) -> Result<String>;

    /// Highlight `code`, guessing its language.
    fn highlight_auto(&self, code: &str) -> Result<String>;
}

/// [`Highlighter`] backed by syntect's bundled grammars.
///
/// Output uses CSS classes rather than inline colours, so the site theme
/// decides how tokens look.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
}

impl SyntectHighlighter {
    /// Load the default grammar set.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn render_with(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn is_language_supported(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .ok_or_else(|| Error::Highlight(format!("unknown language '{language}'")))?;
        self.render_with(code, syntax)
    }

    fn highlight_auto(&self, code: &str) -> Result<String> {
        let first_line = code.lines().next().unwrap_or_default();
        let syntax = self
            .syntaxes
            .find_syntax_by_first_line(first_line)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        self.render_with(code, syntax)
    }
}

/// Converts a post body to HTML.
pub struct MarkdownRenderer {
    highlighter: Arc<dyn Highlighter>,
    options: Options,
}

impl MarkdownRenderer {
    /// Create a renderer that highlights code with `highlighter`.
    pub fn new(highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            highlighter,
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
        }
    }

    /// Create a renderer using [`SyntectHighlighter`].
    pub fn with_syntect() -> Self {
        Self::new(Arc::new(SyntectHighlighter::new()))
    }

    /// Render markdown to HTML. Never fails; see the module docs for fallbacks.
    pub fn render(&self, body: &str) -> String {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(body, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((language, String::new()));
                },
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, code)) = code_block.take() {
                        let html = self.render_code_block(language.as_deref(), &code);
                        events.push(Event::Html(html.into()));
                    }
                },
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                },
                Event::SoftBreak => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(body.len() * 3 / 2);
        push_html(&mut html, events.into_iter());
        html
    }

    fn render_code_block(&self, language: Option<&str>, code: &str) -> String {
        if let Some(lang) = language.filter(|l| self.highlighter.is_language_supported(l)) {
            match self.highlighter.highlight(code, lang) {
                Ok(highlighted) => {
                    return format!(
                        "<pre><code class=\"hljs language-{}\">{highlighted}</code></pre>\n",
                        encode_double_quoted_attribute(lang)
                    );
                },
                Err(e) => warn!(language = lang, error = %e, "Highlight failed, trying detection"),
            }
        } else if let Some(lang) = language {
            debug!(language = lang, "Unknown code block language, trying detection");
        }

        let highlighted = self.highlighter.highlight_auto(code).unwrap_or_else(|e| {
            warn!(error = %e, "Automatic highlighting failed, emitting plain code");
            encode_text(code).into_owned()
        });
        format!("<pre><code class=\"hljs\">{highlighted}</code></pre>\n")
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_syntect()
    }
}
