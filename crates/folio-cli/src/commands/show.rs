//! Show command implementation

use anyhow::{Result, anyhow};
use colored::Colorize;
use folio_core::{Language, Post};

use super::Context;
use crate::output::{OutputFormat, PostDetail, PostSummary};

/// Execute the show command
///
/// Fails when the post cannot be loaded, so the process exits non-zero.
pub async fn execute(
    ctx: &Context,
    id: &str,
    lang: Option<Language>,
    html: bool,
    format: OutputFormat,
) -> Result<()> {
    let language = ctx.language(lang);
    let post = ctx
        .store
        .get_one(id, language)
        .await
        .ok_or_else(|| anyhow!("Post '{id}' could not be loaded for language '{language}'"))?;

    let detail = PostDetail {
        summary: PostSummary::new(&post, ctx.fallback_image()),
        content: &post.content,
    };
    match format {
        OutputFormat::Text => print_text_format(&post, &detail.summary, html),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
        OutputFormat::Jsonl => println!("{}", serde_json::to_string(&detail)?),
    }
    Ok(())
}

fn print_text_format(post: &Post, summary: &PostSummary<'_>, html: bool) {
    println!("{}", post.title.bold());
    let mut byline = post.language.format_long_date(post.date);
    if let Some(author) = &post.author {
        byline.push_str(" · ");
        byline.push_str(author);
    }
    println!("{}", byline.bright_black());
    println!("{} min read", post.reading_time);
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!("Image: {}", summary.image_url);
    if !post.description.is_empty() {
        println!();
        println!("{}", post.description);
    }
    if html {
        println!();
        print!("{}", post.content);
    }
}
