//! List command implementation

use anyhow::Result;
use colored::Colorize;
use folio_core::{Language, Post, PostFilter};

use super::Context;
use crate::output::{OutputFormat, PostSummary};

/// Execute the list command
pub async fn execute(
    ctx: &Context,
    lang: Option<Language>,
    filter: &PostFilter,
    format: OutputFormat,
) -> Result<()> {
    let language = ctx.language(lang);
    let posts = ctx.store.get_all(language).await;
    let shown = filter.apply(&posts);

    match format {
        OutputFormat::Text => print_text_format(&shown, language, posts.is_empty()),
        OutputFormat::Json => {
            let summaries = summaries(&shown, ctx.fallback_image());
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        },
        OutputFormat::Jsonl => {
            for summary in summaries(&shown, ctx.fallback_image()) {
                println!("{}", serde_json::to_string(&summary)?);
            }
        },
    }
    Ok(())
}

fn summaries<'a>(posts: &[&'a Post], fallback_image: &'a str) -> Vec<PostSummary<'a>> {
    posts
        .iter()
        .map(|post| PostSummary::new(post, fallback_image))
        .collect()
}

fn print_text_format(posts: &[&Post], language: Language, collection_empty: bool) {
    if posts.is_empty() {
        if collection_empty {
            println!("No posts available for '{language}'.");
        } else {
            println!("No posts match the current filter.");
        }
        return;
    }

    for post in posts {
        println!(
            "{}  {}",
            post.title.bold(),
            language.format_long_date(post.date).bright_black()
        );
        println!(
            "  {} · {} min read",
            post.id.cyan(),
            post.reading_time
        );
        if !post.tags.is_empty() {
            println!("  Tags: {}", post.tags.join(", "));
        }
        if !post.description.is_empty() {
            println!("  {}", post.description);
        }
        println!();
    }
}
