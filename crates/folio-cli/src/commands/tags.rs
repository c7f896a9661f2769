//! Tags command implementation

use anyhow::Result;
use folio_core::{Language, all_tags};

use super::Context;
use crate::output::OutputFormat;

/// Execute the tags command
pub async fn execute(ctx: &Context, lang: Option<Language>, format: OutputFormat) -> Result<()> {
    let posts = ctx.store.get_all(ctx.language(lang)).await;
    let tags = all_tags(&posts);

    match format {
        OutputFormat::Text => {
            for tag in &tags {
                println!("{tag}");
            }
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tags)?),
        OutputFormat::Jsonl => {
            for tag in &tags {
                println!("{}", serde_json::to_string(tag)?);
            }
        },
    }
    Ok(())
}
