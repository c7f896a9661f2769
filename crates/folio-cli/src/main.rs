//! folio CLI - browse localized blog posts from a content tree
//!
//! This is the main entry point for the folio command-line interface.

use anyhow::Result;
use clap::Parser;
use folio_core::PostFilter;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use commands::Context;
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List {
            lang,
            search,
            tag,
            format,
        } => {
            let filter = PostFilter {
                query: search,
                tag,
            };
            commands::list(&ctx, lang, &filter, format.resolve()).await?;
        },

        Commands::Show {
            id,
            lang,
            html,
            format,
        } => {
            commands::show(&ctx, &id, lang, html, format.resolve()).await?;
        },

        Commands::Tags { lang, format } => {
            commands::tags(&ctx, lang, format.resolve()).await?;
        },
    }

    Ok(())
}
