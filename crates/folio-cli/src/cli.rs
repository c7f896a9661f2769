//! # CLI Structure and Argument Parsing
//!
//! `folio` reads a content tree (local directory or web host) through the same
//! pipeline the site uses and prints what it finds.
//!
//! ```bash
//! folio list --lang en --tag rust
//! folio list --search async --format jsonl
//! folio show async-rust --html
//! folio tags --lang es
//! ```
//!
//! Global flags apply to every command. Output defaults to text on a terminal
//! and JSON when stdout is piped.

use clap::{Parser, Subcommand};
use folio_core::Language;
use std::path::PathBuf;

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `folio` command
#[derive(Parser, Clone, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "folio - browse localized blog posts", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Alias for `--verbose`
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `FOLIO_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `folio` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Content language (`en` or `es`); defaults to config, then locale
        #[arg(short = 'l', long)]
        lang: Option<Language>,

        /// Only posts whose title, description, or tags contain this text
        #[arg(short = 's', long)]
        search: Option<String>,

        /// Only posts carrying exactly this tag
        #[arg(short = 't', long)]
        tag: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Show one post
    Show {
        /// Post identifier as listed in the manifest
        id: String,

        /// Content language (`en` or `es`); defaults to config, then locale
        #[arg(short = 'l', long)]
        lang: Option<Language>,

        /// Include the rendered HTML body in text output
        #[arg(long)]
        html: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// List every tag in use
    Tags {
        /// Content language (`en` or `es`); defaults to config, then locale
        #[arg(short = 'l', long)]
        lang: Option<Language>,

        #[command(flatten)]
        format: FormatArg,
    },
}

impl Commands {
    /// The output-format flag of the selected command.
    pub const fn format(&self) -> &FormatArg {
        match self {
            Self::List { format, .. } | Self::Show { format, .. } | Self::Tags { format, .. } => {
                format
            },
        }
    }
}
