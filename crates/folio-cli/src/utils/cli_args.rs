use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`); defaults to text on a terminal, JSON when piped
    #[arg(short = 'f', long = "format", value_enum, env = "FOLIO_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. If output is piped and no format is
    /// specified, defaults to JSON for better machine readability.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| default_format(std::io::stdout().is_terminal()))
    }
}

const fn default_format(stdout_is_terminal: bool) -> OutputFormat {
    if stdout_is_terminal {
        OutputFormat::Text
    } else {
        OutputFormat::Json
    }
}
