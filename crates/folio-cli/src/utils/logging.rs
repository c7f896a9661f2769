//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber and color control from CLI flags and
//! environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs go to stderr. Machine-readable output (JSON/JSONL) drops the level to
/// errors only unless verbose/debug was explicitly requested, and turns colors off.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let explicit_verbose = cli.verbose || cli.debug;
    let machine_output = cli.command.format().resolve().is_machine();
    let level = select_level(explicit_verbose, cli.quiet, machine_output);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

const fn select_level(verbose: bool, quiet: bool, machine_output: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_selection() {
        assert_eq!(select_level(false, false, false), Level::WARN);
        assert_eq!(select_level(true, false, false), Level::DEBUG);
        assert_eq!(select_level(true, true, true), Level::DEBUG);
        assert_eq!(select_level(false, true, false), Level::ERROR);
        assert_eq!(select_level(false, false, true), Level::ERROR);
    }
}
