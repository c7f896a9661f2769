//! Shared CLI helpers.

pub mod cli_args;
pub mod logging;
