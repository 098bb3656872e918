//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use std::io;

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use icongen_core::cli::ExitCode;
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    info!("Generating {} completions", shell);
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Currently infallible; returns `Result` like every other command.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
