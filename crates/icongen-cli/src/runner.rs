//! Command execution and runtime logic.
//!
//! Contains the command dispatch and logging initialization.

use anyhow::Result;
use clap::CommandFactory;
use icongen_core::cli::{ExitCode, OutputFormat};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;

/// Initializes logging to stderr.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` applies, falling
/// back to info.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// `cancel` is forwarded to the pipeline; the caller cancels it on Ctrl-C.
///
/// # Errors
///
/// Returns an error only for failures outside the pipeline, such as a
/// panicked worker or unformattable output.
pub async fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    cancel: CancellationToken,
) -> Result<ExitCode> {
    match command {
        Commands::Generate(args) => commands::generate::run(args, output_format, cancel).await,
        Commands::Plan(args) => commands::plan::run(&args, output_format),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
