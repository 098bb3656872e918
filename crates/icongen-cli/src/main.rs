//! icongen command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Generate components for every SVG under icons/
//! icongen generate --assets icons/ --output src/Components/Icons
//!
//! # Preview additions and deletions
//! icongen plan --assets icons/ --output src/Components/Icons --format json
//! ```

use clap::Parser;
use icongen_cli::cli::Cli;
use icongen_cli::runner::{execute_command, init_logging};
use icongen_core::cli::{ExitCode, OutputFormat};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    let output_format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(ExitCode::CONFIG_ERROR.as_i32());
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current icon");
            on_interrupt.cancel();
        }
    });

    let exit_code = match execute_command(cli.command, output_format, cancel).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::ERROR
        }
    };

    std::process::exit(exit_code.as_i32());
}
