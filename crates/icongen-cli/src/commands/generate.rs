//! `generate` command.
//!
//! Runs the pipeline on a blocking thread so Ctrl-C can cancel it between
//! icons.

use anyhow::{Context, Result};
use icongen_core::cli::{ExitCode, OutputFormat};
use icongen_core::diagnostics::TracingSink;
use icongen_files::DirectorySource;
use tokio_util::sync::CancellationToken;
use tracing::error;

use super::common::{exit_code_for, load_config};
use crate::cli::GenerateArgs;
use crate::formatters::format_output;
use crate::pipeline::{Generator, RunReport, RunStatus};

/// Exit code for a finished run.
#[must_use]
pub fn exit_code(report: &RunReport) -> ExitCode {
    match report.status {
        RunStatus::Cancelled => ExitCode::CANCELLED,
        RunStatus::Completed | RunStatus::NoAssets if !report.sync.is_clean() => {
            ExitCode::SYNC_FAILED
        }
        RunStatus::Completed | RunStatus::NoAssets => ExitCode::SUCCESS,
    }
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if the blocking task panics or the report cannot be
/// formatted. Pipeline errors are logged and mapped to an exit code.
pub async fn run(
    args: GenerateArgs,
    output_format: OutputFormat,
    cancel: CancellationToken,
) -> Result<ExitCode> {
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            return Ok(exit_code_for(&e));
        }
    };

    let source = DirectorySource::new(args.assets);
    let outcome = tokio::task::spawn_blocking(move || -> Result<RunReport> {
        let mut generator = Generator::new(config)?;
        let report = generator.run(&source, &mut TracingSink, &cancel)?;
        Ok(report)
    })
    .await
    .context("generation task failed")?;

    match outcome {
        Ok(report) => {
            println!("{}", format_output(&report, output_format)?);
            Ok(exit_code(&report))
        }
        Err(e) => {
            error!("{e:#}");
            Ok(exit_code_for(&e))
        }
    }
}
