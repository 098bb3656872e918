//! `plan` command: a dry run printing the [`SyncPlan`](icongen_files::SyncPlan).

use anyhow::Result;
use icongen_core::cli::{ExitCode, OutputFormat};
use icongen_core::diagnostics::TracingSink;
use icongen_files::DirectorySource;
use tracing::error;

use super::common::{exit_code_for, load_config};
use crate::cli::GenerateArgs;
use crate::formatters::format_output;
use crate::pipeline::Generator;

/// Runs the plan command.
///
/// # Errors
///
/// Returns an error if the plan cannot be formatted. Configuration and
/// listing errors are logged and mapped to an exit code.
pub fn run(args: &GenerateArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let plan = load_config(args).and_then(|config| {
        let generator = Generator::new(config)?;
        let plan = generator.plan(&DirectorySource::new(&args.assets), &mut TracingSink)?;
        Ok(plan)
    });

    match plan {
        Ok(plan) => {
            println!("{}", format_output(&plan, output_format)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{e:#}");
            Ok(exit_code_for(&e))
        }
    }
}
