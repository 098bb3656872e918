//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Generates parameterized Razor icon components from SVG assets.
///
/// Keeps an output directory in sync with an icon set: one component per
/// icon, a C# manifest indexing them by size, and an optional gallery.
#[derive(Parser, Debug)]
#[command(name = "icongen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate components, manifest and gallery into the output directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// icongen generate --assets icons/ --output src/Components/Icons
    ///
    /// # Settings from a file, output directory from the environment
    /// ICONGEN_OUTPUT_DIR=src/Icons icongen generate --config icongen.toml --assets icons/
    /// ```
    Generate(GenerateArgs),

    /// Show which files a run would write and delete, without changing anything.
    Plan(GenerateArgs),

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `generate` and `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Directory searched recursively for `*.svg` assets
    #[arg(short, long)]
    pub assets: PathBuf,

    /// Configuration file (default: ./icongen.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory for generated files
    #[arg(short, long, env = "ICONGEN_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Do not memoize renders
    #[arg(long, conflicts_with = "persist_cache")]
    pub no_cache: bool,

    /// Persist the render cache between runs
    #[arg(long)]
    pub persist_cache: bool,

    /// Do not emit the gallery fragment
    #[arg(long)]
    pub no_gallery: bool,

    /// Keep files whose asset disappeared
    #[arg(long)]
    pub no_cleanup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_generate() {
        let cli = Cli::parse_from([
            "icongen",
            "generate",
            "--assets",
            "icons",
            "--output",
            "/tmp/out",
        ]);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.assets, PathBuf::from("icons"));
            assert_eq!(args.output, Some(PathBuf::from("/tmp/out")));
            assert!(!args.no_cache);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parsing_generate_flags() {
        let cli = Cli::parse_from([
            "icongen",
            "generate",
            "-a",
            "icons",
            "--no-gallery",
            "--no-cleanup",
            "--persist-cache",
        ]);
        if let Commands::Generate(args) = cli.command {
            assert!(args.no_gallery);
            assert!(args.no_cleanup);
            assert!(args.persist_cache);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_no_cache_conflicts_with_persist() {
        let result = Cli::try_parse_from([
            "icongen",
            "generate",
            "-a",
            "icons",
            "--no-cache",
            "--persist-cache",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_assets_required() {
        assert!(Cli::try_parse_from(["icongen", "generate"]).is_err());
    }

    #[test]
    fn test_cli_parsing_plan() {
        let cli = Cli::parse_from(["icongen", "plan", "--assets", "icons"]);
        assert!(matches!(cli.command, Commands::Plan(_)));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["icongen", "--verbose", "plan", "-a", "icons"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["icongen", "plan", "-a", "icons"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_output_format_custom() {
        let cli = Cli::parse_from(["icongen", "--format", "json", "plan", "-a", "icons"]);
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_cli_parsing_completions_zsh() {
        let cli = Cli::parse_from(["icongen", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
