//! Shared helpers for `generate` and `plan`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icongen_core::GeneratorConfig;
use icongen_core::cli::ExitCode;
use tracing::debug;

use crate::cli::GenerateArgs;

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "icongen.toml";

/// Builds the effective configuration from a config file and CLI flags.
///
/// Uses `--config` if given, else `./icongen.toml` if it exists, else the
/// defaults. Command-line flags override file settings.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or the
/// resulting configuration is invalid.
pub fn load_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    load_config_from(args, Path::new(DEFAULT_CONFIG_FILE))
}

/// Like [`load_config`], with an explicit fallback config location.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from(args: &GenerateArgs, fallback: &Path) -> Result<GeneratorConfig> {
    let path: Option<PathBuf> = match &args.config {
        Some(path) => Some(path.clone()),
        None => fallback.is_file().then(|| fallback.to_path_buf()),
    };

    let mut config = match &path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            GeneratorConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output_dir = Some(output.clone());
    }
    if args.no_cache {
        config.cache.enabled = false;
    }
    if args.persist_cache {
        config.cache.enabled = true;
        config.cache.persist = true;
    }
    if args.no_gallery {
        config.emit_gallery = false;
    }
    if args.no_cleanup {
        config.enable_orphan_cleanup = false;
    }

    config.validate()?;
    Ok(config)
}

/// Maps a command error to an exit code.
///
/// Configuration problems get their own code; everything else is a
/// general failure.
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let is_config = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<icongen_core::Error>())
        .any(icongen_core::Error::is_config_error);

    if is_config {
        ExitCode::CONFIG_ERROR
    } else {
        ExitCode::ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(assets: &Path) -> GenerateArgs {
        GenerateArgs {
            assets: assets.to_path_buf(),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&args(temp.path()), &temp.path().join("icongen.toml")).unwrap();

        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_fallback_config_file_is_used() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("icongen.toml");
        fs::write(&file, "class_name = \"Icons\"\n").unwrap();

        let config = load_config_from(&args(temp.path()), &file).unwrap();
        assert_eq!(config.class_name, "Icons");
    }

    #[test]
    fn test_flags_override_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.toml");
        fs::write(
            &file,
            "output_dir = \"from-file\"\nemit_gallery = true\n\n[cache]\npersist = true\n",
        )
        .unwrap();

        let args = GenerateArgs {
            config: Some(file),
            output: Some(PathBuf::from("/tmp/from-flag")),
            no_gallery: true,
            no_cleanup: true,
            no_cache: true,
            ..args(temp.path())
        };
        let config = load_config_from(&args, Path::new("missing.toml")).unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/from-flag")));
        assert!(!config.emit_gallery);
        assert!(!config.enable_orphan_cleanup);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_invalid_config_maps_to_config_exit_code() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.toml");
        fs::write(&file, "extension = \"\"\n").unwrap();

        let args = GenerateArgs {
            config: Some(file),
            ..args(temp.path())
        };
        let err = load_config_from(&args, Path::new("missing.toml")).unwrap_err();

        assert_eq!(exit_code_for(&err), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_other_errors_map_to_general_failure() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    }
}
