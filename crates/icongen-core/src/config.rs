//! Configuration types for icongen.
//!
//! One [`GeneratorConfig`] drives every variant of the pipeline: orphan
//! cleanup, the recognized size buckets, gallery emission, the retry policy
//! and the render cache are all switches on the same code path.
//!
//! Configuration can be built in code, via [`GeneratorConfig::builder`], or
//! loaded from an `icongen.toml` file:
//!
//! ```toml
//! output_dir = "Octicons"
//! recognized_sizes = [12, 16, 24, 32, 48, 96]
//! emit_gallery = true
//!
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 100
//! ```
//!
//! # Examples
//!
//! ```
//! use icongen_core::GeneratorConfig;
//!
//! let config = GeneratorConfig::builder()
//!     .output_dir("/tmp/icons")
//!     .emit_gallery(false)
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.emit_gallery);
//! assert_eq!(config.extension, "razor");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Size buckets recognized by default.
pub const DEFAULT_RECOGNIZED_SIZES: [u32; 6] = [12, 16, 24, 32, 48, 96];

/// Generator configuration.
///
/// `output_dir` is the only setting without a usable default; its absence
/// is reported as a configuration error before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory receiving one component file per icon.
    pub output_dir: Option<PathBuf>,

    /// File extension of generated components, without the dot.
    /// Default: `razor`
    pub extension: String,

    /// Namespace of the generated manifest class.
    /// Default: `BlazorOcticons`
    pub namespace: String,

    /// Name of the generated manifest class; also prefixes the default
    /// manifest and gallery file names.
    /// Default: `Octicons`
    pub class_name: String,

    /// Value of the `Color` parameter when a component is used without one.
    /// Default: `#000`
    pub default_color: String,

    /// Pixel sizes that get their own bucket in the manifest and gallery.
    pub recognized_sizes: BTreeSet<u32>,

    /// Delete generated files whose source asset disappeared.
    /// Default: true
    pub enable_orphan_cleanup: bool,

    /// Emit the gallery fragment.
    /// Default: true
    pub emit_gallery: bool,

    /// Manifest location. Defaults to `<output_dir>/<class_name>.cs`.
    pub manifest_path: Option<PathBuf>,

    /// Gallery location. Defaults to `<output_dir>/<class_name>Gallery.<extension>`.
    pub gallery_path: Option<PathBuf>,

    /// Retry policy for contended filesystem operations.
    pub retry: RetryPolicy,

    /// Render cache settings.
    pub cache: CacheSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            extension: "razor".to_string(),
            namespace: "BlazorOcticons".to_string(),
            class_name: "Octicons".to_string(),
            default_color: "#000".to_string(),
            recognized_sizes: DEFAULT_RECOGNIZED_SIZES.into_iter().collect(),
            enable_orphan_cleanup: true,
            emit_gallery: true,
            manifest_path: None,
            gallery_path: None,
            retry: RetryPolicy::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML, contains
    /// unknown keys, or fails [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::from_toml_str(r#"
    ///     output_dir = "/srv/icons"
    ///     recognized_sizes = [16, 24]
    /// "#).unwrap();
    ///
    /// assert_eq!(config.recognized_sizes.len(), 2);
    /// assert!(config.enable_orphan_cleanup);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Relative paths inside the file are resolved against the file's
    /// directory, and a leading `~` expands to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.output_dir = config
            .output_dir
            .map(|p| resolve_path(base, &p))
            .transpose()?;
        config.manifest_path = config
            .manifest_path
            .map(|p| resolve_path(base, &p))
            .transpose()?;
        config.gallery_path = config
            .gallery_path
            .map(|p| resolve_path(base, &p))
            .transpose()?;
        config.cache.path = config
            .cache
            .path
            .map(|p| resolve_path(base, &p))
            .transpose()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks settings that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(Error::ConfigError {
                message: format!(
                    "extension must be a bare name without dots or separators, got '{}'",
                    self.extension
                ),
            });
        }

        if self.class_name.trim().is_empty() || self.namespace.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "namespace and class_name cannot be empty".to_string(),
            });
        }

        // Sizes come from a two-digit suffix, so anything above 99 is unreachable
        if let Some(size) = self.recognized_sizes.iter().find(|s| **s > 99) {
            return Err(Error::ConfigError {
                message: format!("recognized size {size} cannot be expressed by a two-digit suffix"),
            });
        }

        if self.retry.max_attempts == 0 {
            return Err(Error::ConfigError {
                message: "retry.max_attempts must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the output directory or a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no output directory was configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// assert!(config.require_output_dir().unwrap_err().is_config_error());
    /// ```
    pub fn require_output_dir(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::ConfigError {
                message: "output directory should be specified".to_string(),
            })
    }

    /// Returns where the manifest is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if neither `manifest_path` nor
    /// `output_dir` is set.
    pub fn manifest_file(&self) -> Result<PathBuf> {
        match &self.manifest_path {
            Some(path) => Ok(path.clone()),
            None => Ok(self
                .require_output_dir()?
                .join(format!("{}.cs", self.class_name))),
        }
    }

    /// Returns where the gallery is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if neither `gallery_path` nor
    /// `output_dir` is set.
    pub fn gallery_file(&self) -> Result<PathBuf> {
        match &self.gallery_path {
            Some(path) => Ok(path.clone()),
            None => Ok(self
                .require_output_dir()?
                .join(format!("{}Gallery.{}", self.class_name, self.extension))),
        }
    }
}

/// Bounded retry with linearly increasing backoff.
///
/// Attempt `n` (1-based) that fails is followed by a sleep of
/// `base_delay_ms × n` before attempt `n + 1`.
///
/// # Examples
///
/// ```
/// use icongen_core::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.delay_after(1), Duration::from_millis(100));
/// assert_eq!(policy.delay_after(2), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Total attempts per operation, including the first.
    pub max_attempts: u32,
    /// Backoff unit in milliseconds.
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
        }
    }

    /// Backoff to sleep after the given failed attempt.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 100)
    }
}

/// Render cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    /// Memoize renders within a run.
    /// Default: true
    pub enabled: bool,
    /// Persist the memo table between runs.
    /// Default: false
    pub persist: bool,
    /// Location of the persisted table. Defaults to a file under the user
    /// cache directory derived from the output directory.
    pub path: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            persist: false,
            path: None,
        }
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Sets the component file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Sets the manifest namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Sets the manifest class name.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.config.class_name = class_name.into();
        self
    }

    /// Sets the default `Color` parameter value.
    #[must_use]
    pub fn default_color(mut self, color: impl Into<String>) -> Self {
        self.config.default_color = color.into();
        self
    }

    /// Replaces the recognized size buckets.
    #[must_use]
    pub fn recognized_sizes(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.config.recognized_sizes = sizes.into_iter().collect();
        self
    }

    /// Enables or disables orphan cleanup.
    #[must_use]
    pub const fn enable_orphan_cleanup(mut self, enabled: bool) -> Self {
        self.config.enable_orphan_cleanup = enabled;
        self
    }

    /// Enables or disables the gallery fragment.
    #[must_use]
    pub const fn emit_gallery(mut self, enabled: bool) -> Self {
        self.config.emit_gallery = enabled;
        self
    }

    /// Overrides the manifest location.
    #[must_use]
    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = Some(path.into());
        self
    }

    /// Overrides the gallery location.
    #[must_use]
    pub fn gallery_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.gallery_path = Some(path.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Sets the cache settings.
    #[must_use]
    pub fn cache(mut self, cache: CacheSettings) -> Self {
        self.config.cache = cache;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// The output directory is not required here; the pipeline reports its
    /// absence as a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if validation fails.
    pub fn build(self) -> Result<GeneratorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Expands `~` and anchors relative paths at `base`.
fn resolve_path(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Expands tilde (~) in path to user's home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if path_str == "~" || path_str.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| Error::ConfigError {
            message: format!("cannot determine home directory to expand '{path_str}'"),
        })?;
        Ok(path_str
            .strip_prefix("~/")
            .map_or_else(|| home.clone(), |rest| home.join(rest)))
    } else {
        Ok(path.to_path_buf())
    }
}
