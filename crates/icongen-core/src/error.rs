//! Error types for icongen.
//!
//! This module provides the error hierarchy used by every crate in the
//! workspace. Variants carry enough context to be reported without the
//! caller having to re-derive which file or setting was involved.
//!
//! # Examples
//!
//! ```
//! use icongen_core::{Error, Result};
//!
//! fn require_extension(ext: &str) -> Result<()> {
//!     if ext.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "extension cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_extension("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for icongen.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields
    /// (most importantly the output directory), or cannot be parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem operation failed.
    #[error("I/O error at {path}")]
    IoError {
        /// Path the operation targeted
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An icon asset could not be read from its source.
    #[error("Failed to read asset '{name}': {message}")]
    AssetError {
        /// Asset name or path
        name: String,
        /// Description of the failure
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// Persisted render cache could not be loaded or saved.
    #[error("Cache error: {message}")]
    CacheError {
        /// Description of the cache failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "output directory not specified".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidArgument(_))
    }

    /// Returns `true` if this is a filesystem error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Returns `true` if this is a template error.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::Error;
    ///
    /// let err = Error::TemplateError {
    ///     message: "unclosed tag".to_string(),
    /// };
    /// assert!(err.is_template_error());
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is an asset source error.
    #[must_use]
    pub const fn is_asset_error(&self) -> bool {
        matches!(self, Self::AssetError { .. })
    }

    /// Returns `true` if this is a cache error.
    #[must_use]
    pub const fn is_cache_error(&self) -> bool {
        matches!(self, Self::CacheError { .. })
    }

    /// Wraps an I/O error with the path it occurred at.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::Error;
    /// use std::io;
    ///
    /// let err = Error::io("/tmp/out", io::Error::from(io::ErrorKind::PermissionDenied));
    /// assert!(err.is_io_error());
    /// assert!(err.to_string().contains("/tmp/out"));
    /// ```
    #[must_use]
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Result type alias using the workspace error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_config_error_display() {
        let err = Error::ConfigError {
            message: "output directory not specified".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: output directory not specified"
        );
        assert!(err.is_config_error());
        assert!(!err.is_io_error());
    }

    #[test]
    fn test_invalid_argument_is_config_error() {
        let err = Error::InvalidArgument("bad format".to_string());
        assert!(err.is_config_error());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io("/out/Alert16.razor", io::Error::other("disk full"));
        assert!(err.is_io_error());
        assert!(err.to_string().contains("/out/Alert16.razor"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_classifiers_are_exclusive() {
        let err = Error::AssetError {
            name: "alert-16".to_string(),
            message: "not utf-8".to_string(),
        };
        assert!(err.is_asset_error());
        assert!(!err.is_template_error());
        assert!(!err.is_cache_error());

        let err = Error::CacheError {
            message: "corrupt".to_string(),
            source: None,
        };
        assert!(err.is_cache_error());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
