//! CLI-specific types.
//!
//! Strong types for output format selection and process exit codes, shared
//! between the CLI binary and anything embedding the pipeline.
//!
//! # Examples
//!
//! ```
//! use icongen_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
//! assert!(!ExitCode::CANCELLED.is_success());
//! ```

use std::fmt;
use std::str::FromStr;

/// CLI output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Pretty-printed output with colors for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::cli::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.as_str(), "json");
    /// assert_eq!(OutputFormat::Pretty.as_str(), "pretty");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// CLI exit code with semantic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Run completed, possibly with a warning (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// One or more files could not be written or deleted (exit code 1).
    pub const SYNC_FAILED: Self = Self(1);

    /// Any other failure, such as an unreadable asset directory (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid or missing configuration (exit code 2).
    pub const CONFIG_ERROR: Self = Self(2);

    /// Run was cancelled (exit code 130, as for SIGINT).
    pub const CANCELLED: Self = Self(130);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(
            "pretty".parse::<OutputFormat>().unwrap(),
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_output_format_parsing_invalid() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_output_format_display_roundtrip() {
        for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Pretty] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_exit_codes() {
        assert!(ExitCode::SUCCESS.is_success());
        assert!(!ExitCode::SYNC_FAILED.is_success());
        assert_eq!(ExitCode::CONFIG_ERROR.as_i32(), 2);
        assert_eq!(i32::from(ExitCode::CANCELLED), 130);
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
        assert_eq!(ExitCode::from_i32(1), ExitCode::SYNC_FAILED);
    }
}
