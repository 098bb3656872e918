//! Output formatters for CLI commands.
//!
//! Reports are serialized once and rendered as JSON, compact text or a
//! colored outline for terminals.

use anyhow::Result;
use colored::Colorize;
use icongen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use icongen_cli::formatters::format_output;
/// use icongen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     written: usize,
/// }
///
/// let output = format_output(&Summary { written: 3 }, OutputFormat::Json)?;
/// assert!(output.contains("\"written\": 3"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};

    /// Format data as single-line JSON, for piping into other tools.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as a colored, indented outline.
    ///
    /// Objects become `key: value` lines, arrays become `- item` lines, and
    /// empty collections print as `none`.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        Ok(out.trim_end().to_string())
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(a) if a.is_empty() => "none".dimmed().to_string(),
            Value::Object(o) if o.is_empty() => "none".dimmed().to_string(),
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    fn is_nested(value: &Value) -> bool {
        match value {
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            _ => false,
        }
    }

    fn write_value(out: &mut String, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(obj) if !obj.is_empty() => {
                for (key, val) in obj {
                    let label = key.replace('_', " ");
                    if is_nested(val) {
                        out.push_str(&format!("{pad}{}:\n", label.blue().bold()));
                        write_value(out, val, indent + 1);
                    } else {
                        out.push_str(&format!("{pad}{}: {}\n", label.blue().bold(), scalar(val)));
                    }
                }
            }
            Value::Array(arr) if !arr.is_empty() => {
                for item in arr {
                    if is_nested(item) {
                        out.push_str(&format!("{pad}-\n"));
                        write_value(out, item, indent + 1);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    }
                }
            }
            other => {
                out.push_str(&format!("{pad}{}\n", scalar(other)));
            }
        }
    }
}
