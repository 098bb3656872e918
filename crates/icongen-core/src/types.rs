//! Strong domain types for icongen.
//!
//! Raw input arrives as [`IconAsset`]s, is resolved into
//! [`CanonicalIcon`]s carrying an [`Identifier`] and a pixel size, and
//! leaves the pipeline as [`GeneratedComponent`]s, one per output file.
//!
//! # Examples
//!
//! ```
//! use icongen_core::{IconAsset, Identifier};
//!
//! let asset = IconAsset::new("alert-16", "<svg></svg>");
//! let id = Identifier::new("Alert16");
//!
//! assert_eq!(asset.name, "alert-16");
//! assert_eq!(id.file_name("razor"), "Alert16.razor");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named unit of vector markup supplied as input.
///
/// The name may contain spaces and hyphens and is not yet a valid
/// identifier. Sources never hand out assets with empty content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconAsset {
    /// Asset name, usually the file stem (`alert-fill-16`)
    pub name: String,
    /// Raw markup text
    pub content: String,
}

impl IconAsset {
    /// Creates a new icon asset.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Canonical PascalCase icon identifier (newtype over String).
///
/// Used both as the output file stem and as the lookup key in the
/// manifest.
///
/// # Examples
///
/// ```
/// use icongen_core::Identifier;
///
/// let id = Identifier::new("AlertFill16");
/// assert_eq!(id.as_str(), "AlertFill16");
/// assert_eq!(id.to_string(), "AlertFill16");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates a new identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Identifier` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the output file name for this identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use icongen_core::Identifier;
    ///
    /// assert_eq!(Identifier::new("Zap24").file_name("razor"), "Zap24.razor");
    /// ```
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An icon whose name resolved to an identifier with a size suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalIcon {
    /// PascalCase identifier
    pub identifier: Identifier,
    /// Nominal pixel size parsed from the identifier's last two digits
    pub size_px: u32,
    /// Original markup, unchanged
    pub markup: String,
}

/// Final output unit: one component source file per canonical icon.
///
/// # Examples
///
/// ```
/// use icongen_core::{GeneratedComponent, Identifier};
///
/// let component = GeneratedComponent {
///     identifier: Identifier::new("Alert16"),
///     size_px: 16,
///     source_text: "<svg></svg>".to_string(),
/// };
///
/// assert_eq!(component.file_name("razor"), "Alert16.razor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedComponent {
    /// Identifier, also the file stem
    pub identifier: Identifier,
    /// Nominal pixel size, kept so cached components can be classified
    pub size_px: u32,
    /// Complete file body
    pub source_text: String,
}

impl GeneratedComponent {
    /// Returns the output file name for this component.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        self.identifier.file_name(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_conversions() {
        let from_str: Identifier = "Alert16".into();
        let from_string: Identifier = String::from("Alert16").into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.into_inner(), "Alert16");
    }

    #[test]
    fn test_identifier_ordering_is_ordinal() {
        let mut ids = vec![
            Identifier::new("Zap16"),
            Identifier::new("Alert16"),
            Identifier::new("alert16"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "Alert16");
        assert_eq!(ids[1].as_str(), "Zap16");
        assert_eq!(ids[2].as_str(), "alert16");
    }

    #[test]
    fn test_identifier_serializes_transparently() {
        #[derive(Serialize)]
        struct Wrapper {
            id: Identifier,
        }
        let text = toml::to_string(&Wrapper {
            id: Identifier::new("Alert16"),
        })
        .unwrap();
        assert_eq!(text.trim(), "id = \"Alert16\"");
    }

    #[test]
    fn test_component_file_name() {
        let component = GeneratedComponent {
            identifier: Identifier::new("CheckCircle24"),
            size_px: 24,
            source_text: String::new(),
        };
        assert_eq!(component.file_name("razor"), "CheckCircle24.razor");
    }
}
