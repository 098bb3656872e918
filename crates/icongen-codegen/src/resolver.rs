//! Asset name resolution.
//!
//! Turns a raw asset name such as `alert-fill-16` into the identifier
//! `AlertFill16` and extracts the nominal pixel size from its last two
//! characters. Names that do not end in a two-digit size are not icons
//! this generator knows how to size and are dropped.
//!
//! # Examples
//!
//! ```
//! use icongen_codegen::resolver::resolve;
//! use icongen_core::IconAsset;
//!
//! let icon = resolve(&IconAsset::new("alert-fill-16", "<svg/>")).unwrap();
//! assert_eq!(icon.identifier.as_str(), "AlertFill16");
//! assert_eq!(icon.size_px, 16);
//!
//! assert!(resolve(&IconAsset::new("logo", "<svg/>")).is_none());
//! ```

use icongen_core::{CanonicalIcon, IconAsset, Identifier};

/// Converts a hyphenated asset name into a `PascalCase` identifier.
///
/// Spaces are removed, the name is split on `-` and the first character of
/// every non-empty segment is uppercased. The rest of each segment is kept
/// as-is.
///
/// # Examples
///
/// ```
/// use icongen_codegen::resolver::to_identifier;
///
/// assert_eq!(to_identifier("arrow-down-24"), "ArrowDown24");
/// assert_eq!(to_identifier("file zip-16"), "Filezip16");
/// assert_eq!(to_identifier("gitHub-16"), "GitHub16");
/// ```
#[must_use]
pub fn to_identifier(name: &str) -> String {
    name.split('-')
        .map(|segment| segment.replace(' ', ""))
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Parses the nominal size from the last two characters of an identifier.
///
/// Returns `None` when the identifier is shorter than two characters or
/// either of its last two characters is not an ASCII digit.
///
/// # Examples
///
/// ```
/// use icongen_codegen::resolver::size_suffix;
///
/// assert_eq!(size_suffix("Alert16"), Some(16));
/// assert_eq!(size_suffix("Sparkle7"), None);
/// assert_eq!(size_suffix("Logo"), None);
/// ```
#[must_use]
pub fn size_suffix(identifier: &str) -> Option<u32> {
    let mut tail = identifier.chars().rev();
    let ones = tail.next()?.to_digit(10)?;
    let tens = tail.next()?.to_digit(10)?;
    Some(tens * 10 + ones)
}

/// Resolves an asset into a canonical icon, or `None` if its name carries
/// no size suffix.
///
/// The markup is carried over unchanged.
#[must_use]
pub fn resolve(asset: &IconAsset) -> Option<CanonicalIcon> {
    let identifier = to_identifier(&asset.name);

    let Some(size_px) = size_suffix(&identifier) else {
        tracing::trace!(name = %asset.name, "skipping asset without size suffix");
        return None;
    };

    Some(CanonicalIcon {
        identifier: Identifier::new(identifier),
        size_px,
        markup: asset.content.clone(),
    })
}
