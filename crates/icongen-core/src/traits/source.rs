//! Asset source trait.

use crate::{IconAsset, Result};

/// Supplies the complete current set of icon assets for one run.
///
/// Implementations are injected by the host rather than discovered; order
/// of the returned assets is irrelevant because the pipeline sorts by name.
///
/// # Examples
///
/// ```
/// use icongen_core::traits::AssetSource;
/// use icongen_core::{IconAsset, Result};
///
/// struct Fixed;
///
/// impl AssetSource for Fixed {
///     fn list_assets(&self) -> Result<Vec<IconAsset>> {
///         Ok(vec![IconAsset::new("alert-16", "<svg/>")])
///     }
/// }
///
/// assert_eq!(Fixed.list_assets().unwrap().len(), 1);
/// ```
pub trait AssetSource: Send + Sync {
    /// Lists every asset available for this run.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be enumerated or an
    /// asset cannot be read.
    fn list_assets(&self) -> Result<Vec<IconAsset>>;
}
