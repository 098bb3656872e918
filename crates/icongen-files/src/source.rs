//! Built-in [`AssetSource`] implementations.

use std::fs;
use std::path::{Path, PathBuf};

use icongen_core::traits::AssetSource;
use icongen_core::{Error, IconAsset, Result};
use walkdir::WalkDir;

const SVG_EXTENSION: &str = "svg";

/// Reads every `*.svg` file below a directory.
///
/// The walk is recursive and the extension match case-insensitive. The
/// asset name is the file stem; empty files are skipped. Invalid UTF-8 is
/// replaced with U+FFFD rather than failing the run.
///
/// # Examples
///
/// ```
/// use icongen_core::traits::AssetSource;
/// use icongen_files::DirectorySource;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// std::fs::write(dir.path().join("alert-16.svg"), "<svg/>").unwrap();
///
/// let assets = DirectorySource::new(dir.path()).list_assets().unwrap();
/// assert_eq!(assets[0].name, "alert-16");
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory being walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SVG_EXTENSION))
}

impl AssetSource for DirectorySource {
    fn list_assets(&self) -> Result<Vec<IconAsset>> {
        if !self.root.is_dir() {
            return Err(Error::AssetError {
                name: self.root.display().to_string(),
                message: "asset directory does not exist".to_string(),
            });
        }

        let mut assets = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map_or_else(|| self.root.clone(), Path::to_path_buf);
                Error::io(path, e.into())
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_svg(path) {
                continue;
            }

            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };

            let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
            let content = String::from_utf8(bytes).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "asset is not valid UTF-8, decoding lossily"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            });
            if content.trim().is_empty() {
                tracing::debug!(path = %path.display(), "skipping empty asset");
                continue;
            }

            assets.push(IconAsset::new(name, content));
        }

        tracing::debug!(root = %self.root.display(), count = assets.len(), "discovered assets");
        Ok(assets)
    }
}

/// Serves assets compiled into the binary.
///
/// Each entry is a `(name, content)` pair, typically built with
/// `include_str!`. With a prefix set, only names starting with it are
/// served, with the prefix and any trailing `.svg` removed.
///
/// # Examples
///
/// ```
/// use icongen_core::traits::AssetSource;
/// use icongen_files::EmbeddedSource;
///
/// static ICONS: &[(&str, &str)] = &[
///     ("octicons/alert-16.svg", "<svg/>"),
///     ("other/logo.svg", "<svg/>"),
/// ];
///
/// let assets = EmbeddedSource::new(ICONS)
///     .with_prefix("octicons/")
///     .list_assets()
///     .unwrap();
///
/// assert_eq!(assets.len(), 1);
/// assert_eq!(assets[0].name, "alert-16");
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    entries: &'static [(&'static str, &'static str)],
    prefix: Option<String>,
}

impl EmbeddedSource {
    /// Creates a source over static `(name, content)` pairs.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            prefix: None,
        }
    }

    /// Restricts the source to names starting with `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn asset_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        let name = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };
        let stem = name
            .len()
            .checked_sub(SVG_EXTENSION.len() + 1)
            .filter(|&dot| {
                name.get(dot..)
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(".svg"))
            })
            .map_or(name, |dot| &name[..dot]);
        Some(stem)
    }
}

impl AssetSource for EmbeddedSource {
    fn list_assets(&self) -> Result<Vec<IconAsset>> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, content)| !content.trim().is_empty())
            .filter_map(|&(name, content)| {
                self.asset_name(name)
                    .map(|name| IconAsset::new(name, content))
            })
            .collect())
    }
}
