//! Render memoization keyed by asset content.
//!
//! Uses BLAKE3 hashes of `(name, content)` as cache keys. Within a run the
//! cache is a plain map with no eviction; across runs it can be persisted
//! as JSON next to a fingerprint of the renderer settings, and a file
//! written under different settings is discarded wholesale.
//!
//! # Examples
//!
//! ```
//! use icongen_codegen::cache::{CacheStatus, RenderCache};
//! use icongen_core::IconAsset;
//!
//! let mut cache = RenderCache::in_memory("settings");
//! let asset = IconAsset::new("logo", "<svg/>");
//!
//! let first = cache.get_or_render(&asset, |_| Ok(None)).unwrap();
//! assert_eq!(first.status, CacheStatus::Miss);
//!
//! let second = cache
//!     .get_or_render(&asset, |_| unreachable!("served from cache"))
//!     .unwrap();
//! assert_eq!(second.status, CacheStatus::Hit);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use blake3::Hasher;
use icongen_core::{Error, GeneratedComponent, IconAsset, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Cache key for a rendered asset.
///
/// # Examples
///
/// ```
/// use icongen_codegen::cache::CacheKey;
/// use icongen_core::IconAsset;
///
/// let key = CacheKey::for_asset(&IconAsset::new("alert-16", "<svg/>"));
/// assert!(key.as_str().starts_with("icon_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for an asset.
    ///
    /// Both fields are length-prefixed, so `("ab", "c")` and `("a", "bc")`
    /// hash differently.
    #[must_use]
    pub fn for_asset(asset: &IconAsset) -> Self {
        let mut hasher = Hasher::new();
        for field in [asset.name.as_str(), asset.content.as_str()] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        Self(format!("icon_{}", hasher.finalize().to_hex()))
    }

    /// Returns the cache key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    /// Rendered during this lookup
    Miss,
    /// Rendered earlier in this run
    Hit,
    /// Loaded from the persisted cache of a previous run
    Persisted,
}

impl CacheStatus {
    /// Returns `true` unless the render closure ran.
    #[must_use]
    pub const fn is_hit(self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Result of [`RenderCache::get_or_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    /// Rendered component, or `None` for a skipped asset
    pub component: Option<GeneratedComponent>,
    /// Origin of the result
    pub status: CacheStatus,
}

#[derive(Debug)]
struct CacheEntry {
    component: Option<GeneratedComponent>,
    from_disk: bool,
    used: bool,
}

#[derive(Serialize, Deserialize)]
struct PersistedCache {
    settings: String,
    entries: BTreeMap<CacheKey, Option<GeneratedComponent>>,
}

/// Memo map from asset fingerprint to render result.
#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<CacheKey, CacheEntry>,
    settings: String,
    path: Option<PathBuf>,
    enabled: bool,
    hits: usize,
    misses: usize,
}

impl RenderCache {
    /// Creates an empty cache that is never written to disk.
    #[must_use]
    pub fn in_memory(settings: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            settings: settings.into(),
            path: None,
            enabled: true,
            hits: 0,
            misses: 0,
        }
    }

    /// Creates a cache that never stores anything; every lookup renders.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::in_memory(String::new())
        }
    }

    /// Loads a persisted cache from `path`.
    ///
    /// A missing file yields an empty cache. So does an unreadable, corrupt
    /// or stale one: losing the cache only costs re-rendering. The cache is
    /// saved back to `path` by [`RenderCache::save`].
    #[must_use]
    pub fn load(path: impl Into<PathBuf>, settings: impl Into<String>) -> Self {
        let path = path.into();
        let mut cache = Self::in_memory(settings);

        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<PersistedCache>(&text) {
                Ok(persisted) if persisted.settings == cache.settings => {
                    cache.entries = persisted
                        .entries
                        .into_iter()
                        .map(|(key, component)| {
                            let entry = CacheEntry {
                                component,
                                from_disk: true,
                                used: false,
                            };
                            (key, entry)
                        })
                        .collect();
                    tracing::debug!(
                        path = %path.display(),
                        entries = cache.entries.len(),
                        "loaded render cache"
                    );
                }
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "render settings changed, discarding cache");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt render cache");
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable render cache");
            }
        }

        cache.path = Some(path);
        cache
    }

    /// Returns the cached result for `asset`, rendering it on a miss.
    ///
    /// `render` is only invoked on a miss; its `None` (skipped asset) is
    /// cached too.
    ///
    /// # Errors
    ///
    /// Propagates the error from `render`. Failed renders are not cached.
    pub fn get_or_render<F>(&mut self, asset: &IconAsset, render: F) -> Result<CacheLookup>
    where
        F: FnOnce(&IconAsset) -> Result<Option<GeneratedComponent>>,
    {
        if !self.enabled {
            self.misses += 1;
            return Ok(CacheLookup {
                component: render(asset)?,
                status: CacheStatus::Miss,
            });
        }

        let key = CacheKey::for_asset(asset);
        if let Some(entry) = self.entries.get_mut(&key) {
            let status = if entry.from_disk && !entry.used {
                CacheStatus::Persisted
            } else {
                CacheStatus::Hit
            };
            entry.used = true;
            self.hits += 1;
            tracing::trace!(key = %key, ?status, "render cache hit");
            return Ok(CacheLookup {
                component: entry.component.clone(),
                status,
            });
        }

        let component = render(asset)?;
        self.misses += 1;
        self.entries.insert(
            key,
            CacheEntry {
                component: component.clone(),
                from_disk: false,
                used: true,
            },
        );

        Ok(CacheLookup {
            component,
            status: CacheStatus::Miss,
        })
    }

    /// Writes the entries used in this run back to the persisted file.
    ///
    /// Entries not looked up this run are dropped, so the file tracks the
    /// current asset set. Does nothing for in-memory or disabled caches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CacheError`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let persisted = PersistedCache {
            settings: self.settings.clone(),
            entries: self
                .entries
                .iter()
                .filter(|(_, entry)| entry.used)
                .map(|(key, entry)| (key.clone(), entry.component.clone()))
                .collect(),
        };

        let json = serde_json::to_string(&persisted).map_err(|e| Error::CacheError {
            message: "failed to serialize render cache".to_string(),
            source: Some(Box::new(e)),
        })?;

        write_atomic(path, &json).map_err(|e| Error::CacheError {
            message: format!("failed to write render cache {}", path.display()),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!(
            path = %path.display(),
            entries = persisted.entries.len(),
            "saved render cache"
        );
        Ok(())
    }

    /// Returns the persisted file location, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns lookups served without rendering.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Returns lookups that invoked the renderer.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }
}

/// Default persisted cache location for an output directory.
///
/// One file per output directory under the user cache directory, e.g.
/// `~/.cache/icongen/<hash>.json`. Returns `None` if the platform has no
/// cache directory.
#[must_use]
pub fn default_cache_path(output_dir: &Path) -> Option<PathBuf> {
    let hash = blake3::hash(output_dir.to_string_lossy().as_bytes());
    let name = format!("{}.json", &hash.to_hex()[..16]);
    dirs::cache_dir().map(|dir| dir.join("icongen").join(name))
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
