//! Filesystem access trait.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations used by the synchronizer.
///
/// Methods return raw [`io::Result`] so the retry layer can decide what is
/// worth retrying; wrapping into the workspace error happens above it.
///
/// The output directory is shared with other processes, so any call may
/// fail transiently.
pub trait FileStore: Send + Sync {
    /// Creates a directory and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replaces `path` with `contents` as a whole document.
    ///
    /// Readers must never observe a partially written file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Reads a file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including `NotFound`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Lists regular files directly inside `dir` (not recursive).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}
