//! Disk-backed [`FileStore`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use icongen_core::traits::FileStore;
use tempfile::NamedTempFile;

/// [`FileStore`] over the local filesystem.
///
/// Writes go to a temp file created in the destination directory, are
/// synced, then renamed over the target, so readers see either the old or
/// the new document.
///
/// # Examples
///
/// ```
/// use icongen_core::traits::FileStore;
/// use icongen_files::DiskStore;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// let path = dir.path().join("Alert16.razor");
///
/// DiskStore.write_atomic(&path, "<svg/>").unwrap();
/// assert_eq!(DiskStore.read_to_string(&path).unwrap(), "<svg/>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Alert16.razor");

        fs::write(&path, "old content").unwrap();
        DiskStore.write_atomic(&path, "new content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        DiskStore
            .write_atomic(&temp.path().join("Alert16.razor"), "x")
            .unwrap();

        let files = DiskStore.list_files(temp.path()).unwrap();
        assert_eq!(files, vec![temp.path().join("Alert16.razor")]);
    }

    #[test]
    fn test_write_atomic_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("Alert16.razor");
        assert!(DiskStore.write_atomic(&path, "x").is_err());
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("b.razor"), "").unwrap();
        fs::write(temp.path().join("a.razor"), "").unwrap();

        let files = DiskStore.list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.razor"), temp.path().join("b.razor")]
        );
    }

    #[test]
    fn test_remove_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = DiskStore
            .remove_file(&temp.path().join("gone.razor"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
