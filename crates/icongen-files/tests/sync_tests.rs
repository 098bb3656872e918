//! Synchronizer behaviour under contention, using a failure-injecting store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use icongen_core::traits::FileStore;
use icongen_core::{GeneratedComponent, GeneratorConfig, Identifier, RetryPolicy};
use icongen_files::{DiskStore, FileSynchronizer, SyncOperation, SyncReport, WriteOutcome};
use tempfile::TempDir;

/// Delegates to [`DiskStore`] but fails selected operations a fixed number
/// of times first.
#[derive(Debug, Default)]
struct FlakyStore {
    write_failures: AtomicU32,
    remove_failures: AtomicU32,
    remove_not_found: bool,
    fail_writes_for: Option<String>,
    write_calls: AtomicU32,
    removed: Mutex<Vec<PathBuf>>,
}

fn busy(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{} is locked by another process", path.display()),
    )
}

fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

impl FileStore for FlakyStore {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        DiskStore.create_dir_all(path)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let always_fails = self
            .fail_writes_for
            .as_deref()
            .is_some_and(|name| path.ends_with(name));
        if always_fails || take_failure(&self.write_failures) {
            return Err(busy(path));
        }
        DiskStore.write_atomic(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        DiskStore.read_to_string(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if take_failure(&self.remove_failures) {
            return Err(busy(path));
        }
        if self.remove_not_found {
            // Someone else removed it first
            DiskStore.remove_file(path)?;
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        DiskStore.remove_file(path)?;
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        DiskStore.list_files(dir)
    }
}

fn config(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::builder()
        .output_dir(dir)
        .retry(RetryPolicy::new(3, 1))
        .build()
        .unwrap()
}

fn component(id: &str) -> GeneratedComponent {
    GeneratedComponent {
        identifier: Identifier::new(id),
        size_px: 16,
        source_text: format!("<svg>{id}</svg>"),
    }
}

#[test]
fn test_write_succeeds_on_third_attempt() {
    let temp = TempDir::new().unwrap();
    let store = FlakyStore {
        write_failures: AtomicU32::new(2),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[component("Alert16")]);

    assert!(report.is_clean(), "{:?}", report.failures);
    assert_eq!(synchronizer.store().write_calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        fs::read_to_string(temp.path().join("Alert16.razor")).unwrap(),
        "<svg>Alert16</svg>"
    );
}

#[test]
fn test_exhausted_write_is_reported_not_fatal() {
    let temp = TempDir::new().unwrap();
    let store = FlakyStore {
        fail_writes_for: Some("Alert16.razor".to_string()),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[component("Alert16"), component("Zap16")]);

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.operation, SyncOperation::Write);
    assert_eq!(failure.attempts, 3);
    assert!(failure.path.ends_with("Alert16.razor"));
    // The run continued past the failure
    assert!(temp.path().join("Zap16.razor").exists());
}

#[test]
fn test_failed_write_is_never_orphaned() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Alert16.razor"), "previous run").unwrap();
    let store = FlakyStore {
        fail_writes_for: Some("Alert16.razor".to_string()),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[component("Alert16")]);

    assert!(report.deleted.is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("Alert16.razor")).unwrap(),
        "previous run"
    );
}

#[test]
fn test_delete_retries_then_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Stale16.razor"), "").unwrap();
    let store = FlakyStore {
        remove_failures: AtomicU32::new(2),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[]);

    assert!(report.is_clean());
    assert_eq!(report.deleted, vec![temp.path().join("Stale16.razor")]);
    assert_eq!(synchronizer.store().removed.lock().unwrap().len(), 1);
}

#[test]
fn test_delete_of_vanished_file_counts_as_deleted() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Stale16.razor"), "").unwrap();
    let store = FlakyStore {
        remove_not_found: true,
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[]);

    assert!(report.is_clean());
    assert_eq!(report.deleted.len(), 1);
}

#[test]
fn test_exhausted_delete_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Stale16.razor"), "").unwrap();
    let store = FlakyStore {
        remove_failures: AtomicU32::new(10),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].operation, SyncOperation::Delete);
    assert!(temp.path().join("Stale16.razor").exists());
}

#[test]
fn test_sync_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let synchronizer = FileSynchronizer::from_config(&config(temp.path()));
    let desired = [component("Alert16"), component("Alert24")];

    synchronizer.sync(temp.path(), &desired);
    let first = DiskStore.list_files(temp.path()).unwrap();
    let second_report = synchronizer.sync(temp.path(), &desired);
    let second = DiskStore.list_files(temp.path()).unwrap();

    assert_eq!(first, second);
    assert!(second_report.deleted.is_empty());
    for path in second {
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("<svg>{name}</svg>"));
    }
}

#[test]
fn test_orphan_cleanup_after_asset_removal() {
    let temp = TempDir::new().unwrap();
    let synchronizer = FileSynchronizer::from_config(&config(temp.path()));

    synchronizer.sync(temp.path(), &[component("Alert16"), component("Zap16")]);
    let report = synchronizer.sync(temp.path(), &[component("Alert16")]);

    assert_eq!(report.deleted, vec![temp.path().join("Zap16.razor")]);
    assert_eq!(
        DiskStore.list_files(temp.path()).unwrap(),
        vec![temp.path().join("Alert16.razor")]
    );
}

#[test]
fn test_skip_if_unchanged_avoids_write() {
    let temp = TempDir::new().unwrap();
    let synchronizer = FileSynchronizer::with_store(FlakyStore::default(), &config(temp.path()));
    let alert = component("Alert16");

    let mut report = SyncReport::default();
    assert!(synchronizer.prepare(temp.path(), &mut report));
    assert_eq!(
        synchronizer.write_component(temp.path(), &alert, true, &mut report),
        WriteOutcome::Written
    );
    assert_eq!(
        synchronizer.write_component(temp.path(), &alert, true, &mut report),
        WriteOutcome::Unchanged
    );
    assert_eq!(synchronizer.store().write_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_report_serializes_to_json() {
    let temp = TempDir::new().unwrap();
    let store = FlakyStore {
        fail_writes_for: Some("Alert16.razor".to_string()),
        ..FlakyStore::default()
    };
    let synchronizer = FileSynchronizer::with_store(store, &config(temp.path()));

    let report = synchronizer.sync(temp.path(), &[component("Alert16")]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["failures"][0]["operation"], "write");
    assert_eq!(json["failures"][0]["attempts"], 3);
}
