//! Output directory synchronization.
//!
//! Keeps a directory holding exactly one file per generated component plus
//! the reserved artifacts (manifest, gallery). Every filesystem call runs
//! under the configured [`RetryPolicy`]; a call that still fails is
//! recorded as a [`SyncFailure`] and the run moves on.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use icongen_core::traits::FileStore;
use icongen_core::{GeneratedComponent, GeneratorConfig, Identifier, RetryPolicy};
use serde::Serialize;

use crate::retry::with_retry;
use crate::store::DiskStore;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOperation {
    /// Creating the output directory
    CreateDir,
    /// Writing a component or artifact
    Write,
    /// Listing the output directory
    List,
    /// Deleting an orphan
    Delete,
}

impl SyncOperation {
    /// Returns the operation name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDir => "create_dir",
            Self::Write => "write",
            Self::List => "list",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filesystem operation that failed after every retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    /// File or directory the operation targeted
    pub path: PathBuf,
    /// What was being attempted
    pub operation: SyncOperation,
    /// Attempts made before giving up
    pub attempts: u32,
    /// Error from the last attempt
    pub message: String,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed after {} attempt(s): {}",
            self.operation,
            self.path.display(),
            self.attempts,
            self.message
        )
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// File was (re)written
    Written,
    /// On-disk contents already matched; file left untouched
    Unchanged,
    /// Write failed; see the report's failures
    Failed,
}

/// What a synchronization pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Files written
    pub written: Vec<PathBuf>,
    /// Files whose contents already matched
    pub unchanged: Vec<PathBuf>,
    /// Orphans removed
    pub deleted: Vec<PathBuf>,
    /// Operations that exhausted their retries
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Returns `true` if no operation failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(
        &mut self,
        operation: SyncOperation,
        path: &Path,
        error: &io::Error,
        attempts: u32,
    ) {
        tracing::warn!(
            %operation,
            path = %path.display(),
            attempts,
            error = %error,
            "giving up on filesystem operation"
        );
        self.failures.push(SyncFailure {
            path: path.to_path_buf(),
            operation,
            attempts,
            message: error.to_string(),
        });
    }
}

/// Desired writes versus orphan deletions for one output directory.
///
/// Computing a plan only lists the directory; nothing is modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// Directory being synchronized
    pub output_dir: PathBuf,
    /// Component files that will be written
    pub writes: Vec<PathBuf>,
    /// Generator files present on disk but no longer desired
    pub deletions: Vec<PathBuf>,
}

/// Reconciles an output directory with the desired set of components.
///
/// # Examples
///
/// ```
/// use icongen_core::{GeneratedComponent, GeneratorConfig, Identifier};
/// use icongen_files::FileSynchronizer;
/// use tempfile::TempDir;
///
/// let dir = TempDir::new().unwrap();
/// std::fs::write(dir.path().join("Stale16.razor"), "old").unwrap();
///
/// let config = GeneratorConfig::builder().output_dir(dir.path()).build().unwrap();
/// let synchronizer = FileSynchronizer::from_config(&config);
///
/// let report = synchronizer.sync(
///     dir.path(),
///     &[GeneratedComponent {
///         identifier: Identifier::new("Alert16"),
///         size_px: 16,
///         source_text: "<svg/>".to_string(),
///     }],
/// );
///
/// assert!(report.is_clean());
/// assert!(dir.path().join("Alert16.razor").exists());
/// assert!(!dir.path().join("Stale16.razor").exists());
/// ```
#[derive(Debug)]
pub struct FileSynchronizer<S = DiskStore> {
    store: S,
    retry: RetryPolicy,
    extension: String,
    reserved: HashSet<String>,
    cleanup: bool,
}

impl FileSynchronizer<DiskStore> {
    /// Creates a disk-backed synchronizer from the generator settings.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::with_store(DiskStore, config)
    }
}

impl<S: FileStore> FileSynchronizer<S> {
    /// Creates a synchronizer over a custom store.
    ///
    /// The manifest file name is always reserved; the gallery's only when
    /// the gallery is emitted, so a stale one is cleaned up otherwise.
    #[must_use]
    pub fn with_store(store: S, config: &GeneratorConfig) -> Self {
        let mut synchronizer = Self {
            store,
            retry: config.retry,
            extension: config.extension.clone(),
            reserved: HashSet::new(),
            cleanup: config.enable_orphan_cleanup,
        };

        if let Ok(manifest) = config.manifest_file() {
            synchronizer.reserve(&manifest);
        }
        if config.emit_gallery
            && let Ok(gallery) = config.gallery_file()
        {
            synchronizer.reserve(&gallery);
        }

        synchronizer
    }

    /// Protects a file name from orphan cleanup.
    pub fn reserve(&mut self, path: &Path) {
        if let Some(name) = path.file_name() {
            self.reserved.insert(name.to_string_lossy().to_lowercase());
        }
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns whether orphan cleanup is enabled.
    #[must_use]
    pub const fn cleanup_enabled(&self) -> bool {
        self.cleanup
    }

    /// Returns the path a component is written to.
    #[must_use]
    pub fn component_path(&self, output_dir: &Path, identifier: &Identifier) -> PathBuf {
        output_dir.join(identifier.file_name(&self.extension))
    }

    /// Ensures the output directory exists.
    ///
    /// Returns `false` (and records a failure) if it could not be created.
    pub fn prepare(&self, output_dir: &Path, report: &mut SyncReport) -> bool {
        match with_retry(&self.retry, SyncOperation::CreateDir.as_str(), output_dir, || {
            self.store.create_dir_all(output_dir)
        }) {
            Ok(()) => true,
            Err((e, attempts)) => {
                report.record_failure(SyncOperation::CreateDir, output_dir, &e, attempts);
                false
            }
        }
    }

    /// Writes one component.
    ///
    /// With `skip_if_unchanged`, an existing file whose contents already
    /// match is left untouched.
    pub fn write_component(
        &self,
        output_dir: &Path,
        component: &GeneratedComponent,
        skip_if_unchanged: bool,
        report: &mut SyncReport,
    ) -> WriteOutcome {
        let path = self.component_path(output_dir, &component.identifier);
        self.write_file(&path, &component.source_text, skip_if_unchanged, report)
    }

    /// Writes a whole document to `path`.
    pub fn write_file(
        &self,
        path: &Path,
        contents: &str,
        skip_if_unchanged: bool,
        report: &mut SyncReport,
    ) -> WriteOutcome {
        if skip_if_unchanged
            && self
                .store
                .read_to_string(path)
                .is_ok_and(|existing| existing == contents)
        {
            tracing::debug!(path = %path.display(), "unchanged");
            report.unchanged.push(path.to_path_buf());
            return WriteOutcome::Unchanged;
        }

        match with_retry(&self.retry, SyncOperation::Write.as_str(), path, || {
            self.store.write_atomic(path, contents)
        }) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "written");
                report.written.push(path.to_path_buf());
                WriteOutcome::Written
            }
            Err((e, attempts)) => {
                report.record_failure(SyncOperation::Write, path, &e, attempts);
                WriteOutcome::Failed
            }
        }
    }

    /// Computes writes and orphan deletions without touching the directory.
    ///
    /// A missing output directory has no orphans.
    ///
    /// # Errors
    ///
    /// Returns the listing error and the attempts made if the directory
    /// exists but cannot be listed.
    pub fn plan(
        &self,
        output_dir: &Path,
        desired: &[Identifier],
    ) -> Result<SyncPlan, (io::Error, u32)> {
        let writes: Vec<PathBuf> = desired
            .iter()
            .map(|identifier| self.component_path(output_dir, identifier))
            .collect();

        let keep: HashSet<String> = writes
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_lowercase())
            .collect();

        let present = with_retry(&self.retry, SyncOperation::List.as_str(), output_dir, || {
            match self.store.list_files(output_dir) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
                other => other,
            }
        })?;

        let deletions = present
            .into_iter()
            .filter(|path| self.is_generated(path))
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().to_lowercase())
                    .is_some_and(|name| !keep.contains(&name) && !self.reserved.contains(&name))
            })
            .collect();

        Ok(SyncPlan {
            output_dir: output_dir.to_path_buf(),
            writes,
            deletions,
        })
    }

    /// Deletes every generator file in `output_dir` not in `desired`.
    ///
    /// A file that disappeared in the meantime counts as deleted.
    pub fn remove_orphans(&self, output_dir: &Path, desired: &[Identifier], report: &mut SyncReport) {
        let plan = match self.plan(output_dir, desired) {
            Ok(plan) => plan,
            Err((e, attempts)) => {
                report.record_failure(SyncOperation::List, output_dir, &e, attempts);
                return;
            }
        };

        for path in plan.deletions {
            let result = with_retry(&self.retry, SyncOperation::Delete.as_str(), &path, || {
                match self.store.remove_file(&path) {
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                    other => other,
                }
            });

            match result {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "deleted orphan");
                    report.deleted.push(path);
                }
                Err((e, attempts)) => {
                    report.record_failure(SyncOperation::Delete, &path, &e, attempts);
                }
            }
        }
    }

    /// Writes every desired component and, if enabled, removes orphans.
    ///
    /// Writes are unconditional. Components whose write failed remain in
    /// the desired set and are never treated as orphans.
    pub fn sync(&self, output_dir: &Path, desired: &[GeneratedComponent]) -> SyncReport {
        let mut report = SyncReport::default();
        if !self.prepare(output_dir, &mut report) {
            return report;
        }

        for component in desired {
            self.write_component(output_dir, component, false, &mut report);
        }

        if self.cleanup {
            let identifiers: Vec<Identifier> = desired
                .iter()
                .map(|component| component.identifier.clone())
                .collect();
            self.remove_orphans(output_dir, &identifiers, &mut report);
        }

        report
    }

    fn is_generated(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
    }
}
