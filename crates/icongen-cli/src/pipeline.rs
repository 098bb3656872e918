//! The generation pipeline.
//!
//! One pass over the current asset set, sorted by name:
//!
//! 1. resolve and render each asset (memoized by [`RenderCache`])
//! 2. write its component into the output directory
//! 3. classify it by size
//!
//! then write the manifest and gallery, delete orphans and save the cache.
//! Cancellation is checked before each asset; a cancelled run leaves what
//! it already wrote and skips everything after the loop.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use icongen_codegen::{
    CacheStatus, ComponentRenderer, ManifestBuilder, RenderCache, SizeClassifier,
    default_cache_path, resolve,
};
use icongen_core::traits::{AssetSource, FileStore};
use icongen_core::{
    Diagnostic, DiagnosticSink, Error, GeneratorConfig, IconAsset, Identifier, Result,
};
use icongen_files::{DiskStore, FileSynchronizer, SyncPlan, SyncReport, WriteOutcome};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every asset was processed
    Completed,
    /// The source had no assets; nothing was touched
    NoAssets,
    /// Stopped early by the cancellation token
    Cancelled,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// How the run ended
    pub status: RunStatus,
    /// Directory that was synchronized
    pub output_dir: PathBuf,
    /// Assets supplied by the source
    pub assets: usize,
    /// Components in the desired set
    pub components: usize,
    /// Assets whose name carried no size suffix
    pub skipped: usize,
    /// Identifiers dropped because an earlier asset produced them
    pub duplicates: Vec<Identifier>,
    /// Assets served from the render cache
    pub cache_hits: usize,
    /// Manifest location, if written
    pub manifest: Option<PathBuf>,
    /// Gallery location, if written
    pub gallery: Option<PathBuf>,
    /// File-level results
    pub sync: SyncReport,
}

impl RunReport {
    fn new(status: RunStatus, output_dir: &Path, assets: usize) -> Self {
        Self {
            status,
            output_dir: output_dir.to_path_buf(),
            assets,
            components: 0,
            skipped: 0,
            duplicates: Vec::new(),
            cache_hits: 0,
            manifest: None,
            gallery: None,
            sync: SyncReport::default(),
        }
    }

    /// Returns `true` if the run finished without per-file failures.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status != RunStatus::Cancelled && self.sync.is_clean()
    }
}

/// Runs the generation pipeline for one configuration.
///
/// The render cache lives as long as the generator, so repeated runs in
/// one process reuse it.
///
/// # Examples
///
/// ```
/// use icongen_cli::pipeline::{Generator, RunStatus};
/// use icongen_core::GeneratorConfig;
/// use icongen_core::diagnostics::CollectingSink;
/// use icongen_files::EmbeddedSource;
/// use tokio_util::sync::CancellationToken;
///
/// static ICONS: &[(&str, &str)] = &[("alert-16", r#"<svg width="16"><path d="M0"/></svg>"#)];
///
/// let dir = tempfile::TempDir::new().unwrap();
/// let config = GeneratorConfig::builder().output_dir(dir.path()).build().unwrap();
/// let mut generator = Generator::new(config).unwrap();
///
/// let report = generator
///     .run(
///         &EmbeddedSource::new(ICONS),
///         &mut CollectingSink::default(),
///         &CancellationToken::new(),
///     )
///     .unwrap();
///
/// assert_eq!(report.status, RunStatus::Completed);
/// assert!(dir.path().join("Alert16.razor").exists());
/// assert!(dir.path().join("Octicons.cs").exists());
/// ```
#[derive(Debug)]
pub struct Generator<S = DiskStore> {
    config: GeneratorConfig,
    renderer: ComponentRenderer,
    manifest_builder: ManifestBuilder,
    synchronizer: FileSynchronizer<S>,
    cache: RenderCache,
}

impl Generator<DiskStore> {
    /// Creates a generator writing to the local disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the templates
    /// fail to register.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_store(config, DiskStore)
    }
}

impl<S: FileStore> Generator<S> {
    /// Creates a generator over a custom [`FileStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the templates
    /// fail to register.
    pub fn with_store(config: GeneratorConfig, store: S) -> Result<Self> {
        config.validate()?;

        let renderer = ComponentRenderer::new(config.default_color.clone())?;
        let manifest_builder =
            ManifestBuilder::new(config.namespace.clone(), config.class_name.clone())?;
        let synchronizer = FileSynchronizer::with_store(store, &config);
        let cache = open_cache(&config, &renderer);

        Ok(Self {
            config,
            renderer,
            manifest_builder,
            synchronizer,
            cache,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the render cache.
    #[must_use]
    pub const fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Runs one full generation pass.
    ///
    /// # Errors
    ///
    /// Returns an error, after reporting `ICONGEN001`, if no output directory
    /// is configured; if the source cannot be listed; or if a template fails
    /// to render. Filesystem failures are not errors: they are retried and
    /// then recorded in the report.
    pub fn run(
        &mut self,
        source: &dyn AssetSource,
        sink: &mut dyn DiagnosticSink,
        cancel: &CancellationToken,
    ) -> Result<RunReport> {
        let output_dir = self.output_dir(sink)?;

        let assets = sorted_assets(source)?;
        let mut report = RunReport::new(RunStatus::Completed, &output_dir, assets.len());

        if assets.is_empty() {
            sink.report(Diagnostic::no_assets_found());
            report.status = RunStatus::NoAssets;
            return Ok(report);
        }

        if !self.synchronizer.prepare(&output_dir, &mut report.sync) {
            return Ok(report);
        }

        let mut classifier = SizeClassifier::new(&self.config.recognized_sizes);
        let mut seen = HashSet::new();

        for asset in &assets {
            if cancel.is_cancelled() {
                info!(processed = report.components, "generation cancelled");
                report.status = RunStatus::Cancelled;
                return Ok(report);
            }

            let renderer = &self.renderer;
            let lookup = self.cache.get_or_render(asset, |asset| {
                resolve(asset).map(|icon| renderer.render(&icon)).transpose()
            })?;
            if lookup.status.is_hit() {
                report.cache_hits += 1;
            }

            let Some(component) = lookup.component else {
                report.skipped += 1;
                continue;
            };

            if !seen.insert(component.identifier.as_str().to_lowercase()) {
                warn!(
                    identifier = %component.identifier,
                    asset = %asset.name,
                    "duplicate identifier, keeping the first asset"
                );
                report.duplicates.push(component.identifier);
                continue;
            }

            let skip_if_unchanged = lookup.status == CacheStatus::Persisted;
            let outcome = self.synchronizer.write_component(
                &output_dir,
                &component,
                skip_if_unchanged,
                &mut report.sync,
            );
            if outcome == WriteOutcome::Failed {
                debug!(identifier = %component.identifier, "kept in manifest despite failed write");
            }

            classifier.push(component.identifier, component.size_px);
            report.components += 1;
        }

        let manifest = classifier.finish();

        let manifest_path = self.config.manifest_file()?;
        let index = self.manifest_builder.build_index(&manifest)?;
        if self.write_artifact(&output_dir, &manifest_path, &index, &mut report.sync) {
            report.manifest = Some(manifest_path);
        }

        if self.config.emit_gallery {
            let gallery_path = self.config.gallery_file()?;
            let gallery = self.manifest_builder.build_gallery(&manifest)?;
            if self.write_artifact(&output_dir, &gallery_path, &gallery, &mut report.sync) {
                report.gallery = Some(gallery_path);
            }
        }

        if self.synchronizer.cleanup_enabled() {
            self.synchronizer
                .remove_orphans(&output_dir, &manifest.all, &mut report.sync);
        }

        if let Err(e) = self.cache.save() {
            warn!(error = %e, "failed to save render cache");
        }

        info!(
            components = report.components,
            written = report.sync.written.len(),
            unchanged = report.sync.unchanged.len(),
            deleted = report.sync.deleted.len(),
            failures = report.sync.failures.len(),
            skipped = report.skipped,
            "generation complete"
        );

        Ok(report)
    }

    /// Computes what a run would write and delete, without rendering or
    /// touching the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error, after reporting `ICONGEN001`, if no output directory
    /// is configured, or if the source or the directory cannot be listed.
    pub fn plan(
        &self,
        source: &dyn AssetSource,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<SyncPlan> {
        let output_dir = self.output_dir(sink)?;
        let assets = sorted_assets(source)?;
        if assets.is_empty() {
            sink.report(Diagnostic::no_assets_found());
        }

        let mut seen = HashSet::new();
        let identifiers: Vec<Identifier> = assets
            .iter()
            .filter_map(resolve)
            .map(|icon| icon.identifier)
            .filter(|identifier| seen.insert(identifier.as_str().to_lowercase()))
            .collect();

        let mut plan = self
            .synchronizer
            .plan(&output_dir, &identifiers)
            .map_err(|(e, _)| Error::io(&output_dir, e))?;
        if !self.synchronizer.cleanup_enabled() {
            plan.deletions.clear();
        }
        Ok(plan)
    }

    fn output_dir(&self, sink: &mut dyn DiagnosticSink) -> Result<PathBuf> {
        match self.config.require_output_dir() {
            Ok(dir) => Ok(dir.to_path_buf()),
            Err(e) => {
                sink.report(Diagnostic::missing_output_dir());
                Err(e)
            }
        }
    }

    fn write_artifact(
        &self,
        output_dir: &Path,
        path: &Path,
        contents: &str,
        sync: &mut SyncReport,
    ) -> bool {
        if let Some(parent) = path.parent()
            && parent != output_dir
            && !parent.as_os_str().is_empty()
            && !self.synchronizer.prepare(parent, sync)
        {
            return false;
        }
        self.synchronizer.write_file(path, contents, false, sync) == WriteOutcome::Written
    }
}

fn sorted_assets(source: &dyn AssetSource) -> Result<Vec<IconAsset>> {
    let mut assets = source.list_assets()?;
    assets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.content.cmp(&b.content)));
    Ok(assets)
}

fn open_cache(config: &GeneratorConfig, renderer: &ComponentRenderer) -> RenderCache {
    if !config.cache.enabled {
        return RenderCache::disabled();
    }

    let settings = renderer.settings_fingerprint();
    if !config.cache.persist {
        return RenderCache::in_memory(settings);
    }

    let path = config.cache.path.clone().or_else(|| {
        config
            .require_output_dir()
            .ok()
            .and_then(default_cache_path)
    });

    match path {
        Some(path) => RenderCache::load(path, settings),
        None => {
            warn!("no cache directory available, render cache will not be persisted");
            RenderCache::in_memory(settings)
        }
    }
}
