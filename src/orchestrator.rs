//! Run orchestrator coordinating one invocation
//!
//! This module provides:
//! - List mode: fetch the upstream version list
//! - Test mode: locate → read → snapshot → rewrite → write → install → test
//! - Restore mode: put the workspace back from the snapshot
//! - Dry-run support (no write, no snapshot, no package manager)

use crate::cli::RunMode;
use crate::config::Settings;
use crate::domain::RewriteReport;
use crate::error::AppError;
use crate::manifest::{read_manifest, resolve_manifest, ManifestWriter, WriteResult};
use crate::package_manager::{
    CommandResult, PackageManagerCommand, PackageManagerRunner, SystemPackageManager,
};
use crate::progress::Progress;
use crate::registry::{DocusaurusVersions, HttpClient, VersionSource};
use crate::rewrite::ManifestRewriter;
use crate::snapshot::{Snapshot, SnapshotInfo};
use std::path::{Path, PathBuf};

/// Result of testing one framework version
#[derive(Debug)]
pub struct VersionTestRun {
    /// Manifest that was rewritten
    pub manifest_path: PathBuf,
    /// Per-entry rewrite decisions
    pub report: RewriteReport,
    /// Serialized manifest and whether it hit the disk
    pub write: WriteResult,
    /// Snapshot taken before the package manager ran
    pub snapshot: Option<SnapshotInfo>,
    /// Install result, if install ran
    pub install: Option<CommandResult>,
    /// Test result, if tests ran
    pub test: Option<CommandResult>,
}

impl VersionTestRun {
    /// Version the manifest was pinned to
    pub fn target_version(&self) -> &str {
        &self.report.target_version
    }

    /// Failure message when install or tests failed
    pub fn failure(&self) -> Option<String> {
        if self.install.as_ref().is_some_and(|r| !r.success) {
            return Some(format!(
                "Install failed for Docusaurus version {}",
                self.target_version()
            ));
        }
        if self.test.as_ref().is_some_and(|r| !r.success) {
            return Some(format!(
                "Tests failed for Docusaurus version {}",
                self.target_version()
            ));
        }
        None
    }
}

/// Result of running the orchestrator
#[derive(Debug)]
pub enum RunOutcome {
    /// Upstream versions in published order
    Versions(Vec<String>),
    /// One version was tested
    Tested(VersionTestRun),
    /// Snapshot restored, or `None` when there was nothing to restore
    Restored(Option<SnapshotInfo>),
}

impl RunOutcome {
    /// Failure message for a run that completed but must fail the job
    pub fn failure(&self) -> Option<String> {
        match self {
            RunOutcome::Tested(run) => run.failure(),
            _ => None,
        }
    }
}

/// Orchestrator for one invocation
pub struct Orchestrator {
    /// Resolved settings
    settings: Settings,
    /// Where the version list comes from
    source: Box<dyn VersionSource>,
    /// Runs install and test
    runner: Box<dyn PackageManagerRunner>,
    /// Whether spinners are drawn
    show_progress: bool,
}

impl Orchestrator {
    /// Create an orchestrator talking to the real feed and package manager
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let source = DocusaurusVersions::with_url(client, settings.versions_url.clone());
        let runner = SystemPackageManager::new(settings.package_manager.clone());
        Ok(Self {
            settings,
            source: Box::new(source),
            runner: Box::new(runner),
            show_progress: false,
        })
    }

    /// Replace the version source
    pub fn with_source(mut self, source: impl VersionSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Replace the package manager runner
    pub fn with_runner(mut self, runner: impl PackageManagerRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Enable or disable spinners
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolved settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the requested work
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        let mut progress = Progress::new(self.show_progress);
        match &self.settings.mode {
            RunMode::ListVersions => self
                .list_versions(&mut progress)
                .await
                .map(RunOutcome::Versions),
            RunMode::TestVersion(version) => self
                .test_version(version, &mut progress)
                .map(RunOutcome::Tested),
            RunMode::Restore => self.restore().map(RunOutcome::Restored),
        }
    }

    async fn list_versions(&self, progress: &mut Progress) -> Result<Vec<String>, AppError> {
        progress.spinner("Fetching Docusaurus versions...");
        let result = self.source.fetch_versions().await;
        progress.finish_and_clear();

        let versions = result?;
        tracing::debug!(
            "Fetched {} versions from {}",
            versions.len(),
            self.source.url()
        );
        Ok(versions)
    }

    fn test_version(
        &self,
        version: &str,
        progress: &mut Progress,
    ) -> Result<VersionTestRun, AppError> {
        tracing::info!("Testing Docusaurus version {}", version);

        let manifest_path =
            resolve_manifest(self.settings.manifest.as_deref(), &self.settings.project_dir)?;
        let project_dir = manifest_dir(&manifest_path);
        let file = read_manifest(&manifest_path)?;

        let use_package_manager = self.settings.install && !self.settings.dry_run;
        if self.settings.install && self.settings.dry_run {
            tracing::warn!("Dry run: skipping install and tests");
        }

        // Capture before anything in the project changes
        let snapshot = if use_package_manager {
            let absolute = project_dir.canonicalize().unwrap_or(project_dir.clone());
            Some(Snapshot::new(&self.settings.snapshot_dir).capture(&absolute)?)
        } else {
            None
        };

        let outcome = ManifestRewriter::new(self.settings.filter.clone())
            .rewrite(&file.manifest, version);
        let write = ManifestWriter::new(self.settings.dry_run).write(&file, &outcome.manifest)?;
        tracing::debug!("Rewritten {}:\n{}", manifest_path.display(), write.content);

        let mut install = None;
        let mut test = None;
        if use_package_manager {
            let result = self.run_command(PackageManagerCommand::Install, &project_dir, progress);
            let installed = result.success;
            install = Some(result);

            if installed && self.settings.test {
                test = Some(self.run_command(PackageManagerCommand::Test, &project_dir, progress));
            }
        }

        Ok(VersionTestRun {
            manifest_path,
            report: outcome.report,
            write,
            snapshot,
            install,
            test,
        })
    }

    fn run_command(
        &self,
        command: PackageManagerCommand,
        project_dir: &Path,
        progress: &mut Progress,
    ) -> CommandResult {
        let label = format!("{} {}", self.settings.package_manager, command);
        progress.spinner(&format!("Running {}...", label));
        let result = self.runner.run(command, project_dir);
        progress.finish_and_clear();

        if result.success {
            tracing::debug!("{} succeeded", result.command_line);
        } else {
            tracing::warn!(
                "{} failed (exit code {})",
                result.command_line,
                result
                    .exit_code
                    .map_or_else(|| "none".to_string(), |c| c.to_string())
            );
        }
        result
    }

    fn restore(&self) -> Result<Option<SnapshotInfo>, AppError> {
        let snapshot = Snapshot::new(&self.settings.snapshot_dir);
        let restored = snapshot.restore()?;
        match &restored {
            Some(info) => {
                snapshot.discard()?;
                tracing::info!("Restored {} from snapshot", info.project_dir.display());
            }
            None => tracing::info!("No snapshot to restore"),
        }
        Ok(restored)
    }
}

/// Directory holding the manifest
fn manifest_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
