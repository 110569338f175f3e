//! Workspace snapshot around a test run
//!
//! Before the package manager touches the project, the manifest, the
//! lockfiles and `node_modules` are copied aside together with a
//! `snapshot.json` describing what existed. Restoring copies every saved
//! entry back and removes entries that did not exist at capture time.

use crate::error::SnapshotError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Workspace entries saved by a snapshot
pub const SNAPSHOT_ENTRIES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "node_modules",
];

/// Default snapshot directory, relative to the project
pub const DEFAULT_SNAPSHOT_DIR: &str = ".docusaurus-compat";

const METADATA_FILENAME: &str = "snapshot.json";
const FILES_DIRNAME: &str = "files";

/// One saved workspace entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Entry name relative to the project directory
    pub name: String,
    /// Whether the entry existed when the snapshot was taken
    pub present: bool,
}

/// Contents of snapshot.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// Project directory the snapshot belongs to
    pub project_dir: PathBuf,
    /// Capture time
    pub created_at: DateTime<Utc>,
    /// Saved entries
    pub entries: Vec<SnapshotEntry>,
}

impl SnapshotInfo {
    /// Names of entries that existed at capture time
    pub fn present_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.present)
            .map(|e| e.name.as_str())
    }
}

/// Snapshot storage location
#[derive(Debug, Clone)]
pub struct Snapshot {
    dir: PathBuf,
}

impl Snapshot {
    /// Snapshot stored in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot stored in the default location of a project
    pub fn for_project(project_dir: &Path) -> Self {
        Self::new(project_dir.join(DEFAULT_SNAPSHOT_DIR))
    }

    /// The snapshot directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILENAME)
    }

    fn files_dir(&self) -> PathBuf {
        self.dir.join(FILES_DIRNAME)
    }

    /// Returns true if a snapshot has been captured here
    pub fn exists(&self) -> bool {
        self.metadata_path().is_file()
    }

    /// Copy the workspace entries of `project_dir` into the snapshot
    pub fn capture(&self, project_dir: &Path) -> Result<SnapshotInfo, SnapshotError> {
        let files_dir = self.files_dir();
        if files_dir.exists() {
            remove_path(&files_dir)?;
        }
        fs::create_dir_all(&files_dir)
            .map_err(|e| SnapshotError::copy_error(project_dir, &files_dir, e))?;

        let mut entries = Vec::with_capacity(SNAPSHOT_ENTRIES.len());
        for name in SNAPSHOT_ENTRIES {
            let source = project_dir.join(name);
            let present = source.exists();
            if present {
                copy_path(&source, &files_dir.join(name))?;
            }
            entries.push(SnapshotEntry {
                name: name.to_string(),
                present,
            });
        }

        let info = SnapshotInfo {
            project_dir: project_dir.to_path_buf(),
            created_at: Utc::now(),
            entries,
        };
        self.write_info(&info)?;

        tracing::debug!(
            "Captured snapshot of {} into {}",
            project_dir.display(),
            self.dir.display()
        );
        Ok(info)
    }

    /// Read snapshot.json, if a snapshot exists
    pub fn load(&self) -> Result<Option<SnapshotInfo>, SnapshotError> {
        let path = self.metadata_path();
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| SnapshotError::metadata_error(&path, e.to_string()))?;
        let info = serde_json::from_str(&content)
            .map_err(|e| SnapshotError::metadata_error(&path, e.to_string()))?;
        Ok(Some(info))
    }

    /// Put the workspace back the way it was at capture time.
    /// Returns `None` when there is no snapshot to restore.
    pub fn restore(&self) -> Result<Option<SnapshotInfo>, SnapshotError> {
        let Some(info) = self.load()? else {
            return Ok(None);
        };

        let files_dir = self.files_dir();
        for entry in &info.entries {
            let target = info.project_dir.join(&entry.name);
            if target.exists() || target.is_symlink() {
                remove_path(&target)?;
            }
            if entry.present {
                copy_path(&files_dir.join(&entry.name), &target)?;
            }
        }

        tracing::debug!("Restored {} from snapshot", info.project_dir.display());
        Ok(Some(info))
    }

    /// Delete the snapshot directory
    pub fn discard(&self) -> Result<(), SnapshotError> {
        if self.dir.exists() {
            remove_path(&self.dir)?;
        }
        Ok(())
    }

    fn write_info(&self, info: &SnapshotInfo) -> Result<(), SnapshotError> {
        let path = self.metadata_path();
        let content = serde_json::to_string_pretty(info)
            .map_err(|e| SnapshotError::metadata_error(&path, e.to_string()))?;
        fs::write(&path, content).map_err(|e| SnapshotError::metadata_error(&path, e.to_string()))
    }
}

/// Recursively copy a file or directory. Symlinks are copied as links on Unix.
fn copy_path(from: &Path, to: &Path) -> Result<(), SnapshotError> {
    let metadata =
        fs::symlink_metadata(from).map_err(|e| SnapshotError::copy_error(from, to, e))?;
    if metadata.file_type().is_symlink() {
        return copy_symlink(from, to);
    }

    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| SnapshotError::copy_error(from, to, e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| SnapshotError::copy_error(from, to, std::io::Error::other(e)))?;
        let target = if relative.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| SnapshotError::copy_error(entry.path(), &target, e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| SnapshotError::copy_error(entry.path(), &target, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), SnapshotError> {
    let err = |e| SnapshotError::copy_error(from, to, e);
    let link = fs::read_link(from).map_err(err)?;
    std::os::unix::fs::symlink(link, to).map_err(err)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), SnapshotError> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| SnapshotError::copy_error(from, to, e))
}

fn remove_path(path: &Path) -> Result<(), SnapshotError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SnapshotError::remove_error(path, e))?;
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| SnapshotError::remove_error(path, e))
}
