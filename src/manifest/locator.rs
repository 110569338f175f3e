//! package.json discovery
//!
//! Walks up from a start directory to the closest package.json,
//! the same lookup Node tooling uses for the current project.

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Manifest file name
pub const MANIFEST_FILENAME: &str = "package.json";

/// Find the closest package.json at or above `start`
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| ManifestError::read_error(start, e))?
            .join(start)
    };

    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ManifestError::not_found(&start))
}

/// Resolve the manifest path: an explicit path must exist, otherwise search upwards
pub fn resolve_manifest(explicit: Option<&Path>, start: &Path) -> Result<PathBuf, ManifestError> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(ManifestError::not_found(path)),
        None => find_manifest(start),
    }
}
