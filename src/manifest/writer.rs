//! Manifest file reading and writing
//!
//! This module provides:
//! - read_manifest: load package.json into the typed record
//! - ManifestWriter: write a rewritten manifest back, with dry-run support
//! - Trailing newline preservation so untouched files stay byte-identical

use crate::error::ManifestError;
use crate::manifest::PackageJson;
use std::fs;
use std::path::{Path, PathBuf};

/// A manifest loaded from disk
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestFile {
    /// Path the manifest was read from
    pub path: PathBuf,
    /// Parsed manifest
    pub manifest: PackageJson,
    /// Whether the file ended with a newline
    pub trailing_newline: bool,
}

/// Result of writing a manifest
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Serialized content (written, or that would have been written)
    pub content: String,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

/// Writer for manifest files
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `manifest` over the file `original` was read from
    pub fn write(
        &self,
        original: &ManifestFile,
        manifest: &PackageJson,
    ) -> Result<WriteResult, ManifestError> {
        let content = render_manifest(&original.path, manifest, original.trailing_newline)?;

        if self.dry_run {
            return Ok(WriteResult {
                path: original.path.clone(),
                content,
                file_modified: false,
            });
        }

        write_manifest(&original.path, &content)?;
        Ok(WriteResult {
            path: original.path.clone(),
            content,
            file_modified: true,
        })
    }
}

/// Read and parse a manifest file
pub fn read_manifest(path: &Path) -> Result<ManifestFile, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    let manifest = PackageJson::from_json_str(&content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    Ok(ManifestFile {
        path: path.to_path_buf(),
        manifest,
        trailing_newline: content.ends_with('\n'),
    })
}

/// Serialize a manifest the way it is stored on disk
pub fn render_manifest(
    path: &Path,
    manifest: &PackageJson,
    trailing_newline: bool,
) -> Result<String, ManifestError> {
    let mut content = manifest
        .to_json_string()
        .map_err(|e| ManifestError::SerializeError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if trailing_newline {
        content.push('\n');
    }
    Ok(content)
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
