//! package.json location, parsing and writing
//!
//! This module provides functionality to:
//! - Find the project's package.json by walking up the directory tree
//! - Parse it into a typed record that round-trips unknown fields
//! - Write it back in the same layout

mod locator;
mod package_json;
mod writer;

pub use locator::{find_manifest, resolve_manifest, MANIFEST_FILENAME};
pub use package_json::{DependencyMap, InvalidManifest, PackageJson};
pub use writer::{
    read_manifest, render_manifest, write_manifest, ManifestFile, ManifestWriter, WriteResult,
};
