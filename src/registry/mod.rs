//! Upstream release list retrieval
//!
//! This module provides:
//! - HTTP client shared foundation
//! - VersionSource trait for anything that can list framework releases
//! - Docusaurus versions.json adapter

mod client;
mod docusaurus;

pub use client::HttpClient;
pub use docusaurus::{DocusaurusVersions, DOCUSAURUS_VERSIONS_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for release list sources
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Where the list is read from
    fn url(&self) -> &str;

    /// Fetch the release identifiers in published order
    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError>;
}

/// A fixed list, used when the versions are already known
pub struct StaticVersions {
    versions: Vec<String>,
}

impl StaticVersions {
    /// Create a source that always returns `versions`
    pub fn new(versions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl VersionSource for StaticVersions {
    fn url(&self) -> &str {
        "static"
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.versions.clone())
    }
}
