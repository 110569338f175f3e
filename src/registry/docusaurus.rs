//! Docusaurus release list
//!
//! Reads the versions.json published in the Docusaurus repository:
//! a JSON array of version strings, newest first.

use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionSource};
use async_trait::async_trait;

/// Published list of Docusaurus releases
pub const DOCUSAURUS_VERSIONS_URL: &str =
    "https://raw.githubusercontent.com/facebook/docusaurus/main/website/versions.json";

/// Version source backed by a versions.json URL
pub struct DocusaurusVersions {
    client: HttpClient,
    url: String,
}

impl DocusaurusVersions {
    /// Create a source reading the upstream versions.json
    pub fn new(client: HttpClient) -> Self {
        Self::with_url(client, DOCUSAURUS_VERSIONS_URL)
    }

    /// Create a source reading a custom URL (mirror or test server)
    pub fn with_url(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl VersionSource for DocusaurusVersions {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError> {
        self.client.get_json(&self.url).await
    }
}
