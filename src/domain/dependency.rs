//! Dependency groups of a package.json manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two dependency maps the rewriter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyGroup {
    /// Runtime dependencies (`dependencies`)
    #[serde(rename = "dependencies")]
    Runtime,
    /// Development dependencies (`devDependencies`)
    #[serde(rename = "devDependencies")]
    Development,
}

impl DependencyGroup {
    /// Returns all groups in manifest order
    pub fn all() -> &'static [DependencyGroup] {
        &[DependencyGroup::Runtime, DependencyGroup::Development]
    }

    /// The package.json key holding this group
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "dependencies",
            DependencyGroup::Development => "devDependencies",
        }
    }

    /// Look up a group by its package.json key
    pub fn from_manifest_key(key: &str) -> Option<Self> {
        DependencyGroup::all()
            .iter()
            .copied()
            .find(|group| group.manifest_key() == key)
    }

    /// Returns true for development dependencies
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyGroup::Development)
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keys() {
        assert_eq!(DependencyGroup::Runtime.manifest_key(), "dependencies");
        assert_eq!(DependencyGroup::Development.manifest_key(), "devDependencies");
    }

    #[test]
    fn test_from_manifest_key() {
        assert_eq!(
            DependencyGroup::from_manifest_key("devDependencies"),
            Some(DependencyGroup::Development)
        );
        assert_eq!(DependencyGroup::from_manifest_key("peerDependencies"), None);
    }

    #[test]
    fn test_serialization_uses_manifest_key() {
        let json = serde_json::to_string(&DependencyGroup::Development).unwrap();
        assert_eq!(json, "\"devDependencies\"");
    }

    #[test]
    fn test_is_dev() {
        assert!(!DependencyGroup::Runtime.is_dev());
        assert!(DependencyGroup::Development.is_dev());
    }
}
