//! Framework package selection
//!
//! Decides which manifest entries belong to the Docusaurus release train:
//! - the package name contains the `docusaurus` token
//! - the package is not in the exclusion set
//! - the declared constraint is not empty

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token every Docusaurus package name contains
pub const DOCUSAURUS_TOKEN: &str = "docusaurus";

/// Packages matching the token but versioned independently of Docusaurus
pub const DEFAULT_EXCLUDED_PACKAGES: &[&str] = &["@tsconfig/docusaurus"];

/// Reason a manifest entry was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Constraint is `null` or an empty string
    EmptyConstraint,
    /// Package is in the exclusion set
    Excluded,
    /// Package name does not belong to the framework
    NotFramework,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyConstraint => write!(f, "empty constraint"),
            SkipReason::Excluded => write!(f, "excluded"),
            SkipReason::NotFramework => write!(f, "not a framework package"),
        }
    }
}

/// Selects the framework packages a rewrite applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkFilter {
    /// Substring a package name must contain
    token: String,
    /// Package names never rewritten
    exclude: Vec<String>,
}

impl FrameworkFilter {
    /// Create a filter for an arbitrary naming token with no exclusions
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            exclude: Vec::new(),
        }
    }

    /// The Docusaurus filter with the built-in exclusion set
    pub fn docusaurus() -> Self {
        Self::new(DOCUSAURUS_TOKEN)
            .with_exclude(DEFAULT_EXCLUDED_PACKAGES.iter().map(|p| p.to_string()))
    }

    /// Add packages to the exclusion set
    pub fn with_exclude(mut self, packages: impl IntoIterator<Item = String>) -> Self {
        for package in packages {
            if !self.exclude.contains(&package) {
                self.exclude.push(package);
            }
        }
        self
    }

    /// The naming token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The exclusion set
    pub fn excluded(&self) -> &[String] {
        &self.exclude
    }

    /// Returns true if the package is in the exclusion set
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|p| p == name)
    }

    /// Returns true if the package name follows the framework naming convention
    pub fn matches_name(&self, name: &str) -> bool {
        name.contains(&self.token)
    }

    /// Classify an entry. `None` means the entry must be rewritten.
    pub fn skip_reason(&self, name: &str, constraint: Option<&str>) -> Option<SkipReason> {
        if constraint.map_or(true, str::is_empty) {
            return Some(SkipReason::EmptyConstraint);
        }
        if self.is_excluded(name) {
            return Some(SkipReason::Excluded);
        }
        if !self.matches_name(name) {
            return Some(SkipReason::NotFramework);
        }
        None
    }
}

impl Default for FrameworkFilter {
    fn default() -> Self {
        Self::docusaurus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docusaurus_defaults() {
        let filter = FrameworkFilter::docusaurus();
        assert_eq!(filter.token(), "docusaurus");
        assert_eq!(filter.excluded(), &["@tsconfig/docusaurus".to_string()]);
    }

    #[test]
    fn test_matches_scoped_and_unscoped_names() {
        let filter = FrameworkFilter::docusaurus();
        assert!(filter.matches_name("@docusaurus/core"));
        assert!(filter.matches_name("@docusaurus/preset-classic"));
        assert!(filter.matches_name("docusaurus-plugin-sass"));
        assert!(!filter.matches_name("react"));
        assert!(!filter.matches_name("@mdx-js/react"));
    }

    #[test]
    fn test_skip_reason_rewrites_framework_package() {
        let filter = FrameworkFilter::docusaurus();
        assert_eq!(filter.skip_reason("@docusaurus/core", Some("^2.0.0")), None);
    }

    #[test]
    fn test_skip_reason_excluded() {
        let filter = FrameworkFilter::docusaurus();
        assert_eq!(
            filter.skip_reason("@tsconfig/docusaurus", Some("^1.0.5")),
            Some(SkipReason::Excluded)
        );
    }

    #[test]
    fn test_skip_reason_not_framework() {
        let filter = FrameworkFilter::docusaurus();
        assert_eq!(
            filter.skip_reason("react", Some("^18.0.0")),
            Some(SkipReason::NotFramework)
        );
    }

    #[test]
    fn test_skip_reason_empty_constraint() {
        let filter = FrameworkFilter::docusaurus();
        assert_eq!(
            filter.skip_reason("@docusaurus/core", Some("")),
            Some(SkipReason::EmptyConstraint)
        );
        assert_eq!(
            filter.skip_reason("@docusaurus/core", None),
            Some(SkipReason::EmptyConstraint)
        );
    }

    #[test]
    fn test_with_exclude_deduplicates() {
        let filter = FrameworkFilter::docusaurus().with_exclude(vec![
            "@docusaurus/plugin-pwa".to_string(),
            "@tsconfig/docusaurus".to_string(),
        ]);
        assert_eq!(filter.excluded().len(), 2);
        assert!(filter.is_excluded("@docusaurus/plugin-pwa"));
    }

    #[test]
    fn test_custom_token() {
        let filter = FrameworkFilter::new("@vuepress");
        assert!(filter.matches_name("@vuepress/core"));
        assert!(!filter.matches_name("vuepress"));
        assert!(filter.excluded().is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Excluded.to_string(), "excluded");
        assert_eq!(SkipReason::EmptyConstraint.to_string(), "empty constraint");
    }
}
