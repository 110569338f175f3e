//! Manifest rewrite pass
//!
//! Pins every framework dependency of a package.json to one target version.
//! Both dependency groups are visited independently and every decision is
//! recorded in a [`RewriteReport`].

use crate::domain::{
    build_replacement_version, DependencyGroup, EntryResult, FrameworkFilter, RewriteReport,
};
use crate::manifest::PackageJson;

/// Rewritten manifest together with the decisions that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOutcome {
    /// The rewritten copy
    pub manifest: PackageJson,
    /// Per-entry decisions
    pub report: RewriteReport,
}

/// Applies the replacement rule to the framework packages of a manifest
#[derive(Debug, Clone, Default)]
pub struct ManifestRewriter {
    filter: FrameworkFilter,
}

impl ManifestRewriter {
    /// Create a rewriter with the given package filter
    pub fn new(filter: FrameworkFilter) -> Self {
        Self { filter }
    }

    /// The package filter in use
    pub fn filter(&self) -> &FrameworkFilter {
        &self.filter
    }

    /// Rewrite a copy of `manifest` for `target_version`. The input is left untouched.
    pub fn rewrite(&self, manifest: &PackageJson, target_version: &str) -> RewriteOutcome {
        let mut rewritten = manifest.clone();
        let mut report = RewriteReport::new(target_version);

        for group in DependencyGroup::all() {
            let Some(deps) = rewritten.group_mut(*group) else {
                continue;
            };

            for (name, constraint) in deps.iter_mut() {
                if let Some(reason) = self.filter.skip_reason(name, constraint.as_deref()) {
                    report.add(EntryResult::skip(*group, name, constraint.clone(), reason));
                    continue;
                }

                // skip_reason guarantees a non-empty constraint here
                let Some(current) = constraint.as_mut() else {
                    continue;
                };
                let replacement = build_replacement_version(current, target_version);
                report.add(EntryResult::rewrite(
                    *group,
                    name,
                    current.as_str(),
                    replacement.as_str(),
                ));
                *current = replacement;
            }
        }

        RewriteOutcome {
            manifest: rewritten,
            report,
        }
    }
}

/// Rewrite with the default Docusaurus filter
pub fn rewrite_manifest(manifest: &PackageJson, target_version: &str) -> RewriteOutcome {
    ManifestRewriter::default().rewrite(manifest, target_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkipReason;
    use serde_json::json;

    fn sample_manifest() -> PackageJson {
        PackageJson::from_json_str(
            r#"{
  "name": "website",
  "dependencies": {
    "@docusaurus/core": "^2.4.0",
    "@docusaurus/preset-classic": "2.4.0",
    "react": "^18.2.0",
    "docusaurus-plugin-sass": "~0.2.5"
  },
  "devDependencies": {
    "@docusaurus/module-type-aliases": "^2.4.0",
    "@tsconfig/docusaurus": "^1.0.7",
    "typescript": "~5.2.2"
  }
}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_rewrite_runtime_and_dev_groups() {
        let manifest = PackageJson::new()
            .with_field("name", json!("test"))
            .with_field("version", json!("0.0.0"))
            .with_dependency(DependencyGroup::Runtime, "docusaurus-plugin", "^1.0.0")
            .with_dependency(DependencyGroup::Development, "docusaurus-theme", "^2.0.0");

        let outcome = rewrite_manifest(&manifest, "1.1.0");

        assert_eq!(
            outcome
                .manifest
                .constraint(DependencyGroup::Runtime, "docusaurus-plugin"),
            Some("^1.1.0")
        );
        assert_eq!(
            outcome
                .manifest
                .constraint(DependencyGroup::Development, "docusaurus-theme"),
            Some("^1.1.0")
        );
        assert_eq!(outcome.manifest.name(), Some("test"));
        assert_eq!(outcome.manifest.version(), Some("0.0.0"));
    }

    #[test]
    fn test_rewrite_preserves_prefixes() {
        let outcome = rewrite_manifest(&sample_manifest(), "3.1.0");
        let m = &outcome.manifest;

        assert_eq!(
            m.constraint(DependencyGroup::Runtime, "@docusaurus/core"),
            Some("^3.1.0")
        );
        assert_eq!(
            m.constraint(DependencyGroup::Runtime, "@docusaurus/preset-classic"),
            Some("3.1.0")
        );
        assert_eq!(
            m.constraint(DependencyGroup::Runtime, "docusaurus-plugin-sass"),
            Some("~3.1.0")
        );
        assert_eq!(
            m.constraint(DependencyGroup::Development, "@docusaurus/module-type-aliases"),
            Some("^3.1.0")
        );
    }

    #[test]
    fn test_rewrite_leaves_other_packages() {
        let outcome = rewrite_manifest(&sample_manifest(), "3.1.0");
        let m = &outcome.manifest;

        assert_eq!(m.constraint(DependencyGroup::Runtime, "react"), Some("^18.2.0"));
        assert_eq!(
            m.constraint(DependencyGroup::Development, "typescript"),
            Some("~5.2.2")
        );
    }

    #[test]
    fn test_rewrite_never_touches_excluded() {
        let outcome = rewrite_manifest(&sample_manifest(), "3.1.0");

        assert_eq!(
            outcome
                .manifest
                .constraint(DependencyGroup::Development, "@tsconfig/docusaurus"),
            Some("^1.0.7")
        );
        let excluded: Vec<_> = outcome.report.skipped(SkipReason::Excluded).collect();
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].name(), "@tsconfig/docusaurus");
    }

    #[test]
    fn test_rewrite_with_extra_exclusions() {
        let filter = FrameworkFilter::docusaurus()
            .with_exclude(vec!["docusaurus-plugin-sass".to_string()]);
        let outcome = ManifestRewriter::new(filter).rewrite(&sample_manifest(), "3.1.0");

        assert_eq!(
            outcome
                .manifest
                .constraint(DependencyGroup::Runtime, "docusaurus-plugin-sass"),
            Some("~0.2.5")
        );
        assert_eq!(outcome.report.skipped(SkipReason::Excluded).count(), 2);
    }

    #[test]
    fn test_rewrite_does_not_mutate_input() {
        let manifest = sample_manifest();
        let before = manifest.clone();
        let _ = rewrite_manifest(&manifest, "3.1.0");
        assert_eq!(manifest, before);
    }

    #[test]
    fn test_rewrite_skips_empty_and_null_constraints() {
        let manifest = PackageJson::from_json_str(
            r#"{"dependencies": {"@docusaurus/core": "", "@docusaurus/types": null}}"#,
        )
        .unwrap();

        let outcome = rewrite_manifest(&manifest, "3.0.0");

        assert_eq!(outcome.manifest, manifest);
        assert_eq!(outcome.report.skipped(SkipReason::EmptyConstraint).count(), 2);
        assert_eq!(outcome.report.rewrite_count(), 0);
    }

    #[test]
    fn test_rewrite_without_groups() {
        let manifest = PackageJson::from_json_str(r#"{"name": "bare"}"#).unwrap();
        let outcome = rewrite_manifest(&manifest, "3.0.0");

        assert_eq!(outcome.manifest, manifest);
        assert!(outcome.report.entries.is_empty());
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let once = rewrite_manifest(&sample_manifest(), "3.1.0");
        let twice = rewrite_manifest(&once.manifest, "3.1.0");

        assert_eq!(once.manifest, twice.manifest);
        assert!(!twice.report.has_changes());
    }

    #[test]
    fn test_rewrite_keeps_layout_of_unmatched_fields() {
        let content = r#"{
  "private": true,
  "dependencies": {
    "clsx": "^2.0.0",
    "@docusaurus/core": "^2.4.0",
    "prism-react-renderer": "^2.1.0"
  },
  "engines": {
    "node": ">=18.0"
  }
}"#;
        let manifest = PackageJson::from_json_str(content).unwrap();
        let outcome = rewrite_manifest(&manifest, "3.0.0");

        assert_eq!(
            outcome.manifest.to_json_string().unwrap(),
            content.replace("^2.4.0", "^3.0.0")
        );
    }

    #[test]
    fn test_report_records_decisions_in_order() {
        let outcome = rewrite_manifest(&sample_manifest(), "3.1.0");
        let names: Vec<_> = outcome.report.entries.iter().map(|e| e.name()).collect();

        assert_eq!(
            names,
            vec![
                "@docusaurus/core",
                "@docusaurus/preset-classic",
                "react",
                "docusaurus-plugin-sass",
                "@docusaurus/module-type-aliases",
                "@tsconfig/docusaurus",
                "typescript",
            ]
        );
        assert_eq!(outcome.report.rewrite_count(), 4);
        assert_eq!(outcome.report.target_version, "3.1.0");
    }
}
