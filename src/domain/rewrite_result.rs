//! Per-entry rewrite decisions and the report for a whole manifest

use super::{DependencyGroup, SkipReason};
use serde::{Deserialize, Serialize};

/// Decision taken for a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryResult {
    /// Constraint replaced
    Rewrite {
        /// Group holding the entry
        group: DependencyGroup,
        /// Package name
        name: String,
        /// Constraint before the rewrite
        from: String,
        /// Constraint after the rewrite
        to: String,
    },
    /// Entry left untouched
    Skip {
        /// Group holding the entry
        group: DependencyGroup,
        /// Package name
        name: String,
        /// Declared constraint, if any
        #[serde(skip_serializing_if = "Option::is_none")]
        constraint: Option<String>,
        /// Why the entry was kept
        reason: SkipReason,
    },
}

impl EntryResult {
    /// Creates a Rewrite result
    pub fn rewrite(
        group: DependencyGroup,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        EntryResult::Rewrite {
            group,
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates a Skip result
    pub fn skip(
        group: DependencyGroup,
        name: impl Into<String>,
        constraint: Option<String>,
        reason: SkipReason,
    ) -> Self {
        EntryResult::Skip {
            group,
            name: name.into(),
            constraint,
            reason,
        }
    }

    /// Returns true if the constraint was replaced
    pub fn is_rewrite(&self) -> bool {
        matches!(self, EntryResult::Rewrite { .. })
    }

    /// Returns true if the rewrite left the constraint text identical
    pub fn is_noop(&self) -> bool {
        matches!(self, EntryResult::Rewrite { from, to, .. } if from == to)
    }

    /// Package name of the entry
    pub fn name(&self) -> &str {
        match self {
            EntryResult::Rewrite { name, .. } => name,
            EntryResult::Skip { name, .. } => name,
        }
    }

    /// Group of the entry
    pub fn group(&self) -> DependencyGroup {
        match self {
            EntryResult::Rewrite { group, .. } => *group,
            EntryResult::Skip { group, .. } => *group,
        }
    }

    /// Skip reason, if the entry was skipped
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            EntryResult::Rewrite { .. } => None,
            EntryResult::Skip { reason, .. } => Some(*reason),
        }
    }
}

/// Outcome of rewriting one manifest for one target version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteReport {
    /// Version every framework package was pinned to
    pub target_version: String,
    /// Decisions in manifest order, runtime group first
    pub entries: Vec<EntryResult>,
}

impl RewriteReport {
    /// Creates an empty report
    pub fn new(target_version: impl Into<String>) -> Self {
        Self {
            target_version: target_version.into(),
            entries: Vec::new(),
        }
    }

    /// Adds a decision
    pub fn add(&mut self, entry: EntryResult) {
        self.entries.push(entry);
    }

    /// All rewritten entries
    pub fn rewrites(&self) -> impl Iterator<Item = &EntryResult> {
        self.entries.iter().filter(|e| e.is_rewrite())
    }

    /// Entries skipped for the given reason
    pub fn skipped(&self, reason: SkipReason) -> impl Iterator<Item = &EntryResult> {
        self.entries
            .iter()
            .filter(move |e| e.skip_reason() == Some(reason))
    }

    /// Number of rewritten entries
    pub fn rewrite_count(&self) -> usize {
        self.rewrites().count()
    }

    /// Number of rewritten entries whose text actually changed
    pub fn change_count(&self) -> usize {
        self.rewrites().filter(|e| !e.is_noop()).count()
    }

    /// Returns true if the manifest text differs after the rewrite
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }
}
