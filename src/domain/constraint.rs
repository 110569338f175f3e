//! Version constraint prefixes
//!
//! Only the leading symbol of a constraint is inspected:
//! - `^1.2.3` is a caret range (compatible-with)
//! - `~1.2.3` is a tilde range (approximately-equivalent-to)
//! - anything else is treated as an exact pin

use serde::{Deserialize, Serialize};
use std::fmt;

/// Floating range prefix carried by a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintPrefix {
    /// `^` prefix
    Caret,
    /// `~` prefix
    Tilde,
    /// No recognised prefix (exact version, tag, URL, ...)
    Exact,
}

impl ConstraintPrefix {
    /// Detect the prefix of a constraint string
    pub fn of(constraint: &str) -> Self {
        match constraint.chars().next() {
            Some('^') => ConstraintPrefix::Caret,
            Some('~') => ConstraintPrefix::Tilde,
            _ => ConstraintPrefix::Exact,
        }
    }

    /// The prefix symbol, empty for exact pins
    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintPrefix::Caret => "^",
            ConstraintPrefix::Tilde => "~",
            ConstraintPrefix::Exact => "",
        }
    }

    /// Returns true if this prefix marks a floating range
    pub fn is_floating(&self) -> bool {
        !matches!(self, ConstraintPrefix::Exact)
    }

    /// Prepend this prefix to a version
    pub fn apply(&self, version: &str) -> String {
        format!("{}{}", self.symbol(), version)
    }
}

impl fmt::Display for ConstraintPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Build the replacement constraint for a dependency.
///
/// Keeps only the leading `^`/`~` of `existing` and appends `new_version` verbatim.
/// The old numeric part is dropped entirely and `new_version` is never validated.
pub fn build_replacement_version(existing: &str, new_version: &str) -> String {
    ConstraintPrefix::of(existing).apply(new_version)
}
