//! Core domain models for docusaurus-compat
//!
//! This module contains the fundamental types used throughout the application:
//! - Version constraint prefixes and the replacement rule
//! - Dependency groups of a package.json manifest
//! - Framework package selection and skip reasons
//! - Rewrite decisions and reports

mod constraint;
mod dependency;
mod framework;
mod rewrite_result;

pub use constraint::{build_replacement_version, ConstraintPrefix};
pub use dependency::DependencyGroup;
pub use framework::{FrameworkFilter, SkipReason, DEFAULT_EXCLUDED_PACKAGES, DOCUSAURUS_TOKEN};
pub use rewrite_result::{EntryResult, RewriteReport};
