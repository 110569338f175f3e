//! docusaurus-compat - Docusaurus compatibility testing library
//!
//! This library provides the pieces of a CI job that checks a Docusaurus
//! site against framework releases:
//! - Fetching the list of published Docusaurus versions
//! - Pinning every Docusaurus package in package.json to one version
//! - Installing and testing through the project's package manager
//! - Snapshotting and restoring the workspace around the run

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod registry;
pub mod rewrite;
pub mod snapshot;
