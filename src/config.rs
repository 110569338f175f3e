//! Project configuration
//!
//! Settings come from (in priority order):
//! - command line arguments
//! - docusaurus-compat.toml in the project directory (or `--config`)
//! - built-in defaults

use crate::cli::{CliArgs, Phase, RunMode};
use crate::domain::FrameworkFilter;
use crate::error::{AppError, ConfigError};
use crate::package_manager::DEFAULT_PACKAGE_MANAGER;
use crate::registry::DOCUSAURUS_VERSIONS_URL;
use crate::snapshot::DEFAULT_SNAPSHOT_DIR;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project directory
pub const CONFIG_FILENAME: &str = "docusaurus-compat.toml";

/// Contents of docusaurus-compat.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Package manager binary
    pub package_manager: Option<String>,
    /// Extra packages never rewritten
    pub exclude: Vec<String>,
    /// versions.json URL
    pub versions_url: Option<String>,
    /// Snapshot directory, relative to the project directory
    pub snapshot_dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Parse config file content
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load the explicit config file, or the project's if it exists
    pub fn discover(explicit: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if path.is_file() => Self::load(path),
            Some(path) => Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }),
            None => {
                let default_path = project_dir.join(CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Requested work
    pub mode: RunMode,
    /// Run phase
    pub phase: Phase,
    /// Project directory
    pub project_dir: PathBuf,
    /// Explicit manifest path
    pub manifest: Option<PathBuf>,
    /// Package selection for the rewrite
    pub filter: FrameworkFilter,
    /// Package manager binary
    pub package_manager: String,
    /// Run install after rewriting
    pub install: bool,
    /// Run tests after installing
    pub test: bool,
    /// Snapshot directory
    pub snapshot_dir: PathBuf,
    /// versions.json URL
    pub versions_url: String,
    /// File receiving step outputs
    pub github_output: Option<PathBuf>,
    /// Do not write package.json
    pub dry_run: bool,
}

impl Settings {
    /// Merge CLI arguments with the project config
    pub fn resolve(args: &CliArgs) -> Result<Self, AppError> {
        let mode = args.run_mode()?;
        let config = ProjectConfig::discover(args.config.as_deref(), &args.project)?;
        Ok(Self::merge(args, mode, config))
    }

    fn merge(args: &CliArgs, mode: RunMode, config: ProjectConfig) -> Self {
        let filter = FrameworkFilter::docusaurus()
            .with_exclude(config.exclude)
            .with_exclude(args.exclude.iter().cloned());

        let snapshot_dir = args.snapshot_dir.clone().unwrap_or_else(|| {
            args.project.join(
                config
                    .snapshot_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR)),
            )
        });

        Self {
            mode,
            phase: args.phase,
            project_dir: args.project.clone(),
            manifest: args.manifest.clone(),
            filter,
            package_manager: args
                .package_manager
                .clone()
                .or(config.package_manager)
                .unwrap_or_else(|| DEFAULT_PACKAGE_MANAGER.to_string()),
            install: args.should_install(),
            test: args.test,
            snapshot_dir,
            versions_url: args
                .versions_url
                .clone()
                .or(config.versions_url)
                .unwrap_or_else(|| DOCUSAURUS_VERSIONS_URL.to_string()),
            github_output: args.github_output.clone(),
            dry_run: args.dry_run,
        }
    }
}
