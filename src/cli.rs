//! CLI argument parsing module for docusaurus-compat

use crate::error::ConfigError;
use clap::{ArgAction, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Which half of a CI job is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Phase {
    /// List versions or rewrite, install and test
    #[default]
    Main,
    /// Restore the workspace snapshot taken by the main phase
    Post,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Main => write!(f, "main"),
            Phase::Post => write!(f, "post"),
        }
    }
}

/// Work requested by one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch and publish the upstream version list
    ListVersions,
    /// Pin the framework packages to a version, optionally install and test
    TestVersion(String),
    /// Restore the workspace snapshot
    Restore,
}

/// Test a Docusaurus site against Docusaurus releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "docusaurus-compat",
    version,
    about = "Test a Docusaurus site against Docusaurus releases"
)]
pub struct CliArgs {
    /// Docusaurus version to pin the project to
    #[arg(value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Fetch and publish the list of Docusaurus versions instead
    #[arg(long, conflicts_with = "target_version")]
    pub setup_versions: bool,

    /// Run phase; `post` restores the workspace snapshot
    #[arg(long, value_enum, default_value_t = Phase::Main)]
    pub phase: Phase,

    // Project options
    /// Project directory (default: current directory)
    #[arg(short = 'C', long, default_value = ".")]
    pub project: PathBuf,

    /// Explicit package.json path (default: closest package.json above the project directory)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Config file (default: <project>/docusaurus-compat.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Never rewrite this package (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    // Package manager options
    /// Package manager binary (default: npm)
    #[arg(long)]
    pub package_manager: Option<String>,

    /// Run `<package-manager> install` after rewriting
    #[arg(long)]
    pub install: bool,

    /// Run `<package-manager> install` and `<package-manager> test` after rewriting
    #[arg(long)]
    pub test: bool,

    /// Where the workspace snapshot is stored
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    // Version list options
    /// URL of the versions.json feed
    #[arg(long)]
    pub versions_url: Option<String>,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Emit workflow command annotations on failure
    #[arg(long, env = "GITHUB_ACTIONS")]
    pub github_actions: bool,

    // General options
    /// Dry run mode - report the rewrite without changing package.json
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output results in JSON format
    #[arg(long, conflicts_with = "diff")]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Resolve the work requested by the phase and mode arguments
    pub fn run_mode(&self) -> Result<RunMode, ConfigError> {
        match self.phase {
            Phase::Post => Ok(RunMode::Restore),
            Phase::Main if self.setup_versions => Ok(RunMode::ListVersions),
            Phase::Main => match &self.target_version {
                Some(version) => Ok(RunMode::TestVersion(version.clone())),
                None => Err(ConfigError::MissingMode),
            },
        }
    }

    /// Whether install should run (`--test` implies it)
    pub fn should_install(&self) -> bool {
        self.install || self.test
    }
}
