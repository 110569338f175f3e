//! Diagnostic logging setup
//!
//! Log lines go to stderr through `tracing-subscriber`. The level follows
//! `--verbose`/`--quiet` unless `DOCUSAURUS_COMPAT_LOG` holds a filter
//! directive, which wins.

use crate::output::Verbosity;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "DOCUSAURUS_COMPAT_LOG";

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    }
}

/// Build the filter from the environment, falling back to the verbosity level
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
