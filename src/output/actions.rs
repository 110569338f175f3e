//! GitHub Actions workflow channel
//!
//! This module provides:
//! - Step outputs appended to the `$GITHUB_OUTPUT` file
//! - Failure annotations (`::error::`) on stdout

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Output carrying the version list
pub const VERSIONS_OUTPUT: &str = "docusaurus-versions";

/// Append `name=value` to the step output file.
/// Multi-line values use the heredoc form with a unique delimiter.
pub fn set_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_output(name, value).as_bytes())
}

/// Render one output entry
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = format!(
            "ghadelimiter_{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Escape a message for a workflow command
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render a failure report for the terminal or for a workflow run
pub fn format_failure(message: &str, github_actions: bool) -> String {
    if github_actions {
        format!("::error::{}", escape_data(message))
    } else {
        format!("Error: {}", message)
    }
}
