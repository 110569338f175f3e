//! JSON output formatter for machine processing
//!
//! One document per run, tagged by `mode`.

use crate::domain::{EntryResult, SkipReason};
use crate::orchestrator::{RunOutcome, VersionTestRun};
use crate::output::{OutputFormatter, Verbosity};
use crate::package_manager::CommandResult;
use crate::snapshot::SnapshotInfo;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a run
#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum JsonOutput<'a> {
    /// List mode
    Versions { versions: &'a [String] },
    /// Rewrite/test mode
    Test(JsonTestRun<'a>),
    /// Post phase
    Restore {
        restored: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        snapshot: Option<&'a SnapshotInfo>,
    },
}

#[derive(Serialize)]
struct JsonTestRun<'a> {
    target_version: &'a str,
    manifest: String,
    modified: bool,
    rewrites: usize,
    entries: Vec<&'a EntryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<&'a SnapshotInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    install: Option<JsonCommand<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test: Option<JsonCommand<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

#[derive(Serialize)]
struct JsonCommand<'a> {
    command: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<&'a str>,
}

impl<'a> JsonCommand<'a> {
    fn from_result(result: &'a CommandResult, verbosity: Verbosity) -> Self {
        let include_stderr = !result.success || verbosity == Verbosity::Verbose;
        Self {
            command: &result.command_line,
            success: result.success,
            exit_code: result.exit_code,
            stderr: include_stderr.then_some(result.stderr.as_str()),
        }
    }
}

impl JsonFormatter {
    fn test_run<'a>(&self, run: &'a VersionTestRun) -> JsonTestRun<'a> {
        let entries = run
            .report
            .entries
            .iter()
            .filter(|entry| {
                self.verbosity == Verbosity::Verbose
                    || entry.skip_reason() != Some(SkipReason::NotFramework)
            })
            .collect();

        JsonTestRun {
            target_version: run.target_version(),
            manifest: run.manifest_path.display().to_string(),
            modified: run.write.file_modified,
            rewrites: run.report.rewrite_count(),
            entries,
            snapshot: run.snapshot.as_ref(),
            install: run
                .install
                .as_ref()
                .map(|r| JsonCommand::from_result(r, self.verbosity)),
            test: run
                .test
                .as_ref()
                .map(|r| JsonCommand::from_result(r, self.verbosity)),
            failure: run.failure(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = match outcome {
            RunOutcome::Versions(versions) => JsonOutput::Versions { versions },
            RunOutcome::Tested(run) => JsonOutput::Test(self.test_run(run)),
            RunOutcome::Restored(info) => JsonOutput::Restore {
                restored: info.is_some(),
                snapshot: info.as_ref(),
            },
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_run;
    use serde_json::Value;

    fn render(verbosity: Verbosity, outcome: &RunOutcome) -> Value {
        let mut out = Vec::new();
        JsonFormatter::new(verbosity).format(outcome, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_versions() {
        let value = render(
            Verbosity::Normal,
            &RunOutcome::Versions(vec!["2.0.0".to_string(), "1.14.0".to_string()]),
        );
        assert_eq!(value["mode"], "versions");
        assert_eq!(value["versions"], serde_json::json!(["2.0.0", "1.14.0"]));
    }

    #[test]
    fn test_run() {
        let value = render(Verbosity::Normal, &RunOutcome::Tested(sample_run()));

        assert_eq!(value["mode"], "test");
        assert_eq!(value["target_version"], "3.1.0");
        assert_eq!(value["manifest"], "/site/package.json");
        assert_eq!(value["modified"], true);
        assert_eq!(value["rewrites"], 2);
        assert_eq!(value["failure"], "Tests failed for Docusaurus version 3.1.0");

        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["type"], "rewrite");
        assert_eq!(entries[0]["group"], "dependencies");
        assert_eq!(entries[0]["to"], "^3.1.0");
        assert_eq!(entries[2]["type"], "skip");
        assert_eq!(entries[2]["reason"], "excluded");

        assert_eq!(value["install"]["success"], true);
        assert!(value["install"].get("stderr").is_none());
        assert_eq!(value["test"]["exit_code"], 1);
        assert_eq!(value["test"]["stderr"], "1 failing test\n");
    }

    #[test]
    fn test_run_verbose_includes_all_entries() {
        let value = render(Verbosity::Verbose, &RunOutcome::Tested(sample_run()));
        assert_eq!(value["entries"].as_array().unwrap().len(), 4);
        assert_eq!(value["install"]["stderr"], "");
    }

    #[test]
    fn test_restore_nothing() {
        let value = render(Verbosity::Normal, &RunOutcome::Restored(None));
        assert_eq!(value["mode"], "restore");
        assert_eq!(value["restored"], false);
        assert!(value.get("snapshot").is_none());
    }
}
