//! Diff output formatter for showing manifest changes
//!
//! Only the rewrite has a diff; the other outcomes print as text.

use crate::domain::EntryResult;
use crate::orchestrator::{RunOutcome, VersionTestRun};
use crate::output::{OutputFormatter, TextFormatter, Verbosity};
use std::io::Write;

/// Diff formatter for showing constraint changes
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }

    fn format_run(&self, run: &VersionTestRun, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let mut changes = run.report.rewrites().filter(|e| !e.is_noop()).peekable();

        if changes.peek().is_some() {
            let path = run.manifest_path.display();
            writeln!(writer, "{}--- a/{}", prefix, path)?;
            writeln!(writer, "{}+++ b/{}", prefix, path)?;

            for entry in changes {
                if let EntryResult::Rewrite {
                    group,
                    name,
                    from,
                    to,
                } = entry
                {
                    writeln!(writer, "@@ {} {} @@", group, name)?;
                    writeln!(writer, "-    \"{}\": \"{}\"", name, from)?;
                    writeln!(writer, "+    \"{}\": \"{}\"", name, to)?;
                }
            }
            writeln!(writer)?;
        }

        let verb = if self.dry_run { "would be" } else { "were" };
        writeln!(
            writer,
            "{}# {} package(s) {} pinned to {}",
            prefix,
            run.report.change_count(),
            verb,
            run.target_version()
        )
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        match outcome {
            RunOutcome::Tested(run) => self.format_run(run, writer),
            other => TextFormatter::with_color(Verbosity::Normal, self.dry_run, false)
                .format(other, writer),
        }
    }
}
