//! Text output formatter for human-readable display

use crate::domain::{EntryResult, SkipReason};
use crate::orchestrator::{RunOutcome, VersionTestRun};
use crate::output::{OutputFormatter, Verbosity};
use crate::package_manager::CommandResult;
use crate::snapshot::SnapshotInfo;
use colored::Colorize;
use std::io::Write;

/// Lines of command stderr shown for a failed command
const STDERR_TAIL_LINES: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    fn format_versions(&self, versions: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(versions).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    /// Entries worth showing at the current verbosity
    fn visible_entries<'a>(&self, run: &'a VersionTestRun) -> Vec<&'a EntryResult> {
        run.report
            .entries
            .iter()
            .filter(|entry| match entry.skip_reason() {
                None => true,
                Some(SkipReason::NotFramework) => self.verbosity == Verbosity::Verbose,
                Some(_) => true,
            })
            .collect()
    }

    fn format_entry(
        &self,
        entry: &EntryResult,
        name_width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let dev_marker = if entry.group().is_dev() { " [dev]" } else { "" };
        let name = format!("{:width$}", entry.name(), width = name_width);

        match entry {
            EntryResult::Rewrite { from, to, .. } => {
                if self.color {
                    writeln!(
                        writer,
                        "  {} {} {} {}{}",
                        name,
                        from.dimmed(),
                        "→".dimmed(),
                        to.bright_white().bold(),
                        dev_marker.dimmed()
                    )
                } else {
                    writeln!(writer, "  {} {} → {}{}", name, from, to, dev_marker)
                }
            }
            EntryResult::Skip {
                constraint, reason, ..
            } => {
                let constraint = constraint.as_deref().unwrap_or("null");
                if self.color {
                    let reason = format!("({})", reason);
                    let reason = if reason_is_explicit(entry) {
                        reason.yellow()
                    } else {
                        reason.dimmed()
                    };
                    writeln!(
                        writer,
                        "  {} {} {}{}",
                        name.dimmed(),
                        constraint.dimmed(),
                        reason,
                        dev_marker.dimmed()
                    )
                } else {
                    writeln!(
                        writer,
                        "  {} {} ({}){}",
                        name, constraint, reason, dev_marker
                    )
                }
            }
        }
    }

    fn format_command(&self, result: &CommandResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.success {
            let mark = if self.color {
                "✓".green().to_string()
            } else {
                "✓".to_string()
            };
            return writeln!(writer, "{} {}", mark, result.command_line);
        }

        let exit = result
            .exit_code
            .map_or_else(|| "no exit code".to_string(), |c| format!("exit code {}", c));
        if self.color {
            writeln!(writer, "{} {} ({})", "✗".red(), result.command_line, exit)?;
        } else {
            writeln!(writer, "✗ {} ({})", result.command_line, exit)?;
        }

        let lines: Vec<&str> = result.stderr.lines().collect();
        let tail = &lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..];
        for line in tail {
            writeln!(writer, "    {}", line)?;
        }
        Ok(())
    }

    fn format_run(&self, run: &VersionTestRun, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let prefix = self.dry_run_prefix();
        let header = format!("Docusaurus {}", run.target_version());
        if self.color {
            writeln!(
                writer,
                "{}{} {}",
                prefix,
                header.bold(),
                run.manifest_path.display().to_string().dimmed()
            )?;
        } else {
            writeln!(writer, "{}{} {}", prefix, header, run.manifest_path.display())?;
        }

        let entries = self.visible_entries(run);
        let name_width = entries.iter().map(|e| e.name().len()).max().unwrap_or(0);
        for entry in &entries {
            self.format_entry(entry, name_width, writer)?;
        }

        writeln!(writer)?;
        let count = run.report.rewrite_count();
        if self.dry_run {
            writeln!(
                writer,
                "{}{} package(s) would be pinned to {}",
                prefix,
                count,
                run.target_version()
            )?;
        } else {
            writeln!(
                writer,
                "{} package(s) pinned to {}",
                count,
                run.target_version()
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            if let Some(snapshot) = &run.snapshot {
                writeln!(
                    writer,
                    "Snapshot of {} taken at {}",
                    snapshot.project_dir.display(),
                    snapshot.created_at.format("%Y/%m/%d %H:%M:%S")
                )?;
            }
        }

        for result in run.install.iter().chain(run.test.iter()) {
            self.format_command(result, writer)?;
        }
        Ok(())
    }

    fn format_restored(
        &self,
        restored: Option<&SnapshotInfo>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }
        match restored {
            Some(info) => writeln!(
                writer,
                "Restored {} from snapshot taken at {}",
                info.project_dir.display(),
                info.created_at.format("%Y/%m/%d %H:%M:%S")
            ),
            None => writeln!(writer, "No snapshot to restore"),
        }
    }
}

/// Exclusions are highlighted
fn reason_is_explicit(entry: &EntryResult) -> bool {
    matches!(entry.skip_reason(), Some(SkipReason::Excluded))
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        match outcome {
            RunOutcome::Versions(versions) => self.format_versions(versions, writer),
            RunOutcome::Tested(run) => self.format_run(run, writer),
            RunOutcome::Restored(info) => self.format_restored(info.as_ref(), writer),
        }
    }
}
