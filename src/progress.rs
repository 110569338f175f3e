//! Spinners for the slow steps of a compatibility run
//!
//! Shown on stderr while versions.json is downloaded in list mode and while
//! `<pm> install` / `<pm> test` run against the pinned manifest. Stdout is
//! left alone so the version list and reports stay parseable.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One spinner at a time, shared by the fetch, install and test steps
pub struct Progress {
    /// Off under `--quiet` and `--json`
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Start a spinner for a step such as `Running npm install...`
    ///
    /// A spinner still running from an earlier step is cleared first.
    pub fn spinner(&mut self, message: &str) {
        self.finish_and_clear();
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Stop the spinner and erase its line
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
