//! docusaurus-compat - test a Docusaurus site against Docusaurus releases
//!
//! Two modes of operation:
//! - `--setup-versions`: publish the upstream version list as a step output
//! - `<VERSION>`: pin every Docusaurus package to VERSION, then optionally
//!   install and test; `--phase post` restores the workspace afterwards

use anyhow::Context;
use clap::Parser;
use docusaurus_compat::cli::CliArgs;
use docusaurus_compat::config::Settings;
use docusaurus_compat::logging;
use docusaurus_compat::orchestrator::{Orchestrator, RunOutcome};
use docusaurus_compat::output::actions::{format_failure, set_output, VERSIONS_OUTPUT};
use docusaurus_compat::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let output_config =
        OutputConfig::from_cli(args.json, args.diff, args.verbose, args.quiet, args.dry_run);
    logging::init(output_config.verbosity);

    let github_actions = args.github_actions;
    let failure = match run(args, output_config).await {
        Ok(failure) => failure,
        Err(e) => Some(format!("{:#}", e)),
    };

    match failure {
        None => ExitCode::SUCCESS,
        Some(message) => {
            let report = format_failure(&message, github_actions);
            // Workflow commands are read from stdout
            if github_actions {
                println!("{}", report);
            } else {
                eprintln!("{}", report);
            }
            ExitCode::FAILURE
        }
    }
}

/// Main application logic; returns the failure message of a failed test run
async fn run(args: CliArgs, output_config: OutputConfig) -> anyhow::Result<Option<String>> {
    tracing::debug!("docusaurus-compat v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::resolve(&args)?;
    let github_output = settings.github_output.clone();

    let orchestrator = Orchestrator::new(settings)?.with_progress(output_config.show_progress());
    let outcome = orchestrator.run().await?;

    if let (RunOutcome::Versions(versions), Some(path)) = (&outcome, &github_output) {
        let value = serde_json::to_string(versions)?;
        set_output(path, VERSIONS_OUTPUT, &value)
            .with_context(|| format!("failed to write step output to {}", path.display()))?;
        tracing::debug!("Wrote {} to {}", VERSIONS_OUTPUT, path.display());
    }

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(outcome.failure())
}
