//! CLI for remaim.
//!
//! Interactively migrates the issues of a Redmine project into a Phabricator
//! project, updating tasks that were imported before.

use clap::Parser;
use remaim::{RunSummary, Runner, RunnerConfig, RunnerError, StdTerminal};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// remaim - Migrate Redmine issues into Phabricator Maniphest tasks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, short, env = "REMAIM_CONFIG", default_value = "remaim.toml")]
    config: PathBuf,

    /// Leave tasks that already exist in Phabricator untouched.
    #[arg(long)]
    skip_existing: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            print_error_chain(&e);
            ExitCode::from(2)
        }
    }
}

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (default "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = RunnerConfig::new(args.config, args.skip_existing);
    let runner = Runner::new(config)?;
    let mut terminal = StdTerminal;
    runner.run(&mut terminal).await
}

/// Prints the error and every underlying cause.
fn print_error_chain(error: &RunnerError) {
    eprintln!("\nSomething went wrong and the session was stopped.");
    eprintln!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  Caused by: {cause}");
        source = cause.source();
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Projects migrated: {}", summary.projects_migrated);
    println!("  Tasks created: {}", summary.tasks_created);
    println!("  Tasks updated: {}", summary.tasks_updated);
    println!("  Issues skipped: {}", summary.issues_skipped);
}
