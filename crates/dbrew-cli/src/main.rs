//! # dbrew-lint entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and runs
//! the batch linter.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dbrew_cli::{run_lint, LintArgs};
use dbrew_core::TracingReporter;

/// Validate dataset recipe files against the recipe schema.
///
/// Checks each recipe's structure, then checks that every declared file
/// resolves to a filename and that filenames are unique within the recipe.
#[derive(Parser, Debug)]
#[command(name = "dbrew-lint", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: LintArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --debug wins over RUST_LOG; otherwise RUST_LOG wins over the default.
    let filter = if cli.args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run_lint(&cli.args, &mut TracingReporter) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
