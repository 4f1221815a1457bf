//! # Comment Failure CLI
//!
//! Command-line entry point that reports the failed jobs of a completed check
//! suite in a shared status comment on the open pull requests of its branch.
//!
//! It is meant to run as a step of a GitHub Actions workflow triggered by a
//! `check_suite` or `workflow_run` event. The inputs are read from the event
//! payload and the standard `GITHUB_*` environment variables.
//!
//! # Examples
//!
//! ```bash
//! # Inside a GitHub Actions job
//! comment-failure run
//!
//! # Outside of GitHub Actions
//! comment-failure run --token <token> --repository owner/repo --workflow build \
//!     --head-branch feature --head-commit <sha> --check-suite-id 42
//! ```

#![deny(missing_docs)]

use clap::{Parser, Subcommand};
use tracing::{error, info, instrument};

/// Command implementations for the CLI.
mod commands;

/// Run inputs gathered from the CI environment.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::run::RunArgs;
use errors::CliError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command-line interface structure for the failure reporter.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Report the failed jobs of a check suite on the pull requests of its branch
    Run(RunArgs),
}

/// Main entry point.
///
/// Initializes logging, parses the command-line arguments and runs the
/// selected command. Any error aborts the invocation with a non-zero exit
/// status.
#[tokio::main]
#[instrument]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("COMMENT_FAILURE_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = commands::run::execute(args).await {
                error!("Error reporting failed jobs: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
