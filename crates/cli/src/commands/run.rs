use std::path::PathBuf;

use clap::Args;
use comment_failure_core::config::{load_reporter_config, RunContext};
use comment_failure_core::{FailureReporter, RunReport};
use comment_failure_developer_platforms::github::{create_token_client, GitHubProvider};
use tracing::{debug, info, instrument};

use crate::config::{get_config_path, ContextInputs, EventPayload};
use crate::errors::CliError;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Arguments for the run command
///
/// Most values can also be supplied through the environment variables set by
/// GitHub Actions. Explicit values override the event payload.
#[derive(Args)]
pub struct RunArgs {
    /// Token used to call the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository in the form owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Path of the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Name of the workflow that owns the reported section
    #[arg(long)]
    pub workflow: Option<String>,

    /// Workflow name used when neither the event nor `--workflow` names one.
    /// GitHub Actions sets it to the workflow running this step.
    #[arg(long, env = "GITHUB_WORKFLOW", hide = true)]
    pub fallback_workflow: Option<String>,

    /// Branch of the check suite
    #[arg(long)]
    pub head_branch: Option<String>,

    /// Commit of the check suite
    #[arg(long)]
    pub head_commit: Option<String>,

    /// ID of the check suite whose failed runs are reported
    #[arg(long)]
    pub check_suite_id: Option<u64>,

    /// Base URL of the GitHub API
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Builds the run context from the fallback workflow name, the event payload,
/// the repository variable and the explicit arguments, in increasing order of
/// precedence.
pub fn build_context(args: &RunArgs) -> Result<RunContext, CliError> {
    let mut inputs = ContextInputs {
        workflow: args.fallback_workflow.clone(),
        ..ContextInputs::default()
    };

    if let Some(path) = &args.event_path {
        let event = EventPayload::load(path)?;
        inputs = inputs.merge(ContextInputs::from_event(&event));
    }

    if let Some(repository) = &args.repository {
        inputs = inputs.merge(ContextInputs::from_repository(repository)?);
    }

    inputs = inputs.merge(ContextInputs {
        owner: None,
        repo: None,
        head_branch: args.head_branch.clone(),
        head_commit: args.head_commit.clone(),
        workflow: args.workflow.clone(),
        check_suite_id: args.check_suite_id,
    });
    debug!(inputs = ?inputs, "Gathered run inputs");

    inputs.into_context()
}

/// Executes the `run` command.
///
/// Loads the configuration, connects to GitHub and reports the failed jobs
/// of the check suite on the open pull requests of its branch.
///
/// # Errors
///
/// Returns a `CliError` if the inputs are incomplete, the configuration is
/// invalid, the client cannot be created, or any remote call fails.
#[instrument(skip(args))]
pub async fn execute(args: RunArgs) -> Result<(), CliError> {
    let context = build_context(&args)?;

    let config_path = get_config_path(args.config.as_deref());
    let config = load_reporter_config(&config_path)?;

    let client = create_token_client(&args.token, args.api_url.as_deref())
        .map_err(|e| CliError::AuthError(e.to_string()))?;
    let reporter = FailureReporter::with_config(GitHubProvider::new(client), config);

    match reporter.run(&context).await? {
        RunReport::NotApplicable(reason) => {
            info!(
                workflow = context.workflow(),
                "Nothing to report: {}", reason
            );
        }
        RunReport::Reconciled {
            failures,
            pull_requests,
        } => {
            for pr in &pull_requests {
                info!(
                    pull_request = pr.number,
                    action = ?pr.action,
                    "Reconciled pull request"
                );
            }
            info!(
                workflow = context.workflow(),
                failures,
                pull_requests = pull_requests.len(),
                "Reported failed jobs",
            );
        }
    }

    Ok(())
}
