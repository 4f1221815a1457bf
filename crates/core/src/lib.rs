//! # Comment Failure Core
//!
//! Core logic for reflecting the failed checks of a CI workflow inside one
//! shared status comment on every open pull request of a branch.
//!
//! Several workflows may run against the same commit. They share a single
//! comment per pull request, identified by a per-commit signature, and each
//! workflow owns exactly one section of it. Running the reporter twice with
//! the same inputs produces the same comment.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use comment_failure_developer_platforms::CheckSuiteProvider;
//! use comment_failure_core::{FailureReporter, RunReport, config::RunContext};
//! use anyhow::Result;
//!
//! async fn report<P: CheckSuiteProvider + std::fmt::Debug>(provider: P) -> Result<()> {
//!     let context = RunContext::new(
//!         "octocat",
//!         "hello-world",
//!         Some("feature/login".to_string()),
//!         "abc123",
//!         "build",
//!         42,
//!     )?;
//!
//!     let reporter = FailureReporter::new(provider);
//!     match reporter.run(&context).await? {
//!         RunReport::NotApplicable(reason) => println!("Nothing to do: {}", reason),
//!         RunReport::Reconciled { failures, pull_requests } => {
//!             println!("{} failed jobs reported on {} pull requests", failures, pull_requests.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::fmt;

use comment_failure_developer_platforms::models::{CheckRun, Comment, PullRequestRef};
use comment_failure_developer_platforms::CheckSuiteProvider;
use tracing::{debug, error, info, instrument};

pub mod body;
use body::Section;

pub mod config;
use config::{ReporterConfig, RunContext};

pub mod errors;
use errors::ReporterError;

pub mod merge;

pub mod summary;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Why an invocation ended without touching any pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// The check suite was not triggered from a branch, e.g. a default-branch build
    NoBranch,

    /// No open pull request has the triggering branch as its head
    NoOpenPullRequests,
}

impl fmt::Display for NotApplicableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotApplicableReason::NoBranch => write!(f, "the check suite has no head branch"),
            NotApplicableReason::NoOpenPullRequests => {
                write!(f, "there are no open pull requests for the branch")
            }
        }
    }
}

/// What happened to the managed comment of one pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    /// A new managed comment was created
    Created,

    /// The existing managed comment with the given ID was rewritten
    Updated { comment_id: u64 },

    /// No comment existed and there was nothing to report
    Skipped,
}

/// Outcome for a single pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestReport {
    /// The pull request number
    pub number: u64,

    /// What was done to its managed comment
    pub action: CommentAction,
}

/// Result of one invocation of the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Nothing was done
    NotApplicable(NotApplicableReason),

    /// Every open pull request of the branch was reconciled
    Reconciled {
        /// Number of failed jobs in the check suite
        failures: usize,

        /// Per pull request outcome, in listing order
        pull_requests: Vec<PullRequestReport>,
    },
}

/// Finds the comment managed for a commit among the comments of a pull request.
///
/// Only one comment per pull request and commit is expected to carry the
/// signature. If several do, the first one in listing order wins.
pub fn find_managed_comment<'a>(comments: &'a [Comment], signature: &str) -> Option<&'a Comment> {
    comments.iter().find(|c| c.body.contains(signature))
}

/// Reports the failed jobs of a check suite on the pull requests of its branch.
///
/// # Examples
///
/// ```rust,no_run
/// use comment_failure_developer_platforms::CheckSuiteProvider;
/// use comment_failure_core::{FailureReporter, config::ReporterConfig};
///
/// fn example<P: CheckSuiteProvider + std::fmt::Debug>(provider: P) {
///     let config = ReporterConfig {
///         label: "ci-failed".to_string(),
///         ..ReporterConfig::default()
///     };
///
///     let reporter = FailureReporter::with_config(provider, config);
/// }
/// ```
#[derive(Debug)]
pub struct FailureReporter<P: CheckSuiteProvider + std::fmt::Debug> {
    provider: P,
    config: ReporterConfig,
}

impl<P: CheckSuiteProvider + std::fmt::Debug> FailureReporter<P> {
    /// Creates a reporter with the default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: ReporterConfig::default(),
        }
    }

    /// Creates a reporter with a custom configuration.
    pub fn with_config(provider: P, config: ReporterConfig) -> Self {
        Self { provider, config }
    }

    /// Lists the failed runs of the check suite, in the order the platform returns them.
    #[instrument]
    async fn failed_check_runs(&self, context: &RunContext) -> Result<Vec<CheckRun>, ReporterError> {
        let runs = self
            .provider
            .list_completed_check_runs(context.owner(), context.repo(), context.check_suite_id())
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    check_suite = context.check_suite_id(),
                    error = e.to_string(),
                    "Failed to list the check runs"
                );
                ReporterError::GitProviderError(format!(
                    "Failed to list the check runs of check suite {}: {}",
                    context.check_suite_id(),
                    e
                ))
            })?;

        let total = runs.len();
        let failed: Vec<CheckRun> = runs
            .into_iter()
            .filter(|run| self.config.is_failure(run.conclusion.as_deref()))
            .collect();

        debug!(
            repository_owner = context.owner(),
            repository = context.repo(),
            check_suite = context.check_suite_id(),
            total,
            failed = failed.len(),
            "Filtered check runs",
        );

        Ok(failed)
    }

    /// Adds the configured label to a pull request.
    async fn add_label(&self, context: &RunContext, pr_number: u64) -> Result<(), ReporterError> {
        self.provider
            .add_labels(
                context.owner(),
                context.repo(),
                pr_number,
                &[self.config.label.clone()],
            )
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to add the label"
                );
                ReporterError::FailedToUpdatePullRequest(format!("Failed to add label: {}", e))
            })
    }

    /// Writes `section` into the managed comment of one pull request.
    ///
    /// An existing managed comment is always rewritten and labelled, even
    /// when the section reports no failures. Without a managed comment one
    /// is only created when there is something to report.
    #[instrument(skip(section))]
    async fn reconcile_pull_request(
        &self,
        context: &RunContext,
        pr: PullRequestRef,
        section: &Section,
        has_failures: bool,
    ) -> Result<CommentAction, ReporterError> {
        let signature = context.signature();

        let comments = self
            .provider
            .list_comments(context.owner(), context.repo(), pr.number)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    pull_request = pr.number,
                    error = e.to_string(),
                    "Failed to list the comments"
                );
                ReporterError::GitProviderError(format!(
                    "Failed to list the comments of pull request [{}]: {}",
                    pr.number, e
                ))
            })?;
        debug!(
            repository_owner = context.owner(),
            repository = context.repo(),
            pull_request = pr.number,
            count = comments.len(),
            "Searched for the managed comment",
        );

        let action = match find_managed_comment(&comments, &signature) {
            Some(comment) => {
                let old_sections = body::parse(&comment.body, &signature);
                let sections = merge::reconcile(section, &old_sections);
                let new_body = body::render(&sections, &signature);

                self.provider
                    .update_comment(context.owner(), context.repo(), comment.id, &new_body)
                    .await
                    .map_err(|e| {
                        error!(
                            repository_owner = context.owner(),
                            repository = context.repo(),
                            pull_request = pr.number,
                            comment = comment.id,
                            error = e.to_string(),
                            "Failed to update the comment"
                        );
                        ReporterError::FailedToUpdatePullRequest(format!(
                            "Failed to update comment: {}",
                            e
                        ))
                    })?;

                info!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    pull_request = pr.number,
                    comment = comment.id,
                    sections = sections.len(),
                    "Updated the status comment",
                );

                CommentAction::Updated {
                    comment_id: comment.id,
                }
            }
            None if has_failures => {
                let new_body = body::render(std::slice::from_ref(section), &signature);

                self.provider
                    .add_comment(context.owner(), context.repo(), pr.number, &new_body)
                    .await
                    .map_err(|e| {
                        error!(
                            repository_owner = context.owner(),
                            repository = context.repo(),
                            pull_request = pr.number,
                            error = e.to_string(),
                            "Failed to add the comment"
                        );
                        ReporterError::FailedToUpdatePullRequest(format!(
                            "Failed to add comment: {}",
                            e
                        ))
                    })?;

                info!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    pull_request = pr.number,
                    "Created the status comment",
                );

                CommentAction::Created
            }
            None => {
                info!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    pull_request = pr.number,
                    "No jobs failed and no status comment exists. Nothing to report.",
                );

                return Ok(CommentAction::Skipped);
            }
        };

        self.add_label(context, pr.number).await?;

        Ok(action)
    }

    /// Reflects the failed jobs of the check suite in the status comment of
    /// every open pull request of the triggering branch.
    ///
    /// This method:
    /// 1. Stops without any remote call if the check suite has no head branch
    /// 2. Finds the open pull requests of the branch, and stops if there are none
    /// 3. Lists the completed check runs and keeps the failed ones
    /// 4. Renders the section of the workflow once
    /// 5. Creates or updates the status comment of each pull request, in listing order,
    ///    and adds the label
    ///
    /// A failed remote call aborts the run. Pull requests handled before the
    /// failure keep their updated comment.
    ///
    /// # Arguments
    ///
    /// * `context` - The description of this invocation
    ///
    /// # Returns
    ///
    /// A `Result` containing a `RunReport` describing what was done
    #[instrument]
    pub async fn run(&self, context: &RunContext) -> Result<RunReport, ReporterError> {
        let head = match context.head_ref() {
            Some(h) => h,
            None => {
                info!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    workflow = context.workflow(),
                    "The check suite has no head branch. Nothing to do.",
                );
                return Ok(RunReport::NotApplicable(NotApplicableReason::NoBranch));
            }
        };

        info!(
            repository_owner = context.owner(),
            repository = context.repo(),
            workflow = context.workflow(),
            head = head.as_str(),
            check_suite = context.check_suite_id(),
            "Reporting failed jobs",
        );

        let pull_requests = self
            .provider
            .list_open_pull_requests(context.owner(), context.repo(), &head)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.owner(),
                    repository = context.repo(),
                    head = head.as_str(),
                    error = e.to_string(),
                    "Failed to list the open pull requests"
                );
                ReporterError::GitProviderError(format!(
                    "Failed to list the open pull requests for {}: {}",
                    head, e
                ))
            })?;

        if pull_requests.is_empty() {
            info!(
                repository_owner = context.owner(),
                repository = context.repo(),
                head = head.as_str(),
                "No open pull requests for the branch. Nothing to do.",
            );
            return Ok(RunReport::NotApplicable(
                NotApplicableReason::NoOpenPullRequests,
            ));
        }

        let failed_runs = self.failed_check_runs(context).await?;
        let section = summary::render(context.workflow(), &failed_runs);

        let mut reports = Vec::with_capacity(pull_requests.len());
        for pr in pull_requests {
            let action = self
                .reconcile_pull_request(context, pr, &section, !failed_runs.is_empty())
                .await?;
            reports.push(PullRequestReport {
                number: pr.number,
                action,
            });
        }

        Ok(RunReport::Reconciled {
            failures: failed_runs.len(),
            pull_requests: reports,
        })
    }
}
