use std::{
    fs,
    path::{Path, PathBuf},
};

use comment_failure_core::config::RunContext;
use serde::Deserialize;
use tracing::debug;

use crate::errors::CliError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".comment-failure.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// The subset of a GitHub Actions event payload needed to describe a run.
///
/// Both `check_suite` and `workflow_run` events are understood. Every other
/// field of the payload is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub check_suite: Option<CheckSuitePayload>,

    #[serde(default)]
    pub workflow_run: Option<WorkflowRunPayload>,

    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CheckSuitePayload {
    pub id: u64,
    pub head_branch: Option<String>,
    pub head_sha: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRunPayload {
    pub name: Option<String>,
    pub head_branch: Option<String>,
    pub head_sha: String,
    pub check_suite_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

impl EventPayload {
    /// Load an event payload from the file written by the CI runtime
    pub fn load(path: &Path) -> Result<Self, CliError> {
        debug!("Loading event payload from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("Failed to read event payload {:?}: {}", path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("Failed to parse event payload {:?}: {}", path, e))
        })
    }
}

/// Partially known inputs of a run, gathered from several sources.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextInputs {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub head_branch: Option<String>,
    pub head_commit: Option<String>,
    pub workflow: Option<String>,
    pub check_suite_id: Option<u64>,
}

impl ContextInputs {
    /// Extract the inputs carried by an event payload
    pub fn from_event(event: &EventPayload) -> Self {
        let mut inputs = ContextInputs::default();

        if let Some(repository) = &event.repository {
            inputs.owner = Some(repository.owner.login.clone());
            inputs.repo = Some(repository.name.clone());
        }

        if let Some(run) = &event.workflow_run {
            inputs.head_branch = run.head_branch.clone();
            inputs.head_commit = Some(run.head_sha.clone());
            inputs.workflow = run.name.clone();
            inputs.check_suite_id = Some(run.check_suite_id);
        }

        if let Some(suite) = &event.check_suite {
            inputs.head_branch = suite.head_branch.clone();
            inputs.head_commit = Some(suite.head_sha.clone());
            inputs.check_suite_id = Some(suite.id);
        }

        inputs
    }

    /// Extract the owner and name from an `owner/repo` string
    pub fn from_repository(repository: &str) -> Result<Self, CliError> {
        match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(ContextInputs {
                    owner: Some(owner.to_string()),
                    repo: Some(repo.to_string()),
                    ..ContextInputs::default()
                })
            }
            _ => Err(CliError::InvalidArguments(format!(
                "Repository must be in the format 'owner/repo', got '{}'",
                repository
            ))),
        }
    }

    /// Layer `overrides` on top of these inputs. Values present in `overrides` win.
    pub fn merge(self, overrides: ContextInputs) -> Self {
        ContextInputs {
            owner: overrides.owner.or(self.owner),
            repo: overrides.repo.or(self.repo),
            head_branch: overrides.head_branch.or(self.head_branch),
            head_commit: overrides.head_commit.or(self.head_commit),
            workflow: overrides.workflow.or(self.workflow),
            check_suite_id: overrides.check_suite_id.or(self.check_suite_id),
        }
    }

    /// Build the run context, failing if a required input is still unknown.
    ///
    /// A missing head branch is allowed; the run is then not applicable.
    pub fn into_context(self) -> Result<RunContext, CliError> {
        fn required<T>(value: Option<T>, name: &str) -> Result<T, CliError> {
            value.ok_or_else(|| {
                CliError::InvalidArguments(format!("No value was provided for '{}'", name))
            })
        }

        let context = RunContext::new(
            required(self.owner, "owner")?,
            required(self.repo, "repo")?,
            self.head_branch,
            required(self.head_commit, "head_commit")?,
            required(self.workflow, "workflow")?,
            required(self.check_suite_id, "check_suite_id")?,
        )?;

        Ok(context)
    }
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
