//! Configuration settings for the failure reporter.
//!
//! This module centralizes the wire-format constants shared by every
//! invocation, the immutable per-invocation [`RunContext`] and the optional
//! [`ReporterConfig`] loaded from a TOML file.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ReporterError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Token placed between the signature and each section of a managed comment
pub const COMMENT_SEPARATOR: &str = "\n<!-- SEPARATOR -->\n";

/// Text rendered in a section when none of the workflow's jobs failed
pub const NO_FAILURES_MESSAGE: &str = "No jobs failed :+1:";

/// Label added to a pull request whenever its managed comment is written
pub const WAITING_RESPONSE_LABEL: &str = "waiting-response";

/// Conclusions that are not treated as a failed job
pub const NON_FAILURE_CONCLUSIONS: [&str; 2] = ["success", "neutral"];

const SIGNATURE_PREFIX: &str = "GitHub Action status on ";
const SIGNATURE_SUFFIX: &str = " generated by comment-failure-action";

lazy_static! {
    /// Pre-compiled regex extracting the workflow identity from an ownership tag.
    ///
    /// The tag must start a line and its closing marker must end one, so an
    /// identity may itself contain ` -->` or line breaks.
    pub static ref WORKFLOW_TAG_REGEX: Regex = Regex::new(r"(?ms)^<!-- WORKFLOW:(.*?) -->$")
        .expect("Failed to compile workflow tag regex");
}

/// Returns the ownership tag marking the section that belongs to `workflow`.
pub fn ownership_tag(workflow: &str) -> String {
    format!("<!-- WORKFLOW:{} -->", workflow)
}

/// Returns the signature identifying the managed comment for `head_commit`.
pub fn signature(head_commit: &str) -> String {
    format!("{}{}{}", SIGNATURE_PREFIX, head_commit, SIGNATURE_SUFFIX)
}

/// Immutable description of one invocation.
///
/// Built once from the hosting CI environment and passed by reference to
/// every component. Nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    owner: String,
    repo: String,
    head_branch: Option<String>,
    head_commit: String,
    workflow: String,
    check_suite_id: u64,
}

impl RunContext {
    /// Creates a new context.
    ///
    /// `head_branch` may be absent or empty; such an invocation is not
    /// applicable and the reporter will not contact the platform.
    ///
    /// # Errors
    ///
    /// Returns `ReporterError::MissingInput` when the owner, repository,
    /// head commit or workflow is empty.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        head_branch: Option<String>,
        head_commit: impl Into<String>,
        workflow: impl Into<String>,
        check_suite_id: u64,
    ) -> Result<Self, ReporterError> {
        let context = Self {
            owner: owner.into(),
            repo: repo.into(),
            head_branch,
            head_commit: head_commit.into(),
            workflow: workflow.into(),
            check_suite_id,
        };

        for (name, value) in [
            ("owner", &context.owner),
            ("repo", &context.repo),
            ("head_commit", &context.head_commit),
            ("workflow", &context.workflow),
        ] {
            if value.trim().is_empty() {
                return Err(ReporterError::MissingInput(name.to_string()));
            }
        }

        Ok(context)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The triggering branch, or `None` when it is absent or empty.
    pub fn head_branch(&self) -> Option<&str> {
        self.head_branch.as_deref().filter(|b| !b.is_empty())
    }

    pub fn head_commit(&self) -> &str {
        &self.head_commit
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn check_suite_id(&self) -> u64 {
        self.check_suite_id
    }

    /// The `owner:branch` reference used to find pull requests for the branch.
    pub fn head_ref(&self) -> Option<String> {
        self.head_branch()
            .map(|branch| format!("{}:{}", self.owner, branch))
    }

    /// The signature of the comment managed for this commit.
    pub fn signature(&self) -> String {
        signature(&self.head_commit)
    }
}

/// Behaviour settings for the reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Label added to a pull request each time its comment is written
    #[serde(default = "ReporterConfig::default_label")]
    pub label: String,

    /// Check run conclusions that do not count as a failed job
    #[serde(default = "ReporterConfig::default_non_failure_conclusions")]
    pub non_failure_conclusions: Vec<String>,
}

impl ReporterConfig {
    fn default_label() -> String {
        WAITING_RESPONSE_LABEL.to_string()
    }

    fn default_non_failure_conclusions() -> Vec<String> {
        NON_FAILURE_CONCLUSIONS
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    /// Returns true if a check run with the given conclusion counts as failed.
    ///
    /// A missing conclusion counts as failed.
    pub fn is_failure(&self, conclusion: Option<&str>) -> bool {
        match conclusion {
            Some(c) => !self.non_failure_conclusions.iter().any(|n| n == c),
            None => true,
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            non_failure_conclusions: Self::default_non_failure_conclusions(),
        }
    }
}

/// Loads the reporter configuration from the given path.
///
/// A missing file is not an error: the default configuration is returned.
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// * `Ok(ReporterConfig)` if the file is absent or valid
/// * `Err(ReporterError::ConfigError)` if the file cannot be read or parsed,
///   or names an empty label
pub fn load_reporter_config<P: AsRef<Path>>(path: P) -> Result<ReporterConfig, ReporterError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(
                path = path_ref.display().to_string(),
                "No configuration file found. Using the default configuration."
            );
            return Ok(ReporterConfig::default());
        }
        Err(e) => {
            return Err(ReporterError::ConfigError(format!(
                "Failed to read configuration file: {}",
                e
            )))
        }
    };

    let config: ReporterConfig = toml::from_str(&content).map_err(|e| {
        ReporterError::ConfigError(format!("Failed to parse configuration file: {}", e))
    })?;
    if config.label.trim().is_empty() {
        return Err(ReporterError::ConfigError(
            "The label must not be empty".to_string(),
        ));
    }

    debug!(
        path = path_ref.display().to_string(),
        label = config.label.as_str(),
        "Loaded configuration"
    );

    Ok(config)
}
