//! # Models
//!
//! This module contains the data models exchanged with developer platforms.
//!
//! Each model keeps only the fields the reporter actually reads. Everything
//! else the remote API returns is dropped at the adapter boundary.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A completed check run belonging to a check suite.
///
/// # Fields
///
/// * `title` - The display name of the check run
/// * `url` - The page showing the result of the check run
/// * `conclusion` - The conclusion reported by the platform, e.g. `success` or `failure`
///
/// # Examples
///
/// ```
/// use comment_failure_developer_platforms::models::CheckRun;
///
/// let run = CheckRun {
///     title: "lint".to_string(),
///     url: "https://github.com/octocat/hello-world/runs/4".to_string(),
///     conclusion: Some("failure".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// The display name of the check run
    pub title: String,

    /// The page showing the result of the check run
    pub url: String,

    /// The conclusion of the check run, if the platform reported one
    pub conclusion: Option<String>,
}

/// Represents a comment on a pull request.
///
/// # Fields
///
/// * `id` - The unique identifier of the comment
/// * `body` - The text content of the comment
///
/// # Examples
///
/// ```
/// use comment_failure_developer_platforms::models::Comment;
///
/// let comment = Comment {
///     id: 456,
///     body: "GitHub Action status on abc123 generated by comment-failure-action".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The unique identifier of the comment
    pub id: u64,

    /// The text content of the comment
    pub body: String,
}

/// Reference to an open pull request whose head matches the triggering branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The pull request number
    pub number: u64,
}
