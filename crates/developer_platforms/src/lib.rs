use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{CheckRun, Comment, PullRequestRef};

/// Trait for the developer platform operations needed to report failed checks
/// on pull requests (e.g. GitHub).
///
/// Every listing operation gathers all pages before returning. No operation is
/// retried; a failure is returned to the caller as-is.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use comment_failure_developer_platforms::{CheckSuiteProvider, errors::Error, models::{CheckRun, Comment, PullRequestRef}};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct GitHubProvider {
///     token: String,
/// }
///
/// #[async_trait]
/// impl CheckSuiteProvider for GitHubProvider {
///     async fn list_open_pull_requests(
///         &self,
///         repo_owner: &str,
///         repo_name: &str,
///         head: &str,
///     ) -> Result<Vec<PullRequestRef>, Error> {
///         // Implementation to list pull requests from the GitHub API
///         # unimplemented!()
///     }
///
///     // Implement other required methods...
///     # async fn list_completed_check_runs(&self, _: &str, _: &str, _: u64) -> Result<Vec<CheckRun>, Error> { unimplemented!() }
///     # async fn list_comments(&self, _: &str, _: &str, _: u64) -> Result<Vec<Comment>, Error> { unimplemented!() }
///     # async fn update_comment(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> { unimplemented!() }
///     # async fn add_comment(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> { unimplemented!() }
///     # async fn add_labels(&self, _: &str, _: &str, _: u64, _: &[String]) -> Result<(), Error> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait CheckSuiteProvider {
    /// Lists the open pull requests whose head matches `head`.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `head` - The head reference in `owner:branch` form
    ///
    /// # Returns
    ///
    /// A `Result` containing every matching pull request, across all pages
    async fn list_open_pull_requests(
        &self,
        repo_owner: &str,
        repo_name: &str,
        head: &str,
    ) -> Result<Vec<PullRequestRef>, Error>;

    /// Lists the completed check runs that belong to a check suite.
    ///
    /// Runs are returned in the order the platform lists them.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `check_suite_id` - The ID of the check suite
    ///
    /// # Returns
    ///
    /// A `Result` containing every completed check run, across all pages
    async fn list_completed_check_runs(
        &self,
        repo_owner: &str,
        repo_name: &str,
        check_suite_id: u64,
    ) -> Result<Vec<CheckRun>, Error>;

    /// Lists all comments on a pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    ///
    /// # Returns
    ///
    /// A `Result` containing the comments in listing order
    async fn list_comments(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Comment>, Error>;

    /// Replaces the body of an existing comment.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `comment_id` - The ID of the comment to update
    /// * `body` - The new comment text
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    async fn update_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<(), Error>;

    /// Adds a comment to a pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `comment` - The comment text to add
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    async fn add_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        comment: &str,
    ) -> Result<(), Error>;

    /// Adds labels to a pull request.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `labels` - The labels to add
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}
