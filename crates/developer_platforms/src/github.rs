use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    errors::Error,
    models::{CheckRun, Comment, PullRequestRef},
    CheckSuiteProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Number of items requested per page for every listing call.
const PAGE_SIZE: u8 = 100;

#[derive(Serialize)]
struct PageParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

impl Default for PageParams<'_> {
    fn default() -> Self {
        Self {
            state: None,
            head: None,
            status: None,
            per_page: PAGE_SIZE,
            page: None,
        }
    }
}

#[derive(Deserialize)]
struct RawPullRequest {
    number: u64,
}

#[derive(Deserialize)]
struct RawComment {
    id: u64,
    body: Option<String>,
}

#[derive(Deserialize)]
struct RawCheckRun {
    name: String,
    html_url: Option<String>,
    conclusion: Option<String>,
}

#[derive(Deserialize)]
struct RawCheckRunPage {
    total_count: u64,
    check_runs: Vec<RawCheckRun>,
}

/// Creates an `Octocrab` client authenticated with a personal access token or
/// the `GITHUB_TOKEN` of a workflow run.
///
/// # Arguments
///
/// * `token` - The token used to authenticate every request.
/// * `api_url` - An optional API base URI, e.g. for GitHub Enterprise Server.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is invalid or the client
/// cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use comment_failure_developer_platforms::github::{create_token_client, GitHubProvider};
///
/// let client = create_token_client("ghp_example", None).unwrap();
/// let provider = GitHubProvider::new(client);
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());
    if let Some(url) = api_url {
        builder = builder
            .base_uri(url)
            .map_err(|e| Error::AuthError(format!("Invalid API URL '{}': {}", url, e)))?;
    }

    builder
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build the GitHub client: {}", e)))
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            error_message = source.message.as_str(),
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}

fn is_rate_limited(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            source.message.to_lowercase().contains("rate limit")
        }
        _ => false,
    }
}

/// Maps a failed listing call onto the platform error type.
fn listing_error(message: &str, e: octocrab::Error) -> Error {
    log_octocrab_error(message, &e);
    if is_rate_limited(&e) {
        Error::RateLimitExceeded
    } else {
        Error::InvalidResponse
    }
}

/// Maps a failed mutation onto the platform error type.
fn update_error(message: &str, e: octocrab::Error) -> Error {
    log_octocrab_error(message, &e);
    if is_rate_limited(&e) {
        Error::RateLimitExceeded
    } else {
        Error::FailedToUpdatePullRequest(message.to_string())
    }
}

/// GitHub implementation of [`CheckSuiteProvider`] backed by `octocrab`.
#[derive(Debug)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CheckSuiteProvider for GitHubProvider {
    #[instrument]
    async fn list_open_pull_requests(
        &self,
        repo_owner: &str,
        repo_name: &str,
        head: &str,
    ) -> Result<Vec<PullRequestRef>, Error> {
        let route = format!("/repos/{}/{}/pulls", repo_owner, repo_name);
        let params = PageParams {
            state: Some("open"),
            head: Some(head),
            ..PageParams::default()
        };

        let mut current_page: Page<RawPullRequest> = self
            .client
            .get(&route, Some(&params))
            .await
            .map_err(|e| listing_error("Failed to list open pull requests", e))?;

        let mut items = current_page.take_items();
        while let Some(mut new_page) = self
            .client
            .get_page::<RawPullRequest>(&current_page.next)
            .await
            .map_err(|e| listing_error("Failed to list open pull requests", e))?
        {
            items.extend(new_page.take_items());

            current_page = new_page;
        }

        let pull_requests: Vec<PullRequestRef> = items
            .into_iter()
            .map(|p| PullRequestRef { number: p.number })
            .collect();

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            head = head,
            count = pull_requests.len(),
            "Listed open pull requests",
        );

        Ok(pull_requests)
    }

    #[instrument]
    async fn list_completed_check_runs(
        &self,
        repo_owner: &str,
        repo_name: &str,
        check_suite_id: u64,
    ) -> Result<Vec<CheckRun>, Error> {
        let route = format!(
            "/repos/{}/{}/check-suites/{}/check-runs",
            repo_owner, repo_name, check_suite_id
        );

        let mut runs = Vec::new();
        let mut page = 1;
        loop {
            let params = PageParams {
                status: Some("completed"),
                page: Some(page),
                ..PageParams::default()
            };
            let response: RawCheckRunPage = self
                .client
                .get(&route, Some(&params))
                .await
                .map_err(|e| listing_error("Failed to list check runs for the check suite", e))?;

            if response.check_runs.is_empty() {
                break;
            }

            runs.extend(response.check_runs.into_iter().map(|r| CheckRun {
                title: r.name,
                url: r.html_url.unwrap_or_default(),
                conclusion: r.conclusion,
            }));
            if runs.len() as u64 >= response.total_count {
                break;
            }

            page += 1;
        }

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            check_suite = check_suite_id,
            count = runs.len(),
            "Listed completed check runs",
        );

        Ok(runs)
    }

    #[instrument]
    async fn list_comments(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Comment>, Error> {
        let route = format!(
            "/repos/{}/{}/issues/{}/comments",
            repo_owner, repo_name, pr_number
        );

        let mut current_page: Page<RawComment> = self
            .client
            .get(&route, Some(&PageParams::default()))
            .await
            .map_err(|e| listing_error("Failed to list comments for pull request", e))?;

        let mut items = current_page.take_items();
        while let Some(mut new_page) = self
            .client
            .get_page::<RawComment>(&current_page.next)
            .await
            .map_err(|e| listing_error("Failed to list comments for pull request", e))?
        {
            items.extend(new_page.take_items());

            current_page = new_page;
        }

        let comments: Vec<Comment> = items
            .into_iter()
            .map(|c| Comment {
                id: c.id,
                body: c.body.unwrap_or_default(),
            })
            .collect();

        Ok(comments)
    }

    #[instrument(skip(body))]
    async fn update_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
        body: &str,
    ) -> Result<(), Error> {
        self.client
            .issues(repo_owner, repo_name)
            .update_comment(comment_id.into(), body)
            .await
            .map_err(|e| update_error("Failed to update comment", e))?;

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            comment = comment_id,
            "Updated comment",
        );

        Ok(())
    }

    #[instrument(skip(comment))]
    async fn add_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        comment: &str,
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .create_comment(pr_number, comment)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => Err(update_error("Failed to add comment", e)),
        }
    }

    #[instrument]
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .add_labels(pr_number, labels)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => Err(update_error("Failed to add labels", e)),
        }
    }
}
