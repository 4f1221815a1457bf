#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents the failures that can occur when talking to a
/// developer platform such as GitHub. None of them are retried: a failed
/// remote call aborts the invocation that issued it.
///
/// # Examples
///
/// ```rust
/// use comment_failure_developer_platforms::errors::Error;
///
/// let auth_error = Error::AuthError("Invalid token".to_string());
/// println!("{}", auth_error);
///
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed with the platform.
    ///
    /// The provided credentials are invalid, expired, or insufficient for the
    /// requested operation. The string contains additional details.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Failed to update pull request.
    ///
    /// Raised when posting or editing a comment, or adding a label, fails.
    /// The string describes which operation failed.
    #[error("Failed to update the PR: {0}")]
    FailedToUpdatePullRequest(String),

    /// Invalid response format from platform API.
    ///
    /// The response received from the platform could not be read, or a
    /// listing request failed part way through pagination.
    #[error("Invalid response format")]
    InvalidResponse,

    /// Platform rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
