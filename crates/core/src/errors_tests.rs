use super::*;

#[test]
fn test_config_error_display() {
    let err = ReporterError::ConfigError("bad label".to_string());
    assert_eq!(err.to_string(), "Configuration error: bad label");
}

#[test]
fn test_failed_to_update_pull_request_display() {
    let err = ReporterError::FailedToUpdatePullRequest("Failed to add labels".to_string());
    assert_eq!(
        err.to_string(),
        "Failed to update pull request. Issue was: 'Failed to add labels'."
    );
}

#[test]
fn test_git_provider_error_display() {
    let err = ReporterError::GitProviderError("Rate limit exceeded".to_string());
    assert_eq!(err.to_string(), "Git provider error: Rate limit exceeded");
}

#[test]
fn test_missing_input_display() {
    let err = ReporterError::MissingInput("head_commit".to_string());
    assert_eq!(err.to_string(), "Missing input: head_commit");
}
