use comment_failure_core::errors::ReporterError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reporting the failed jobs did not complete
    #[error("Reporting failed: {0}")]
    ReportFailed(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

impl From<ReporterError> for CliError {
    fn from(err: ReporterError) -> Self {
        match err {
            ReporterError::ConfigError(message) => CliError::ConfigError(message),
            ReporterError::MissingInput(_) => CliError::InvalidArguments(err.to_string()),
            ReporterError::FailedToUpdatePullRequest(_) | ReporterError::GitProviderError(_) => {
                CliError::ReportFailed(err.to_string())
            }
        }
    }
}
