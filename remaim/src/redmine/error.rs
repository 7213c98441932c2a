//! Redmine client error types.

use thiserror::Error;

/// Errors that can occur while reading from Redmine.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Redmine could not be reached.
    #[error("Unable to reach Redmine at {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Redmine answered with a non-success HTTP status.
    #[error("Redmine returned HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// The response body did not match the expected record.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The selected project has no issues.
    #[error("No issues found in Redmine project {project_id}")]
    NoIssuesFound { project_id: u64 },

    /// A URL could not be built or parsed.
    #[error("Invalid Redmine URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
