//! Configuration error types.

use super::CONDUIT_TOKEN_ENV;
use thiserror::Error;

/// Reasons a remaim configuration file cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the given path.
    #[error("No remaim configuration at '{path}'; pass one with --config")]
    NotFound { path: String },

    /// The file exists but could not be read.
    #[error("Cannot read remaim configuration '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has the wrong shape.
    #[error("Malformed remaim configuration '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// `redmine.host` or `phabricator.host` does not parse as a URL.
    #[error("{field} in '{path}' is not a valid URL: {value}")]
    InvalidHost {
        path: String,
        field: &'static str,
        value: String,
    },

    /// `redmine.protocol` is neither `http` nor `https`.
    #[error("redmine.protocol in '{path}' must be 'http' or 'https', got '{protocol}'")]
    InvalidProtocol { path: String, protocol: String },

    /// Neither the file nor the environment provides a Conduit token.
    #[error(
        "No Conduit token for '{path}'; set phabricator.token or {}",
        CONDUIT_TOKEN_ENV
    )]
    MissingToken { path: String },

    /// A `[status-map]` entry maps to an empty status key.
    #[error("status-map entry '{label}' in '{path}' has an empty status")]
    EmptyStatus { path: String, label: String },
}
