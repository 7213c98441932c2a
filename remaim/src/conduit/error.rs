//! Conduit error types.

use thiserror::Error;

/// Errors returned by a [`Conduit`](super::Conduit) call.
#[derive(Debug, Error)]
pub enum ConduitError {
    /// The Phabricator host could not be reached (DNS, refused connection, TLS).
    #[error("Unable to reach Phabricator at {host}: {source}")]
    Connectivity {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("Conduit method {method} returned HTTP {status}")]
    Http { method: String, status: u16 },

    /// Conduit reported an application error.
    #[error("Conduit method {method} failed with {code}: {info}")]
    Api {
        method: String,
        code: String,
        info: String,
    },

    /// The result payload did not have the expected shape.
    #[error("Unexpected result from {method}: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field required by the importer was missing from the result.
    #[error("Result of {method} is missing '{field}'")]
    MissingField { method: String, field: String },
}

impl ConduitError {
    /// Returns true when the failure happened before Phabricator answered.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    pub(crate) fn decode(method: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            method: method.to_string(),
            source,
        }
    }

    pub(crate) fn missing(method: &str, field: &str) -> Self {
        Self::MissingField {
            method: method.to_string(),
            field: field.to_string(),
        }
    }
}
