//! Attachment relay error types.

use crate::conduit::ConduitError;
use crate::redmine::SourceError;
use thiserror::Error;

/// Errors that can occur while moving an attachment.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Downloading from Redmine failed.
    #[error("Failed to download '{filename}': {source}")]
    Download {
        filename: String,
        #[source]
        source: SourceError,
    },

    /// Uploading to Phabricator failed.
    #[error("Failed to upload '{filename}': {source}")]
    Upload {
        filename: String,
        #[source]
        source: ConduitError,
    },
}
