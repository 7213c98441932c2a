//! Runner error types.

use crate::conduit::ConduitError;
use crate::prompt::PromptError;
use crate::redmine::SourceError;
use crate::transactions::{MigrateError, TemplateError};

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Phabricator could not be reached when the session started.
    #[error(
        "Unable to connect to Phabricator at {host}. \
         Please check your network connection and that the host name resolves."
    )]
    TargetUnreachable {
        /// Configured Phabricator host.
        host: String,
        /// The failed status lookup.
        #[source]
        source: ConduitError,
    },

    /// A Conduit call outside of issue migration failed.
    #[error(transparent)]
    Conduit(#[from] ConduitError),

    /// A Redmine request failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The operator could not be asked.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The comment template is invalid.
    #[error("Invalid comment template: {0}")]
    Template(#[from] TemplateError),

    /// Migrating an issue failed.
    #[error("Migration failed: {0}")]
    Migrate(#[from] MigrateError),
}
