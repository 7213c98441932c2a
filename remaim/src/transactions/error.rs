//! Per-issue migration errors.

use crate::attachments::RelayError;
use crate::conduit::ConduitError;
use crate::matching::MatchError;
use crate::prompt::PromptError;
use crate::redmine::SourceError;
use thiserror::Error;

/// Comment template error.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Template registration error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}

/// Errors that abort the migration of an issue.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// A Conduit call failed or returned an unexpected shape.
    #[error(transparent)]
    Conduit(#[from] ConduitError),

    /// Reading the issue from Redmine failed.
    #[error("Redmine request failed: {0}")]
    Source(#[from] SourceError),

    /// The operator could not be asked.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// An attachment could not be copied.
    #[error(transparent)]
    Attachment(#[from] RelayError),

    /// A journal entry could not be rendered as a comment.
    #[error("Unable to render comment: {0}")]
    Comment(#[from] TemplateError),

    /// `maniphest.edit` did not say which task it touched.
    #[error("Edit of issue #{issue_id} returned no task")]
    NoTask { issue_id: u64 },
}

impl From<MatchError> for MigrateError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::Search(e) => Self::Conduit(e),
            MatchError::Prompt(e) => Self::Prompt(e),
        }
    }
}
