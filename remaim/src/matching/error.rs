//! Matching error types.

use crate::conduit::ConduitError;
use crate::prompt::PromptError;
use thiserror::Error;

/// Errors raised while looking for an existing task.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The task search failed.
    #[error("Task search failed: {0}")]
    Search(#[from] ConduitError),

    /// The operator could not be asked to pick a candidate.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
