//! Prompt error types.

use thiserror::Error;

/// Errors raised while talking to the operator.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading or writing the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended while an answer was still required.
    #[error("Input closed while waiting for an answer")]
    Closed,
}
