//! Submission result types.

/// Outcome of migrating a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// A new task was created.
    Created {
        /// Redmine issue number.
        issue_id: u64,
        /// Maniphest task number.
        task_id: u64,
        /// Task PHID.
        phid: String,
    },

    /// An existing task was updated.
    Updated {
        /// Redmine issue number.
        issue_id: u64,
        /// Maniphest task number.
        task_id: u64,
        /// Task PHID.
        phid: String,
    },

    /// Nothing was submitted for the issue.
    Skipped {
        /// Redmine issue number.
        issue_id: u64,
        /// Reason for skipping.
        reason: String,
    },
}

impl SubmissionResult {
    /// Returns the Redmine issue number.
    #[must_use]
    pub fn issue_id(&self) -> u64 {
        match self {
            Self::Created { issue_id, .. }
            | Self::Updated { issue_id, .. }
            | Self::Skipped { issue_id, .. } => *issue_id,
        }
    }

    /// Returns true if nothing was submitted.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
