//! Run summary types.

use super::result::SubmissionResult;

/// Summary of a complete session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of Redmine projects migrated.
    pub projects_migrated: usize,

    /// Number of tasks created.
    pub tasks_created: usize,

    /// Number of tasks updated.
    pub tasks_updated: usize,

    /// Number of issues skipped.
    pub issues_skipped: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a submission result.
    pub fn record_result(&mut self, result: &SubmissionResult) {
        match result {
            SubmissionResult::Created { .. } => self.tasks_created += 1,
            SubmissionResult::Updated { .. } => self.tasks_updated += 1,
            SubmissionResult::Skipped { .. } => self.issues_skipped += 1,
        }
    }

    /// Records a finished project and its results.
    pub fn record_project(&mut self, results: &[SubmissionResult]) {
        self.projects_migrated += 1;
        for result in results {
            self.record_result(result);
        }
    }

    /// Number of issues that reached Phabricator.
    #[must_use]
    pub fn submitted(&self) -> usize {
        self.tasks_created + self.tasks_updated
    }
}
