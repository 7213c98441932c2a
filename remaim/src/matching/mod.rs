//! Finding the existing task an issue was imported into before.
//!
//! Matching is a full-text search over the target project. Zero hits means
//! a new task, one hit is taken as-is and several hits are put to the
//! operator. Skipping is a separate outcome from "not found" so callers never
//! create a task the operator declined.

mod candidates;
mod error;
mod query;
mod target_task;

pub use candidates::CandidateChoice;
pub use error::MatchError;
pub use query::fulltext_query;
pub use target_task::TargetTask;

use crate::conduit::{self, Conduit, ConduitError};
use crate::prompt::Terminal;
use crate::redmine::SourceIssue;
use serde_json::json;
use tracing::{debug, info};

/// Result of looking for an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No existing task; a new one should be created.
    NotFound,
    /// Update this task.
    Found(TargetTask),
    /// Leave the issue alone.
    Skip,
}

/// What to do with a set of search hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDecision {
    /// The hits settle the outcome on their own.
    Decided(MatchOutcome),
    /// Several hits; the operator has to pick one.
    NeedsChoice(CandidateChoice),
}

/// Searches a target project for tasks matching source issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskMatcher {
    skip_existing: bool,
}

impl TaskMatcher {
    /// Creates a matcher. With `skip_existing`, any hit skips the issue.
    #[must_use]
    pub fn new(skip_existing: bool) -> Self {
        Self { skip_existing }
    }

    /// Runs the full-text search for `issue` within `project_phid`.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if `maniphest.query` fails.
    pub async fn search(
        &self,
        conduit: &dyn Conduit,
        issue: &SourceIssue,
        project_phid: &str,
    ) -> Result<Vec<TargetTask>, ConduitError> {
        let query = fulltext_query(issue.description_text(), &issue.title);
        debug!(issue_id = issue.id, query = %query, "Searching for existing task");

        let result = conduit
            .call(
                "maniphest.query",
                json!({ "projectPHIDs": [project_phid], "fullText": query }),
            )
            .await?;
        conduit::records(result)
            .into_iter()
            .map(|record| {
                serde_json::from_value(record)
                    .map_err(|e| ConduitError::decode("maniphest.query", e))
            })
            .collect()
    }

    /// Decides on search hits without asking anyone.
    #[must_use]
    pub fn decide(&self, issue: &SourceIssue, mut candidates: Vec<TargetTask>) -> MatchDecision {
        match candidates.len() {
            0 => MatchDecision::Decided(MatchOutcome::NotFound),
            _ if self.skip_existing => MatchDecision::Decided(MatchOutcome::Skip),
            1 => MatchDecision::Decided(MatchOutcome::Found(candidates.remove(0))),
            _ => MatchDecision::NeedsChoice(CandidateChoice::new(issue, candidates)),
        }
    }

    /// Searches and, on ambiguity, asks the operator through `terminal`
    /// until the answer names an option.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if the search fails or the terminal is closed.
    pub async fn find_match(
        &self,
        conduit: &dyn Conduit,
        issue: &SourceIssue,
        project_phid: &str,
        terminal: &mut dyn Terminal,
    ) -> Result<MatchOutcome, MatchError> {
        let candidates = self.search(conduit, issue, project_phid).await?;
        let outcome = match self.decide(issue, candidates) {
            MatchDecision::Decided(outcome) => outcome,
            MatchDecision::NeedsChoice(choice) => {
                terminal.print(&choice.render());
                loop {
                    let answer = terminal.prompt(&choice.question())?;
                    if let Some(outcome) = choice.interpret(&answer) {
                        break outcome;
                    }
                    terminal.print(&choice.retry_message());
                }
            }
        };

        match &outcome {
            MatchOutcome::NotFound => debug!(issue_id = issue.id, "No existing task"),
            MatchOutcome::Found(task) => {
                info!(issue_id = issue.id, task_id = %task.id, "Matched existing task");
            }
            MatchOutcome::Skip => info!(issue_id = issue.id, "Skipping issue"),
        }
        Ok(outcome)
    }
}
