//! Per-issue migration.

use crate::catalog::TargetProject;
use crate::conduit::{Conduit, ConduitError};
use crate::identity::IdentityResolver;
use crate::mapping::CategoryMapper;
use crate::markup::MarkupConverter;
use crate::matching::{MatchOutcome, TargetTask, TaskMatcher};
use crate::prompt::Terminal;
use crate::redmine::{SourceClient, SourceIssue};
use crate::summary::SubmissionResult;
use crate::transactions::{
    AssemblyInput, CommentRenderer, MigrateError, Policies, Transaction, TransactionAssembler,
};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};

const SKIPPED_BY_OPERATOR: &str = "skipped by operator";
const SKIPPED_EXISTING: &str = "task already exists";

/// Migrates issues one at a time, carrying the session's mapping tables and
/// identity cache from one issue to the next.
pub struct Migrator<'a> {
    conduit: &'a dyn Conduit,
    source: &'a dyn SourceClient,
    assembler: TransactionAssembler<'a>,
    matcher: TaskMatcher,
    skip_existing: bool,
    mapper: CategoryMapper,
    identities: IdentityResolver,
}

impl<'a> Migrator<'a> {
    pub fn new(
        conduit: &'a dyn Conduit,
        source: &'a dyn SourceClient,
        markup: &'a dyn MarkupConverter,
        comments: &'a CommentRenderer,
        mapper: CategoryMapper,
        skip_existing: bool,
    ) -> Self {
        Self {
            conduit,
            source,
            assembler: TransactionAssembler::new(conduit, source, markup, comments),
            matcher: TaskMatcher::new(skip_existing),
            skip_existing,
            mapper,
            identities: IdentityResolver::new(),
        }
    }

    /// Returns the session's identity cache.
    pub fn identities_mut(&mut self) -> &mut IdentityResolver {
        &mut self.identities
    }

    /// Migrates `issues` into `project`, returning one result per issue in
    /// input order.
    ///
    /// Issues are re-fetched with their attachments, journals and watchers
    /// before they are matched and assembled.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError`] on the first issue that fails. Issues
    /// submitted before it stay submitted.
    pub async fn migrate(
        &mut self,
        issues: &[SourceIssue],
        project: &TargetProject,
        policies: &Policies,
        terminal: &mut dyn Terminal,
    ) -> Result<Vec<SubmissionResult>, MigrateError> {
        let mut results = Vec::with_capacity(issues.len());
        for issue in issues {
            let span = info_span!("migrate_issue", issue_id = issue.id);
            let result = self
                .migrate_issue(issue.id, project, policies, terminal)
                .instrument(span)
                .await?;
            results.push(result);
        }
        Ok(results)
    }

    async fn migrate_issue(
        &mut self,
        issue_id: u64,
        project: &TargetProject,
        policies: &Policies,
        terminal: &mut dyn Terminal,
    ) -> Result<SubmissionResult, MigrateError> {
        let issue = self.source.issue_detail(issue_id).await?;
        let owner = self.identities.resolve_owner(self.conduit, &issue).await?;

        let existing = match self
            .matcher
            .find_match(self.conduit, &issue, &project.phid, terminal)
            .await?
        {
            MatchOutcome::Found(task) => Some(task),
            MatchOutcome::NotFound => None,
            MatchOutcome::Skip => {
                let reason = if self.skip_existing {
                    SKIPPED_EXISTING
                } else {
                    SKIPPED_BY_OPERATOR
                };
                return Ok(SubmissionResult::Skipped {
                    issue_id,
                    reason: reason.to_string(),
                });
            }
        };

        let input = AssemblyInput {
            project_phid: &project.phid,
            issue: &issue,
            policies,
            existing: existing.as_ref(),
            owner: owner.as_deref(),
        };
        let transactions = self
            .assembler
            .assemble(&input, &mut self.mapper, &mut self.identities, terminal)
            .await?;

        let result =
            create_or_update(self.conduit, issue_id, &transactions, existing.as_ref()).await?;
        info!(result = ?result, "Submitted issue");
        Ok(result)
    }
}

/// Submits `transactions` through `maniphest.edit`.
///
/// With an `existing` task the call edits it; otherwise a task is created.
///
/// # Errors
///
/// Returns [`MigrateError`] if the call fails or the response names no task.
pub async fn create_or_update(
    conduit: &dyn Conduit,
    issue_id: u64,
    transactions: &[Transaction],
    existing: Option<&TargetTask>,
) -> Result<SubmissionResult, MigrateError> {
    let mut params = json!({ "transactions": transactions });
    if let Some(task) = existing {
        params["objectIdentifier"] = json!(task.phid);
    }

    let result = conduit.call("maniphest.edit", params).await?;
    let task_id = result
        .pointer("/object/id")
        .and_then(Value::as_u64)
        .ok_or(MigrateError::NoTask { issue_id })?;
    let phid = result
        .pointer("/object/phid")
        .and_then(Value::as_str)
        .ok_or_else(|| ConduitError::missing("maniphest.edit", "object.phid"))?
        .to_string();

    Ok(match existing {
        Some(_) => SubmissionResult::Updated {
            issue_id,
            task_id,
            phid,
        },
        None => SubmissionResult::Created {
            issue_id,
            task_id,
            phid,
        },
    })
}
