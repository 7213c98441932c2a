//! Builds the transaction list for one issue.

use super::{CommentRenderer, MigrateError, Policies, Transaction, TransactionKind};
use crate::attachments::AttachmentRelay;
use crate::conduit::Conduit;
use crate::identity::IdentityResolver;
use crate::mapping::CategoryMapper;
use crate::markup::MarkupConverter;
use crate::matching::TargetTask;
use crate::prompt::Terminal;
use crate::redmine::{SourceClient, SourceIssue};
use tracing::debug;

/// Everything known about the issue being assembled.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'i> {
    /// PHID of the target project.
    pub project_phid: &'i str,
    /// The source issue.
    pub issue: &'i SourceIssue,
    /// Session policies.
    pub policies: &'i Policies,
    /// The task this issue was matched to, if any.
    pub existing: Option<&'i TargetTask>,
    /// PHID of the resolved assignee, if any.
    pub owner: Option<&'i str>,
}

/// Builds the ordered transaction list for an issue.
///
/// Order: project, title, description, status, subscribers, priority,
/// owner, comments, view, edit. Empty entries are dropped.
pub struct TransactionAssembler<'a> {
    conduit: &'a dyn Conduit,
    relay: AttachmentRelay<'a>,
    markup: &'a dyn MarkupConverter,
    comments: &'a CommentRenderer,
}

impl<'a> TransactionAssembler<'a> {
    pub fn new(
        conduit: &'a dyn Conduit,
        source: &'a dyn SourceClient,
        markup: &'a dyn MarkupConverter,
        comments: &'a CommentRenderer,
    ) -> Self {
        Self {
            conduit,
            relay: AttachmentRelay::new(conduit, source),
            markup,
            comments,
        }
    }

    /// Assembles the transactions for `input`.
    ///
    /// Unmapped statuses and priorities are resolved through `mapper`, which
    /// may ask the operator; watchers are resolved through `identities`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError`] if a lookup, upload, prompt or comment fails.
    pub async fn assemble(
        &self,
        input: &AssemblyInput<'_>,
        mapper: &mut CategoryMapper,
        identities: &mut IdentityResolver,
        terminal: &mut dyn Terminal,
    ) -> Result<Vec<Transaction>, MigrateError> {
        let issue = input.issue;
        let mut transactions = vec![Transaction::list(
            TransactionKind::Projects,
            vec![input.project_phid.to_string()],
        )];

        transactions.extend(title_transaction(issue, input.existing));

        let references = self.relay.relay(issue, &input.policies.view).await?;
        let description = self.markup.convert(issue.description_text());
        transactions.extend(description_transaction(
            description,
            &references,
            input.existing,
        ));

        let status = mapper.resolve_status(&issue.status.name, terminal)?;
        transactions.push(Transaction::text(TransactionKind::Status, status));

        let watchers = issue.watcher_names();
        if !watchers.is_empty() {
            let subscribers = identities.resolve_handles(self.conduit, &watchers).await?;
            transactions.push(Transaction::list(TransactionKind::Subscribers, subscribers));
        }

        if let Some(priority) = issue
            .priority
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.trim().is_empty())
        {
            let weight = mapper.resolve_priority(priority, terminal)?;
            transactions.push(Transaction::text(TransactionKind::Priority, weight));
        }

        if let Some(owner) = input.owner {
            transactions.push(Transaction::text(TransactionKind::Owner, owner));
        }

        for journal in &issue.journals {
            if let Some(comment) = self.comments.render(journal, self.markup)? {
                transactions.push(Transaction::text(TransactionKind::Comment, comment));
            }
        }

        transactions.push(Transaction::text(TransactionKind::View, &input.policies.view));
        transactions.push(Transaction::text(TransactionKind::Edit, &input.policies.edit));

        let before = transactions.len();
        transactions.retain(|transaction| !transaction.is_empty());
        debug!(
            issue_id = issue.id,
            count = transactions.len(),
            dropped = before - transactions.len(),
            "Assembled transactions"
        );
        Ok(transactions)
    }
}

/// Title for new tasks, or when the existing title has diverged.
fn title_transaction(issue: &SourceIssue, existing: Option<&TargetTask>) -> Option<Transaction> {
    match existing {
        Some(task) if task.title == issue.title => None,
        _ => Some(Transaction::text(TransactionKind::Title, &issue.title)),
    }
}

/// Description with attachment references appended on their own paragraph.
///
/// Existing tasks only get one when the text changed or files were added.
fn description_transaction(
    description: String,
    references: &[String],
    existing: Option<&TargetTask>,
) -> Option<Transaction> {
    if references.is_empty() {
        if existing.is_some_and(|task| task.description_text() == description) {
            return None;
        }
        return Some(Transaction::text(TransactionKind::Description, description));
    }

    Some(Transaction::text(
        TransactionKind::Description,
        format!("{description}\n\n{}", references.join(" ")),
    ))
}
