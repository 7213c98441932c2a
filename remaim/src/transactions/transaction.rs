//! Field-level edit operations.

use serde::Serialize;
use std::fmt;

/// Transaction types understood by `maniphest.edit` and `project.edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Replaces the task's project tags.
    #[serde(rename = "projects.set")]
    Projects,
    /// Task title.
    Title,
    /// Task or project description.
    Description,
    /// Task status key.
    Status,
    /// Replaces the task's subscribers.
    #[serde(rename = "subscribers.set")]
    Subscribers,
    /// Priority weight.
    Priority,
    /// Owner PHID.
    Owner,
    /// Adds a comment.
    Comment,
    /// View policy.
    View,
    /// Edit policy.
    Edit,
    /// Project name.
    Name,
    /// Adds project members.
    #[serde(rename = "members.add")]
    MembersAdd,
    /// Join policy of a project.
    Join,
}

impl TransactionKind {
    /// Returns the wire name of the transaction type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects.set",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Subscribers => "subscribers.set",
            Self::Priority => "priority",
            Self::Owner => "owner",
            Self::Comment => "comment",
            Self::View => "view",
            Self::Edit => "edit",
            Self::Name => "name",
            Self::MembersAdd => "members.add",
            Self::Join => "join",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction payload: a single string or a list of PHIDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransactionValue {
    /// Titles, descriptions, comments and single handles.
    Text(String),
    /// Sets of PHIDs such as projects or subscribers.
    List(Vec<String>),
}

/// One `{type, value}` entry of an edit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Field being edited, sent as `type`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// New value of the field.
    pub value: TransactionValue,
}

impl Transaction {
    /// Creates a transaction with a string value.
    pub fn text(kind: TransactionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: TransactionValue::Text(value.into()),
        }
    }

    /// Creates a transaction with a list value.
    #[must_use]
    pub fn list(kind: TransactionKind, values: Vec<String>) -> Self {
        Self {
            kind,
            value: TransactionValue::List(values),
        }
    }

    /// A transaction is empty when its text is blank or its list has no
    /// entries. Empty transactions are never submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.value {
            TransactionValue::Text(text) => text.trim().is_empty(),
            TransactionValue::List(items) => items.is_empty(),
        }
    }

    /// Returns the string value, if this is a text transaction.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            TransactionValue::Text(text) => Some(text),
            TransactionValue::List(_) => None,
        }
    }
}
