//! Records read from Redmine.
//!
//! These are validated when the JSON is parsed; anything the importer relies
//! on is a required field here, everything else defaults.

use serde::Deserialize;

/// A user, status, priority or group reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    /// Redmine record id.
    #[serde(default)]
    pub id: Option<u64>,

    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    /// Creates a reference with only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Status of a source issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueStatus {
    /// Redmine status id.
    pub id: u64,

    /// Status label, e.g. "Resolved".
    pub name: String,
}

/// A file attached to a source issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub filename: String,

    /// Download location.
    pub content_url: String,
}

/// A journal entry (comment and/or field change).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Journal {
    /// Author of the entry.
    #[serde(default)]
    pub user: Option<NamedRef>,

    /// Comment text in Textile.
    #[serde(default)]
    pub notes: Option<String>,

    /// Creation timestamp as reported by Redmine.
    #[serde(default)]
    pub created_on: Option<String>,
}

/// A Redmine issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceIssue {
    /// Issue number.
    pub id: u64,

    /// Issue subject.
    #[serde(rename = "subject")]
    pub title: String,

    /// Description in Textile.
    #[serde(default)]
    pub description: Option<String>,

    /// Current status.
    pub status: IssueStatus,

    /// Priority, absent when unset.
    #[serde(default)]
    pub priority: Option<NamedRef>,

    /// Assignee, absent when unassigned.
    #[serde(default, rename = "assigned_to")]
    pub assignee: Option<NamedRef>,

    /// Users watching the issue.
    #[serde(default)]
    pub watchers: Vec<NamedRef>,

    /// Attached files, in upload order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Journal entries, oldest first.
    #[serde(default)]
    pub journals: Vec<Journal>,
}

impl SourceIssue {
    /// Creates an issue with only the fields every issue has.
    pub fn new(id: u64, title: impl Into<String>, status: &str) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: IssueStatus {
                id: 0,
                name: status.to_string(),
            },
            priority: None,
            assignee: None,
            watchers: Vec::new(),
            attachments: Vec::new(),
            journals: Vec::new(),
        }
    }

    /// Returns the description, or an empty string.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Returns the non-empty watcher names, in order.
    #[must_use]
    pub fn watcher_names(&self) -> Vec<String> {
        self.watchers
            .iter()
            .map(|watcher| watcher.name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A Redmine project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceProject {
    /// Project id.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// URL identifier.
    #[serde(default)]
    pub identifier: Option<String>,

    /// Project description.
    #[serde(default)]
    pub description: Option<String>,
}

/// The issues of a project together with Redmine's reported total.
#[derive(Debug, Clone)]
pub struct IssueList {
    /// Issues, in the order Redmine listed them.
    pub issues: Vec<SourceIssue>,

    /// Total reported by Redmine.
    pub total_count: usize,
}
