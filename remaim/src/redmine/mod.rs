//! Redmine, the system issues are migrated from.

mod client;
mod error;
mod types;

pub use client::RedmineClient;
pub use error::SourceError;
pub use types::{
    Attachment, IssueList, IssueStatus, Journal, NamedRef, SourceIssue, SourceProject,
};

use async_trait::async_trait;

/// Read access to the source issue tracker.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Verifies that the tracker answers authenticated requests.
    async fn check_connection(&self) -> Result<(), SourceError>;

    /// Lists every project visible to the configured user.
    async fn list_projects(&self) -> Result<Vec<SourceProject>, SourceError>;

    /// Fetches a single project.
    async fn project_details(&self, project_id: u64) -> Result<SourceProject, SourceError>;

    /// Lists the issues of a project, in any status.
    ///
    /// Fails with [`SourceError::NoIssuesFound`] when the project has none.
    async fn issues_for_project(&self, project_id: u64) -> Result<IssueList, SourceError>;

    /// Fetches an issue with its attachments, journals and watchers.
    async fn issue_detail(&self, issue_id: u64) -> Result<SourceIssue, SourceError>;

    /// Returns the display names of a project's user members.
    async fn project_members(&self, project_id: u64) -> Result<Vec<String>, SourceError>;

    /// Downloads the raw bytes of an attachment.
    async fn attachment_bytes(&self, attachment: &Attachment) -> Result<Vec<u8>, SourceError>;
}
