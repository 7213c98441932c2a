//! Copies issue attachments into Phabricator's file store.

mod error;

pub use error::RelayError;

use crate::conduit::{Conduit, ConduitError};
use crate::redmine::{Attachment, SourceClient, SourceIssue};
use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Uploads attachments and returns their Remarkup references (`{F123}`).
pub struct AttachmentRelay<'a> {
    conduit: &'a dyn Conduit,
    source: &'a dyn SourceClient,
}

impl<'a> AttachmentRelay<'a> {
    /// Creates a relay between `source` and `conduit`.
    pub fn new(conduit: &'a dyn Conduit, source: &'a dyn SourceClient) -> Self {
        Self { conduit, source }
    }

    /// Uploads every attachment of `issue` with `view_policy`.
    ///
    /// References are returned in attachment order. Issues without
    /// attachments make no calls.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError`] if a download or upload fails.
    pub async fn relay(
        &self,
        issue: &SourceIssue,
        view_policy: &str,
    ) -> Result<Vec<String>, RelayError> {
        let mut references = Vec::with_capacity(issue.attachments.len());
        for attachment in &issue.attachments {
            references.push(self.relay_one(attachment, view_policy).await?);
        }
        if !references.is_empty() {
            info!(issue_id = issue.id, count = references.len(), "Uploaded attachments");
        }
        Ok(references)
    }

    async fn relay_one(
        &self,
        attachment: &Attachment,
        view_policy: &str,
    ) -> Result<String, RelayError> {
        let bytes = self
            .source
            .attachment_bytes(attachment)
            .await
            .map_err(|source| RelayError::Download {
                filename: attachment.filename.clone(),
                source,
            })?;
        debug!(filename = %attachment.filename, size = bytes.len(), "Uploading attachment");

        self.upload(&attachment.filename, &bytes, view_policy)
            .await
            .map_err(|source| RelayError::Upload {
                filename: attachment.filename.clone(),
                source,
            })
    }

    async fn upload(
        &self,
        filename: &str,
        bytes: &[u8],
        view_policy: &str,
    ) -> Result<String, ConduitError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let uploaded = self
            .conduit
            .call(
                "file.upload",
                json!({
                    "name": filename,
                    "data_base64": encoded,
                    "viewPolicy": view_policy,
                }),
            )
            .await?;
        let Value::String(phid) = uploaded else {
            return Err(ConduitError::missing("file.upload", "phid"));
        };

        let info = self
            .conduit
            .call("file.info", json!({ "phid": phid }))
            .await?;
        let object_name = info
            .get("objectName")
            .and_then(Value::as_str)
            .ok_or_else(|| ConduitError::missing("file.info", "objectName"))?;

        Ok(format!("{{{object_name}}}"))
    }
}
