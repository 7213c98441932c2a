//! Display name to Phabricator user PHID resolution.

use crate::conduit::{records, Conduit, ConduitError};
use crate::redmine::SourceIssue;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct UserRecord {
    phid: String,
    #[serde(rename = "realName")]
    real_name: String,
}

/// Resolves display names to user PHIDs, remembering every hit.
///
/// The cache only grows within a session and holds at most one PHID per name.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    cache: HashMap<String, String>,
}

impl IdentityResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached PHID for `name`.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<&str> {
        self.cache.get(name).map(String::as_str)
    }

    /// Resolves `names` to PHIDs.
    ///
    /// Cached names are answered from the cache, in request order; the rest
    /// are looked up with a single `user.query` whose hits follow, in result
    /// order. Names without a Phabricator account are left out, and each
    /// handle appears once.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if the lookup fails.
    pub async fn resolve_handles(
        &mut self,
        conduit: &dyn Conduit,
        names: &[String],
    ) -> Result<Vec<String>, ConduitError> {
        let mut handles: Vec<String> = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        let mut uncached: Vec<&str> = Vec::new();

        for name in names {
            if seen.contains(&name.as_str()) {
                continue;
            }
            seen.push(name);
            match self.cache.get(name) {
                Some(phid) if !handles.contains(phid) => handles.push(phid.clone()),
                Some(_) => {}
                None => uncached.push(name),
            }
        }

        if uncached.is_empty() {
            return Ok(handles);
        }

        debug!(names = ?uncached, "Looking up Phabricator users");
        let result = conduit
            .call("user.query", json!({ "realnames": uncached }))
            .await?;

        for record in records(result) {
            let user: UserRecord = serde_json::from_value(record)
                .map_err(|e| ConduitError::decode("user.query", e))?;
            self.cache
                .entry(user.real_name)
                .or_insert_with(|| user.phid.clone());
            if !handles.contains(&user.phid) {
                handles.push(user.phid);
            }
        }

        Ok(handles)
    }

    /// Resolves the assignee of `issue`.
    ///
    /// Unassigned issues and assignees without an account yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if the lookup fails.
    pub async fn resolve_owner(
        &mut self,
        conduit: &dyn Conduit,
        issue: &SourceIssue,
    ) -> Result<Option<String>, ConduitError> {
        let Some(assignee) = issue
            .assignee
            .as_ref()
            .map(|a| a.name.trim())
            .filter(|name| !name.is_empty())
        else {
            return Ok(None);
        };

        let owner = self
            .resolve_handles(conduit, &[assignee.to_string()])
            .await?
            .into_iter()
            .next();
        if owner.is_none() {
            warn!(issue_id = issue.id, assignee, "Assignee has no Phabricator account");
        }
        Ok(owner)
    }
}
