//! Project listing, lookup and creation in Phabricator.
//!
//! `project.search` is paginated with an opaque `after` cursor; the listing
//! helpers here keep following it until Conduit reports no further page.

mod project;

pub use project::TargetProject;

use crate::conduit::{self, Conduit, ConduitError};
use crate::transactions::{Policies, Transaction, TransactionKind};
use project::{QueryRecord, SearchRecord};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// One page of `project.search` results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    /// Projects on this page, in result order.
    pub projects: Vec<TargetProject>,
    /// Cursor of the next page, `None` on the last one.
    pub next: Option<String>,
}

/// Lookup criteria for `project.query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectQuery {
    /// Numeric project ids.
    Ids(Vec<u64>),
    /// Project slugs.
    Slugs(Vec<String>),
}

impl ProjectQuery {
    fn params(&self) -> Value {
        match self {
            Self::Ids(ids) => json!({ "ids": ids }),
            Self::Slugs(slugs) => json!({ "slugs": slugs }),
        }
    }
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    data: Vec<SearchRecord>,
    #[serde(default)]
    cursor: SearchCursor,
}

#[derive(Deserialize, Default)]
struct SearchCursor {
    #[serde(default)]
    after: Option<Value>,
}

/// Accepts cursors as strings or numbers.
fn cursor_value(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Access to Phabricator projects.
pub struct ProjectCatalog<'a> {
    conduit: &'a dyn Conduit,
}

impl<'a> ProjectCatalog<'a> {
    pub fn new(conduit: &'a dyn Conduit) -> Self {
        Self { conduit }
    }

    /// Fetches a single page of all projects, starting after `after`.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if the search fails.
    pub async fn list_page(&self, after: Option<&str>) -> Result<ProjectPage, ConduitError> {
        self.search_page(json!({ "queryKey": "all", "after": after }))
            .await
    }

    /// Lists every project, following cursors from `start` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if any page fails.
    pub async fn list_all(&self, start: Option<&str>) -> Result<Vec<TargetProject>, ConduitError> {
        self.search_all(json!({ "queryKey": "all" }), start).await
    }

    /// Lists the group projects that can serve as policies.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if any page fails.
    pub async fn list_groups(&self) -> Result<Vec<TargetProject>, ConduitError> {
        self.search_all(json!({ "constraints": { "icons": ["group"] } }), None)
            .await
    }

    /// Finds the first project matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if the query fails.
    pub async fn find_by_query(
        &self,
        query: &ProjectQuery,
    ) -> Result<Option<TargetProject>, ConduitError> {
        let result = self.conduit.call("project.query", query.params()).await?;
        let data = match result {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            other => other,
        };
        conduit::records(data)
            .into_iter()
            .next()
            .map(|record| {
                serde_json::from_value::<QueryRecord>(record)
                    .map(TargetProject::from)
                    .map_err(|e| ConduitError::decode("project.query", e))
            })
            .transpose()
    }

    /// Creates a project and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError`] if creation fails or the new project cannot
    /// be read back.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        members: Vec<String>,
        policies: &Policies,
    ) -> Result<TargetProject, ConduitError> {
        let transactions: Vec<Transaction> = [
            Transaction::text(TransactionKind::Name, name),
            Transaction::text(TransactionKind::Description, description),
            Transaction::list(TransactionKind::MembersAdd, members),
            Transaction::text(TransactionKind::View, &policies.view),
            Transaction::text(TransactionKind::Edit, &policies.edit),
            Transaction::text(TransactionKind::Join, &policies.edit),
        ]
        .into_iter()
        .filter(|transaction| !transaction.is_empty())
        .collect();

        let result = self
            .conduit
            .call(
                "project.edit",
                json!({ "transactions": transactions, "objectIdentifier": null }),
            )
            .await?;
        let id = result
            .pointer("/object/id")
            .and_then(Value::as_u64)
            .ok_or_else(|| ConduitError::missing("project.edit", "object.id"))?;

        let project = self
            .find_by_query(&ProjectQuery::Ids(vec![id]))
            .await?
            .ok_or_else(|| ConduitError::missing("project.query", "data"))?;
        info!(id = project.id, name = %project.name, "Created Phabricator project");
        Ok(project)
    }

    async fn search_all(
        &self,
        mut params: Value,
        start: Option<&str>,
    ) -> Result<Vec<TargetProject>, ConduitError> {
        let mut projects = Vec::new();
        let mut cursor = start.map(str::to_string);
        loop {
            params["after"] = json!(cursor);
            let page = self.search_page(params.clone()).await?;
            debug!(count = page.projects.len(), next = ?page.next, "Fetched project page");
            projects.extend(page.projects);
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(projects)
    }

    async fn search_page(&self, params: Value) -> Result<ProjectPage, ConduitError> {
        let result: SearchResult = conduit::call_as(self.conduit, "project.search", params).await?;
        Ok(ProjectPage {
            projects: result.data.into_iter().map(TargetProject::from).collect(),
            next: cursor_value(result.cursor.after),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursors_accept_numbers_and_strings() {
        assert_eq!(cursor_value(Some(json!(23))), Some("23".to_string()));
        assert_eq!(cursor_value(Some(json!("23"))), Some("23".to_string()));
        assert_eq!(cursor_value(Some(Value::Null)), None);
        assert_eq!(cursor_value(None), None);
    }

    #[test]
    fn query_params() {
        assert_eq!(ProjectQuery::Ids(vec![3]).params(), json!({ "ids": [3] }));
        assert_eq!(
            ProjectQuery::Slugs(vec!["gotham".into()]).params(),
            json!({ "slugs": ["gotham"] })
        );
    }
}
