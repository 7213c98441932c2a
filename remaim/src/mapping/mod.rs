//! Status and priority mapping.
//!
//! Each table is seeded once per session (statuses from Phabricator and
//! the config file, priorities from the config file) and grows whenever the
//! operator resolves a label that was not mapped yet.

mod category_map;
mod resolution;

pub use category_map::CategoryMap;
pub use resolution::{Category, Resolution, ResolutionRequest};

use crate::conduit::{Conduit, ConduitError};
use crate::prompt::{PromptError, Terminal};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// Owns the status and priority tables for one session.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapper {
    status: CategoryMap,
    priority: CategoryMap,
}

impl CategoryMapper {
    /// Creates a mapper from seeded tables.
    #[must_use]
    pub fn new(status: CategoryMap, priority: CategoryMap) -> Self {
        Self { status, priority }
    }

    /// Returns the status table.
    #[must_use]
    pub fn status_map(&self) -> &CategoryMap {
        &self.status
    }

    /// Returns the priority table.
    #[must_use]
    pub fn priority_map(&self) -> &CategoryMap {
        &self.priority
    }

    fn table(&self, category: Category) -> &CategoryMap {
        match category {
            Category::Status => &self.status,
            Category::Priority => &self.priority,
        }
    }

    fn table_mut(&mut self, category: Category) -> &mut CategoryMap {
        match category {
            Category::Status => &mut self.status,
            Category::Priority => &mut self.priority,
        }
    }

    /// Looks `label` up without asking anyone.
    #[must_use]
    pub fn resolve(&self, category: Category, label: &str) -> Resolution {
        let table = self.table(category);
        if let Some(value) = table.get(label) {
            return Resolution::Resolved(value.to_string());
        }

        let options = table.known_values();
        let hints = match category {
            Category::Status => Vec::new(),
            Category::Priority => options
                .iter()
                .map(|value| table.labels_for(value).join(", "))
                .collect(),
        };
        Resolution::NeedsInput(ResolutionRequest {
            category,
            label: label.to_string(),
            options,
            hints,
        })
    }

    /// Applies the operator's answer to `request`.
    ///
    /// On success the label is recorded so it is never asked about again
    /// this session. `None` means the answer was not usable.
    pub fn answer(&mut self, request: &ResolutionRequest, answer: &str) -> Option<String> {
        let value = request.interpret(answer)?;
        info!(
            category = %request.category,
            label = %request.label,
            value = %value,
            "Recorded new mapping"
        );
        self.table_mut(request.category)
            .insert(request.label.clone(), value.clone());
        Some(value)
    }

    /// Resolves a status, asking the operator until a usable answer is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if the terminal fails or input ends.
    pub fn resolve_status(
        &mut self,
        label: &str,
        terminal: &mut dyn Terminal,
    ) -> Result<String, PromptError> {
        self.resolve_interactively(Category::Status, label, terminal)
    }

    /// Resolves a priority weight, asking the operator on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if the terminal fails or input ends.
    pub fn resolve_priority(
        &mut self,
        label: &str,
        terminal: &mut dyn Terminal,
    ) -> Result<String, PromptError> {
        self.resolve_interactively(Category::Priority, label, terminal)
    }

    fn resolve_interactively(
        &mut self,
        category: Category,
        label: &str,
        terminal: &mut dyn Terminal,
    ) -> Result<String, PromptError> {
        loop {
            let request = match self.resolve(category, label) {
                Resolution::Resolved(value) => return Ok(value),
                Resolution::NeedsInput(request) => request,
            };
            terminal.print(&request.render());
            let answer = terminal.prompt(&request.question())?;
            if let Some(value) = self.answer(&request, &answer) {
                return Ok(value);
            }
            debug!(category = %category, label, answer = %answer, "Unusable answer, asking again");
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusVocabulary {
    status_map: IndexMap<String, String>,
}

/// Builds the status table from Phabricator's status vocabulary.
///
/// `maniphest.querystatuses` maps status keys to display names; the table
/// maps display names (which is what Redmine labels look like) to keys.
/// `overrides` are applied on top.
///
/// # Errors
///
/// Returns [`ConduitError`] if the call fails or the vocabulary is malformed.
pub async fn fetch_status_map(
    conduit: &dyn Conduit,
    overrides: &IndexMap<String, String>,
) -> Result<CategoryMap, ConduitError> {
    let vocabulary: StatusVocabulary =
        crate::conduit::call_as(conduit, "maniphest.querystatuses", json!({})).await?;

    let mut map: CategoryMap = vocabulary
        .status_map
        .into_iter()
        .map(|(key, name)| (name, key))
        .collect();
    for (label, value) in overrides {
        map.insert(label.clone(), value.clone());
    }
    info!(count = map.len(), "Loaded Maniphest statuses");
    Ok(map)
}

/// Builds the priority table from configured weights.
#[must_use]
pub fn priority_map(weights: &IndexMap<String, u32>) -> CategoryMap {
    weights
        .iter()
        .map(|(label, weight)| (label.clone(), weight.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CategoryMapper {
        let status: CategoryMap = [("Open", "open"), ("Resolved", "resolved")]
            .into_iter()
            .collect();
        let priority: CategoryMap = [("Urgent", "100"), ("Normal", "50"), ("Low", "25")]
            .into_iter()
            .collect();
        CategoryMapper::new(status, priority)
    }

    #[test]
    fn known_labels_resolve_directly() {
        let mapper = mapper();
        assert_eq!(
            mapper.resolve(Category::Status, "Resolved"),
            Resolution::Resolved("resolved".to_string())
        );
        assert_eq!(
            mapper.resolve(Category::Priority, "Urgent"),
            Resolution::Resolved("100".to_string())
        );
    }

    #[test]
    fn unknown_label_produces_a_request() {
        let mapper = mapper();
        let Resolution::NeedsInput(request) = mapper.resolve(Category::Status, "Unknown") else {
            panic!("expected a request");
        };
        assert_eq!(request.options, vec!["open", "resolved"]);
    }

    #[test]
    fn answered_label_is_remembered() {
        let mut mapper = mapper();
        let Resolution::NeedsInput(request) = mapper.resolve(Category::Status, "Unknown") else {
            panic!("expected a request");
        };

        assert_eq!(mapper.answer(&request, "0").as_deref(), Some("open"));
        assert_eq!(
            mapper.resolve(Category::Status, "Unknown"),
            Resolution::Resolved("open".to_string())
        );
    }

    #[test]
    fn unusable_answer_records_nothing() {
        let mut mapper = mapper();
        let Resolution::NeedsInput(request) = mapper.resolve(Category::Status, "Unknown") else {
            panic!("expected a request");
        };

        assert_eq!(mapper.answer(&request, "7"), None);
        assert!(mapper.status_map().get("Unknown").is_none());
    }

    #[test]
    fn chosen_priority_weight_is_persisted() {
        let mut mapper = mapper();
        let Resolution::NeedsInput(request) = mapper.resolve(Category::Priority, "Immediate")
        else {
            panic!("expected a request");
        };
        assert_eq!(request.hints, vec!["Urgent", "Normal", "Low"]);

        mapper.answer(&request, "0");
        assert_eq!(mapper.priority_map().get("Immediate"), Some("100"));
    }

    #[test]
    fn priority_table_from_weights() {
        let mut weights = IndexMap::new();
        weights.insert("High".to_string(), 80);
        let map = priority_map(&weights);
        assert_eq!(map.get("High"), Some("80"));
    }
}
