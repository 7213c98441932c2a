//! Maniphest task records.

use serde::{Deserialize, Deserializer};

/// A task that already exists in Phabricator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetTask {
    /// Task number (`T<id>`).
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Task PHID.
    pub phid: String,

    /// Task title.
    pub title: String,

    /// Description in Remarkup.
    #[serde(default)]
    pub description: Option<String>,

    /// Display name of the status.
    #[serde(default, rename = "statusName")]
    pub status: Option<String>,

    /// Owner PHID.
    #[serde(default, rename = "ownerPHID")]
    pub owner: Option<String>,

    /// PHIDs of the projects the task is tagged with.
    #[serde(default, rename = "projectPHIDs")]
    pub projects: Vec<String>,

    /// Priority as reported by Conduit.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub priority: Option<String>,
}

impl TargetTask {
    /// Returns the description, or an empty string.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(i64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conduit_task() {
        let task: TargetTask = serde_json::from_str(
            r#"{
                "id": "12",
                "phid": "PHID-TASK-abc",
                "title": "Broken login",
                "description": null,
                "statusName": "Open",
                "ownerPHID": null,
                "projectPHIDs": ["PHID-PROJ-1"],
                "priority": "Normal"
            }"#,
        )
        .unwrap();

        assert_eq!(task.id, "12");
        assert_eq!(task.description_text(), "");
        assert_eq!(task.status.as_deref(), Some("Open"));
        assert_eq!(task.projects, vec!["PHID-PROJ-1"]);
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let task: TargetTask =
            serde_json::from_str(r#"{"id": 3, "title": "t", "priority": 50}"#).unwrap();
        assert_eq!(task.id, "3");
        assert_eq!(task.priority.as_deref(), Some("50"));
    }
}
