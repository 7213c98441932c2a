//! Phabricator project records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A project in Phabricator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProject {
    /// Numeric project id.
    pub id: u64,
    /// Project PHID.
    pub phid: String,
    /// Display name.
    pub name: String,
}

impl TargetProject {
    /// One-line listing entry, `[id – name]`.
    #[must_use]
    pub fn represent(&self) -> String {
        format!("[{} – {}]\n", self.id, self.name)
    }
}

/// `project.search` record: `{id, phid, fields: {name}}`.
#[derive(Deserialize)]
pub(super) struct SearchRecord {
    id: u64,
    phid: String,
    fields: SearchFields,
}

#[derive(Deserialize)]
struct SearchFields {
    name: String,
}

impl From<SearchRecord> for TargetProject {
    fn from(record: SearchRecord) -> Self {
        Self {
            id: record.id,
            phid: record.phid,
            name: record.fields.name,
        }
    }
}

/// `project.query` record: `{id, phid, name}`, ids as strings.
#[derive(Deserialize)]
pub(super) struct QueryRecord {
    #[serde(deserialize_with = "lenient_id")]
    id: u64,
    phid: String,
    name: String,
}

impl From<QueryRecord> for TargetProject {
    fn from(record: QueryRecord) -> Self {
        Self {
            id: record.id,
            phid: record.phid,
            name: record.name,
        }
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom("project id is not a positive integer")),
        Value::String(text) => text.parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "unexpected project id {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_both_record_shapes() {
        let searched: SearchRecord = serde_json::from_value(json!({
            "id": 7, "phid": "PHID-PROJ-7", "fields": { "name": "Gotham" }
        }))
        .unwrap();
        let queried: QueryRecord = serde_json::from_value(json!({
            "id": "7", "phid": "PHID-PROJ-7", "name": "Gotham"
        }))
        .unwrap();

        assert_eq!(TargetProject::from(searched), TargetProject::from(queried));
    }

    #[test]
    fn represents_as_listing_entry() {
        let project = TargetProject {
            id: 7,
            phid: "PHID-PROJ-7".into(),
            name: "Gotham".into(),
        };
        assert_eq!(project.represent(), "[7 – Gotham]\n");
    }
}
