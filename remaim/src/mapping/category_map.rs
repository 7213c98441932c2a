//! Label-to-value tables.

use indexmap::IndexMap;

/// Translates a source label into a target value, preserving insertion order.
///
/// Keys are unique; inserting an existing label replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: IndexMap<String, String>,
}

impl CategoryMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Records `label -> value`.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(label.into(), value.into());
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no label is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target values, deduplicated, in first-seen order.
    #[must_use]
    pub fn known_values(&self) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for value in self.entries.values() {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        values
    }

    /// Labels currently mapped to `value`.
    #[must_use]
    pub fn labels_for(&self, value: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.as_str() == value)
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Iterates over `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}
