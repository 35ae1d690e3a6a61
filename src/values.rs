//! The mutable value set backing one form visit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// All current field values, keyed by field key. Every declared field has an
/// entry (possibly empty); serialization therefore matches the persisted
/// snapshot layout key-for-key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Creates a value set with every schema field present and empty.
    pub fn empty(schema: &Schema) -> Self {
        let mut map = BTreeMap::new();
        for field in schema.fields() {
            map.insert(field.key.to_string(), String::new());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// The value with surrounding whitespace removed. Validation and progress
    /// both operate on trimmed values.
    pub fn trimmed(&self, key: &str) -> &str {
        self.get(key).trim()
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.trimmed(key).is_empty()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn empty_seeds_every_declared_field() {
        let values = FormValues::empty(schema::onboarding());
        assert_eq!(values.iter().count(), schema::onboarding().len());
        assert!(values.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn trimmed_strips_whitespace() {
        let mut values = FormValues::default();
        values.set(schema::FULL_NAME, "  Ada Lovelace  ");
        assert_eq!(values.trimmed(schema::FULL_NAME), "Ada Lovelace");
        assert!(!values.is_blank(schema::FULL_NAME));
        values.set(schema::EMAIL, "   ");
        assert!(values.is_blank(schema::EMAIL));
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let values = FormValues::default();
        assert_eq!(values.get("unknown"), "");
        assert!(values.is_blank("unknown"));
    }
}
