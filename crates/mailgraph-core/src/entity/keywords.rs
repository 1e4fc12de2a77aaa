//! Keyword table mapping known entities to identifying fragments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::EntityKey;

/// One entry of the keyword table as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityKeywords {
    pub key: EntityKey,
    pub keywords: Vec<String>,
}

/// Read-only mapping from each known entity to lowercase keyword fragments.
///
/// Declaration order is significant: when entities tie on score, the one
/// declared first wins. In configuration files the table is a list
/// (`[[entities]]` in TOML) so that order survives every format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EntityKeywords>", into = "Vec<EntityKeywords>")]
pub struct KeywordTable {
    entries: IndexMap<EntityKey, Vec<String>>,
}

impl KeywordTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Add an entity with its fragments. Fragments are lowercased; blank
    /// fragments are dropped since they would match every result. Declaring
    /// the same key twice merges the fragments and keeps the first position.
    pub fn with_entity<I, S>(mut self, key: impl Into<EntityKey>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(key.into(), keywords);
        self
    }

    fn insert<I, S>(&mut self, key: EntityKey, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = self.entries.entry(key).or_default();
        for keyword in keywords {
            let fragment = keyword.as_ref().trim().to_lowercase();
            if !fragment.is_empty() && !fragments.contains(&fragment) {
                fragments.push(fragment);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entities and their fragments, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &[String])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// The built-in table for the Enron corpus.
    pub fn enron() -> Self {
        Self::new()
            .with_entity("jeff.dasovich@enron.com", ["jeff", "dasovich"])
            .with_entity("kenneth.lay@enron.com", ["kenneth", "lay", "ken lay"])
            .with_entity("jeff.skilling@enron.com", ["skilling"])
            .with_entity("sherron.watkins@enron.com", ["sherron", "watkins"])
            .with_entity("andy.zipper@enron.com", ["zipper", "andy"])
            .with_entity("greg.whalley@enron.com", ["whalley", "greg"])
            .with_entity("john.arnold@enron.com", ["arnold", "john"])
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::enron()
    }
}

impl From<Vec<EntityKeywords>> for KeywordTable {
    fn from(entries: Vec<EntityKeywords>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.key, entry.keywords);
        }
        table
    }
}

impl From<KeywordTable> for Vec<EntityKeywords> {
    fn from(table: KeywordTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(key, keywords)| EntityKeywords { key, keywords })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enron_table_order() {
        let table = KeywordTable::enron();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.len(), 7);
        assert_eq!(keys[0], "jeff.dasovich@enron.com");
        assert_eq!(keys[6], "john.arnold@enron.com");
    }

    #[test]
    fn test_fragments_lowercased_and_blank_dropped() {
        let table = KeywordTable::new().with_entity("a@x", ["Alice", "  ", "ALICE", "Smith"]);
        let (_, fragments) = table.iter().next().unwrap();
        assert_eq!(fragments, ["alice".to_string(), "smith".to_string()]);
    }

    #[test]
    fn test_round_trips_through_list_form() {
        let table = KeywordTable::enron();
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["key"], "kenneth.lay@enron.com");

        let back: KeywordTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
