//! Record type: one row materialized as named values.

use std::collections::HashMap;

use super::value::Value;

/// A row materialized as (column name, value) pairs in ordinal order.
///
/// Lookup by name returns the first matching column, the same rule the
/// catalog uses for duplicate names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create a record from ordered pairs.
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Get value by column name (case-sensitive, first match).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Get value by ordinal.
    pub fn get_index(&self, ordinal: usize) -> Option<&Value> {
        self.fields.get(ordinal).map(|(_, v)| v)
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get column names in ordinal order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Convert into a hash map; for duplicate names the first column wins.
    pub fn into_map(self) -> HashMap<String, Value> {
        let mut map = HashMap::with_capacity(self.fields.len());
        for (name, value) in self.fields {
            map.entry(name).or_insert(value);
        }
        map
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
