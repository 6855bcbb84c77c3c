use indexmap::IndexMap;
use serde::Serialize;

use super::Value;

/// An ordered GraphQL response object.
///
/// Backed by an [`IndexMap`] rather than a [`std::collections::HashMap`] so
/// that iteration preserves insertion order — the order field collection
/// first saw each response key in (see [`crate::collect::collect_fields`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Object {
    key_value_list: IndexMap<String, Value>,
}

impl Object {
    /// Creates an object with a fixed number of preallocated slots.
    pub fn with_capacity(size: usize) -> Self {
        Self { key_value_list: IndexMap::with_capacity(size) }
    }

    /// Inserts a field, returning the previous value for that key if any.
    pub fn add_field(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.key_value_list.insert(key.into(), value)
    }

    pub fn contains_field(&self, key: &str) -> bool {
        self.key_value_list.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.key_value_list.get(key)
    }

    pub fn len(&self) -> usize {
        self.key_value_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_value_list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.key_value_list.iter()
    }

    pub fn into_iter(self) -> impl Iterator<Item = (String, Value)> {
        self.key_value_list.into_iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { key_value_list: iter.into_iter().collect() }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}
