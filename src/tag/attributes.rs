use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute map of a tag.
///
/// Keys are unique and compared case-sensitively. A key may be present without a value
/// (`[disabled]` in a selector); such keys, and keys holding an empty string, count as
/// unset and are left out when rendering. Iteration follows insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Attributes {
    map: IndexMap<String, Option<String>>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// Value for `key`, if the key is present and holds a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(|value| value.as_deref())
    }

    /// Whether `key` is present, with or without a value
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Whether `key` holds a non-empty value
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }

    /// Insert or overwrite `key`
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.map.insert(key.into(), value);
    }

    /// Remove `key`, returning its previous value slot
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.map.shift_remove(key)
    }

    /// Number of keys, including valueless ones
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Iterate over all (key, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.map
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Iterate over the pairs that render: keys holding a non-empty value
    pub fn rendered(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key, value)),
            _ => None,
        })
    }
}

impl From<IndexMap<String, Option<String>>> for Attributes {
    fn from(map: IndexMap<String, Option<String>>) -> Self {
        Self { map }
    }
}
