//! Responses keyed by caller-defined names.
//!
//! Endpoints such as `GET /_mapping` return `{"index-a": {...}, "index-b": {...}}`:
//! the keys are data, not a fixed schema. [`DictionaryResponse`] keeps those
//! entries in the order they were received.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Ordered string-keyed map response.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryResponse<V> {
    entries: Vec<(String, V)>,
}

impl<V> DictionaryResponse<V> {
    /// Create a new builder.
    pub fn builder() -> DictionaryResponseBuilder<V> {
        DictionaryResponseBuilder::default()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in received order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in received order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the response, returning its entries.
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> IntoIterator for DictionaryResponse<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builder for [`DictionaryResponse`].
#[derive(Debug)]
pub struct DictionaryResponseBuilder<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for DictionaryResponseBuilder<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> DictionaryResponseBuilder<V> {
    /// Add an entry. A repeated key replaces the earlier value in place.
    pub fn entry(mut self, key: impl Into<String>, value: V) -> Self {
        self.insert(key.into(), value);
        self
    }

    /// Add several entries.
    pub fn entries<K: Into<String>>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
        for (key, value) in entries {
            self.insert(key.into(), value);
        }
        self
    }

    fn insert(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Build the response. Any set of entries, including none, is valid.
    pub fn build(self) -> DictionaryResponse<V> {
        DictionaryResponse {
            entries: self.entries,
        }
    }
}

impl<V: Serialize> Serialize for DictionaryResponse<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for DictionaryResponse<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor(PhantomData))
    }
}

struct DictionaryVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for DictionaryVisitor<V> {
    type Value = DictionaryResponse<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with arbitrary keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut builder = DictionaryResponseBuilder::default();
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            builder.insert(key, value);
        }
        Ok(builder.build())
    }
}
