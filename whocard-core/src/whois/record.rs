//! Normalized WHOIS record: canonical keys mapped to single or repeated values.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Value stored under a canonical key.
///
/// A key seen once holds a `Single` value; every further occurrence of the
/// same key turns it into `Multiple`, keeping the order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// All values in order of appearance.
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Multiple(values) => values,
        }
    }

    /// First value seen for the key.
    pub fn first(&self) -> &str {
        match self {
            FieldValue::Single(value) => value,
            FieldValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Values joined with newlines and trimmed.
    pub fn joined(&self) -> String {
        match self {
            FieldValue::Single(value) => value.clone(),
            FieldValue::Multiple(values) => values.join("\n").trim().to_string(),
        }
    }

    /// A single empty string counts as missing data; a repeated key never does.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Single(value) if value.is_empty())
    }

    fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(existing) => {
                let existing = std::mem::take(existing);
                *self = FieldValue::Multiple(vec![existing, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

/// Mapping from canonical key to [`FieldValue`], in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    entries: Vec<(String, FieldValue)>,
    index: HashMap<String, usize>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, accumulating into a list when the key repeats.
    pub fn insert_or_append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, FieldValue::Single(value)));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Like [`get`](Self::get), but treats a blank single value as absent.
    pub fn present(&self, key: &str) -> Option<&FieldValue> {
        self.get(key).filter(|value| !value.is_blank())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Derives the canonical key for a raw WHOIS label.
///
/// Whitespace is removed. A label with no lowercase characters left
/// (an acronym such as `DNSSEC`) is lowercased entirely; any other label only
/// has its first character lowercased. Returns `None` for a blank label.
pub fn canonical_key(label: &str) -> Option<String> {
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if compact == compact.to_uppercase() {
        return Some(compact.to_lowercase());
    }

    let mut chars = compact.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}
