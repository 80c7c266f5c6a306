//! Type definitions for Swagger documents

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{DocumentError, DocumentResult};

/// Top-level sections that are stored apart from the base document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Paths,
    Definitions,
    SecurityDefinitions,
    Responses,
    Security,
    Tags,
}

impl Section {
    /// Every decomposed section, in write order
    pub const ALL: [Section; 6] = [
        Section::Paths,
        Section::Responses,
        Section::Security,
        Section::Tags,
        Section::Definitions,
        Section::SecurityDefinitions,
    ];

    /// Document key for this section
    pub fn key(&self) -> &'static str {
        match self {
            Section::Paths => "paths",
            Section::Definitions => "definitions",
            Section::SecurityDefinitions => "securityDefinitions",
            Section::Responses => "responses",
            Section::Security => "security",
            Section::Tags => "tags",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Sections written whole to a single file at the root
pub const SUBPARTS: [Section; 3] = [Section::Responses, Section::Security, Section::Tags];

/// A full Swagger document.
///
/// Top-level keys keep their insertion order; nested values are YAML values,
/// whose mappings are insertion-ordered as well. Equality ignores top-level order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(IndexMap<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a key, keeping the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a YAML mapping value
    pub fn into_value(self) -> Value {
        Value::Mapping(
            self.0
                .into_iter()
                .map(|(k, v)| (Value::String(k), v))
                .collect(),
        )
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> DocumentResult<Self> {
        match value {
            // An empty file is an empty document
            Value::Null => Ok(Document::new()),
            Value::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    match key {
                        Value::String(key) => {
                            entries.insert(key, value);
                        }
                        other => return Err(DocumentError::NonStringKey(value_kind(&other))),
                    }
                }
                Ok(Document(entries))
            }
            other => Err(DocumentError::NotAMapping(value_kind(&other))),
        }
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Whether a value counts as absent: null, or an empty mapping, sequence or string
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Mapping(m) => m.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Short name of a value's kind, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
