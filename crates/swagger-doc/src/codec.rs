//! Text codecs for documents and values

use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::DocumentResult;
use crate::types::Document;

/// Parses and serializes documents.
///
/// YAML is the editable on-disk format; pretty JSON is the compiled format.
pub struct DocumentCodec;

impl DocumentCodec {
    /// Parse a document from a string (auto-detects JSON/YAML)
    pub fn parse(content: &str) -> DocumentResult<Document> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    /// Parse a document from YAML
    pub fn parse_yaml(content: &str) -> DocumentResult<Document> {
        let value = Self::parse_value(content)?;
        let document = Document::try_from(value)?;
        debug!("Parsed YAML document with {} top-level keys", document.len());
        Ok(document)
    }

    /// Parse a document from JSON
    pub fn parse_json(content: &str) -> DocumentResult<Document> {
        // JSON goes through the YAML value model so both formats share one representation
        let value: Value = serde_json::from_str(content)?;
        let document = Document::try_from(value)?;
        debug!("Parsed JSON document with {} top-level keys", document.len());
        Ok(document)
    }

    /// Parse any YAML value; an empty input is null
    pub fn parse_value(content: &str) -> DocumentResult<Value> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize a document or value to YAML
    pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> DocumentResult<String> {
        Ok(serde_yaml::to_string(value)?)
    }

    /// Serialize a document or value to pretty-printed JSON
    pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}
