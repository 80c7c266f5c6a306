//! Error types for the document model

use thiserror::Error;

/// Result type alias for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Document error types
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Document root must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Top-level key must be a string, found {0}")]
    NonStringKey(&'static str),

    #[error("Section '{section}' must be {expected}, found {found}")]
    InvalidSection {
        section: String,
        expected: &'static str,
        found: &'static str,
    },
}
