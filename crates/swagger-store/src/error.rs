//! Error types for swagger-store

use swagger_doc::DocumentError;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Malformed content in {path}: {message}")]
    MalformedContent { path: String, message: String },

    #[error("Invalid {section} key '{key}': {reason}")]
    InvalidKey {
        section: String,
        key: String,
        reason: &'static str,
    },

    #[error("Invalid section '{section}': expected {expected}")]
    InvalidSection {
        section: String,
        expected: &'static str,
    },

    #[error("Invalid glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Document error: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn invalid_key(section: &str, key: impl Into<String>, reason: &'static str) -> Self {
        StoreError::InvalidKey {
            section: section.to_string(),
            key: key.into(),
            reason,
        }
    }
}
