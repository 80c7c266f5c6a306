//! File store trait definitions

use swagger_doc::{DocumentCodec, Value};

use crate::error::{StoreError, StoreResult as Result};

/// Result of a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced
    Written,
    /// The file already existed and overwriting was not requested
    Skipped,
}

/// Trait for file store backends.
///
/// All paths are relative to the store root and use `/` as separator.
pub trait FileStore: Send + Sync {
    /// Read a text file; `None` if it does not exist
    fn read_text(&self, path: &str) -> Result<Option<String>>;

    /// Write a text file, creating parent directories.
    /// Leaves an existing file untouched unless `overwrite` is set.
    fn write_text(&self, path: &str, content: &str, overwrite: bool) -> Result<WriteOutcome>;

    /// List files matching a glob pattern, sorted
    fn list(&self, pattern: &str) -> Result<Vec<String>>;

    /// Create a directory and its parents
    fn ensure_dir(&self, path: &str) -> Result<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &str) -> Result<bool>;

    /// Delete a file; deleting a missing file is not an error
    fn delete(&self, path: &str) -> Result<()>;

    /// Get a human-readable name for this backend
    fn backend_name(&self) -> &'static str;

    /// Read and parse a YAML file; `None` if it does not exist
    fn read_value(&self, path: &str) -> Result<Option<Value>> {
        match self.read_text(path)? {
            Some(text) => DocumentCodec::parse_value(&text)
                .map(Some)
                .map_err(|e| StoreError::MalformedContent {
                    path: path.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Serialize a value to YAML and write it
    fn write_value(&self, path: &str, value: &Value, overwrite: bool) -> Result<WriteOutcome> {
        let content = DocumentCodec::to_yaml(value)?;
        self.write_text(path, &content, overwrite)
    }
}
