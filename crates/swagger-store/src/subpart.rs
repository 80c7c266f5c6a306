//! Storage of whole sections in a single file at the root

use std::sync::Arc;
use swagger_doc::{is_empty_value, Value};
use tracing::debug;

use crate::error::StoreResult;
use crate::storage::{FileStore, WriteOutcome};

/// Reads and writes `responses`, `security` and `tags` as `<name>.yml`
pub struct SubpartStore {
    storage: Arc<dyn FileStore>,
    extension: String,
}

impl SubpartStore {
    pub fn new(storage: Arc<dyn FileStore>, extension: impl Into<String>) -> Self {
        Self {
            storage,
            extension: extension.into(),
        }
    }

    /// Root-relative file of a subpart
    pub fn file_location(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }

    /// Write a subpart, overwriting. Absent or empty content writes nothing.
    /// Returns the file written, if any.
    pub fn write(&self, name: &str, content: Option<&Value>) -> StoreResult<Option<String>> {
        let Some(content) = content.filter(|c| !is_empty_value(c)) else {
            debug!("No {} to write", name);
            return Ok(None);
        };

        let location = self.file_location(name);
        match self.storage.write_value(&location, content, true)? {
            WriteOutcome::Written => Ok(Some(location)),
            WriteOutcome::Skipped => Ok(None),
        }
    }

    /// Read a subpart; `None` when its file does not exist
    pub fn read(&self, name: &str) -> StoreResult<Option<Value>> {
        let value = self.storage.read_value(&self.file_location(name))?;
        if value.is_none() {
            debug!("No {} file, section omitted", name);
        }
        Ok(value)
    }
}
