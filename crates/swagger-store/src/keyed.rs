//! Storage of keyed collections, one file per entry
//!
//! Used for `definitions` and `securityDefinitions`: `definitions/Pet.yml` holds the
//! `Pet` schema.

use std::sync::Arc;
use swagger_doc::{value_kind, Mapping, Section, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::storage::FileStore;

/// Reads and writes a `name -> object` mapping as a directory of files
pub struct KeyedCollectionStore {
    storage: Arc<dyn FileStore>,
    collection: String,
    extension: String,
}

impl KeyedCollectionStore {
    pub fn new(
        storage: Arc<dyn FileStore>,
        collection: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            collection: collection.into(),
            extension: extension.into(),
        }
    }

    /// Store for the `definitions` section
    pub fn definitions(storage: Arc<dyn FileStore>, extension: impl Into<String>) -> Self {
        Self::new(storage, Section::Definitions.key(), extension)
    }

    /// Store for the `securityDefinitions` section
    pub fn security_definitions(storage: Arc<dyn FileStore>, extension: impl Into<String>) -> Self {
        Self::new(storage, Section::SecurityDefinitions.key(), extension)
    }

    /// Write every entry, overwriting. Returns the files written.
    pub fn write(&self, entries: &Mapping) -> StoreResult<Vec<String>> {
        let mut written = Vec::with_capacity(entries.len());

        for (name, object) in entries {
            let name = name.as_str().ok_or_else(|| {
                StoreError::invalid_key(
                    &self.collection,
                    format!("<{}>", value_kind(name)),
                    "key must be a string",
                )
            })?;
            let location = self.file_location(name)?;

            self.storage.write_value(&location, object, true)?;
            written.push(location);
        }

        info!("Wrote {} {} entries", written.len(), self.collection);
        Ok(written)
    }

    /// Rebuild the mapping from the collection directory; empty when there is none
    pub fn read(&self) -> StoreResult<Mapping> {
        let suffix = format!(".{}", self.extension);
        let mut entries = Mapping::new();

        for file in self.storage.list(&self.pattern())? {
            let Some(name) = file
                .rsplit('/')
                .next()
                .and_then(|file_name| file_name.strip_suffix(&suffix))
            else {
                continue;
            };

            let object = self
                .storage
                .read_value(&file)?
                .ok_or_else(|| StoreError::NotFound(file.clone()))?;

            debug!("Loaded {} entry {}", self.collection, name);
            entries.insert(Value::String(name.to_string()), object);
        }

        info!("Read {} {} entries", entries.len(), self.collection);
        Ok(entries)
    }

    /// Root-relative file of an entry
    pub fn file_location(&self, name: &str) -> StoreResult<String> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(StoreError::invalid_key(&self.collection, name, "not usable as a file name"));
        }
        if name.contains('/') {
            return Err(StoreError::invalid_key(&self.collection, name, "name must not contain '/'"));
        }

        Ok(format!("{}/{}.{}", self.collection, name, self.extension))
    }

    /// Every file currently in the collection
    pub fn files(&self) -> StoreResult<Vec<String>> {
        self.storage.list(&self.pattern())
    }

    fn pattern(&self) -> String {
        format!("{}/*.{}", glob::Pattern::escape(&self.collection), self.extension)
    }
}
