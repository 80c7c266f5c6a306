//! Storage of the `paths` section, one file per path and action
//!
//! `/users/{id}` + `get` is stored at `paths/users/{id}/get.yml`. The leading `/` of a
//! path key is implied by the directory layout and restored on read.

use indexmap::IndexMap;
use std::sync::Arc;
use swagger_doc::{value_kind, Mapping, Section, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::storage::FileStore;

/// Directory holding the path tree
const PATHS_DIR: &str = "paths";

/// Reads and writes path items as a directory tree
pub struct PathStore {
    storage: Arc<dyn FileStore>,
    base_dir: String,
    extension: String,
}

impl PathStore {
    pub fn new(storage: Arc<dyn FileStore>, extension: impl Into<String>) -> Self {
        Self {
            storage,
            base_dir: PATHS_DIR.to_string(),
            extension: extension.into(),
        }
    }

    /// Use a different base directory under the store root
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Write every operation of every path item, always overwriting.
    ///
    /// Files of paths or actions no longer in `paths` are left in place.
    /// Returns the files written.
    pub fn write(&self, paths: &Mapping) -> StoreResult<Vec<String>> {
        // Resolve every location first so an invalid key writes nothing
        let mut planned = Vec::new();

        for (path, item) in paths {
            let path = Self::key_str(path, "path")?;
            let item = item.as_mapping().ok_or_else(|| StoreError::InvalidSection {
                section: format!("{}.{}", Section::Paths, path),
                expected: "a mapping of actions",
            })?;

            for (action, operation) in item {
                let action = Self::key_str(action, "action")?;
                planned.push((self.file_location(path, action)?, operation));
            }
        }

        let mut written = Vec::with_capacity(planned.len());
        for (location, operation) in planned {
            self.storage.write_value(&location, operation, true)?;
            written.push(location);
        }

        info!("Wrote {} path operations", written.len());
        Ok(written)
    }

    /// Rebuild the `paths` mapping by scanning the path tree
    pub fn read(&self) -> StoreResult<Mapping> {
        let prefix = format!("{}/", self.base_dir);
        let mut grouped: IndexMap<String, Mapping> = IndexMap::new();

        for file in self.files()? {
            let Some(relative) = file.strip_prefix(&prefix) else {
                continue;
            };
            let (dir, file_name) = relative.rsplit_once('/').unwrap_or(("", relative));
            let Some(action) = file_name.strip_suffix(&format!(".{}", self.extension)) else {
                continue;
            };

            let operation = self
                .storage
                .read_value(&file)?
                .ok_or_else(|| StoreError::NotFound(file.clone()))?;

            let path_key = format!("/{}", dir);
            debug!("Loaded {} {}", action, path_key);

            grouped
                .entry(path_key)
                .or_default()
                .insert(Value::String(action.to_string()), operation);
        }

        info!("Read {} paths", grouped.len());

        Ok(grouped
            .into_iter()
            .map(|(path, item)| (Value::String(path), Value::Mapping(item)))
            .collect())
    }

    /// Root-relative file for a path key and action
    pub fn file_location(&self, path: &str, action: &str) -> StoreResult<String> {
        let section = Section::Paths.key();

        let Some(rest) = path.strip_prefix('/') else {
            return Err(StoreError::invalid_key(section, path, "path must start with '/'"));
        };

        let file_suffix = format!(".{}", self.extension);
        let mut location = self.base_dir.clone();
        if !rest.is_empty() {
            for segment in rest.split('/') {
                match segment {
                    "" => return Err(StoreError::invalid_key(section, path, "empty path segment")),
                    "." | ".." => {
                        return Err(StoreError::invalid_key(section, path, "relative path segment"))
                    }
                    // Would be a directory where a parent action file lives
                    s if s.ends_with(&file_suffix) => {
                        return Err(StoreError::invalid_key(
                            section,
                            path,
                            "segment ends with the file extension",
                        ))
                    }
                    _ => {
                        location.push('/');
                        location.push_str(segment);
                    }
                }
            }
        }

        if action.is_empty() || action.contains('/') || action == "." || action == ".." {
            return Err(StoreError::invalid_key("action", action, "not usable as a file name"));
        }

        Ok(format!("{}/{}.{}", location, action, self.extension))
    }

    /// Every operation file currently in the tree
    pub fn files(&self) -> StoreResult<Vec<String>> {
        let pattern = format!("{}/**/*.{}", glob::Pattern::escape(&self.base_dir), self.extension);
        self.storage.list(&pattern)
    }

    fn key_str<'a>(key: &'a Value, what: &str) -> StoreResult<&'a str> {
        key.as_str()
            .ok_or_else(|| StoreError::invalid_key(what, format!("<{}>", value_kind(key)), "key must be a string"))
    }
}
