//! In-memory file store backend

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::{normalize, FileStore, PathMatcher, WriteOutcome};
use crate::error::{StoreError, StoreResult as Result};

/// In-memory file store, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RwLock<BTreeMap<String, String>>,
    dirs: RwLock<BTreeSet<String>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn files_read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.files
            .read()
            .map_err(|_| StoreError::StorageError("memory store lock poisoned".to_string()))
    }

    fn files_write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.files
            .write()
            .map_err(|_| StoreError::StorageError("memory store lock poisoned".to_string()))
    }

    fn dirs_read(&self) -> Result<RwLockReadGuard<'_, BTreeSet<String>>> {
        self.dirs
            .read()
            .map_err(|_| StoreError::StorageError("memory store lock poisoned".to_string()))
    }

    fn dirs_write(&self) -> Result<RwLockWriteGuard<'_, BTreeSet<String>>> {
        self.dirs
            .write()
            .map_err(|_| StoreError::StorageError("memory store lock poisoned".to_string()))
    }
}

impl FileStore for MemoryFileStore {
    fn read_text(&self, path: &str) -> Result<Option<String>> {
        Ok(self.files_read()?.get(&normalize(path)).cloned())
    }

    fn write_text(&self, path: &str, content: &str, overwrite: bool) -> Result<WriteOutcome> {
        let path = normalize(path);
        let mut files = self.files_write()?;

        if !overwrite && files.contains_key(&path) {
            debug!("Skipped existing file {}", path);
            return Ok(WriteOutcome::Skipped);
        }

        files.insert(path.clone(), content.to_string());
        debug!("Wrote {} ({} bytes)", path, content.len());
        Ok(WriteOutcome::Written)
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = PathMatcher::new(&normalize(pattern))?;
        let files = self.files_read()?;

        // BTreeMap keys are already sorted
        Ok(files.keys().filter(|p| matcher.matches(p)).cloned().collect())
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        self.dirs_write()?.insert(normalize(path));
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        let path = normalize(path);
        let files = self.files_read()?;

        if files.contains_key(&path) {
            return Ok(true);
        }

        if self.dirs_read()?.contains(&path) {
            return Ok(true);
        }

        // A directory exists implicitly when it holds files
        let prefix = format!("{}/", path);
        Ok((path.is_empty() && !files.is_empty()) || files.keys().any(|p| p.starts_with(&prefix)))
    }

    fn delete(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        if self.files_write()?.remove(&path).is_some() {
            debug!("Deleted {}", path);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Memory File Store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_read() {
        let store = MemoryFileStore::new();

        store.write_text("./definitions/Pet.yml", "type: object\n", false).unwrap();

        let content = store.read_text("definitions/Pet.yml").unwrap();
        assert_eq!(content.as_deref(), Some("type: object\n"));
    }

    #[test]
    fn test_overwrite_policy() {
        let store = MemoryFileStore::new();

        assert_eq!(store.write_text("a.yml", "1", false).unwrap(), WriteOutcome::Written);
        assert_eq!(store.write_text("a.yml", "2", false).unwrap(), WriteOutcome::Skipped);
        assert_eq!(store.write_text("a.yml", "3", true).unwrap(), WriteOutcome::Written);
        assert_eq!(store.read_text("a.yml").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_exists_for_implicit_dirs() {
        let store = MemoryFileStore::new();

        assert!(!store.exists("paths").unwrap());
        store.write_text("paths/users/get.yml", "x", false).unwrap();

        assert!(store.exists("paths").unwrap());
        assert!(store.exists("paths/users").unwrap());
        assert!(!store.exists("paths/user").unwrap());
        assert!(store.exists("").unwrap());

        store.ensure_dir("definitions").unwrap();
        assert!(store.exists("definitions").unwrap());
    }

    #[test]
    fn test_list_and_delete() {
        let store = MemoryFileStore::new();

        store.write_text("definitions/Pet.yml", "a", false).unwrap();
        store.write_text("definitions/Error.yml", "b", false).unwrap();
        store.write_text("securityDefinitions/key.yml", "c", false).unwrap();

        let defs = store.list("definitions/*.yml").unwrap();
        assert_eq!(defs, vec!["definitions/Error.yml", "definitions/Pet.yml"]);

        store.delete("definitions/Pet.yml").unwrap();
        store.delete("definitions/Pet.yml").unwrap();
        assert_eq!(store.list("definitions/*.yml").unwrap().len(), 1);
    }
}
