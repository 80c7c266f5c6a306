//! Disk file store backend
//!
//! Maps root-relative paths onto a directory of the local file system.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{normalize, FileStore, PathMatcher, WriteOutcome};
use crate::error::{StoreError, StoreResult as Result};

/// Disk file store backend
pub struct DiskFileStore {
    /// Root directory of the tree
    root: PathBuf,
}

impl DiskFileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!("Disk file store rooted at: {:?}", root);
        Self { root }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a root-relative path to a file system path
    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            full.push(segment);
        }
        full
    }

    /// Turn a file system path under the root back into a root-relative path
    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let segments: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
        segments.map(|s| s.join("/"))
    }

    /// Remove empty directories between `dir` and the root
    fn prune_empty_dirs(&self, mut dir: Option<&Path>) {
        while let Some(current) = dir {
            if current == self.root.as_path() || !current.starts_with(&self.root) {
                break;
            }
            // Fails when the directory still has entries, which ends the walk
            if fs::remove_dir(current).is_err() {
                break;
            }
            debug!("Removed empty directory {:?}", current);
            dir = current.parent();
        }
    }
}

impl FileStore for DiskFileStore {
    fn read_text(&self, path: &str) -> Result<Option<String>> {
        let full = self.resolve(path);

        match fs::read_to_string(&full) {
            Ok(content) => {
                debug!("Read {}", path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("File not found: {}", path);
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::MalformedContent {
                path: path.to_string(),
                message: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn write_text(&self, path: &str, content: &str, overwrite: bool) -> Result<WriteOutcome> {
        let full = self.resolve(path);

        if !overwrite && full.exists() {
            debug!("Skipped existing file {}", path);
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically using a temp file
        let temp_path = full.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &full)?;

        debug!("Wrote {} ({} bytes)", path, content.len());
        Ok(WriteOutcome::Written)
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = PathMatcher::new(&normalize(pattern))?;

        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            match self.relative(entry.path()) {
                Some(rel) if matcher.matches(&rel) => files.push(rel),
                Some(_) => {}
                None => warn!("Skipping non UTF-8 path {:?}", entry.path()),
            }
        }

        files.sort();
        Ok(files)
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path).exists())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let full = self.resolve(path);

        match fs::remove_file(&full) {
            Ok(()) => {
                debug!("Deleted {}", path);
                self.prune_empty_dirs(full.parent());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "Disk File Store"
    }
}
