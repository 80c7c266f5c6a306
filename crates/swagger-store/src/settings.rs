//! Store configuration
//!
//! Replaces a process-wide storage root with an explicit value handed to each store.
//! Can be loaded from a plain JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swagger_doc::SUBPARTS;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Default storage root
pub const DEFAULT_ROOT: &str = "./doc/swagger";

/// Configuration of a document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Root directory of the tree
    pub root: PathBuf,
    /// File holding the document minus its decomposed sections
    pub base_file: String,
    /// File produced by compile
    pub compiled_file: String,
    /// Extension of every decomposed file
    pub extension: String,
    /// Whether `write` replaces an existing base file
    pub overwrite_base: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            base_file: "base_doc.yml".to_string(),
            compiled_file: "swagger.json".to_string(),
            extension: "yml".to_string(),
            overwrite_base: false,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file; a missing file yields defaults
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: StoreConfig = serde_json::from_str(&contents)
            .map_err(|e| StoreError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Use a different root directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the base file overwrite policy
    pub fn with_overwrite_base(mut self, overwrite: bool) -> Self {
        self.overwrite_base = overwrite;
        self
    }

    fn validate(&self) -> StoreResult<()> {
        if self.extension.is_empty() || self.extension.contains(['/', '.', '*']) {
            return Err(StoreError::ConfigError(format!(
                "invalid extension '{}'",
                self.extension
            )));
        }
        for name in [&self.base_file, &self.compiled_file] {
            if name.is_empty() || name.contains('/') {
                return Err(StoreError::ConfigError(format!("invalid file name '{}'", name)));
            }
            // Would be overwritten by, or read back as, a section file
            if let Some(section) = SUBPARTS
                .iter()
                .find(|section| *name == format!("{}.{}", section.key(), self.extension))
            {
                return Err(StoreError::ConfigError(format!(
                    "file name '{}' is used by the {} section",
                    name, section
                )));
            }
        }
        if self.base_file == self.compiled_file {
            return Err(StoreError::ConfigError(format!(
                "base and compiled file are both '{}'",
                self.base_file
            )));
        }
        Ok(())
    }
}
