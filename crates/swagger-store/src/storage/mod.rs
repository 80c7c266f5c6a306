//! File store backends for the document tree
//!
//! This module provides two backends:
//! 1. Disk (a directory on the local file system)
//! 2. Memory (for tests and dry runs)

mod traits;
mod disk;
mod memory;

pub use traits::{FileStore, WriteOutcome};
pub use disk::DiskFileStore;
pub use memory::MemoryFileStore;

use glob::{MatchOptions, Pattern};

use crate::error::StoreResult;

/// Compiled glob over root-relative paths; `*` stays within one directory, `**` crosses them
pub(crate) struct PathMatcher {
    pattern: Pattern,
}

impl PathMatcher {
    const OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    pub(crate) fn new(pattern: &str) -> StoreResult<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        self.pattern.matches_with(path, Self::OPTIONS)
    }
}

/// Normalize a root-relative path: no leading `./` or `/`, no empty segments
pub(crate) fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}
