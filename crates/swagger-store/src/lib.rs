//! # swagger-store
//!
//! File tree storage for Swagger documents:
//! - Pluggable file stores (disk and in-memory)
//! - One file per path/action pair, per definition and per security definition
//! - Dedicated files for `responses`, `security` and `tags`
//! - A base document holding every other top-level key

pub mod storage;
pub mod error;
pub mod settings;
mod paths;
mod subpart;
mod keyed;
mod document;

pub use error::{StoreError, StoreResult};
pub use storage::{FileStore, DiskFileStore, MemoryFileStore, WriteOutcome};
pub use settings::StoreConfig;
pub use paths::PathStore;
pub use subpart::SubpartStore;
pub use keyed::KeyedCollectionStore;
pub use document::{DocumentStore, WriteReport};
