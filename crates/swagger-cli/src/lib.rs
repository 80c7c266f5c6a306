//! # swagger-cli
//!
//! Commands behind the `swagger-tree` binary: split a Swagger document into a
//! file tree, join the tree back into one document, compile it to JSON.

mod commands;

pub use commands::{clean, compile, join, load_document, split, split_dry_run};
