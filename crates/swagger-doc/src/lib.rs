//! # swagger-doc
//!
//! Document model for Swagger Tree.
//! Holds a Swagger document as ordered nested values, parses and serializes it,
//! and separates the decomposable sections from the base document.

mod types;
mod codec;
mod sections;
mod error;

pub use types::*;
pub use codec::DocumentCodec;
pub use sections::{SectionExtractor, Sections};
pub use error::{DocumentError, DocumentResult};

pub use serde_yaml::{Mapping, Value};
