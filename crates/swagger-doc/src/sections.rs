//! Separation of decomposable sections from the base document

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::types::{is_empty_value, value_kind, Document, Section, SUBPARTS};

/// The decomposable sections of a document.
///
/// `paths`, `definitions` and `securityDefinitions` are always present (possibly empty).
/// Subparts (`responses`, `security`, `tags`) are only held when non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    pub paths: Mapping,
    pub definitions: Mapping,
    pub security_definitions: Mapping,
    subparts: IndexMap<Section, Value>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a subpart, if present
    pub fn subpart(&self, section: Section) -> Option<&Value> {
        self.subparts.get(&section)
    }

    /// Set a subpart; empty values are dropped so they never materialize as keys
    pub fn set_subpart(&mut self, section: Section, value: Value) {
        if is_empty_value(&value) {
            self.subparts.shift_remove(&section);
        } else {
            self.subparts.insert(section, value);
        }
    }

    /// Rebuild the full document from a base document and these sections
    pub fn assemble(self, mut base: Document) -> Document {
        for section in SUBPARTS {
            if let Some(value) = self.subparts.get(&section) {
                base.insert(section.key(), value.clone());
            }
        }

        base.insert(Section::Paths.key(), Value::Mapping(self.paths));
        base.insert(Section::Definitions.key(), Value::Mapping(self.definitions));
        base.insert(
            Section::SecurityDefinitions.key(),
            Value::Mapping(self.security_definitions),
        );

        base
    }
}

/// Splits a document into its base and its sections
pub struct SectionExtractor;

impl SectionExtractor {
    /// Remove every decomposable section, returning the remaining base document
    /// and the extracted sections. The input is consumed; nothing is mutated in place.
    pub fn extract(mut document: Document) -> DocumentResult<(Document, Sections)> {
        let mut sections = Sections::new();

        sections.paths = Self::take_mapping(&mut document, Section::Paths)?;

        for section in SUBPARTS {
            if let Some(value) = document.remove(section.key()) {
                sections.set_subpart(section, value);
            }
        }

        sections.definitions = Self::take_mapping(&mut document, Section::Definitions)?;
        sections.security_definitions =
            Self::take_mapping(&mut document, Section::SecurityDefinitions)?;

        debug!(
            "Extracted {} paths, {} definitions, {} security definitions, {} subparts",
            sections.paths.len(),
            sections.definitions.len(),
            sections.security_definitions.len(),
            sections.subparts.len()
        );

        Ok((document, sections))
    }

    /// Remove a section that must be a mapping; absent or null means empty
    fn take_mapping(document: &mut Document, section: Section) -> DocumentResult<Mapping> {
        match document.remove(section.key()) {
            None | Some(Value::Null) => Ok(Mapping::new()),
            Some(Value::Mapping(mapping)) => Ok(mapping),
            Some(other) => Err(DocumentError::InvalidSection {
                section: section.key().to_string(),
                expected: "a mapping",
                found: value_kind(&other),
            }),
        }
    }
}
