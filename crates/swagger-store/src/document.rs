//! Document store: decomposes a full document into the file tree and reassembles it
//!
//! Layout under the root:
//!
//! ```text
//! base_doc.yml                    document minus the sections below
//! paths/<path>/<action>.yml       one operation per path and action
//! definitions/<name>.yml          one schema per definition
//! securityDefinitions/<name>.yml  one scheme per security definition
//! responses.yml                   only when non-empty
//! security.yml                    only when non-empty
//! tags.yml                        only when non-empty
//! swagger.json                    compiled document
//! ```

use std::sync::Arc;
use swagger_doc::{Document, DocumentCodec, SectionExtractor, Sections, SUBPARTS};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::keyed::KeyedCollectionStore;
use crate::paths::PathStore;
use crate::settings::StoreConfig;
use crate::storage::{DiskFileStore, FileStore, MemoryFileStore, WriteOutcome};
use crate::subpart::SubpartStore;

/// Files touched by a write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files created or replaced
    pub written: Vec<String>,
    /// Files left untouched because they existed and overwriting was off
    pub skipped: Vec<String>,
}

impl WriteReport {
    fn record(&mut self, path: String, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Orchestrates the section stores over one file store
pub struct DocumentStore {
    storage: Arc<dyn FileStore>,
    config: StoreConfig,
    paths: PathStore,
    subparts: SubpartStore,
    definitions: KeyedCollectionStore,
    security_definitions: KeyedCollectionStore,
}

impl DocumentStore {
    /// Create a document store over any file store
    pub fn new(storage: Arc<dyn FileStore>, config: StoreConfig) -> Self {
        let ext = config.extension.clone();

        Self {
            paths: PathStore::new(storage.clone(), ext.clone()),
            subparts: SubpartStore::new(storage.clone(), ext.clone()),
            definitions: KeyedCollectionStore::definitions(storage.clone(), ext.clone()),
            security_definitions: KeyedCollectionStore::security_definitions(storage.clone(), ext),
            storage,
            config,
        }
    }

    /// Create a document store on disk, rooted at the configured root
    pub fn on_disk(config: StoreConfig) -> Self {
        let storage = Arc::new(DiskFileStore::new(config.root.clone()));
        Self::new(storage, config)
    }

    /// Create a document store backed by memory
    pub fn in_memory(config: StoreConfig) -> Self {
        Self::new(Arc::new(MemoryFileStore::new()), config)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn FileStore> {
        &self.storage
    }

    /// Whether a tree exists, i.e. its base file is present
    pub fn exists(&self) -> StoreResult<bool> {
        self.storage.exists(&self.config.base_file)
    }

    /// Write a document using the configured base overwrite policy
    pub fn write(&self, document: Document) -> StoreResult<WriteReport> {
        self.write_with_overwrite(document, self.config.overwrite_base)
    }

    /// Decompose a document into the tree.
    ///
    /// Section files are always overwritten; the base file only when `overwrite_base`
    /// is set. Nothing is deleted, so files of removed paths or entries remain.
    pub fn write_with_overwrite(
        &self,
        document: Document,
        overwrite_base: bool,
    ) -> StoreResult<WriteReport> {
        self.storage.ensure_dir("")?;

        let (base, sections) = SectionExtractor::extract(document)?;
        let mut report = WriteReport::default();

        for path in self.paths.write(&sections.paths)? {
            report.record(path, WriteOutcome::Written);
        }

        for section in SUBPARTS {
            if let Some(path) = self.subparts.write(section.key(), sections.subpart(section))? {
                report.record(path, WriteOutcome::Written);
            }
        }

        for path in self.definitions.write(&sections.definitions)? {
            report.record(path, WriteOutcome::Written);
        }
        for path in self.security_definitions.write(&sections.security_definitions)? {
            report.record(path, WriteOutcome::Written);
        }

        let content = DocumentCodec::to_yaml(&base)?;
        let outcome = self
            .storage
            .write_text(&self.config.base_file, &content, overwrite_base)?;
        if outcome == WriteOutcome::Skipped {
            debug!("Base document exists, not overwritten");
        }
        report.record(self.config.base_file.clone(), outcome);

        info!(
            "Wrote document tree via {}: {} files written, {} skipped",
            self.storage.backend_name(),
            report.written.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Reassemble the full document from the tree
    pub fn read(&self) -> StoreResult<Document> {
        let base_file = &self.config.base_file;

        let base_text = self
            .storage
            .read_text(base_file)?
            .ok_or_else(|| StoreError::NotFound(base_file.clone()))?;
        let base = DocumentCodec::parse_yaml(&base_text).map_err(|e| StoreError::MalformedContent {
            path: base_file.clone(),
            message: e.to_string(),
        })?;

        let mut sections = Sections::new();

        for section in SUBPARTS {
            if let Some(value) = self.subparts.read(section.key())? {
                sections.set_subpart(section, value);
            }
        }

        sections.paths = self.paths.read()?;
        sections.definitions = self.definitions.read()?;
        sections.security_definitions = self.security_definitions.read()?;

        let document = sections.assemble(base);
        info!("Read document tree with {} top-level keys", document.len());
        Ok(document)
    }

    /// Export the full document as pretty-printed JSON, always overwriting
    pub fn compile(&self, document: &Document) -> StoreResult<String> {
        self.storage.ensure_dir("")?;

        let content = DocumentCodec::to_json_pretty(document)?;
        let location = self.config.compiled_file.clone();
        self.storage.write_text(&location, &content, true)?;

        info!("Compiled document to {}", location);
        Ok(location)
    }

    /// Read the tree and compile it
    pub fn compile_tree(&self) -> StoreResult<Document> {
        let document = self.read()?;
        self.compile(&document)?;
        Ok(document)
    }

    /// Delete every file of the tree layout. The compiled file is kept.
    /// Returns the number of files deleted.
    pub fn clean(&self) -> StoreResult<usize> {
        let mut files = Vec::new();

        for section in SUBPARTS {
            let location = self.subparts.file_location(section.key());
            if self.storage.exists(&location)? {
                files.push(location);
            }
        }

        files.extend(self.paths.files()?);
        files.extend(self.definitions.files()?);
        files.extend(self.security_definitions.files()?);

        if self.storage.exists(&self.config.base_file)? {
            files.push(self.config.base_file.clone());
        }

        for file in &files {
            self.storage.delete(file)?;
        }

        info!("Cleaned {} files from document tree", files.len());
        Ok(files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_doc::{Mapping, Value};
    use tempfile::TempDir;

    const PET_STORE: &str = r#"
swagger: "2.0"
info:
  title: Swagger Petstore
  description: A sample API
  version: "1.0.0"
host: petstore.swagger.io
basePath: /v1
schemes:
  - https
consumes:
  - application/json
paths:
  /pets:
    get:
      summary: List all pets
      operationId: listPets
      tags:
        - pets
      parameters:
        - name: limit
          in: query
          required: false
          type: integer
          format: int32
      responses:
        '200':
          description: An paged array of pets
          schema:
            $ref: '#/definitions/Pets'
        default:
          $ref: '#/responses/Error'
    post:
      summary: Create a pet
      operationId: createPets
      responses:
        '201':
          description: Null response
  /pets/{petId}:
    get:
      summary: Info for a specific pet
      operationId: showPetById
      parameters:
        - name: petId
          in: path
          required: true
          type: string
      responses:
        '200':
          description: Expected response to a valid request
          schema:
            $ref: '#/definitions/Pet'
definitions:
  Pet:
    type: object
    required:
      - id
      - name
    properties:
      id:
        type: integer
        format: int64
      name:
        type: string
  Pets:
    type: array
    items:
      $ref: '#/definitions/Pet'
securityDefinitions:
  api_key:
    type: apiKey
    name: api_key
    in: header
responses:
  Error:
    description: Unexpected error
tags:
  - name: pets
    description: Everything about pets
"#;

    fn pet_store() -> Document {
        DocumentCodec::parse_yaml(PET_STORE).unwrap()
    }

    fn memory_store() -> DocumentStore {
        DocumentStore::in_memory(StoreConfig::default())
    }

    fn disk_store() -> (TempDir, DocumentStore) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::default().with_root(temp_dir.path().join("doc/swagger"));
        (temp_dir, DocumentStore::on_disk(config))
    }

    #[test]
    fn test_round_trip_in_memory() {
        let store = memory_store();

        store.write(pet_store()).unwrap();
        let read = store.read().unwrap();

        assert_eq!(read, pet_store());
    }

    #[test]
    fn test_round_trip_on_disk() {
        let (_dir, store) = disk_store();

        store.write(pet_store()).unwrap();
        let read = store.read().unwrap();

        assert_eq!(read, pet_store());

        let op = read
            .get("paths")
            .and_then(|p| p.get("/pets"))
            .and_then(|p| p.get("get"))
            .and_then(Value::as_mapping)
            .unwrap();
        let keys: Vec<&str> = op.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["summary", "operationId", "tags", "parameters", "responses"]);
    }

    #[test]
    fn test_write_layout() {
        let store = memory_store();

        let report = store.write(pet_store()).unwrap();

        let mut written = report.written.clone();
        written.sort();
        assert_eq!(
            written,
            vec![
                "base_doc.yml",
                "definitions/Pet.yml",
                "definitions/Pets.yml",
                "paths/pets/get.yml",
                "paths/pets/post.yml",
                "paths/pets/{petId}/get.yml",
                "responses.yml",
                "securityDefinitions/api_key.yml",
                "tags.yml",
            ]
        );
        assert!(report.skipped.is_empty());

        let base = store.storage().read_text("base_doc.yml").unwrap().unwrap();
        let base = DocumentCodec::parse_yaml(&base).unwrap();
        let keys: Vec<&str> = base.keys().collect();
        assert_eq!(keys, vec!["swagger", "info", "host", "basePath", "schemes", "consumes"]);
    }

    #[test]
    fn test_empty_section_omitted() {
        let store = memory_store();
        let mut doc = pet_store();
        doc.insert("security", Value::Sequence(vec![]));

        store.write(doc).unwrap();
        let read = store.read().unwrap();

        assert!(!read.contains_key("security"));
        assert!(!store.storage().exists("security.yml").unwrap());
        assert!(read.contains_key("tags"));
    }

    #[test]
    fn test_collections_always_present() {
        let store = memory_store();
        let doc = DocumentCodec::parse_yaml("swagger: \"2.0\"\ninfo:\n  title: Bare\n").unwrap();

        store.write(doc).unwrap();
        let read = store.read().unwrap();

        let empty = Value::Mapping(Mapping::new());
        assert_eq!(read.get("paths"), Some(&empty));
        assert_eq!(read.get("definitions"), Some(&empty));
        assert_eq!(read.get("securityDefinitions"), Some(&empty));
        assert!(!read.contains_key("responses"));
        assert!(!read.contains_key("tags"));
    }

    #[test]
    fn test_base_not_overwritten_by_default() {
        let (_dir, store) = disk_store();

        store.write(pet_store()).unwrap();

        let mut second = pet_store();
        second.insert("host", Value::from("staging.petstore.swagger.io"));
        let report = store.write(second.clone()).unwrap();
        assert_eq!(report.skipped, vec!["base_doc.yml"]);

        let read = store.read().unwrap();
        assert_eq!(read.get("host"), Some(&Value::from("petstore.swagger.io")));

        store.write_with_overwrite(second, true).unwrap();
        let read = store.read().unwrap();
        assert_eq!(read.get("host"), Some(&Value::from("staging.petstore.swagger.io")));
    }

    #[test]
    fn test_overwrite_base_from_config() {
        let store = DocumentStore::in_memory(StoreConfig::default().with_overwrite_base(true));

        store.write(pet_store()).unwrap();
        let mut second = pet_store();
        second.insert("basePath", Value::from("/v2"));
        let report = store.write(second).unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(store.read().unwrap().get("basePath"), Some(&Value::from("/v2")));
    }

    #[test]
    fn test_path_with_braces_on_disk() {
        let (dir, store) = disk_store();

        store.write(pet_store()).unwrap();

        let file = dir.path().join("doc/swagger/paths/pets/{petId}/get.yml");
        assert!(file.is_file());

        let read = store.read().unwrap();
        let op_id = read
            .get("paths")
            .and_then(|p| p.get("/pets/{petId}"))
            .and_then(|p| p.get("get"))
            .and_then(|op| op.get("operationId"))
            .and_then(Value::as_str);
        assert_eq!(op_id, Some("showPetById"));
    }

    #[test]
    fn test_read_without_base_fails() {
        let store = memory_store();

        match store.read() {
            Err(StoreError::NotFound(path)) => assert_eq!(path, "base_doc.yml"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_malformed_base() {
        let store = memory_store();
        store.storage().write_text("base_doc.yml", "- not\n- a mapping\n", false).unwrap();

        assert!(matches!(store.read(), Err(StoreError::MalformedContent { .. })));
    }

    #[test]
    fn test_stale_paths_are_kept() {
        let store = memory_store();
        store.write(pet_store()).unwrap();

        let mut smaller = pet_store();
        smaller.insert(
            "paths",
            DocumentCodec::parse_value("/pets:\n  get:\n    summary: Only get\n").unwrap(),
        );
        store.write(smaller).unwrap();

        let read = store.read().unwrap();
        let paths = read.get("paths").and_then(Value::as_mapping).unwrap();
        assert!(paths.contains_key("/pets/{petId}"));
    }

    #[test]
    fn test_compile_always_overwrites() {
        let (dir, store) = disk_store();

        store.compile(&pet_store()).unwrap();

        let mut changed = pet_store();
        changed.insert("host", Value::from("api.example.com"));
        let location = store.compile(&changed).unwrap();
        assert_eq!(location, "swagger.json");

        let json = std::fs::read_to_string(dir.path().join("doc/swagger/swagger.json")).unwrap();
        let compiled = DocumentCodec::parse_json(&json).unwrap();
        assert_eq!(compiled, changed);
        assert!(json.contains("\n  \"host\": \"api.example.com\""));
    }

    #[test]
    fn test_compile_tree() {
        let store = memory_store();
        store.write(pet_store()).unwrap();

        let compiled = store.compile_tree().unwrap();
        assert_eq!(compiled, pet_store());
        assert!(store.storage().exists("swagger.json").unwrap());
    }

    #[test]
    fn test_clean_removes_tree_but_not_compiled() {
        let (_dir, store) = disk_store();

        store.write(pet_store()).unwrap();
        store.compile(&pet_store()).unwrap();
        assert!(store.exists().unwrap());

        let deleted = store.clean().unwrap();
        assert_eq!(deleted, 9);
        assert!(!store.exists().unwrap());
        assert!(store.storage().exists("swagger.json").unwrap());
        assert!(store.storage().list("**/*.yml").unwrap().is_empty());
    }

    #[test]
    fn test_shadowed_action_file_rejected_on_disk() {
        let (dir, store) = disk_store();
        let mut doc = pet_store();
        doc.insert(
            "paths",
            DocumentCodec::parse_value("/a:\n  get: {}\n/a/get.yml:\n  post: {}\n").unwrap(),
        );

        match store.write(doc) {
            Err(StoreError::InvalidKey { key, .. }) => assert_eq!(key, "/a/get.yml"),
            other => panic!("Expected InvalidKey, got {:?}", other),
        }
        assert!(!dir.path().join("doc/swagger/paths/a").exists());
    }

    #[test]
    fn test_invalid_definitions_section() {
        let store = memory_store();
        let doc = DocumentCodec::parse_yaml("swagger: \"2.0\"\ndefinitions: nope\n").unwrap();

        assert!(matches!(store.write(doc), Err(StoreError::DocumentError(_))));
    }
}
