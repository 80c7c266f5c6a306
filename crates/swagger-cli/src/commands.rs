//! Command implementations

use anyhow::{Context, Result};
use std::path::Path;
use swagger_doc::{Document, DocumentCodec};
use swagger_store::{DocumentStore, StoreConfig, WriteReport};
use tracing::{info, warn};

/// Load a document from a YAML or JSON file
pub fn load_document(input: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let is_json = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let document = if is_json {
        DocumentCodec::parse_json(&content)
    } else {
        DocumentCodec::parse(&content)
    }
    .with_context(|| format!("Failed to parse {}", input.display()))?;

    info!("Loaded {} ({} top-level keys)", input.display(), document.len());
    Ok(document)
}

/// Decompose a document file into the tree
pub fn split(store: &DocumentStore, input: &Path, overwrite_base: bool) -> Result<WriteReport> {
    let document = load_document(input)?;
    let overwrite = overwrite_base || store.config().overwrite_base;

    let report = store
        .write_with_overwrite(document, overwrite)
        .context("Failed to write document tree")?;

    for skipped in &report.skipped {
        warn!("{} already exists and was kept (use --overwrite-base to replace it)", skipped);
    }
    Ok(report)
}

/// Decompose a document file in memory and list the files it would produce
pub fn split_dry_run(config: &StoreConfig, input: &Path) -> Result<Vec<String>> {
    let document = load_document(input)?;
    let store = DocumentStore::in_memory(config.clone());

    let report = store
        .write(document)
        .context("Failed to decompose document")?;
    Ok(report.written)
}

/// Reassemble the tree; writes YAML to `output` when given and returns it
pub fn join(store: &DocumentStore, output: Option<&Path>) -> Result<String> {
    let document = store.read().context("Failed to read document tree")?;
    let yaml = DocumentCodec::to_yaml(&document)?;

    if let Some(output) = output {
        std::fs::write(output, &yaml)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote joined document to {}", output.display());
    }

    Ok(yaml)
}

/// Compile a document file, or the stored tree when no input is given.
/// Returns the root-relative location of the compiled file.
pub fn compile(store: &DocumentStore, input: Option<&Path>) -> Result<String> {
    let document = match input {
        Some(input) => load_document(input)?,
        None => store.read().context("Failed to read document tree")?,
    };

    store.compile(&document).context("Failed to compile document")
}

/// Delete the tree files
pub fn clean(store: &DocumentStore) -> Result<usize> {
    store.clean().context("Failed to clean document tree")
}
