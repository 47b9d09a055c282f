//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the schema-driven core and
//! infrastructure. Implementations live in other crates.

use crate::model::{ExampleDoc, ExtractionRecord};
use std::path::Path;

/// One extraction request as handed to a backend: the document text, the
/// compiled prompt and the few-shot examples synthesized from the schema.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    /// Full page-tagged document text
    pub document_text: String,

    /// Compiled extraction prompt
    pub prompt: String,

    /// Few-shot examples in schema-declared order
    pub examples: Vec<ExampleDoc>,
}

/// A successful backend response: an ordered extraction-record sequence plus
/// a tag naming the backend's concrete result type.
#[derive(Debug, Clone)]
pub struct BackendSuccess {
    /// Extraction records in backend order
    pub records: Vec<ExtractionRecord>,

    /// Display name identifying the result's concrete type
    pub kind: String,
}

/// Trait for the external LLM extraction backend.
///
/// The backend may internally shard the document and call the underlying
/// model multiple times; that concurrency is the backend's concern, opaque
/// to callers. Implemented by the infrastructure layer (dossier-llm).
pub trait ExtractionBackend {
    /// Error type for backend operations
    type Error;

    /// Run one extraction over the request
    fn extract(&self, request: &BackendRequest) -> Result<BackendSuccess, Self::Error>;
}

/// Trait for the document-to-text collaborator.
///
/// Produces a single string containing the document's text with page
/// boundary markers in the literal form `===== PAGE <n> =====` (1-based).
/// The core treats those markers as opaque hints and never parses them.
pub trait DocumentSource {
    /// Error type for document reads
    type Error;

    /// Read a document into page-tagged plain text
    fn read_text(&self, path: &Path) -> Result<String, Self::Error>;
}
