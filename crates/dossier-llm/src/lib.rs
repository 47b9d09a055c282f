//! Dossier Extraction Backend Layer
//!
//! Implementations of the `ExtractionBackend` trait from `dossier-schema`.
//!
//! # Backends
//!
//! - `MockBackend`: deterministic mock for testing
//! - `OllamaBackend`: local Ollama API integration with chunking and
//!   multi-pass extraction
//!
//! The backend owns everything the orchestrator treats as opaque: document
//! chunking, per-chunk model calls, response parsing and pass merging. Its
//! tunables arrive as an explicit [`BackendConfig`] rather than as
//! process-wide library mutation.
//!
//! # Examples
//!
//! ```
//! use dossier_llm::MockBackend;
//! use dossier_schema::traits::{BackendRequest, ExtractionBackend};
//!
//! let backend = MockBackend::empty();
//! let request = BackendRequest {
//!     document_text: "some text".to_string(),
//!     prompt: "extract things".to_string(),
//!     examples: Vec::new(),
//! };
//! let success = backend.extract(&request).unwrap();
//! assert!(success.records.is_empty());
//! ```

#![warn(missing_docs)]

mod chunking;
pub mod config;
pub mod ollama;
mod parser;

use dossier_schema::traits::{BackendRequest, BackendSuccess, ExtractionBackend};
use dossier_schema::ExtractionRecord;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chunking::DocumentChunker;
pub use config::BackendConfig;
pub use ollama::OllamaBackend;
pub use parser::parse_backend_response;

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The model's response could not be parsed into extraction records
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Requested model is not available on the server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Backend configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("Backend error: {0}")]
    Other(String),
}

/// Mock extraction backend for deterministic testing.
///
/// Returns pre-configured records or a scripted error without any network
/// calls, and records the requests it receives.
#[derive(Debug, Clone)]
pub struct MockBackend {
    records: Vec<ExtractionRecord>,
    kind: String,
    fail_with: Option<String>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    /// Create a backend that returns the given records for every request
    pub fn with_records(records: Vec<ExtractionRecord>) -> Self {
        Self {
            records,
            kind: "AnnotatedDocument".to_string(),
            fail_with: None,
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a backend that returns an empty record sequence
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a backend that fails every request with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::empty()
        }
    }

    /// Override the result-type tag reported on success
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Number of times `extract` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The prompt from the most recent request, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl ExtractionBackend for MockBackend {
    type Error = BackendError;

    fn extract(&self, request: &BackendRequest) -> Result<BackendSuccess, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());

        if let Some(message) = &self.fail_with {
            return Err(BackendError::Other(message.clone()));
        }

        Ok(BackendSuccess {
            records: self.records.clone(),
            kind: self.kind.clone(),
        })
    }
}
