//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur before the backend is called.
///
/// Backend failures are deliberately not represented here: the orchestrator
/// captures them as `ExtractionOutcome::Failure` data instead of raising.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// A schema-declared example extraction omits a required key
    #[error("Malformed example {example}: extraction {entry} missing '{field}'")]
    MalformedExample {
        /// Zero-based index of the example document
        example: usize,
        /// Zero-based index of the extraction entry within it
        entry: usize,
        /// The missing or invalid key
        field: &'static str,
    },
}
