//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Schema loading or validation error
    #[error("{0}")]
    Schema(#[from] dossier_schema::SchemaError),

    /// Example synthesis error
    #[error("{0}")]
    Extractor(#[from] dossier_extractor::ExtractorError),

    /// Backend construction error
    #[error("{0}")]
    Backend(#[from] dossier_llm::BackendError),

    /// Document path does not resolve
    #[error("Document file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Missing or contradictory arguments
    #[error("{0}")]
    InvalidInput(String),

    /// The run completed but the backend reported a failure; the report
    /// file has already been written when this is raised
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}
