//! Dossier Extractor
//!
//! Compiles a loaded schema into an extraction prompt and few-shot examples,
//! orchestrates one extraction call against a pluggable backend, and
//! normalizes whatever comes back into one stable report contract.
//!
//! # Architecture
//!
//! ```text
//! Schema ─┬─> PromptBuilder ──┐
//!         └─> examples ───────┼─> Extractor ─> backend ─> ExtractionOutcome
//!                             │                                  │
//!            document text ───┘                            normalize()
//!                                                               │
//!                                                        SerializedReport
//! ```
//!
//! # Key Guarantees
//!
//! - **Deterministic prompts**: identical schema content yields
//!   byte-identical prompt text across runs and processes
//! - **Captured failures**: backend errors never propagate past the
//!   orchestrator; they become `ExtractionOutcome::Failure` data
//! - **Total normalization**: every outcome shape terminates in a valid
//!   `SerializedReport`; degradation is data, not an error path
//!
//! # Example Usage
//!
//! ```no_run
//! use dossier_extractor::{normalize, Extractor};
//! use dossier_llm::{BackendConfig, OllamaBackend};
//! use dossier_schema::load_schema;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = load_schema("schemas/raw_materials.json")?;
//! let backend = OllamaBackend::new(BackendConfig::default())?;
//! let extractor = Extractor::new(backend);
//!
//! let text = "===== PAGE 1 =====\n...".to_string();
//! let outcome = extractor.extract(&schema, text).await?;
//! let report = normalize(&outcome, Some(&schema.info()));
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod examples;
mod extractor;
mod prompt;
mod report;
mod types;


pub use error::ExtractorError;
pub use examples::synthesize_examples;
pub use extractor::Extractor;
pub use prompt::{synthesize_prompt, PromptBuilder};
pub use report::{
    normalize, ReportRecord, ReportSchemaInfo, ReportSummary, SerializedReport,
};
pub use types::ExtractionOutcome;
