//! Extraction orchestration

use crate::error::ExtractorError;
use crate::examples::synthesize_examples;
use crate::prompt::synthesize_prompt;
use crate::types::ExtractionOutcome;
use dossier_schema::traits::{BackendRequest, ExtractionBackend};
use dossier_schema::Schema;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates one extraction call against a pluggable backend.
///
/// The orchestrator composes (document text, prompt, examples) into a single
/// backend request and converts any backend failure into
/// [`ExtractionOutcome::Failure`] data. It performs no retries and enforces
/// no timeout of its own; both are the backend's concern, carried in its
/// configuration.
pub struct Extractor<B>
where
    B: ExtractionBackend,
{
    backend: Arc<B>,
}

impl<B> Extractor<B>
where
    B: ExtractionBackend + Send + Sync + 'static,
    B::Error: std::fmt::Display + Send + 'static,
{
    /// Create a new extractor over a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Synthesize prompt and examples from the schema, then run one
    /// extraction over the document text.
    ///
    /// Fails before any backend call if a schema-declared example is
    /// malformed; every backend-side failure is captured as an outcome.
    pub async fn extract(
        &self,
        schema: &Schema,
        document_text: String,
    ) -> Result<ExtractionOutcome, ExtractorError> {
        let prompt = synthesize_prompt(schema);
        let examples = synthesize_examples(schema)?;

        info!(
            "Starting extraction for schema '{}' ({} requirements, {} examples, text length {})",
            schema.name,
            schema.total_requirements(),
            examples.len(),
            document_text.len()
        );

        Ok(self
            .run(BackendRequest {
                document_text,
                prompt,
                examples,
            })
            .await)
    }

    /// Issue exactly one backend call and capture its result.
    ///
    /// This never returns an error: whatever the backend raises is converted
    /// into a failure outcome at this boundary.
    pub async fn run(&self, request: BackendRequest) -> ExtractionOutcome {
        debug!("Prompt length: {} chars", request.prompt.len());

        let backend = Arc::clone(&self.backend);

        // The backend seam is blocking; bridge it off the async runtime.
        let result =
            tokio::task::spawn_blocking(move || backend.extract(&request)).await;

        match result {
            Ok(Ok(success)) => {
                info!(
                    "Extraction complete: {} record(s) from {}",
                    success.records.len(),
                    success.kind
                );
                ExtractionOutcome::Success {
                    records: success.records,
                    kind: success.kind,
                }
            }
            Ok(Err(e)) => {
                warn!("Extraction backend failed: {}", e);
                ExtractionOutcome::Failure {
                    error: e.to_string(),
                }
            }
            Err(e) => {
                warn!("Extraction task failed: {}", e);
                ExtractionOutcome::Failure {
                    error: format!("Backend task failed: {}", e),
                }
            }
        }
    }
}
