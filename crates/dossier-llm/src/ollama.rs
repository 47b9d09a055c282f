//! Ollama backend implementation
//!
//! Drives a local Ollama server through its generate API. The backend owns
//! the whole extraction pipeline the orchestrator treats as opaque: document
//! chunking, per-chunk prompting with rendered few-shot examples, bounded
//! concurrent model calls, response parsing, and multi-pass merging.
//!
//! # Examples
//!
//! ```no_run
//! use dossier_llm::{BackendConfig, OllamaBackend};
//!
//! let backend = OllamaBackend::new(BackendConfig::default()).unwrap();
//! // backend implements dossier_schema::traits::ExtractionBackend
//! ```

use crate::chunking::DocumentChunker;
use crate::config::BackendConfig;
use crate::parser::parse_backend_response;
use crate::BackendError;
use dossier_schema::traits::{BackendRequest, BackendSuccess, ExtractionBackend};
use dossier_schema::{ExampleDoc, ExtractionRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result-type tag reported for successful Ollama runs
const RESULT_KIND: &str = "AnnotatedDocument";

/// Ollama API backend for local LLM extraction
#[derive(Clone)]
pub struct OllamaBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    keep_alive: u64,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaBackend {
    /// Create a new Ollama backend from a validated configuration
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        config.validate().map_err(BackendError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BackendError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Run the full extraction pipeline over the request
    pub async fn run(&self, request: &BackendRequest) -> Result<BackendSuccess, BackendError> {
        let chunker = DocumentChunker::new(self.config.max_char_buffer);
        let chunks = chunker.chunk(&request.document_text);

        info!(
            "Extracting over {} chunk(s), {} pass(es), model '{}'",
            chunks.len(),
            self.config.extraction_passes,
            self.config.model_id
        );

        let examples_block = render_examples(&request.examples);
        let prompts: Vec<String> = chunks
            .iter()
            .map(|chunk| self.compose_chunk_prompt(&request.prompt, &examples_block, chunk))
            .collect();

        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for pass in 0..self.config.extraction_passes {
            debug!("Starting extraction pass {}", pass + 1);
            let pass_records = self.run_pass(&prompts).await?;

            // Merge passes, dropping exact duplicates while preserving
            // first-seen order.
            for record in pass_records {
                let key = (record.extraction_class.clone(), record.extraction_text.clone());
                if seen.insert(key) {
                    records.push(record);
                }
            }
        }

        info!("Extraction produced {} record(s)", records.len());

        Ok(BackendSuccess {
            records,
            kind: RESULT_KIND.to_string(),
        })
    }

    /// Run one pass over all chunk prompts with bounded concurrency.
    ///
    /// Chunks are dispatched in windows of `max_workers`; record order
    /// follows chunk order regardless of completion order.
    async fn run_pass(&self, prompts: &[String]) -> Result<Vec<ExtractionRecord>, BackendError> {
        let mut records = Vec::new();

        for window in prompts.chunks(self.config.max_workers.max(1)) {
            let mut handles = Vec::new();
            for prompt in window {
                let backend = self.clone();
                let prompt = prompt.clone();
                handles.push(tokio::spawn(async move { backend.generate(&prompt).await }));
            }

            for handle in handles {
                let response = handle
                    .await
                    .map_err(|e| BackendError::Communication(format!("Task join error: {}", e)))??;

                match parse_backend_response(&response) {
                    Ok(chunk_records) => records.extend(chunk_records),
                    Err(e) if self.config.suppress_parse_errors => {
                        warn!("Skipping unparseable chunk response: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(records)
    }

    /// Compose the full per-chunk prompt: extraction instructions, rendered
    /// examples, the chunk text, and the output reminder
    fn compose_chunk_prompt(&self, base_prompt: &str, examples_block: &str, chunk: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(base_prompt);
        prompt.push_str("\n");

        if !examples_block.is_empty() {
            prompt.push_str(examples_block);
            prompt.push_str("\n");
        }

        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(chunk);
        prompt.push_str("\n---\n\n");

        if self.config.fence_output {
            prompt.push_str(OUTPUT_REMINDER_FENCED);
        } else {
            prompt.push_str(OUTPUT_REMINDER);
        }

        prompt
    }

    /// Issue one generate call to the Ollama server
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.config.model_url);

        let body = GenerateRequest {
            model: self.config.model_id.clone(),
            prompt: prompt.to_string(),
            stream: false,
            keep_alive: self.config.keep_alive_secs,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::ModelNotAvailable(self.config.model_id.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(generate_response.response)
    }
}

impl ExtractionBackend for OllamaBackend {
    type Error = BackendError;

    fn extract(&self, request: &BackendRequest) -> Result<BackendSuccess, Self::Error> {
        // Blocking wrapper for the async pipeline; callers bridge through
        // spawn_blocking, so building a runtime here is safe.
        tokio::runtime::Runtime::new()
            .map_err(|e| BackendError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(self.run(request))
    }
}

/// Render few-shot examples into a deterministic prompt block
fn render_examples(examples: &[ExampleDoc]) -> String {
    if examples.is_empty() {
        return String::new();
    }

    let mut block = String::from("EXAMPLES\n");
    for example in examples {
        block.push_str("Example document:\n");
        block.push_str(&example.text);
        block.push_str("\nExpected extractions:\n");
        // Records serialize in declared field and attribute order.
        let rendered = serde_json::to_string_pretty(&example.extractions)
            .unwrap_or_else(|_| "[]".to_string());
        block.push_str(&rendered);
        block.push('\n');
    }
    block
}

const OUTPUT_REMINDER: &str =
    "Return ONLY a JSON array of extraction records, no markdown code blocks, no explanations.\n";

const OUTPUT_REMINDER_FENCED: &str =
    "Return a JSON array of extraction records inside a ```json code fence.\n";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_creation() {
        let backend = OllamaBackend::new(BackendConfig::default()).unwrap();
        assert_eq!(backend.config.model_id, "gemma3");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BackendConfig {
            model_id: String::new(),
            ..Default::default()
        };
        let result = OllamaBackend::new(config);
        assert!(matches!(result, Err(BackendError::Config(_))));
    }

    #[test]
    fn test_chunk_prompt_contains_all_sections() {
        let backend = OllamaBackend::new(BackendConfig::default()).unwrap();
        let prompt = backend.compose_chunk_prompt("Extract things.", "", "The document text.");

        assert!(prompt.contains("Extract things."));
        assert!(prompt.contains("Text to analyze:"));
        assert!(prompt.contains("The document text."));
        assert!(prompt.contains("Return ONLY a JSON array"));
    }

    #[test]
    fn test_fenced_output_reminder() {
        let config = BackendConfig {
            fence_output: true,
            ..Default::default()
        };
        let backend = OllamaBackend::new(config).unwrap();
        let prompt = backend.compose_chunk_prompt("p", "", "c");
        assert!(prompt.contains("```json"));
    }

    #[test]
    fn test_render_examples_empty() {
        assert_eq!(render_examples(&[]), "");
    }

    #[test]
    fn test_render_examples_is_deterministic() {
        let examples = vec![ExampleDoc {
            text: "MSDS updated: 2025-03-21".to_string(),
            extractions: vec![ExtractionRecord {
                extraction_class: "requirement".to_string(),
                extraction_text: "MSDS updated: 2025-03-21".to_string(),
                attributes: json!({ "status": "present", "page_hint": 1 }),
                document_id: None,
            }],
        }];

        let first = render_examples(&examples);
        let second = render_examples(&examples);
        assert_eq!(first, second);
        assert!(first.contains("Example document:"));
        assert!(first.contains("MSDS updated: 2025-03-21"));
        assert!(first.contains("\"status\": \"present\""));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_communication_error() {
        let config = BackendConfig {
            model_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
            extraction_passes: 1,
            ..Default::default()
        };
        let backend = OllamaBackend::new(config).unwrap();

        let result = backend.generate("test").await;
        assert!(matches!(result, Err(BackendError::Communication(_))));
    }
}
