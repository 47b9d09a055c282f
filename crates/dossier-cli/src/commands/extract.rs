//! Extract command implementation.

use crate::config::Config;
use crate::document::PlainTextSource;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use dossier_extractor::{normalize, ExtractionOutcome, Extractor};
use dossier_llm::{BackendConfig, OllamaBackend};
use dossier_schema::load_schema;
use dossier_schema::traits::DocumentSource;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the extract command.
///
/// Loads the schema and document, runs the backend, and writes the
/// normalized JSON report to the output path. The report is written for
/// every outcome, including failures; a failure outcome is then raised as
/// an error so the process exits non-zero.
#[allow(clippy::too_many_arguments)]
pub async fn execute_extract(
    schema_path: &Path,
    document_path: &Path,
    output_path: &Path,
    config: &Config,
    model: Option<&str>,
    model_url: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let schema = load_schema(schema_path)?;
    let text = PlainTextSource.read_text(document_path)?;

    let backend_config = resolve_backend_config(&config.backend, model, model_url);

    println!(
        "{}",
        formatter.info(&format!(
            "Extracting '{}' requirements from {} using {}",
            schema.name,
            document_path.display(),
            backend_config.model_id
        ))
    );
    info!(
        schema = %schema.name,
        document = %document_path.display(),
        model = %backend_config.model_id,
        "Starting extraction"
    );

    let backend = OllamaBackend::new(backend_config)?;
    let extractor = Extractor::new(backend);
    let outcome = extractor.extract(&schema, text).await?;

    let report = normalize(&outcome, Some(&schema.info()));
    let contents = serde_json::to_string_pretty(&report)?;
    fs::write(output_path, contents)?;

    match &outcome {
        ExtractionOutcome::Success { records, .. } => {
            println!(
                "{}",
                formatter.success(&format!(
                    "Extracted {} items, results saved to {}",
                    records.len(),
                    output_path.display()
                ))
            );
            Ok(())
        }
        ExtractionOutcome::Unrecognized(_) => {
            println!(
                "{}",
                formatter.success(&format!(
                    "Backend returned an unrecognized result, saved verbatim to {}",
                    output_path.display()
                ))
            );
            Ok(())
        }
        ExtractionOutcome::Failure { error } => {
            println!(
                "{}",
                formatter.error(&format!(
                    "Extraction failed, error report saved to {}",
                    output_path.display()
                ))
            );
            Err(CliError::ExtractionFailed(error.clone()))
        }
    }
}

/// Apply command-line overrides on top of the configured backend settings.
fn resolve_backend_config(
    base: &BackendConfig,
    model: Option<&str>,
    model_url: Option<&str>,
) -> BackendConfig {
    let mut config = base.clone();
    if let Some(model) = model {
        config.model_id = model.to_string();
    }
    if let Some(model_url) = model_url {
        config.model_url = model_url.to_string();
    }
    config
}
