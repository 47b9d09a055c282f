//! Few-shot example synthesis from schema declarations

use crate::error::ExtractorError;
use dossier_schema::{ExampleDoc, ExtractionRecord, Schema};
use serde_json::Value;

/// Convert schema-declared example documents into few-shot example records.
///
/// Returns an empty sequence when the schema declares no examples (the
/// backend then operates zero-shot). Declared ordering is preserved and all
/// extraction fields are carried verbatim; nothing is inferred or defaulted.
pub fn synthesize_examples(schema: &Schema) -> Result<Vec<ExampleDoc>, ExtractorError> {
    let mut docs = Vec::with_capacity(schema.examples.len());

    for (example_idx, spec) in schema.examples.iter().enumerate() {
        let mut extractions = Vec::with_capacity(spec.extractions.len());

        for (entry_idx, raw) in spec.extractions.iter().enumerate() {
            extractions.push(shape_extraction(raw, example_idx, entry_idx)?);
        }

        docs.push(ExampleDoc {
            text: spec.text.clone(),
            extractions,
        });
    }

    Ok(docs)
}

fn shape_extraction(
    raw: &Value,
    example: usize,
    entry: usize,
) -> Result<ExtractionRecord, ExtractorError> {
    let missing = |field| ExtractorError::MalformedExample {
        example,
        entry,
        field,
    };

    let extraction_class = raw
        .get("extraction_class")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("extraction_class"))?
        .to_string();

    let extraction_text = raw
        .get("extraction_text")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("extraction_text"))?
        .to_string();

    let attributes = raw
        .get("attributes")
        .cloned()
        .ok_or_else(|| missing("attributes"))?;

    Ok(ExtractionRecord {
        extraction_class,
        extraction_text,
        attributes,
        document_id: None,
    })
}
