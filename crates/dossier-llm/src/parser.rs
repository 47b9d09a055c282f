//! Parse model output into extraction records

use crate::BackendError;
use dossier_schema::ExtractionRecord;
use serde_json::Value;
use tracing::warn;

/// Parse a model response into extraction records.
///
/// Accepts either a bare JSON array of records or an
/// `{"extractions": [...]}` wrapper, with or without a markdown code fence.
/// Entries missing required keys are skipped with a warning rather than
/// failing the whole chunk.
pub fn parse_backend_response(response: &str) -> Result<Vec<ExtractionRecord>, BackendError> {
    let json_str = strip_fences(response);

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| BackendError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let entries = match &json {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(obj) => obj
            .get("extractions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                BackendError::InvalidResponse(
                    "Expected a JSON array or an 'extractions' wrapper".to_string(),
                )
            })?,
        _ => {
            return Err(BackendError::InvalidResponse(
                "Expected a JSON array or an 'extractions' wrapper".to_string(),
            ))
        }
    };

    let mut records = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        match parse_record(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping extraction entry {}: {}", idx, e),
        }
    }

    Ok(records)
}

/// Strip a markdown code fence if the response is wrapped in one.
///
/// The closing fence is optional: a model that runs out of tokens before
/// emitting it still gets its last content line kept.
fn strip_fences(response: &str) -> String {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().skip(1).collect();
    if lines.last().is_some_and(|line| line.trim() == "```") {
        lines.pop();
    }
    lines.join("\n")
}

/// Parse a single extraction record from JSON
fn parse_record(entry: &Value) -> Result<ExtractionRecord, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| "Entry is not a JSON object".to_string())?;

    let extraction_class = obj
        .get("extraction_class")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing or invalid 'extraction_class'".to_string())?
        .to_string();

    let extraction_text = obj
        .get("extraction_text")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing or invalid 'extraction_text'".to_string())?
        .to_string();

    // Attributes are kept verbatim; the normalizer owns the shape contract.
    let attributes = obj
        .get("attributes")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    let document_id = obj
        .get("document_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ExtractionRecord {
        extraction_class,
        extraction_text,
        attributes,
        document_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let response = r#"[
            {
                "extraction_class": "requirement",
                "extraction_text": "REACH status: Registered",
                "attributes": { "status": "present" }
            }
        ]"#;

        let records = parse_backend_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extraction_class, "requirement");
        assert_eq!(records[0].extraction_text, "REACH status: Registered");
    }

    #[test]
    fn test_parse_extractions_wrapper() {
        let response = r#"{
            "extractions": [
                { "extraction_class": "requirement", "extraction_text": "MSDS present" }
            ]
        }"#;

        let records = parse_backend_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].attributes.is_object());
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = "```json\n[{\"extraction_class\": \"requirement\", \"extraction_text\": \"x\"}]\n```";
        let records = parse_backend_response(response).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unterminated_fence_keeps_last_line() {
        let response =
            "```json\n[{\"extraction_class\": \"requirement\", \"extraction_text\": \"x\"}]";
        let records = parse_backend_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extraction_text, "x");
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = parse_backend_response("the model rambled instead");
        assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
    }

    #[test]
    fn test_scalar_json_is_error() {
        let result = parse_backend_response("42");
        assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
    }

    #[test]
    fn test_entries_missing_keys_are_skipped() {
        let response = r#"[
            { "extraction_class": "requirement", "extraction_text": "kept" },
            { "extraction_class": "requirement" },
            "not an object"
        ]"#;

        let records = parse_backend_response(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extraction_text, "kept");
    }

    #[test]
    fn test_document_id_is_captured() {
        let response = r#"[
            {
                "extraction_class": "requirement",
                "extraction_text": "x",
                "document_id": "doc_001"
            }
        ]"#;

        let records = parse_backend_response(response).unwrap();
        assert_eq!(records[0].document_id.as_deref(), Some("doc_001"));
    }
}
