//! Result normalization into the stable report contract

use crate::types::ExtractionOutcome;
use dossier_schema::{ExtractionRecord, SchemaInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// The engine's stable output contract.
///
/// Exactly one of the shape groups is populated: `error`, or
/// `extractions` + `summary`, or `raw_result` (with `conversion_error` when
/// flattening degraded). Absent fields are omitted from the JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedReport {
    /// Schema metadata block, present when supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_info: Option<ReportSchemaInfo>,

    /// Captured backend failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Flattened extraction records in backend order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractions: Option<Vec<ReportRecord>>,

    /// Run summary, present alongside `extractions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,

    /// Best-effort string rendering of an outcome that could not be shaped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_result: Option<String>,

    /// Why flattening degraded to `raw_result`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_error: Option<String>,
}

/// Schema metadata carried in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchemaInfo {
    /// Schema name
    pub name: String,

    /// Schema description
    pub description: String,

    /// Unix timestamp of normalization
    pub extraction_time: Option<u64>,
}

/// One flattened extraction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Class tag
    pub extraction_class: String,

    /// Source text span
    pub extraction_text: String,

    /// Attribute mapping, copied verbatim
    pub attributes: Value,

    /// Source document identifier, empty string when the record carries none
    pub document_id: String,
}

/// Summary of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Length of the extraction-record sequence
    pub total_extractions: usize,

    /// Display name identifying the outcome's concrete type
    pub document_info: String,
}

/// Normalize an extraction outcome into the stable report contract,
/// optionally annotated with schema metadata.
///
/// Never fails: every outcome shape terminates in a valid report. A record
/// that cannot be flattened (its `attributes` is not a JSON mapping)
/// degrades the whole report to `{conversion_error, raw_result}` rather
/// than raising.
pub fn normalize(outcome: &ExtractionOutcome, schema_info: Option<&SchemaInfo>) -> SerializedReport {
    let mut report = SerializedReport {
        schema_info: schema_info.map(|info| ReportSchemaInfo {
            name: info.name.clone(),
            description: info.description.clone(),
            extraction_time: unix_now(),
        }),
        error: None,
        extractions: None,
        summary: None,
        raw_result: None,
        conversion_error: None,
    };

    match outcome {
        ExtractionOutcome::Failure { error } => {
            report.error = Some(error.clone());
        }
        ExtractionOutcome::Success { records, kind } => match flatten_records(records) {
            Ok(flattened) => {
                report.summary = Some(ReportSummary {
                    total_extractions: flattened.len(),
                    document_info: kind.clone(),
                });
                report.extractions = Some(flattened);
            }
            Err(message) => {
                report.conversion_error = Some(message);
                report.raw_result = Some(render_outcome(outcome));
            }
        },
        ExtractionOutcome::Unrecognized(value) => {
            report.raw_result = Some(render_outcome_value(value));
        }
    }

    report
}

fn flatten_records(records: &[ExtractionRecord]) -> Result<Vec<ReportRecord>, String> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            if !record.attributes.is_object() {
                return Err(format!(
                    "Extraction {}: attributes must be a mapping, got {}",
                    idx,
                    json_type_name(&record.attributes)
                ));
            }
            Ok(ReportRecord {
                extraction_class: record.extraction_class.clone(),
                extraction_text: record.extraction_text.clone(),
                attributes: record.attributes.clone(),
                document_id: record.document_id.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Best-effort string rendering of an outcome for the fallback fields
fn render_outcome(outcome: &ExtractionOutcome) -> String {
    match outcome {
        ExtractionOutcome::Failure { error } => error.clone(),
        ExtractionOutcome::Success { records, .. } => serde_json::to_string(records)
            .unwrap_or_else(|_| format!("{:?}", records)),
        ExtractionOutcome::Unrecognized(value) => render_outcome_value(value),
    }
}

fn render_outcome_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(text: &str, attributes: Value) -> ExtractionRecord {
        ExtractionRecord {
            extraction_class: "requirement".to_string(),
            extraction_text: text.to_string(),
            attributes,
            document_id: None,
        }
    }

    fn report_keys(report: &SerializedReport) -> Vec<String> {
        let value = serde_json::to_value(report).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_failure_yields_exactly_error() {
        let outcome = ExtractionOutcome::Failure {
            error: "timeout".to_string(),
        };
        let report = normalize(&outcome, None);

        assert_eq!(report.error.as_deref(), Some("timeout"));
        assert_eq!(report_keys(&report), vec!["error"]);
    }

    #[test]
    fn test_failure_with_schema_info_adds_only_that_block() {
        let info = SchemaInfo {
            name: "Raw Materials".to_string(),
            description: "checklist".to_string(),
            categories: vec!["safety".to_string()],
            total_requirements: 1,
        };
        let outcome = ExtractionOutcome::Failure {
            error: "timeout".to_string(),
        };
        let report = normalize(&outcome, Some(&info));

        assert_eq!(report_keys(&report), vec!["schema_info", "error"]);
        let block = report.schema_info.unwrap();
        assert_eq!(block.name, "Raw Materials");
        assert_eq!(block.description, "checklist");
    }

    #[test]
    fn test_success_flattens_records_and_summarizes() {
        let outcome = ExtractionOutcome::Success {
            records: vec![
                record("MSDS updated", json!({ "status": "present" })),
                ExtractionRecord {
                    extraction_class: "requirement".to_string(),
                    extraction_text: "REACH registered".to_string(),
                    attributes: json!({ "status": "present" }),
                    document_id: Some("doc_001".to_string()),
                },
            ],
            kind: "AnnotatedDocument".to_string(),
        };

        let report = normalize(&outcome, None);
        let extractions = report.extractions.unwrap();
        let summary = report.summary.unwrap();

        assert_eq!(summary.total_extractions, 2);
        assert_eq!(summary.document_info, "AnnotatedDocument");
        assert_eq!(extractions.len(), 2);
        assert_eq!(extractions[0].document_id, "");
        assert_eq!(extractions[1].document_id, "doc_001");
        assert_eq!(extractions[0].attributes, json!({ "status": "present" }));
    }

    #[test]
    fn test_empty_success_has_zero_total() {
        let outcome = ExtractionOutcome::Success {
            records: Vec::new(),
            kind: "AnnotatedDocument".to_string(),
        };
        let report = normalize(&outcome, None);
        assert_eq!(report.summary.unwrap().total_extractions, 0);
        assert!(report.extractions.unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_outcome_renders_raw_result() {
        let outcome = ExtractionOutcome::Unrecognized(json!({ "weird": true }));
        let report = normalize(&outcome, None);
        assert_eq!(report_keys(&report), vec!["raw_result"]);
        assert!(report.raw_result.unwrap().contains("weird"));
    }

    #[test]
    fn test_non_mapping_attributes_degrade_to_conversion_error() {
        let outcome = ExtractionOutcome::Success {
            records: vec![record("x", json!("not a mapping"))],
            kind: "AnnotatedDocument".to_string(),
        };
        let report = normalize(&outcome, None);

        assert!(report.conversion_error.is_some());
        assert!(report.raw_result.is_some());
        assert!(report.extractions.is_none());
        assert!(report.summary.is_none());
        assert!(report
            .conversion_error
            .unwrap()
            .contains("attributes must be a mapping"));
    }

    #[test]
    fn test_report_serializes_without_absent_fields() {
        let outcome = ExtractionOutcome::Failure {
            error: "boom".to_string(),
        };
        let json = serde_json::to_string(&normalize(&outcome, None)).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
