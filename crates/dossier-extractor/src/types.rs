//! The backend outcome as a tagged union

use dossier_schema::ExtractionRecord;
use serde_json::Value;

/// The result of one orchestrated extraction run.
///
/// Explicitly tagged so downstream code dispatches on the variant rather
/// than probing for attributes on an opaque result object.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// The backend failed; the message is carried as data
    Failure {
        /// Captured error message
        error: String,
    },

    /// The backend produced an ordered extraction-record sequence
    Success {
        /// Records in backend order
        records: Vec<ExtractionRecord>,
        /// Display name identifying the result's concrete type
        kind: String,
    },

    /// The backend returned something with no recognizable shape
    Unrecognized(Value),
}

impl ExtractionOutcome {
    /// Whether the outcome is an explicit failure
    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionOutcome::Failure { .. })
    }

    /// Number of extraction records, zero for non-success outcomes
    pub fn record_count(&self) -> usize {
        match self {
            ExtractionOutcome::Success { records, .. } => records.len(),
            _ => 0,
        }
    }
}
