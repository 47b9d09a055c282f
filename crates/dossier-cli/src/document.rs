//! Document reading.
//!
//! PDF-to-text conversion lives outside this tool; extraction runs over
//! pre-converted plain text. Page boundary markers in the form
//! `===== PAGE <n> =====` are passed through untouched so the backend can
//! use them as page hints.

use crate::error::CliError;
use dossier_schema::traits::DocumentSource;
use std::fs;
use std::path::Path;

/// Reads pre-converted, page-tagged plain text documents.
#[derive(Debug, Default)]
pub struct PlainTextSource;

impl DocumentSource for PlainTextSource {
    type Error = CliError;

    fn read_text(&self, path: &Path) -> Result<String, Self::Error> {
        if !path.exists() {
            return Err(CliError::DocumentNotFound(path.to_path_buf()));
        }
        Ok(fs::read_to_string(path)?)
    }
}
