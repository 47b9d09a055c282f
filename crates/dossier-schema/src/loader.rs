//! Schema file loading

use crate::error::SchemaError;
use crate::model::Schema;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load and validate a schema from a JSON file.
///
/// Each call produces an independent `Schema` instance; nothing is cached
/// across invocations.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let raw: Value =
        serde_json::from_str(&contents).map_err(|e| SchemaError::Parse(e.to_string()))?;

    Schema::from_value(&raw)
}
