//! Schema-info command implementation.

use crate::error::Result;
use crate::output::Formatter;
use dossier_schema::load_schema;
use std::path::Path;

/// Execute the info command.
///
/// Loads and validates the schema, then prints its metadata and
/// per-category requirement breakdown. No backend call is made.
pub fn execute_info(schema_path: &Path, formatter: &Formatter) -> Result<()> {
    let schema = load_schema(schema_path)?;
    println!("{}", formatter.format_schema_details(&schema));
    Ok(())
}
