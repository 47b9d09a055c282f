//! List-schemas command implementation.

use crate::error::Result;
use crate::output::{Formatter, SchemaListing};
use dossier_schema::load_schema;
use std::fs;
use std::path::Path;

/// Execute the list-schemas command.
///
/// Scans the schemas directory for `.json` files and shows each schema's
/// metadata. A schema that fails to load is reported inline; the listing
/// continues with the remaining files.
pub fn execute_list(schemas_dir: &Path, formatter: &Formatter) -> Result<()> {
    if !schemas_dir.is_dir() {
        println!(
            "{}",
            formatter.error(&format!(
                "Schemas directory not found: {}",
                schemas_dir.display()
            ))
        );
        return Ok(());
    }

    let mut files: Vec<_> = fs::read_dir(schemas_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    let entries: Vec<SchemaListing> = files
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            match load_schema(path) {
                Ok(schema) => SchemaListing::Loaded {
                    stem,
                    info: schema.info(),
                },
                Err(e) => SchemaListing::Failed {
                    stem,
                    error: e.to_string(),
                },
            }
        })
        .collect();

    println!(
        "{}",
        formatter.info(&format!("Schemas in {}:", schemas_dir.display()))
    );
    println!("{}", formatter.format_schema_listing(&entries));

    Ok(())
}
