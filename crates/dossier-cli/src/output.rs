//! Output formatting for the CLI.

use colored::*;
use dossier_schema::{Schema, SchemaInfo};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One entry in the schema listing: a loaded schema or the reason it
/// failed to load.
#[derive(Debug)]
pub enum SchemaListing {
    /// Schema loaded and validated
    Loaded {
        /// Schema file stem
        stem: String,
        /// Derived metadata
        info: SchemaInfo,
    },
    /// Schema failed to load; listing continues regardless
    Failed {
        /// Schema file stem
        stem: String,
        /// Load error message
        error: String,
    },
}

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format the schema listing as a table.
    pub fn format_schema_listing(&self, entries: &[SchemaListing]) -> String {
        if entries.is_empty() {
            return self.colorize("No schema files found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Schema", "Name", "Categories", "Requirements"]);

        for entry in entries {
            match entry {
                SchemaListing::Loaded { stem, info } => {
                    builder.push_record([
                        stem.as_str(),
                        info.name.as_str(),
                        &info.categories.len().to_string(),
                        &info.total_requirements.to_string(),
                    ]);
                }
                SchemaListing::Failed { stem, error } => {
                    builder.push_record([stem.as_str(), &format!("Error loading - {}", error), "-", "-"]);
                }
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the detailed per-category requirement breakdown.
    pub fn format_schema_details(&self, schema: &Schema) -> String {
        let info = schema.info();
        let mut out = String::new();

        out.push_str(&format!("Schema: {}\n", info.name));
        out.push_str(&format!("Description: {}\n", info.description));
        out.push_str(&format!("Categories: {}\n", info.categories.join(", ")));
        out.push_str(&format!("Total requirements: {}\n", info.total_requirements));

        out.push_str("\nDetailed requirements:\n");
        for category in &schema.categories {
            out.push_str(&format!("  {}: {} items\n", category.name, category.items.len()));
            for item in &category.items {
                let required = if item.config.required { " (required)" } else { "" };
                out.push_str(&format!(
                    "    - {}: {}{}\n",
                    item.name, item.config.description, required
                ));
            }
        }

        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::from_value(&json!({
            "name": "Cosmetics",
            "description": "Basic cosmetics checklist",
            "categories": {
                "labeling": {
                    "inci": { "description": "INCI name present", "required": true },
                    "batch": { "description": "Batch number" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_listing_table_contains_schema_rows() {
        let formatter = Formatter::new(false);
        let entries = vec![
            SchemaListing::Loaded {
                stem: "cosmetics_basic".to_string(),
                info: sample_schema().info(),
            },
            SchemaListing::Failed {
                stem: "broken".to_string(),
                error: "Invalid JSON in schema file: expected value".to_string(),
            },
        ];

        let output = formatter.format_schema_listing(&entries);
        assert!(output.contains("cosmetics_basic"));
        assert!(output.contains("Cosmetics"));
        assert!(output.contains("Error loading"));
    }

    #[test]
    fn test_empty_listing() {
        let formatter = Formatter::new(false);
        let output = formatter.format_schema_listing(&[]);
        assert!(output.contains("No schema files found"));
    }

    #[test]
    fn test_schema_details_breakdown() {
        let formatter = Formatter::new(false);
        let output = formatter.format_schema_details(&sample_schema());

        assert!(output.contains("Schema: Cosmetics"));
        assert!(output.contains("Total requirements: 2"));
        assert!(output.contains("labeling: 2 items"));
        assert!(output.contains("- inci: INCI name present (required)"));
        assert!(output.contains("- batch: Batch number"));
        assert!(!output.contains("Batch number (required)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
