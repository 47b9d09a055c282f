//! CLI command definitions and argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Extract structured checklist facts from documents using configurable
/// schemas.
#[derive(Debug, Parser)]
#[command(name = "dossier")]
#[command(version, about, long_about = None)]
#[command(after_help = "\
Examples:
  # List available schemas
  dossier --list-schemas

  # Extract using a specific schema
  dossier schemas/raw_materials.json document.txt

  # Extract with a custom output file
  dossier schemas/cosmetics_basic.json doc.txt results.json

  # Use a different model
  dossier schemas/food_grade.json doc.txt --model gemma3:1b

  # Show schema information without extracting
  dossier schemas/raw_materials.json --info")]
pub struct Cli {
    /// Schema JSON file to use
    pub schema: Option<PathBuf>,

    /// Document text file to extract from
    pub document: Option<PathBuf>,

    /// Output JSON file
    #[arg(default_value = "extraction_results.json")]
    pub output: PathBuf,

    /// List all available schema files
    #[arg(long)]
    pub list_schemas: bool,

    /// Show schema information without extracting
    #[arg(long)]
    pub info: bool,

    /// Model to use (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Model server URL (overrides config)
    #[arg(long)]
    pub model_url: Option<String>,

    /// Directory scanned by --list-schemas (overrides config)
    #[arg(long)]
    pub schemas_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_mode_arguments() {
        let cli = Cli::parse_from(["dossier", "schemas/raw.json", "doc.txt", "out.json"]);
        assert_eq!(cli.schema.unwrap(), PathBuf::from("schemas/raw.json"));
        assert_eq!(cli.document.unwrap(), PathBuf::from("doc.txt"));
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert!(!cli.list_schemas);
        assert!(!cli.info);
    }

    #[test]
    fn test_output_defaults() {
        let cli = Cli::parse_from(["dossier", "schemas/raw.json", "doc.txt"]);
        assert_eq!(cli.output, PathBuf::from("extraction_results.json"));
    }

    #[test]
    fn test_list_schemas_flag() {
        let cli = Cli::parse_from(["dossier", "--list-schemas"]);
        assert!(cli.list_schemas);
        assert!(cli.schema.is_none());
    }

    #[test]
    fn test_info_flag_with_model_override() {
        let cli = Cli::parse_from([
            "dossier",
            "schemas/raw.json",
            "--info",
            "--model",
            "gemma3:1b",
        ]);
        assert!(cli.info);
        assert_eq!(cli.model.as_deref(), Some("gemma3:1b"));
    }
}
