//! Deterministic prompt compilation from a loaded schema

use dossier_schema::Schema;

/// Compiles a schema into extraction instruction text.
///
/// A pure function of the schema model: no I/O, no randomness, no clock.
/// Identical schema content yields byte-identical prompt text across runs
/// and processes, which keeps extraction reproducible and the prompt
/// unit-testable independent of the backend.
pub struct PromptBuilder<'a> {
    schema: &'a Schema,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder over a loaded schema
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Domain header
        prompt.push_str(&format!(
            "You are extracting information from {} documentation.\n",
            self.schema.name.to_lowercase()
        ));
        prompt.push_str(&self.schema.description);
        prompt.push_str("\n\nExtract information according to these categories:\n");

        // 2. Categories and items in declared order
        for category in &self.schema.categories {
            prompt.push_str(&format!("\n{}:\n", category.name.to_uppercase()));

            for item in &category.items {
                let required_text = if item.config.required {
                    " (REQUIRED)"
                } else {
                    " (optional)"
                };
                prompt.push_str(&format!("- {}{}\n", item.config.description, required_text));

                if let Some(keywords) = &item.config.keywords {
                    if !keywords.is_empty() {
                        prompt.push_str(&format!("  Keywords: {}\n", keywords.join(", ")));
                    }
                }
            }
        }

        // 3. Output shaping block
        if let Some(format) = &self.schema.output_format {
            prompt.push_str("\nOUTPUT FORMAT:\n");
            prompt.push_str(&format!(
                "- Use extraction class: \"{}\"\n",
                format.extraction_class
            ));
            prompt.push_str("- For each item found, include these attributes:\n");
            for (attr_name, attr_type) in &format.attributes_schema {
                prompt.push_str(&format!("  - {}: {}\n", attr_name, attr_type));
            }
        }

        // 4. Fixed closing instructions
        prompt.push_str(CLOSING_INSTRUCTIONS);

        prompt
    }
}

/// Compile a schema into extraction instruction text
pub fn synthesize_prompt(schema: &Schema) -> String {
    PromptBuilder::new(schema).build()
}

const CLOSING_INSTRUCTIONS: &str = "\nIf information is not available, mark status as \"not_found\".\nIf information is not applicable to this document type, mark status as \"not_applicable\".\nInclude exact text quotes as evidence where possible.\n";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::from_value(&json!({
            "name": "Raw Materials",
            "description": "Compliance checklist for raw material dossiers.",
            "categories": {
                "safety": {
                    "msds": {
                        "description": "MSDS available",
                        "required": true,
                        "keywords": ["MSDS"]
                    },
                    "reach": { "description": "REACH registration number" }
                },
                "quality": {
                    "coa": { "description": "Certificate of analysis" }
                }
            },
            "output_format": {
                "extraction_class": "requirement",
                "attributes_schema": {
                    "name": "string",
                    "status": "present|not_found",
                    "evidence": "string"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let schema = sample_schema();
        assert_eq!(synthesize_prompt(&schema), synthesize_prompt(&schema));
    }

    #[test]
    fn test_prompt_header_lowercases_name() {
        let prompt = synthesize_prompt(&sample_schema());
        assert!(prompt.contains("You are extracting information from raw materials documentation."));
        assert!(prompt.contains("Compliance checklist for raw material dossiers."));
    }

    #[test]
    fn test_required_item_with_keywords() {
        let prompt = synthesize_prompt(&sample_schema());
        assert!(prompt.contains("MSDS available (REQUIRED)"));
        assert!(prompt.contains("Keywords: MSDS"));
    }

    #[test]
    fn test_optional_item_without_keywords_has_no_keyword_line() {
        let prompt = synthesize_prompt(&sample_schema());
        assert!(prompt.contains("REACH registration number (optional)"));
        // Only the MSDS item declares keywords.
        assert_eq!(prompt.matches("Keywords:").count(), 1);
    }

    #[test]
    fn test_category_headings_uppercased_in_order() {
        let prompt = synthesize_prompt(&sample_schema());
        let safety = prompt.find("SAFETY:").unwrap();
        let quality = prompt.find("QUALITY:").unwrap();
        assert!(safety < quality);
    }

    #[test]
    fn test_output_format_block() {
        let prompt = synthesize_prompt(&sample_schema());
        assert!(prompt.contains("OUTPUT FORMAT:"));
        assert!(prompt.contains("- Use extraction class: \"requirement\""));
        let name = prompt.find("  - name: string").unwrap();
        let status = prompt.find("  - status: present|not_found").unwrap();
        let evidence = prompt.find("  - evidence: string").unwrap();
        assert!(name < status && status < evidence);
    }

    #[test]
    fn test_no_output_format_block_when_absent() {
        let schema = Schema::from_value(&json!({
            "name": "X",
            "description": "",
            "categories": { "c": { "i": { "description": "d" } } }
        }))
        .unwrap();
        let prompt = synthesize_prompt(&schema);
        assert!(!prompt.contains("OUTPUT FORMAT:"));
    }

    #[test]
    fn test_closing_instructions_present() {
        let prompt = synthesize_prompt(&sample_schema());
        assert!(prompt.contains("mark status as \"not_found\""));
        assert!(prompt.contains("mark status as \"not_applicable\""));
        assert!(prompt.contains("exact text quotes as evidence"));
    }

    #[test]
    fn test_empty_keyword_list_omits_line() {
        let schema = Schema::from_value(&json!({
            "name": "X",
            "description": "",
            "categories": {
                "c": { "i": { "description": "d", "keywords": [] } }
            }
        }))
        .unwrap();
        let prompt = synthesize_prompt(&schema);
        assert!(!prompt.contains("Keywords:"));
    }
}
