//! In-memory representation of a loaded extraction schema

use crate::error::SchemaError;
use crate::validate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A loaded extraction schema: immutable configuration describing what to
/// look for in a document and how found facts should be shaped.
///
/// Category, item and attribute ordering follows the schema file's declared
/// order. Few-shot conditioning depends on that order, so it is semantically
/// significant and never re-sorted.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Document domain name (e.g. "Cosmetics Raw Material")
    pub name: String,

    /// Free-text description of the domain (may be empty)
    pub description: String,

    /// Checklist categories in declared order
    pub categories: Vec<Category>,

    /// Optional output shaping block
    pub output_format: Option<OutputFormat>,

    /// Declared few-shot examples in declared order
    pub examples: Vec<ExampleSpec>,
}

/// One named category of checklist items
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name as declared in the schema file
    pub name: String,

    /// Items in declared order
    pub items: Vec<Item>,
}

/// One named checklist item within a category
#[derive(Debug, Clone)]
pub struct Item {
    /// Item name as declared in the schema file
    pub name: String,

    /// Item configuration
    pub config: ItemConfig,
}

/// One checklist entry's configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    /// What to look for
    pub description: String,

    /// Whether the item is mandatory for this document domain
    #[serde(default)]
    pub required: bool,

    /// Keyword hints, rendered into the prompt in declared order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// Output shaping block: the extraction class the backend should emit and
/// the attribute schema each record should carry
#[derive(Debug, Clone)]
pub struct OutputFormat {
    /// Extraction class name (defaults to "requirement" when absent)
    pub extraction_class: String,

    /// Attribute name to type-hint pairs in declared order
    pub attributes_schema: Vec<(String, String)>,
}

/// A schema-declared example document, kept raw until the example
/// synthesizer shapes it (so malformed declarations surface as
/// `MalformedExample`, not as a deserialization error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleSpec {
    /// Example document text
    pub text: String,

    /// Raw extraction entries as declared in the schema file
    pub extractions: Vec<Value>,
}

/// A worked text-to-extractions pair shown to the backend to steer its
/// output format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleDoc {
    /// Example document text
    pub text: String,

    /// Expected extractions in declared order
    pub extractions: Vec<ExtractionRecord>,
}

/// One structured fact instance, used both for schema-declared examples and
/// for backend output records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Class tag (e.g. "requirement")
    pub extraction_class: String,

    /// Source text span the fact was extracted from
    pub extraction_text: String,

    /// Attribute data. Kept as a raw JSON value because the backend's shape
    /// is heterogeneous; the result normalizer enforces the
    /// mapping-of-string-to-value contract.
    pub attributes: Value,

    /// Identifier of the source document, when the backend supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Derived schema metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    /// Schema name
    pub name: String,

    /// Schema description
    pub description: String,

    /// Category names in declared order
    pub categories: Vec<String>,

    /// Sum over all categories of that category's item count
    pub total_requirements: usize,
}

impl Schema {
    /// Validate a raw JSON value and construct a `Schema` from it.
    ///
    /// Validation failures name the first offending field, checked in the
    /// order `name`, `description`, `categories`, then per category and per
    /// item in declared order.
    pub fn from_value(raw: &Value) -> Result<Self, SchemaError> {
        validate(raw)?;

        // The walk below only reads shapes the validator has already
        // accepted, so missing keys fall back to defaults instead of
        // panicking.
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let description = raw
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut categories = Vec::new();
        if let Some(map) = raw.get("categories").and_then(Value::as_object) {
            for (category_name, category_value) in map {
                let mut items = Vec::new();
                if let Some(item_map) = category_value.as_object() {
                    for (item_name, item_value) in item_map {
                        let config: ItemConfig = serde_json::from_value(item_value.clone())
                            .map_err(|e| SchemaError::Parse(e.to_string()))?;
                        items.push(Item {
                            name: item_name.clone(),
                            config,
                        });
                    }
                }
                categories.push(Category {
                    name: category_name.clone(),
                    items,
                });
            }
        }

        let output_format = raw
            .get("output_format")
            .and_then(Value::as_object)
            .map(|obj| {
                let extraction_class = obj
                    .get("extraction_class")
                    .and_then(Value::as_str)
                    .unwrap_or("requirement")
                    .to_string();
                let attributes_schema = obj
                    .get("attributes_schema")
                    .and_then(Value::as_object)
                    .map(|attrs| {
                        attrs
                            .iter()
                            .map(|(k, v)| {
                                (k.clone(), v.as_str().unwrap_or_default().to_string())
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                OutputFormat {
                    extraction_class,
                    attributes_schema,
                }
            });

        let examples = match raw.get("examples") {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| SchemaError::Parse(e.to_string()))?,
            None => Vec::new(),
        };

        Ok(Self {
            name,
            description,
            categories,
            output_format,
            examples,
        })
    }

    /// Total number of checklist items across all categories.
    ///
    /// Derived, never stored: always recomputable from the model.
    pub fn total_requirements(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Derived schema metadata for listings and report annotation
    pub fn info(&self) -> SchemaInfo {
        SchemaInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            categories: self.categories.iter().map(|c| c.name.clone()).collect(),
            total_requirements: self.total_requirements(),
        }
    }
}
