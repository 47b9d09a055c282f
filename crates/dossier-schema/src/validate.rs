//! Structural well-formedness checks over a raw schema value

use crate::error::SchemaValidationError;
use serde_json::Value;

/// Validate a raw schema value.
///
/// Checks are ordered so the first offending field is the one named:
/// top-level keys `name`, `description`, `categories` in that order, then
/// the categories mapping, then each category and item in declared order.
/// No side effects: the raw value is only read.
pub fn validate(raw: &Value) -> Result<(), SchemaValidationError> {
    for field in ["name", "description", "categories"] {
        if raw.get(field).is_none() {
            return Err(SchemaValidationError::MissingField(field));
        }
    }

    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or(SchemaValidationError::NotAString("name"))?;
    if name.is_empty() {
        return Err(SchemaValidationError::EmptyField("name"));
    }

    if raw.get("description").and_then(Value::as_str).is_none() {
        return Err(SchemaValidationError::NotAString("description"));
    }

    let categories = raw
        .get("categories")
        .and_then(Value::as_object)
        .ok_or(SchemaValidationError::CategoriesNotMapping)?;
    if categories.is_empty() {
        return Err(SchemaValidationError::EmptyField("categories"));
    }

    for (category_name, category_value) in categories {
        let items = category_value
            .as_object()
            .ok_or_else(|| SchemaValidationError::CategoryNotMapping(category_name.clone()))?;
        if items.is_empty() {
            return Err(SchemaValidationError::EmptyCategory(category_name.clone()));
        }

        for (item_name, item_value) in items {
            let description = item_value
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if description.is_empty() {
                return Err(SchemaValidationError::ItemMissingDescription(format!(
                    "{}.{}",
                    category_name, item_name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_schema_passes() {
        let raw = json!({
            "name": "Food Grade",
            "description": "",
            "categories": {
                "regulatory": {
                    "fda": { "description": "FDA compliance statement" }
                }
            }
        });
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_missing_name_reported_first() {
        let raw = json!({ "description": "", "categories": {} });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_missing_categories_named() {
        let raw = json!({ "name": "X", "description": "" });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::MissingField("categories"))
        );
    }

    #[test]
    fn test_categories_must_be_mapping() {
        let raw = json!({ "name": "X", "description": "", "categories": ["a", "b"] });
        assert_eq!(validate(&raw), Err(SchemaValidationError::CategoriesNotMapping));
    }

    #[test]
    fn test_category_value_must_be_mapping() {
        let raw = json!({
            "name": "X",
            "description": "",
            "categories": { "safety": ["not", "a", "mapping"] }
        });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::CategoryNotMapping("safety".into()))
        );
    }

    #[test]
    fn test_item_without_description_named_with_category() {
        let raw = json!({
            "name": "X",
            "description": "",
            "categories": {
                "safety": { "msds": { "required": true } }
            }
        });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::ItemMissingDescription(
                "safety.msds".into()
            ))
        );
    }

    #[test]
    fn test_empty_categories_rejected() {
        let raw = json!({ "name": "X", "description": "", "categories": {} });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::EmptyField("categories"))
        );
    }

    #[test]
    fn test_empty_category_rejected() {
        let raw = json!({
            "name": "X",
            "description": "",
            "categories": { "safety": {} }
        });
        assert_eq!(
            validate(&raw),
            Err(SchemaValidationError::EmptyCategory("safety".into()))
        );
    }

    #[test]
    fn test_empty_description_string_is_allowed() {
        let raw = json!({
            "name": "X",
            "description": "",
            "categories": {
                "c": { "i": { "description": "something" } }
            }
        });
        assert!(validate(&raw).is_ok());
    }
}
