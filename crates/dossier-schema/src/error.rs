//! Error types for schema loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a schema file
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Schema file path does not resolve
    #[error("Schema file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Schema file could not be read
    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file content is not valid JSON
    #[error("Invalid JSON in schema file: {0}")]
    Parse(String),

    /// Schema is structurally invalid
    #[error("Invalid schema: {0}")]
    Validation(#[from] SchemaValidationError),
}

/// Structural validation failures, with the first offending field named
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidationError {
    /// A required top-level key is absent
    #[error("Schema missing required field: {0}")]
    MissingField(&'static str),

    /// A required field is present but holds the wrong JSON type
    #[error("Schema field '{0}' must be a string")]
    NotAString(&'static str),

    /// A required field is present but empty
    #[error("Schema field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// `categories` is not a JSON object
    #[error("Schema 'categories' must be a mapping")]
    CategoriesNotMapping,

    /// A category's value is not a JSON object
    #[error("Category '{0}' must contain a mapping of items")]
    CategoryNotMapping(String),

    /// A category contains no items
    #[error("Category '{0}' must contain at least one item")]
    EmptyCategory(String),

    /// An item lacks a non-empty description
    #[error("Item '{0}' missing description")]
    ItemMissingDescription(String),
}
