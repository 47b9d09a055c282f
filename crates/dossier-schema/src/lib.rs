//! Dossier Schema Layer
//!
//! This crate contains the schema data model at the bottom of the dependency
//! graph: the declarative extraction schema, its structural validator, the
//! file loader, and the trait seams that infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Schema**: declarative JSON configuration describing what to extract
//!   (categories of checklist items) and how found facts are shaped
//!   (an extraction class and an attribute schema)
//! - **ItemConfig**: one checklist requirement's description, required flag,
//!   and optional keyword hints
//! - **ExtractionRecord**: one structured fact instance - a class tag, a
//!   source text span, and attribute data
//! - **SchemaInfo**: derived metadata (category names, total requirement
//!   count), recomputed on demand and never stored
//!
//! ## Architecture
//!
//! - Declared ordering of categories, items, keywords and examples is
//!   preserved end to end (the prompt compiler depends on it)
//! - A loaded `Schema` is immutable; re-loading produces an independent
//!   instance
//! - Trait definitions for backend and document-source interactions live
//!   here; implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod loader;
pub mod model;
pub mod traits;
pub mod validate;

// Re-exports for convenience
pub use error::{SchemaError, SchemaValidationError};
pub use loader::load_schema;
pub use model::{
    Category, ExampleDoc, ExampleSpec, ExtractionRecord, Item, ItemConfig, OutputFormat, Schema,
    SchemaInfo,
};
pub use validate::validate;
