//! Core types for the docgen framework.
//!
//! This crate provides the foundational types shared by the generator,
//! the schema store and the exporters:
//!
//! - [`FieldRule`] - A type tag plus type-specific options
//! - [`FieldMap`] - Ordered mapping of field name to rule
//! - [`Schema`] - A named, immutable field map
//! - [`GeneratedValue`] - A single synthesized value
//! - [`Document`] - One generated record, in field map order
//!
//! # Architecture
//!
//! ```text
//! docgen-core (this crate)
//!    │
//!    ├─── docgen-generator  (registry, validator, synthesizer, batch driver)
//!    ├─── docgen-store      (schema persistence)
//!    └─── docgen-export     (JSON / NDJSON / bulk rendering)
//! ```
//!
//! # Example
//!
//! ```rust
//! use docgen_core::{FieldMap, FieldRule, Schema};
//!
//! let mut fields = FieldMap::new();
//! fields.insert("id", FieldRule::new("integer").with_option("max", 9999));
//! fields.insert("game", FieldRule::new("game").with_option("option", "lol"));
//!
//! let schema = Schema::new("players", fields).unwrap();
//! assert_eq!(schema.fields().field_names(), vec!["id", "game"]);
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{FieldMap, FieldRule, Options, RawFields, Schema, SchemaError, SchemaRequest};
pub use types::{tags, IndexFieldType};
pub use values::{Document, DocumentBuilder, GeneratedValue};
