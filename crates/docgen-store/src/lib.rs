//! Schema storage for docgen
//!
//! Schemas are created once through [`create_schema`], which validates the
//! request against a field type registry, and are read-only afterwards.
//!
//! ## Storage Backends
//!
//! - `FilesystemStore` - Stores schemas as JSON files
//! - `MemoryStore` - Keeps schemas in process memory
//!
//! # Example
//!
//! ```rust
//! use docgen_core::SchemaRequest;
//! use docgen_generator::Registry;
//! use docgen_store::{create_schema, MemoryStore, SchemaStore};
//!
//! let store = MemoryStore::new();
//! let request = SchemaRequest::from_json(
//!     r#"{"schema_name": "Esports", "fields": {"game": "game", "role": "role"}}"#,
//! )
//! .unwrap();
//!
//! create_schema(&store, &Registry::default(), &request).unwrap();
//! assert_eq!(store.list().unwrap(), vec!["Esports"]);
//! ```

mod error;
mod filesystem;
mod memory;
pub mod store;

pub use error::StoreError;
pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;
pub use store::{check_name, create_schema, SchemaStore, StoredSchema};
