//! Rendering of generated documents.
//!
//! Documents are written as a JSON array or as NDJSON, optionally wrapped
//! into a bulk indexing body for a search index, together with an index
//! mapping derived from the schema.
//!
//! # Example
//!
//! ```rust
//! use docgen_core::{FieldMap, FieldRule};
//! use docgen_export::{build_bulk_body, DocumentWriter, OutputFormat};
//! use docgen_generator::{DocumentGenerator, Registry};
//! use std::sync::Arc;
//!
//! let mut fields = FieldMap::new();
//! fields.insert("id", FieldRule::new("integer"));
//! let generator = DocumentGenerator::new(Arc::new(Registry::default()), fields).with_seed(42);
//!
//! let mut ndjson = Vec::new();
//! let metrics = DocumentWriter::new(&mut ndjson, OutputFormat::Ndjson)
//!     .write_all(generator.generate(3).unwrap())
//!     .unwrap();
//! assert_eq!(metrics.documents_written, 3);
//!
//! let body = build_bulk_body(&String::from_utf8(ndjson).unwrap(), "pro_players");
//! assert_eq!(body.lines().count(), 6);
//! ```

pub mod args;
pub mod bulk;
pub mod error;
pub mod writer;

pub use args::{OutputArgs, OutputFormat};
pub use bulk::{build_bulk_body, index_mapping, DEFAULT_INDEX};
pub use error::ExportError;
pub use writer::{render_documents, DocumentWriter, ExportMetrics};
