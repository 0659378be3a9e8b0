//! Schema-driven synthetic document generation.
//!
//! A schema is an ordered map of field names to typed rules. This crate
//! validates raw field definitions against a [`Registry`] of field types,
//! then produces documents whose fields follow the map order.
//!
//! # Architecture
//!
//! ```text
//! raw fields (JSON / YAML)
//!        │
//!        ▼
//!   validate()  ──► rejected types
//!        │
//!        ▼
//!    FieldMap
//!        │
//!        ▼
//! ┌────────────────────┐
//! │ DocumentGenerator  │
//! │                    │
//! │  - registry (Arc)  │
//! │  - seed            │
//! │  - one RNG per doc │
//! └─────────┬──────────┘
//!           │
//!           ▼
//!   Document { field: value, ... }
//! ```
//!
//! # Example
//!
//! ```rust
//! use docgen_generator::{validate, DocumentGenerator, Registry};
//! use std::sync::Arc;
//!
//! let raw = serde_json::json!({
//!     "username": {"type": "name", "format": "gamertag"},
//!     "game": {"type": "game", "option": "lol"},
//!     "role": "role",
//!     "level": {"type": "integer", "min": 1, "max": 9999}
//! });
//!
//! let registry = Arc::new(Registry::default());
//! let outcome = validate(raw.as_object().unwrap(), &registry);
//! assert!(outcome.rejected_types.is_empty());
//!
//! let generator = DocumentGenerator::new(registry, outcome.fields).with_seed(42);
//! for document in generator.generate(3).unwrap() {
//!     let document = document.unwrap();
//!     assert_eq!(document.get("game").unwrap().as_str(), Some("league_of_legends"));
//! }
//! ```
//!
//! # Field types
//!
//! - `integer` - Uniform integer in `[min, max]`
//! - `name` - Full, first or last name, or a gamertag
//! - `gamertag` - Capitalized handle with an optional numeric suffix
//! - `dob` - ISO date for an age range
//! - `ip` - IPv4 (public / private / any) or IPv6 address
//! - `country` - ISO 3166 alpha-2, alpha-3 or name
//! - `game` - Key from the game catalog
//! - `role`, `org` - Entry from the prior game's lists
//! - `trophies` - Tournament results for the prior game

pub mod batch;
pub mod catalog;
pub mod error;
pub mod generators;
pub mod options;
pub mod registry;
pub mod synthesizer;
pub mod validate;

// Re-exports for convenience
pub use batch::{parse_count, DocumentBatch, DocumentGenerator};
pub use catalog::{CatalogError, GameCatalog, GameTables};
pub use error::{GenerateError, SynthesisError};
pub use registry::{FieldType, Registry, SynthesisContext};
pub use synthesizer::synthesize_document;
pub use validate::{validate, ValidationOutcome};
