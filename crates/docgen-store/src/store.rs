//! Schema storage trait and the schema creation flow.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use docgen_core::{Schema, SchemaError, SchemaRequest};
use docgen_generator::{validate, Registry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A schema as persisted by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSchema {
    /// The stored schema
    pub schema: Schema,
    /// When the schema was created
    pub created_at: DateTime<Utc>,
}

impl StoredSchema {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            created_at: Utc::now(),
        }
    }
}

/// Trait for schema storage backends.
///
/// Names are unique: a stored schema is never overwritten or modified.
/// Implementations:
/// - `FilesystemStore` - One JSON file per schema
/// - `MemoryStore` - In-process map, for tests and one-shot runs
pub trait SchemaStore: Send + Sync {
    /// Store a new schema. Fails with `AlreadyExists` if the name is taken.
    fn create(&self, schema: &Schema) -> Result<StoredSchema, StoreError>;

    /// Read a schema by name.
    ///
    /// Returns None if no schema has that name.
    fn get(&self, name: &str) -> Result<Option<StoredSchema>, StoreError>;

    /// Names of all stored schemas, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Check that a name can be used as a storage key.
pub fn check_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name.len() > 200
        || name.starts_with('.')
        || name.chars().any(|c| c == '/' || c == '\\' || c.is_control());
    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate a schema request and store the result.
///
/// Requires a non-empty name and at least one field. Unknown types are
/// reported together in a single `UnknownTypes` error and nothing is stored.
pub fn create_schema(
    store: &dyn SchemaStore,
    registry: &Registry,
    request: &SchemaRequest,
) -> Result<StoredSchema, StoreError> {
    let name = request.schema_name.trim();
    if name.is_empty() {
        return Err(SchemaError::EmptyName.into());
    }
    if request.fields.is_empty() {
        return Err(SchemaError::EmptyFields.into());
    }
    check_name(name)?;

    let fields = validate(&request.fields, registry).into_result(registry)?;
    let schema = Schema::new(name, fields)?;

    debug!("Creating schema '{}' with {} fields", name, schema.fields().len());
    store.create(&schema)
}
