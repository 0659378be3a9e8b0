//! In-memory schema storage.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use docgen_core::Schema;

use crate::error::StoreError;
use crate::store::{SchemaStore, StoredSchema};

/// SchemaStore backed by a map; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    schemas: RwLock<BTreeMap<String, StoredSchema>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchemaStore for MemoryStore {
    fn create(&self, schema: &Schema) -> Result<StoredSchema, StoreError> {
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        if schemas.contains_key(schema.name()) {
            return Err(StoreError::AlreadyExists(schema.name().to_string()));
        }

        let stored = StoredSchema::new(schema.clone());
        schemas.insert(schema.name().to_string(), stored.clone());
        Ok(stored)
    }

    fn get(&self, name: &str) -> Result<Option<StoredSchema>, StoreError> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        Ok(schemas.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        Ok(schemas.keys().cloned().collect())
    }
}
