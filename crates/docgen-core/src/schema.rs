//! Schema definitions for the docgen framework.
//!
//! ## Type Hierarchy
//!
//! - `RawFields` - Field definitions exactly as a caller wrote them
//!   (bare tag strings or `{"type": ..., options...}` objects)
//! - `FieldRule` - One normalized rule: a type tag plus its options
//! - `FieldMap` - Ordered field name → rule mapping (validator output)
//! - `Schema` - A named field map, immutable once constructed
//! - `SchemaRequest` - The `{"schema_name", "fields"}` document used to create schemas
//!
//! Field order is load-bearing: dependent rules look backwards in the
//! document being built, so every type here preserves insertion order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Type-specific options of a field rule (`min`, `max`, `format`, ...).
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Raw, not yet validated field definitions.
pub type RawFields = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Schema name missing or blank
    #[error("schema_name must be a non-empty string")]
    EmptyName,

    /// Schema without any field
    #[error("fields must be a non-empty map")]
    EmptyFields,

    /// Field definitions referenced type tags that are not registered
    #[error("unknown data types: {unknown:?} (allowed types: {allowed:?})")]
    UnknownTypes {
        /// Tags the registry knows about
        allowed: Vec<String>,
        /// Tags that were rejected, in definition order
        unknown: Vec<String>,
    },
}

// ============================================================================
// Field Rules
// ============================================================================

/// A single field generation rule.
///
/// Serializes to the flat shape `{"type": "<tag>", "<option>": <value>, ...}`
/// so stored schemas stay compatible with hand-written definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Type tag selecting the synthesis strategy
    #[serde(rename = "type")]
    pub field_type: String,

    /// Type-specific options
    #[serde(flatten)]
    pub options: Options,
}

impl FieldRule {
    /// Create a rule with no options.
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            options: Options::new(),
        }
    }

    /// Add an option to the rule.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get an option value by key.
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    /// Render the rule back into its raw JSON form.
    pub fn to_raw(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::with_capacity(self.options.len() + 1);
        obj.insert(
            "type".to_string(),
            serde_json::Value::String(self.field_type.clone()),
        );
        for (key, value) in &self.options {
            if key != "type" {
                obj.insert(key.clone(), value.clone());
            }
        }
        serde_json::Value::Object(obj)
    }
}

/// Ordered mapping of field name to rule.
///
/// Inserting an existing name replaces its rule but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, FieldRule)>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the rule it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) -> Option<FieldRule> {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, rule)),
            None => {
                self.fields.push((name, rule));
                None
            }
        }
    }

    /// Get a rule by field name.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// Iterate over fields in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(n, rule)| (n.as_str(), rule))
    }

    /// Get all field names in definition order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the map has no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the map back into raw field definitions.
    ///
    /// Feeding the result to the validator yields this map again.
    pub fn to_raw(&self) -> RawFields {
        self.fields
            .iter()
            .map(|(name, rule)| (name.clone(), rule.to_raw()))
            .collect()
    }
}

impl FromIterator<(String, FieldRule)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldRule)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (name, rule) in iter {
            map.insert(name, rule);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, rule) in &self.fields {
            map.serialize_entry(name, rule)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field names to field rules")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = FieldMap::new();
                while let Some((name, rule)) = access.next_entry::<String, FieldRule>()? {
                    map.insert(name, rule);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

// ============================================================================
// Schemas
// ============================================================================

/// A named set of field rules.
///
/// The field map is fixed at construction; there is no API to alter it.
/// A different definition means a new schema under a different name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    name: String,
    fields: FieldMap,
}

/// Unchecked wire form of [`Schema`].
#[derive(Deserialize)]
struct SchemaDef {
    name: String,
    fields: FieldMap,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        Schema::new(def.name, def.fields)
    }
}

impl Schema {
    /// Create a schema, rejecting blank names and empty field maps.
    pub fn new(name: impl Into<String>, fields: FieldMap) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if fields.is_empty() {
            return Err(SchemaError::EmptyFields);
        }
        Ok(Self { name, fields })
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated field rules, in definition order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// Request to create a schema, as accepted from files or callers.
///
/// ```json
/// {
///   "schema_name": "Esports",
///   "fields": {
///     "nickname": {"type": "name", "format": "gamertag"},
///     "game": {"type": "game"},
///     "role": "role"
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRequest {
    /// Unique schema name
    #[serde(default)]
    pub schema_name: String,

    /// Raw field definitions
    #[serde(default)]
    pub fields: RawFields,
}

impl SchemaRequest {
    /// Load a request from a file; `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a request from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
