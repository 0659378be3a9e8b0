//! Value representations for generated documents.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single synthesized value.
///
/// Objects keep their keys in insertion order so rendered documents are
/// stable across runs with the same seed.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    /// 64-bit signed integer
    Int64(i64),

    /// String value (names, ISO dates, addresses, codes, ...)
    String(String),

    /// Array of values
    Array(Vec<GeneratedValue>),

    /// Ordered object
    Object(Vec<(String, GeneratedValue)>),
}

impl GeneratedValue {
    /// Build an object value from key/value pairs.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, GeneratedValue)>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[GeneratedValue]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Look up a key when this value is an object.
    pub fn get(&self, key: &str) -> Option<&GeneratedValue> {
        match self {
            Self::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convert into a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int64(i) => serde_json::Value::from(*i),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(arr) => serde_json::Value::Array(arr.iter().map(Self::to_json).collect()),
            Self::Object(pairs) => serde_json::Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl Serialize for GeneratedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Int64(i) => serializer.serialize_i64(*i),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(pairs) => serialize_pairs(pairs, serializer),
        }
    }
}

fn serialize_pairs<S>(pairs: &[(String, GeneratedValue)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// One generated record.
///
/// Fields appear in the order of the field map that produced the document.
/// Documents are immutable; they are assembled through [`DocumentBuilder`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, GeneratedValue)>,
}

impl Document {
    /// Start building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate over fields in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in generation order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_pairs(&self.fields, serializer)
    }
}

/// Builder for [`Document`].
///
/// Also serves as the in-progress document that dependent field types
/// read from while a document is being synthesized.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    fields: Vec<(String, GeneratedValue)>,
}

impl DocumentBuilder {
    /// Add a field to the document.
    pub fn field(mut self, name: impl Into<String>, value: GeneratedValue) -> Self {
        self.push(name, value);
        self
    }

    /// Add a field in place. An existing field of the same name is overwritten.
    pub fn push(&mut self, name: impl Into<String>, value: GeneratedValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a value already placed in the document.
    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of fields placed so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the document.
    pub fn build(self) -> Document {
        Document {
            fields: self.fields,
        }
    }
}
