//! Schema validation: normalizes raw field definitions into a [`FieldMap`].

use crate::registry::Registry;
use docgen_core::{FieldMap, FieldRule, RawFields, SchemaError};
use serde_json::Value;
use tracing::debug;

/// Result of validating a raw field map.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Normalized rules for every accepted field, in input order
    pub fields: FieldMap,
    /// Tags that were rejected, in input order
    pub rejected_types: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.rejected_types.is_empty()
    }

    pub fn into_parts(self) -> (FieldMap, Vec<String>) {
        (self.fields, self.rejected_types)
    }

    /// The normalized fields, or `UnknownTypes` listing what was rejected
    /// alongside the tags `registry` accepts.
    pub fn into_result(self, registry: &Registry) -> Result<FieldMap, SchemaError> {
        if self.rejected_types.is_empty() {
            return Ok(self.fields);
        }
        Err(SchemaError::UnknownTypes {
            allowed: registry.tags().into_iter().map(str::to_string).collect(),
            unknown: self.rejected_types,
        })
    }
}

/// Validate raw field definitions against the registry.
///
/// Each entry is either a bare tag (`"integer"`) or an object with a string
/// `type` plus options. Anything else, and any tag the registry does not know,
/// goes into `rejected_types`; validation never stops at the first bad field.
pub fn validate(raw: &RawFields, registry: &Registry) -> ValidationOutcome {
    let mut fields = FieldMap::new();
    let mut rejected_types = Vec::new();

    for (name, entry) in raw {
        match normalize(entry) {
            Ok(rule) if registry.contains(&rule.field_type) => {
                fields.insert(name.clone(), rule);
            }
            Ok(rule) => {
                debug!("Rejected field '{}' with unknown type '{}'", name, rule.field_type);
                rejected_types.push(rule.field_type);
            }
            Err(rendered) => {
                debug!("Rejected malformed field '{}': {}", name, rendered);
                rejected_types.push(rendered);
            }
        }
    }

    ValidationOutcome {
        fields,
        rejected_types,
    }
}

/// Expand one entry into a rule. On failure returns what to report as the
/// rejected type: the `type` value rendered as JSON, or the whole entry if it
/// is neither a string nor an object.
fn normalize(entry: &Value) -> Result<FieldRule, String> {
    match entry {
        Value::String(tag) => Ok(FieldRule::new(tag.as_str())),
        Value::Object(map) => match map.get("type") {
            Some(Value::String(tag)) => {
                let mut rule = FieldRule::new(tag.as_str());
                for (key, value) in map.iter().filter(|(key, _)| key.as_str() != "type") {
                    rule = rule.with_option(key.as_str(), value.clone());
                }
                Ok(rule)
            }
            Some(other) => Err(other.to_string()),
            None => Err(Value::Null.to_string()),
        },
        other => Err(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_shorthand_expands() {
        let registry = Registry::default();
        let outcome = validate(&raw(json!({"level": "integer"})), &registry);

        assert!(outcome.is_valid());
        assert_eq!(outcome.fields.get("level"), Some(&FieldRule::new("integer")));
    }

    #[test]
    fn test_options_kept_and_order_preserved() {
        let registry = Registry::default();
        let outcome = validate(
            &raw(json!({
                "username": {"type": "name", "format": "gamertag"},
                "game": {"type": "game", "option": "lol"},
                "role": "role",
                "level": {"type": "integer", "min": 1, "max": 9999}
            })),
            &registry,
        );

        assert!(outcome.is_valid());
        assert_eq!(outcome.fields.field_names(), vec!["username", "game", "role", "level"]);
        assert_eq!(
            outcome.fields.get("level"),
            Some(&FieldRule::new("integer").with_option("min", 1).with_option("max", 9999))
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let registry = Registry::default();
        let (fields, rejected) = validate(&raw(json!({"f": {"type": "bogus"}})), &registry).into_parts();

        assert!(fields.is_empty());
        assert_eq!(rejected, vec!["bogus"]);
    }

    #[test]
    fn test_collects_every_rejection_in_order() {
        let registry = Registry::default();
        let outcome = validate(
            &raw(json!({
                "a": "nope",
                "b": "integer",
                "c": {"type": "also_nope"},
                "d": {"min": 1},
                "e": 42
            })),
            &registry,
        );

        assert_eq!(outcome.fields.field_names(), vec!["b"]);
        assert_eq!(outcome.rejected_types, vec!["nope", "also_nope", "null", "42"]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let registry = Registry::default();
        let first = validate(
            &raw(json!({
                "name": "name",
                "country": {"type": "country", "countries": ["us", "de"]},
                "bad": "bogus",
                "trophies": {"type": "trophies", "amount": 2}
            })),
            &registry,
        );
        let second = validate(&first.fields.to_raw(), &registry);

        assert!(second.is_valid());
        assert_eq!(second.fields, first.fields);
    }

    #[test]
    fn test_into_result_lists_allowed_types() {
        let registry = Registry::default();
        let err = validate(&raw(json!({"x": "bogus"})), &registry)
            .into_result(&registry)
            .unwrap_err();

        match err {
            SchemaError::UnknownTypes { allowed, unknown } => {
                assert_eq!(unknown, vec!["bogus"]);
                assert!(allowed.contains(&"integer".to_string()));
                assert!(allowed.contains(&"trophies".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let fields = validate(&raw(json!({"x": "ip"})), &registry)
            .into_result(&registry)
            .unwrap();
        assert_eq!(fields.len(), 1);
    }
}
