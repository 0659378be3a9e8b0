//! Search-index bulk request bodies and index mappings.

use docgen_core::{FieldMap, IndexFieldType};
use docgen_generator::Registry;
use serde_json::{json, Map, Value};

/// Index used when none is given.
pub const DEFAULT_INDEX: &str = "pro_players";

/// Turn NDJSON documents into a bulk indexing body.
///
/// Every non-blank line becomes an `{"index":{"_index":<index>}}` action line
/// followed by the document line. The body ends with a newline.
pub fn build_bulk_body(ndjson: &str, index: &str) -> String {
    let action = json!({"index": {"_index": index}}).to_string();

    let mut body = String::with_capacity(ndjson.len() * 2);
    for line in ndjson.lines().map(str::trim).filter(|line| !line.is_empty()) {
        body.push_str(&action);
        body.push('\n');
        body.push_str(line);
        body.push('\n');
    }
    if body.is_empty() {
        body.push('\n');
    }
    body
}

/// Index settings and mappings for documents generated from `fields`.
///
/// Each field maps to the index type its field type reports. Nested fields
/// (trophies) get keyword `tournament` and `placement` properties. Fields
/// whose type is not registered fall back to keyword.
pub fn index_mapping(fields: &FieldMap, registry: &Registry) -> Value {
    let mut properties = Map::new();

    for (name, rule) in fields.iter() {
        let index_type = registry
            .get(&rule.field_type)
            .map(|field_type| field_type.index_type())
            .unwrap_or_default();

        let mut property = json!({"type": index_type.as_str()});
        if index_type == IndexFieldType::Nested {
            property["properties"] = json!({
                "tournament": {"type": "keyword"},
                "placement": {"type": "keyword"},
            });
        }
        properties.insert(name.to_string(), property);
    }

    json!({
        "settings": {"number_of_shards": 1, "number_of_replicas": 0},
        "mappings": {"properties": properties},
    })
}
