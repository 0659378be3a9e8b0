//! Single-document synthesis.

use crate::error::{GenerateError, SynthesisError};
use crate::registry::{Registry, SynthesisContext};
use chrono::NaiveDate;
use docgen_core::{Document, DocumentBuilder, FieldMap};
use rand::RngCore;
use std::collections::HashMap;

/// Generate one document from a validated field map.
///
/// Fields are produced in map order. A dependent type reads the value of the
/// most recent earlier field whose type it depends on; if there is none it
/// fails with `MissingDependency`. The first failing field aborts the whole
/// document.
pub fn synthesize_document(
    registry: &Registry,
    fields: &FieldMap,
    today: NaiveDate,
    rng: &mut dyn RngCore,
) -> Result<Document, GenerateError> {
    let mut document = DocumentBuilder::default();
    // Latest field name generated for each provider tag
    let mut providers: HashMap<&'static str, &str> = HashMap::new();

    for (name, rule) in fields.iter() {
        let field_error = |source: SynthesisError| GenerateError::Field {
            field: name.to_string(),
            source,
        };

        let field_type = registry
            .get(&rule.field_type)
            .ok_or_else(|| field_error(SynthesisError::UnknownType(rule.field_type.clone())))?;

        let dependency = field_type
            .depends_on()
            .and_then(|tag| providers.get(tag).copied());
        let ctx = SynthesisContext::new(&document, today).with_dependency(dependency);

        let value = field_type
            .generate(&rule.options, &ctx, rng)
            .map_err(field_error)?;

        providers.insert(field_type.tag(), name);
        document.push(name, value);
    }

    Ok(document.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GameCatalog;
    use docgen_core::{FieldRule, GeneratedValue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_document_follows_field_order() {
        let registry = Registry::default();
        let fields: FieldMap = [
            ("username", FieldRule::new("name").with_option("format", "gamertag")),
            ("level", FieldRule::new("integer").with_option("max", 10)),
            ("country", FieldRule::new("country")),
        ]
        .into_iter()
        .map(|(name, rule)| (name.to_string(), rule))
        .collect();

        let mut rng = StdRng::seed_from_u64(42);
        let document = synthesize_document(&registry, &fields, today(), &mut rng).unwrap();

        assert_eq!(document.field_names(), vec!["username", "level", "country"]);
        assert!((1..=10).contains(&document.get("level").unwrap().as_i64().unwrap()));
    }

    #[test]
    fn test_role_uses_prior_game() {
        let registry = Registry::default();
        let catalog = GameCatalog::default();
        let lol_roles = &catalog.get("league_of_legends").unwrap().roles;

        let mut fields = FieldMap::new();
        fields.insert("title", FieldRule::new("game").with_option("option", "lol"));
        fields.insert("role", FieldRule::new("role"));

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let document = synthesize_document(&registry, &fields, today(), &mut rng).unwrap();
            assert_eq!(document.get("title").unwrap().as_str(), Some("league_of_legends"));
            let role = document.get("role").unwrap().as_str().unwrap();
            assert!(lol_roles.iter().any(|r| r == role), "{role} is not a lol role");
        }
    }

    #[test]
    fn test_dependents_use_most_recent_game() {
        let registry = Registry::default();
        let catalog = GameCatalog::default();
        let cs2_orgs = &catalog.get("cs2").unwrap().orgs;

        let mut fields = FieldMap::new();
        fields.insert("first", FieldRule::new("game").with_option("option", "lol"));
        fields.insert("second", FieldRule::new("game").with_option("option", "cs2"));
        fields.insert("org", FieldRule::new("org"));

        let mut rng = StdRng::seed_from_u64(3);
        let document = synthesize_document(&registry, &fields, today(), &mut rng).unwrap();
        let org = document.get("org").unwrap().as_str().unwrap();
        assert!(cs2_orgs.iter().any(|o| o == org));
    }

    #[test]
    fn test_missing_dependency_names_field() {
        let registry = Registry::default();
        let mut fields = FieldMap::new();
        fields.insert("level", FieldRule::new("integer"));
        fields.insert("role", FieldRule::new("role"));
        fields.insert("game", FieldRule::new("game"));

        let mut rng = StdRng::seed_from_u64(42);
        let err = synthesize_document(&registry, &fields, today(), &mut rng).unwrap_err();

        assert_eq!(
            err,
            GenerateError::Field {
                field: "role".to_string(),
                source: SynthesisError::MissingDependency {
                    tag: "role".to_string(),
                    depends_on: "game".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_unregistered_type_fails() {
        let registry = Registry::default();
        let mut fields = FieldMap::new();
        fields.insert("x", FieldRule::new("bogus"));

        let mut rng = StdRng::seed_from_u64(42);
        let err = synthesize_document(&registry, &fields, today(), &mut rng).unwrap_err();
        assert_eq!(
            err.synthesis_error(),
            Some(&SynthesisError::UnknownType("bogus".to_string()))
        );
    }

    #[test]
    fn test_trophies_produce_objects() {
        let registry = Registry::default();
        let mut fields = FieldMap::new();
        fields.insert("game", FieldRule::new("game"));
        fields.insert("trophies", FieldRule::new("trophies").with_option("amount", 2));

        let mut rng = StdRng::seed_from_u64(42);
        let document = synthesize_document(&registry, &fields, today(), &mut rng).unwrap();
        let trophies = document.get("trophies").unwrap().as_array().unwrap();

        assert_eq!(trophies.len(), 2);
        assert!(matches!(trophies[0], GeneratedValue::Object(_)));
    }
}
