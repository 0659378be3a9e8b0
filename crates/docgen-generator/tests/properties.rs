//! Behavioural tests for schema validation and document generation.

use chrono::{Datelike, NaiveDate};
use docgen_core::{Document, FieldMap, RawFields};
use docgen_generator::generators::countries;
use docgen_generator::{
    validate, DocumentGenerator, GameCatalog, GenerateError, Registry, SynthesisError,
};
use serde_json::json;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn raw(value: serde_json::Value) -> RawFields {
    value.as_object().cloned().unwrap()
}

fn fields(value: serde_json::Value) -> FieldMap {
    let registry = Registry::default();
    let outcome = validate(&raw(value), &registry);
    assert!(outcome.rejected_types.is_empty(), "rejected: {:?}", outcome.rejected_types);
    outcome.fields
}

fn generate(fields: FieldMap, count: u64, seed: u64) -> Vec<Document> {
    DocumentGenerator::new(Arc::new(Registry::default()), fields)
        .with_seed(seed)
        .with_today(today())
        .generate(count)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn age_on(birth: NaiveDate, day: NaiveDate) -> i32 {
    let mut age = day.year() - birth.year();
    if (day.month(), day.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[test]
fn test_integer_bounds() {
    let docs = generate(fields(json!({"id": {"type": "integer", "min": -5, "max": 5}})), 300, 1);
    for doc in docs {
        let id = doc.get("id").unwrap().as_i64().unwrap();
        assert!((-5..=5).contains(&id));
    }
}

#[test]
fn test_dob_ages() {
    let docs = generate(fields(json!({"dob": {"type": "dob", "min": 18, "max": 32}})), 300, 2);
    for doc in docs {
        let dob = NaiveDate::parse_from_str(doc.get("dob").unwrap().as_str().unwrap(), "%Y-%m-%d").unwrap();
        assert!((18..=32).contains(&age_on(dob, today())));
    }
}

#[test]
fn test_ip_visibility_and_version() {
    let docs = generate(
        fields(json!({
            "private": {"type": "ip", "version": 4, "visibility": "private"},
            "public": {"type": "ip", "visibility": "public"},
            "v6": {"type": "ip", "version": 6}
        })),
        200,
        3,
    );

    for doc in docs {
        let private: Ipv4Addr = doc.get("private").unwrap().as_str().unwrap().parse().unwrap();
        let public: Ipv4Addr = doc.get("public").unwrap().as_str().unwrap().parse().unwrap();
        let v6 = doc.get("v6").unwrap().as_str().unwrap();

        assert!(private.is_private());
        assert!(!public.is_private());
        assert!(v6.parse::<Ipv6Addr>().is_ok());
        assert!(v6.parse::<Ipv4Addr>().is_err());
    }
}

#[test]
fn test_country_allow_list() {
    let allowed = ["DE", "FR", "SE"];
    let docs = generate(
        fields(json!({
            "code": {"type": "country", "countries": ["de", "fr", "se"]},
            "long": {"type": "country", "format": "alpha3", "countries": ["de", "fr", "se"]},
            "label": {"type": "country", "format": "name", "countries": ["de", "fr", "se"]}
        })),
        100,
        4,
    );

    for doc in docs {
        let code = doc.get("code").unwrap().as_str().unwrap();
        assert!(allowed.contains(&code));

        let long = doc.get("long").unwrap().as_str().unwrap();
        assert!(allowed.iter().any(|c| countries::by_alpha2(c).unwrap().alpha3 == long));

        let label = doc.get("label").unwrap().as_str().unwrap();
        assert!(allowed.iter().any(|c| countries::by_alpha2(c).unwrap().name == label));
    }
}

#[test]
fn test_role_comes_from_selected_game() {
    let catalog = GameCatalog::default();
    let lol = catalog.get("league_of_legends").unwrap();
    let docs = generate(
        fields(json!({"game": {"type": "game", "option": "lol"}, "role": {"type": "role"}})),
        200,
        5,
    );

    for doc in docs {
        assert_eq!(doc.get("game").unwrap().as_str(), Some("league_of_legends"));
        let role = doc.get("role").unwrap().as_str().unwrap();
        assert!(lol.roles.iter().any(|r| r == role), "{role} is not a lol role");
    }
}

#[test]
fn test_role_without_game_fails() {
    let generator = DocumentGenerator::new(
        Arc::new(Registry::default()),
        fields(json!({"level": "integer", "role": {"type": "role"}})),
    );

    let results: Vec<_> = generator.generate(5).unwrap().collect();
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(GenerateError::Field { field, source }) => {
            assert_eq!(field, "role");
            assert!(matches!(source, SynthesisError::MissingDependency { .. }));
        }
        other => panic!("expected a missing dependency, got {other:?}"),
    }
}

#[test]
fn test_validation_idempotent() {
    let registry = Registry::default();
    let input = raw(json!({
        "nickname": {"type": "name", "format": "gamertag"},
        "id": "integer",
        "junk": {"type": "unknown"},
        "trophies": {"type": "trophies", "min": 1, "max": 20, "start_year": 2020}
    }));

    let once = validate(&input, &registry).fields;
    let twice = validate(&once.to_raw(), &registry).fields;
    assert_eq!(once, twice);
}

#[test]
fn test_bogus_type_rejected() {
    let outcome = validate(&raw(json!({"f": {"type": "bogus"}})), &Registry::default());
    assert!(outcome.fields.is_empty());
    assert_eq!(outcome.rejected_types, vec!["bogus"]);
}

#[test]
fn test_full_player_schema_batch() {
    let catalog = GameCatalog::default();
    let docs = generate(
        fields(json!({
            "nickname": {"type": "name", "format": "gamertag"},
            "name": {"type": "name", "format": "full"},
            "id": {"type": "integer", "min": 1, "max": 100000},
            "dob": {"type": "dob", "min": 18, "max": 32},
            "country_code": {"type": "country", "format": "alpha2"},
            "ip": {"type": "ip", "visibility": "public"},
            "game": {"type": "game"},
            "role": {"type": "role"},
            "org": {"type": "org"},
            "trophies": {"type": "trophies", "min": 1, "max": 20, "start_year": 2020}
        })),
        5,
        6,
    );

    assert_eq!(docs.len(), 5);
    for doc in &docs {
        assert_eq!(
            doc.field_names(),
            vec!["nickname", "name", "id", "dob", "country_code", "ip", "game", "role", "org", "trophies"]
        );

        let game = catalog.get(doc.get("game").unwrap().as_str().unwrap()).unwrap();
        assert!(game.roles.iter().any(|r| Some(r.as_str()) == doc.get("role").unwrap().as_str()));
        assert!(game.orgs.iter().any(|o| Some(o.as_str()) == doc.get("org").unwrap().as_str()));

        let trophies = doc.get("trophies").unwrap().as_array().unwrap();
        assert!((1..=20).contains(&trophies.len()));
        for trophy in trophies {
            let tournament = trophy.get("tournament").unwrap().as_str().unwrap();
            let (_, date) = tournament.rsplit_once(' ').unwrap();
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            assert!((2020..=2025).contains(&date.year()));
        }

        let json = doc.to_json();
        assert!(json["trophies"][0]["placement"].is_string());
    }
}

#[test]
fn test_seeded_batch_reproducible_and_resumable() {
    let fields = fields(json!({
        "nickname": {"type": "name", "format": "gamertag"},
        "game": "game",
        "trophies": {"type": "trophies", "amount": 3}
    }));
    let generator = DocumentGenerator::new(Arc::new(Registry::default()), fields)
        .with_seed(99)
        .with_today(today());

    let batch: Vec<Document> = generator.generate(6).unwrap().map(Result::unwrap).collect();
    let again: Vec<Document> = generator.generate(6).unwrap().map(Result::unwrap).collect();
    assert_eq!(batch, again);

    for k in 0..6 {
        let resumed = generator.generate_from(k, 1).unwrap().next().unwrap().unwrap();
        assert_eq!(resumed, batch[k as usize]);
    }
}

#[test]
fn test_unseeded_batches_still_valid() {
    let generator = DocumentGenerator::new(
        Arc::new(Registry::default()),
        fields(json!({"id": {"type": "integer", "min": 1, "max": 3}})),
    );
    let docs: Vec<Document> = generator.generate(20).unwrap().map(Result::unwrap).collect();
    assert_eq!(docs.len(), 20);
}

#[test]
fn test_oversized_trophy_count_is_an_error() {
    let generator = DocumentGenerator::new(
        Arc::new(Registry::default()),
        fields(json!({"game": "game", "trophies": {"type": "trophies", "amount": i64::MAX}})),
    )
    .with_seed(1);

    match generator.document_at(0) {
        Err(GenerateError::Field { field, source }) => {
            assert_eq!(field, "trophies");
            assert!(matches!(source, SynthesisError::InvalidOption { .. }));
        }
        other => panic!("expected an invalid option, got {other:?}"),
    }
}

#[test]
fn test_negative_trophy_min_fails_every_document() {
    let generator = DocumentGenerator::new(
        Arc::new(Registry::default()),
        fields(json!({"game": "game", "trophies": {"type": "trophies", "min": -5, "max": 2}})),
    );

    for seed in 0..100 {
        assert!(generator.clone().with_seed(seed).document_at(0).is_err());
    }
}
