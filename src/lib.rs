//! docgen library
//!
//! Shared plumbing for the `docgen` command-line tool: option groups,
//! logging setup and the steps that turn CLI input into a registry and a
//! validated field map.
//!
//! # CLI Usage
//!
//! ```bash
//! # Check a schema file without storing it
//! docgen validate --schema esports.yaml
//!
//! # Store a schema, then generate from it by name
//! docgen schema create --schema esports.yaml
//! docgen generate --name Esports --count 100 --format ndjson --seed 42
//!
//! # Bulk body and index mapping for a search index
//! docgen bulk --name Esports --count 500 --index pro_players -o bulk.ndjson
//! docgen mapping --name Esports
//! ```

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use docgen_core::{FieldMap, SchemaRequest};
use docgen_generator::{validate, GameCatalog, Registry};
use docgen_store::{FilesystemStore, SchemaStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Options available to every subcommand.
#[derive(Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Directory holding stored schemas
    #[arg(long, global = true, default_value = ".docgen-schemas", env = "DOCGEN_STORE_DIR")]
    pub store_dir: PathBuf,

    /// Extra game catalog (JSON or YAML) merged over the built-in games
    #[arg(long, global = true, env = "DOCGEN_GAMES")]
    pub games: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text", env = "LOG_FORMAT")]
    pub log_format: LogFormat,
}

impl GlobalOpts {
    pub fn store(&self) -> FilesystemStore {
        FilesystemStore::new(&self.store_dir)
    }
}

/// Where the field definitions for a command come from.
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct SchemaSource {
    /// Schema request file (JSON or YAML)
    #[arg(long, short = 's')]
    pub schema: Option<PathBuf>,

    /// Name of a stored schema
    #[arg(long)]
    pub name: Option<String>,
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so generated documents can be piped from stdout.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Build the field type registry, merging an optional game catalog file.
pub fn load_registry(games: Option<&Path>) -> anyhow::Result<Registry> {
    let mut catalog = GameCatalog::default();
    if let Some(path) = games {
        let extra = GameCatalog::from_file(path)
            .with_context(|| format!("Failed to load game catalog from {path:?}"))?;
        tracing::info!("Loaded {} games from {:?}", extra.len(), path);
        catalog.merge(extra);
    }
    Ok(Registry::with_games(catalog))
}

/// Validate the fields of a schema request, failing on any unknown type.
pub fn fields_from_request(request: &SchemaRequest, registry: &Registry) -> anyhow::Result<FieldMap> {
    if request.fields.is_empty() {
        bail!("fields must be a non-empty map");
    }
    let fields = validate(&request.fields, registry).into_result(registry)?;
    Ok(fields)
}

/// Resolve the field map for a command from a file or the schema store.
pub fn load_fields(
    source: &SchemaSource,
    store: &dyn SchemaStore,
    registry: &Registry,
) -> anyhow::Result<FieldMap> {
    match (&source.schema, &source.name) {
        (Some(path), _) => {
            let request = SchemaRequest::from_file(path)
                .with_context(|| format!("Failed to load schema from {path:?}"))?;
            fields_from_request(&request, registry)
                .with_context(|| format!("Invalid schema in {path:?}"))
        }
        (None, Some(name)) => {
            let stored = store
                .get(name)
                .with_context(|| format!("Failed to read schema '{name}'"))?
                .with_context(|| format!("schema '{name}' not found"))?;
            Ok(stored.schema.fields().clone())
        }
        (None, None) => bail!("either --schema or --name is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_store::MemoryStore;

    #[test]
    fn test_fields_from_request() {
        let registry = Registry::default();
        let request = SchemaRequest::from_json(
            r#"{"schema_name": "s", "fields": {"id": "integer", "game": {"type": "game"}}}"#,
        )
        .unwrap();
        let fields = fields_from_request(&request, &registry).unwrap();
        assert_eq!(fields.field_names(), vec!["id", "game"]);

        let bad = SchemaRequest::from_json(r#"{"fields": {"x": "bogus"}}"#).unwrap();
        let err = fields_from_request(&bad, &registry).unwrap_err();
        assert!(format!("{err:#}").contains("bogus"));

        let empty = SchemaRequest::from_json(r#"{"schema_name": "s"}"#).unwrap();
        assert!(fields_from_request(&empty, &registry).is_err());
    }

    #[test]
    fn test_load_fields_from_store() {
        let registry = Registry::default();
        let store = MemoryStore::new();
        let request =
            SchemaRequest::from_json(r#"{"schema_name": "players", "fields": {"ip": "ip"}}"#).unwrap();
        docgen_store::create_schema(&store, &registry, &request).unwrap();

        let source = SchemaSource {
            schema: None,
            name: Some("players".to_string()),
        };
        let fields = load_fields(&source, &store, &registry).unwrap();
        assert_eq!(fields.field_names(), vec!["ip"]);

        let missing = SchemaSource {
            schema: None,
            name: Some("nobody".to_string()),
        };
        let err = load_fields(&missing, &store, &registry).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_registry_without_catalog() {
        let registry = load_registry(None).unwrap();
        assert!(registry.contains("trophies"));
    }
}
