//! Command-line interface for docgen
//!
//! # Usage Examples
//!
//! ## Schemas
//! ```bash
//! # Validate a schema file and print the normalized fields
//! docgen validate --schema esports.json
//!
//! # Store it under its schema_name, then inspect the store
//! docgen schema create --schema esports.json
//! docgen schema list
//! docgen schema show Esports
//! ```
//!
//! ## Documents
//! ```bash
//! # Five documents as a JSON array
//! docgen generate --name Esports --count 5
//!
//! # Reproducible NDJSON into a file
//! docgen generate --schema esports.yaml --count 10000 --format ndjson --seed 42 -o players.ndjson
//!
//! # Bulk indexing body and the matching index mapping
//! docgen bulk --name Esports --count 500 --index pro_players
//! docgen mapping --name Esports
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use docgen::{init_logging, load_fields, load_registry, GlobalOpts, SchemaSource};
use docgen_core::{FieldMap, SchemaRequest};
use docgen_export::{
    build_bulk_body, index_mapping, DocumentWriter, ExportMetrics, OutputArgs, OutputFormat,
    DEFAULT_INDEX,
};
use docgen_generator::{validate, DocumentGenerator, Registry};
use docgen_store::{create_schema, SchemaStore};
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(about = "Generate synthetic JSON documents from typed field schemas")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema file and print the normalized fields
    Validate {
        /// Schema request file (JSON or YAML)
        #[arg(long, short = 's')]
        schema: PathBuf,
    },

    /// Manage stored schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },

    /// Generate documents
    Generate {
        #[command(flatten)]
        source: SchemaSource,

        #[command(flatten)]
        output: OutputArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "array")]
        format: OutputFormat,
    },

    /// Generate documents as a bulk indexing body
    Bulk {
        #[command(flatten)]
        source: SchemaSource,

        #[command(flatten)]
        output: OutputArgs,

        /// Target index name
        #[arg(long, default_value = DEFAULT_INDEX)]
        index: String,
    },

    /// Print index settings and mappings for a schema
    Mapping {
        #[command(flatten)]
        source: SchemaSource,
    },
}

#[derive(Subcommand)]
enum SchemaCommand {
    /// Validate a schema file and store it under its schema_name
    Create {
        /// Schema request file (JSON or YAML)
        #[arg(long, short = 's')]
        schema: PathBuf,
    },

    /// Print a stored schema
    Show {
        /// Schema name
        name: String,
    },

    /// List stored schema names
    List,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.log_format);

    let registry = Arc::new(load_registry(cli.global.games.as_deref())?);
    let store = cli.global.store();

    match cli.command {
        Commands::Validate { schema } => {
            let request = SchemaRequest::from_file(&schema)
                .with_context(|| format!("Failed to load schema from {schema:?}"))?;
            let outcome = validate(&request.fields, &registry);

            let report = json!({
                "schema_name": &request.schema_name,
                "fields": &outcome.fields,
                "rejected_types": &outcome.rejected_types,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);

            outcome
                .into_result(&registry)
                .with_context(|| format!("Schema {schema:?} is invalid"))?;
        }
        Commands::Schema { command } => run_schema(command, &store, &registry)?,
        Commands::Generate {
            source,
            output,
            format,
        } => {
            let fields = load_fields(&source, &store, &registry)?;
            let generator = document_generator(registry, fields, &output);

            tracing::info!(
                "Generating {} documents as {:?} (seed={:?})",
                output.count,
                format,
                output.seed
            );
            let documents = generator.generate(output.count)?;
            let metrics = match &output.output {
                Some(path) => DocumentWriter::new(create_file(path)?, format).write_all(documents)?,
                None => DocumentWriter::new(std::io::stdout().lock(), format).write_all(documents)?,
            };
            log_metrics(&metrics);
        }
        Commands::Bulk {
            source,
            output,
            index,
        } => {
            let fields = load_fields(&source, &store, &registry)?;
            let generator = document_generator(registry, fields, &output);

            let mut ndjson = Vec::new();
            let metrics = DocumentWriter::new(&mut ndjson, OutputFormat::Ndjson)
                .write_all(generator.generate(output.count)?)?;
            let ndjson = String::from_utf8(ndjson).context("Generated output is not UTF-8")?;
            let body = build_bulk_body(&ndjson, &index);

            match &output.output {
                Some(path) => create_file(path)?.write_all(body.as_bytes())?,
                None => std::io::stdout().lock().write_all(body.as_bytes())?,
            }
            tracing::info!(
                "Wrote bulk body for {} documents to index '{}'",
                metrics.documents_written,
                index
            );
        }
        Commands::Mapping { source } => {
            let fields = load_fields(&source, &store, &registry)?;
            let mapping = index_mapping(&fields, &registry);
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
    }

    Ok(())
}

fn run_schema(command: SchemaCommand, store: &dyn SchemaStore, registry: &Registry) -> anyhow::Result<()> {
    match command {
        SchemaCommand::Create { schema } => {
            let request = SchemaRequest::from_file(&schema)
                .with_context(|| format!("Failed to load schema from {schema:?}"))?;
            let stored = create_schema(store, registry, &request)
                .with_context(|| format!("Failed to create schema '{}'", request.schema_name.trim()))?;

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "schema_name": stored.schema.name(),
                    "fields": stored.schema.fields(),
                }))?
            );
        }
        SchemaCommand::Show { name } => {
            let stored = store
                .get(&name)
                .with_context(|| format!("Failed to read schema '{name}'"))?
                .with_context(|| format!("schema '{name}' not found"))?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        SchemaCommand::List => {
            for name in store.list().context("Failed to list schemas")? {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn document_generator(
    registry: Arc<Registry>,
    fields: FieldMap,
    output: &OutputArgs,
) -> DocumentGenerator {
    let generator = DocumentGenerator::new(registry, fields);
    match output.seed {
        Some(seed) => generator.with_seed(seed),
        None => generator,
    }
}

fn create_file(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("Failed to create output file {path:?}"))
}

fn log_metrics(metrics: &ExportMetrics) {
    tracing::debug!(
        "Generation took {:?}, writing took {:?} ({:.0} bytes/sec)",
        metrics.generation_duration,
        metrics.write_duration,
        metrics.bytes_per_second()
    );
}
