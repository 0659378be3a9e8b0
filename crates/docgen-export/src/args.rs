//! CLI argument definitions for document output.

use clap::{Args, ValueEnum};
use docgen_generator::parse_count;
use serde_json::Value;
use std::path::PathBuf;

/// How a sequence of documents is rendered.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A single JSON array
    #[default]
    Array,
    /// One JSON document per line
    Ndjson,
}

/// Output arguments shared by the generating commands.
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Number of documents to generate
    #[arg(long, short = 'n', default_value = "10", value_parser = parse_count_arg)]
    pub count: u64,

    /// Random seed for reproducible output (same seed = same documents)
    #[arg(long, env = "DOCGEN_SEED")]
    pub seed: Option<u64>,
}

fn parse_count_arg(s: &str) -> Result<u64, String> {
    parse_count(&Value::String(s.to_string())).map_err(|e| e.to_string())
}
