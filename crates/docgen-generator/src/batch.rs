//! Batch driver producing many independent documents.

use crate::error::GenerateError;
use crate::registry::Registry;
use crate::synthesizer::synthesize_document;
use chrono::{NaiveDate, Utc};
use docgen_core::{Document, FieldMap};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Progress is logged every this many documents.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Produces documents for one validated field map.
///
/// Every document gets its own RNG. With a seed, the RNG for document `i`
/// is derived from the seed and `i`, so a batch is reproducible and can be
/// resumed at any index; without one, each RNG is seeded from OS entropy.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    registry: Arc<Registry>,
    fields: FieldMap,
    seed: Option<u64>,
    today: Option<NaiveDate>,
}

impl DocumentGenerator {
    pub fn new(registry: Arc<Registry>, fields: FieldMap) -> Self {
        Self {
            registry,
            fields,
            seed: None,
            today: None,
        }
    }

    /// Make generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pin the evaluation date used for ages and year ranges.
    /// Defaults to the current UTC date at generation time.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng_for_index(&self, index: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate the document at position `index` of the batch.
    pub fn document_at(&self, index: u64) -> Result<Document, GenerateError> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let mut rng = self.rng_for_index(index);
        synthesize_document(&self.registry, &self.fields, today, &mut rng)
    }

    /// Lazily generate `count` documents starting at index 0.
    pub fn generate(&self, count: u64) -> Result<DocumentBatch, GenerateError> {
        self.generate_from(0, count)
    }

    /// Lazily generate `count` documents starting at index `start`.
    pub fn generate_from(&self, start: u64, count: u64) -> Result<DocumentBatch, GenerateError> {
        if count == 0 {
            return Err(GenerateError::InvalidCount(count.to_string()));
        }
        let end = start
            .checked_add(count)
            .ok_or_else(|| GenerateError::InvalidCount(count.to_string()))?;

        debug!("Generating {} documents starting at index {}", count, start);
        Ok(DocumentBatch {
            generator: self.clone(),
            next: start,
            end,
            generated: 0,
            failed: false,
        })
    }
}

/// Iterator over a batch of documents.
///
/// Yields at most one error: after a failed document the batch ends.
pub struct DocumentBatch {
    generator: DocumentGenerator,
    next: u64,
    end: u64,
    generated: u64,
    failed: bool,
}

impl DocumentBatch {
    /// Index of the next document to be generated.
    pub fn next_index(&self) -> u64 {
        self.next
    }
}

impl Iterator for DocumentBatch {
    type Item = Result<Document, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.end {
            return None;
        }

        let result = self.generator.document_at(self.next);
        self.next += 1;

        match &result {
            Ok(_) => {
                self.generated += 1;
                if self.generated % PROGRESS_INTERVAL == 0 {
                    debug!("Generated {} documents", self.generated);
                }
            }
            Err(e) => {
                debug!("Document {} failed, stopping batch: {}", self.next - 1, e);
                self.failed = true;
            }
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = usize::try_from(self.end - self.next).ok();
        (0, remaining)
    }
}

/// Parse a requested batch size from JSON.
///
/// Accepts positive integers and strings holding one, e.g. `5` or `"5"`.
pub fn parse_count(value: &Value) -> Result<u64, GenerateError> {
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count
        .filter(|&c| c > 0)
        .ok_or_else(|| GenerateError::InvalidCount(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_core::FieldRule;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn player_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("username", FieldRule::new("name").with_option("format", "gamertag"));
        fields.insert("game", FieldRule::new("game"));
        fields.insert("role", FieldRule::new("role"));
        fields.insert("level", FieldRule::new("integer").with_option("min", 1).with_option("max", 9999));
        fields
    }

    fn generator() -> DocumentGenerator {
        DocumentGenerator::new(Arc::new(Registry::default()), player_fields()).with_today(today())
    }

    #[test]
    fn test_generate_exact_count() {
        let docs: Vec<Document> = generator()
            .generate(5)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(docs.len(), 5);
        for doc in &docs {
            assert_eq!(doc.field_names(), vec!["username", "game", "role", "level"]);
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        assert_eq!(
            generator().generate(0).err(),
            Some(GenerateError::InvalidCount("0".to_string()))
        );
    }

    #[test]
    fn test_seeded_batches_are_reproducible() {
        let generator = generator().with_seed(42);
        let first: Vec<_> = generator.generate(10).unwrap().collect();
        let second: Vec<_> = generator.generate(10).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resume_matches_full_batch() {
        let generator = generator().with_seed(7);
        let full: Vec<Document> = generator.generate(8).unwrap().map(Result::unwrap).collect();

        let resumed: Vec<Document> = generator.generate_from(5, 3).unwrap().map(Result::unwrap).collect();
        assert_eq!(resumed, full[5..]);
        assert_eq!(generator.document_at(2).unwrap(), full[2]);
    }

    #[test]
    fn test_documents_differ_within_batch() {
        let docs: Vec<Document> = generator()
            .with_seed(1)
            .generate(20)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert!(docs.iter().any(|d| d != &docs[0]));
    }

    #[test]
    fn test_failure_ends_batch() {
        let mut fields = FieldMap::new();
        fields.insert("role", FieldRule::new("role"));
        let generator = DocumentGenerator::new(Arc::new(Registry::default()), fields);

        let mut batch = generator.generate(3).unwrap();
        assert!(matches!(batch.next(), Some(Err(GenerateError::Field { .. }))));
        assert!(batch.next().is_none());
        assert_eq!(batch.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_size_hint_counts_down() {
        let mut batch = generator().generate(3).unwrap();
        assert_eq!(batch.size_hint(), (0, Some(3)));
        batch.next();
        assert_eq!(batch.size_hint(), (0, Some(2)));
        assert_eq!(batch.next_index(), 1);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&json!(5)).unwrap(), 5);
        assert_eq!(parse_count(&json!("12")).unwrap(), 12);

        for bad in [json!(0), json!(-3), json!("abc"), json!(2.5), json!(null), json!([1])] {
            assert!(matches!(parse_count(&bad), Err(GenerateError::InvalidCount(_))));
        }
    }
}
