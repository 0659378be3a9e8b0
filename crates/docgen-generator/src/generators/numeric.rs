//! Numeric value generators.

use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use docgen_core::{tags, GeneratedValue, IndexFieldType, Options};
use rand::{Rng, RngCore};

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 50_000;

/// Generate a random integer in the given range (inclusive).
///
/// Returns `None` when `min > max`.
pub fn generate_int_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Option<i64> {
    (min <= max).then(|| rng.gen_range(min..=max))
}

/// `integer`: uniform integer in `[min, max]`.
pub struct IntegerType;

impl FieldType for IntegerType {
    fn tag(&self) -> &'static str {
        tags::INTEGER
    }

    fn index_type(&self) -> IndexFieldType {
        IndexFieldType::Integer
    }

    fn generate(
        &self,
        options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);
        let min = opts.int("min", DEFAULT_MIN)?;
        let max = opts.int("max", DEFAULT_MAX)?;

        generate_int_range(rng, min, max)
            .map(GeneratedValue::Int64)
            .ok_or_else(|| opts.invalid("min", format!("min {min} is greater than max {max}")))
    }
}
