//! Date of birth generator.

use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use chrono::{Datelike, Days, Months, NaiveDate};
use docgen_core::{tags, GeneratedValue, IndexFieldType, Options};
use rand::{Rng, RngCore};

pub const DEFAULT_MIN_AGE: i64 = 1;
pub const DEFAULT_MAX_AGE: i64 = 100;

/// Age in whole years on `today` for someone born on `birth`.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Generate a birth date whose age on `today` lies in `[min_age, max_age]`.
///
/// Every day of the eligible window is equally likely. Returns `None` if the
/// window falls outside the representable calendar.
pub fn generate_dob<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    min_age: u32,
    max_age: u32,
) -> Option<NaiveDate> {
    // Youngest: turned min_age today. Oldest: turns max_age + 1 tomorrow.
    let latest = today.checked_sub_months(Months::new(min_age.checked_mul(12)?))?;
    let earliest = today
        .checked_sub_months(Months::new(max_age.checked_add(1)?.checked_mul(12)?))?
        .succ_opt()?;

    let span = u64::try_from((latest - earliest).num_days()).ok()?;
    earliest.checked_add_days(Days::new(rng.gen_range(0..=span)))
}

/// `dob`: ISO date for an age between `min` and `max` years.
pub struct DobType;

impl FieldType for DobType {
    fn tag(&self) -> &'static str {
        tags::DOB
    }

    fn index_type(&self) -> IndexFieldType {
        IndexFieldType::Date
    }

    fn generate(
        &self,
        options: &Options,
        ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);
        let min = opts.int("min", DEFAULT_MIN_AGE)?;
        let max = opts.int("max", DEFAULT_MAX_AGE)?;

        let min = u32::try_from(min)
            .map_err(|_| opts.invalid("min", format!("age must not be negative, got {min}")))?;
        let max = u32::try_from(max)
            .map_err(|_| opts.invalid("max", format!("age must not be negative, got {max}")))?;
        if min > max {
            return Err(opts.invalid("min", format!("min {min} is greater than max {max}")));
        }

        let dob = generate_dob(rng, ctx.today, min, max)
            .ok_or_else(|| opts.invalid("max", format!("age {max} is out of range")))?;
        Ok(GeneratedValue::String(dob.format("%Y-%m-%d").to_string()))
    }
}
