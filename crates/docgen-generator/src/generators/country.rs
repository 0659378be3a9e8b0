//! Country code generator.

use super::countries::{self, Country, COUNTRIES};
use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use docgen_core::{tags, GeneratedValue, Options};
use rand::seq::SliceRandom;
use rand::RngCore;

/// How a country is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryFormat {
    Alpha2,
    Alpha3,
    Name,
}

impl CountryFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "alpha2" => Some(Self::Alpha2),
            "alpha3" => Some(Self::Alpha3),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    pub fn render(self, country: &Country) -> &'static str {
        match self {
            Self::Alpha2 => country.alpha2,
            Self::Alpha3 => country.alpha3,
            Self::Name => country.name,
        }
    }
}

/// `country`: `format` alpha2 (default) | alpha3 | name, optional
/// `countries` allow-list of alpha-2 codes.
pub struct CountryType;

impl FieldType for CountryType {
    fn tag(&self) -> &'static str {
        tags::COUNTRY
    }

    fn generate(
        &self,
        options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);
        let raw = opts.str("format", "alpha2")?;
        let format = CountryFormat::parse(raw)
            .ok_or_else(|| opts.invalid("format", format!("unsupported country format '{raw}'")))?;

        let country = match opts.opt_str_list("countries")? {
            Some(allowed) => {
                let code = allowed
                    .choose(rng)
                    .ok_or_else(|| opts.invalid("countries", "allow-list is empty"))?
                    .trim()
                    .to_uppercase();
                countries::by_alpha2(&code).ok_or_else(|| {
                    opts.invalid("countries", format!("unknown alpha-2 code '{code}'"))
                })?
            }
            None => COUNTRIES
                .choose(rng)
                .ok_or_else(|| opts.invalid("countries", "country table is empty"))?,
        };

        Ok(GeneratedValue::from(format.render(country)))
    }
}
