//! Person name and gamertag generators.

use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use docgen_core::{tags, GeneratedValue, Options};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

const ADJECTIVES: &[&str] = &[
    "agile", "amber", "ancient", "arcane", "ashen", "blazing", "bold", "brave", "bright",
    "cosmic", "crimson", "cunning", "daring", "dark", "electric", "emerald", "fearless",
    "feral", "fierce", "frozen", "furious", "ghostly", "golden", "grim", "hidden", "hollow",
    "iron", "jade", "lone", "lucky", "mad", "mighty", "misty", "neon", "nimble", "noble",
    "obsidian", "phantom", "quick", "quiet", "rapid", "restless", "rogue", "rusty", "savage",
    "scarlet", "shadow", "silent", "silver", "sly", "solar", "stealthy", "stormy", "swift",
    "thundering", "toxic", "turbo", "twilight", "vicious", "violet", "wild", "wicked",
];

const NOUNS: &[&str] = &[
    "badger", "bandit", "basilisk", "bear", "blade", "cobra", "comet", "condor", "coyote",
    "dragon", "eagle", "falcon", "fang", "ferret", "fox", "gecko", "ghost", "golem", "griffin",
    "hawk", "hornet", "hydra", "jackal", "jaguar", "kraken", "lynx", "mamba", "mantis",
    "marauder", "mongoose", "nomad", "ocelot", "oracle", "otter", "owl", "panther", "phoenix",
    "pirate", "puma", "raven", "reaper", "rhino", "ronin", "samurai", "scorpion", "shark",
    "sparrow", "spectre", "sphinx", "stallion", "tiger", "titan", "viper", "vulture", "walrus",
    "warden", "wasp", "wizard", "wolf", "wolverine", "wraith", "yeti",
];

/// Formats accepted by the `name` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFormat {
    Full,
    First,
    Last,
    Gamertag,
}

impl NameFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Self::Full),
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            "gamertag" => Some(Self::Gamertag),
            _ => None,
        }
    }
}

pub fn generate_first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut rng = rng;
    FirstName().fake_with_rng(&mut rng)
}

pub fn generate_last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut rng = rng;
    LastName().fake_with_rng(&mut rng)
}

/// Generate a capitalized slug-like handle, e.g. `Crimson-falcon` or
/// `Swift-otter417`. Half of the handles get a 1-999 suffix.
pub fn generate_gamertag<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("swift");
    let noun = NOUNS.choose(rng).copied().unwrap_or("fox");

    let mut tag = capitalize(&format!("{adjective}-{noun}"));
    if rng.gen_bool(0.5) {
        tag.push_str(&rng.gen_range(1..=999).to_string());
    }
    tag
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn generate_name<R: Rng + ?Sized>(rng: &mut R, format: NameFormat) -> String {
    match format {
        NameFormat::First => generate_first_name(rng),
        NameFormat::Last => generate_last_name(rng),
        NameFormat::Full => {
            let first = generate_first_name(rng);
            let last = generate_last_name(rng);
            format!("{first} {last}")
        }
        NameFormat::Gamertag => generate_gamertag(rng),
    }
}

/// `name`: `format` = full (default) | first | last | gamertag.
pub struct NameType;

impl FieldType for NameType {
    fn tag(&self) -> &'static str {
        tags::NAME
    }

    fn generate(
        &self,
        options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);
        let raw = opts.str("format", "full")?;
        let format = NameFormat::parse(raw)
            .ok_or_else(|| opts.invalid("format", format!("unsupported name format '{raw}'")))?;

        Ok(GeneratedValue::String(generate_name(rng, format)))
    }
}

/// `gamertag`: shorthand for `name` with `format: gamertag`.
pub struct GamertagType;

impl FieldType for GamertagType {
    fn tag(&self) -> &'static str {
        tags::GAMERTAG
    }

    fn generate(
        &self,
        _options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        Ok(GeneratedValue::String(generate_gamertag(rng)))
    }
}
