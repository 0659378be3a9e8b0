//! Esports types: `game` and the types that read a prior `game` value.

use crate::catalog::{GameCatalog, GameTables};
use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use chrono::{Datelike, Days, NaiveDate};
use docgen_core::{tags, GeneratedValue, IndexFieldType, Options};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Placement vocabulary for trophy entries.
pub const PLACEMENTS: &[&str] = &["Winner", "Runner-up", "3rd-4th", "Top 8", "Top 16"];

pub const DEFAULT_START_YEAR: i64 = 2012;
pub const DEFAULT_MIN_TROPHIES: i64 = 1;
pub const DEFAULT_MAX_TROPHIES: i64 = 10;
/// Upper bound on trophies per document.
pub const MAX_TROPHIES: i64 = 10_000;

/// `game`: a catalog key, either the one named by `option` or a random one.
pub struct GameType {
    games: Arc<GameCatalog>,
}

impl GameType {
    pub fn new(games: Arc<GameCatalog>) -> Self {
        Self { games }
    }
}

impl FieldType for GameType {
    fn tag(&self) -> &'static str {
        tags::GAME
    }

    fn generate(
        &self,
        options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);

        let key = match opts.opt_str("option")? {
            Some(option) => self.games.resolve(option).ok_or_else(|| {
                opts.invalid(
                    "option",
                    format!(
                        "unknown game '{option}', expected one of {}",
                        self.games.keys().join(", ")
                    ),
                )
            })?,
            None => *self
                .games
                .keys()
                .choose(rng)
                .ok_or_else(|| opts.invalid("option", "game catalog is empty"))?,
        };

        Ok(GeneratedValue::from(key))
    }
}

/// Resolve the game tables for the dependency value of `tag`.
fn tables_for<'a>(
    games: &'a GameCatalog,
    tag: &'static str,
    ctx: &SynthesisContext<'_>,
) -> Result<&'a GameTables, SynthesisError> {
    let value = ctx.dependency_value(tag, tags::GAME)?;
    let game = value
        .as_str()
        .ok_or_else(|| SynthesisError::invalid_option(tag, tags::GAME, "game value is not a string"))?;
    games
        .get(game)
        .ok_or_else(|| SynthesisError::invalid_option(tag, tags::GAME, format!("unknown game '{game}'")))
}

fn roles_of(tables: &GameTables) -> &[String] {
    &tables.roles
}

fn orgs_of(tables: &GameTables) -> &[String] {
    &tables.orgs
}

/// `role` and `org`: `custom` verbatim, else a random entry from the
/// corresponding list of the prior game.
pub struct GameListType {
    tag: &'static str,
    select: fn(&GameTables) -> &[String],
    games: Arc<GameCatalog>,
}

impl GameListType {
    pub fn roles(games: Arc<GameCatalog>) -> Self {
        Self {
            tag: tags::ROLE,
            select: roles_of,
            games,
        }
    }

    pub fn orgs(games: Arc<GameCatalog>) -> Self {
        Self {
            tag: tags::ORG,
            select: orgs_of,
            games,
        }
    }
}

impl FieldType for GameListType {
    fn tag(&self) -> &'static str {
        self.tag
    }

    fn depends_on(&self) -> Option<&'static str> {
        Some(tags::GAME)
    }

    fn generate(
        &self,
        options: &Options,
        ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let tables = tables_for(&self.games, self.tag, ctx)?;

        let opts = OptionReader::new(self.tag, options);
        if let Some(custom) = opts.opt_str("custom")? {
            return Ok(GeneratedValue::from(custom));
        }

        (self.select)(tables)
            .choose(rng)
            .map(|item| GeneratedValue::from(item.as_str()))
            .ok_or_else(|| opts.invalid("game", format!("no {} entries for this game", self.tag)))
    }
}

/// Uniform date between Jan 1 of `start_year` and Dec 31 of `end_year`.
pub fn generate_date_between_years<R: Rng + ?Sized>(
    rng: &mut R,
    start_year: i32,
    end_year: i32,
) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?;
    let span = u64::try_from((end - start).num_days()).ok()?;
    start.checked_add_days(Days::new(rng.gen_range(0..=span)))
}

/// `trophies`: list of `{tournament, placement}` objects for the prior game.
pub struct TrophiesType {
    games: Arc<GameCatalog>,
}

impl TrophiesType {
    pub fn new(games: Arc<GameCatalog>) -> Self {
        Self { games }
    }

    fn amount<R: Rng + ?Sized>(opts: &OptionReader<'_>, rng: &mut R) -> Result<usize, SynthesisError> {
        let amount = match opts.opt_int("amount")? {
            Some(amount) => {
                check_trophy_count(opts, "amount", amount)?;
                amount
            }
            None => {
                let min = opts.int("min", DEFAULT_MIN_TROPHIES)?;
                let max = opts.int("max", DEFAULT_MAX_TROPHIES)?;
                check_trophy_count(opts, "min", min)?;
                check_trophy_count(opts, "max", max)?;
                if min > max {
                    return Err(opts.invalid("min", format!("min {min} is greater than max {max}")));
                }
                rng.gen_range(min..=max)
            }
        };
        usize::try_from(amount)
            .map_err(|_| opts.invalid("amount", format!("trophy count must not be negative, got {amount}")))
    }
}

fn check_trophy_count(opts: &OptionReader<'_>, option: &str, count: i64) -> Result<(), SynthesisError> {
    if !(0..=MAX_TROPHIES).contains(&count) {
        return Err(opts.invalid(
            option,
            format!("trophy count must be between 0 and {MAX_TROPHIES}, got {count}"),
        ));
    }
    Ok(())
}

impl FieldType for TrophiesType {
    fn tag(&self) -> &'static str {
        tags::TROPHIES
    }

    fn depends_on(&self) -> Option<&'static str> {
        Some(tags::GAME)
    }

    fn index_type(&self) -> IndexFieldType {
        IndexFieldType::Nested
    }

    fn generate(
        &self,
        options: &Options,
        ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let tables = tables_for(&self.games, self.tag(), ctx)?;
        let opts = OptionReader::new(self.tag(), options);

        let amount = Self::amount(&opts, rng)?;
        let start_year = opts.int("start_year", DEFAULT_START_YEAR)?;
        let end_year = opts.int("end_year", i64::from(ctx.today.year()))?;
        if start_year > end_year {
            return Err(opts.invalid(
                "start_year",
                format!("start_year {start_year} is after end_year {end_year}"),
            ));
        }
        let start_year = i32::try_from(start_year)
            .map_err(|_| opts.invalid("start_year", format!("year {start_year} is out of range")))?;
        let end_year = i32::try_from(end_year)
            .map_err(|_| opts.invalid("end_year", format!("year {end_year} is out of range")))?;

        if amount > 0 && tables.tournaments.is_empty() {
            return Err(opts.invalid("game", "no tournaments for this game"));
        }

        let mut trophies = Vec::with_capacity(amount);
        for _ in 0..amount {
            let date = generate_date_between_years(rng, start_year, end_year)
                .ok_or_else(|| opts.invalid("start_year", "year range is out of range"))?;
            let tournament = tables
                .tournaments
                .choose(rng)
                .ok_or_else(|| opts.invalid("game", "no tournaments for this game"))?;
            let placement = PLACEMENTS.choose(rng).copied().unwrap_or("Winner");

            trophies.push(GeneratedValue::object([
                ("tournament", GeneratedValue::String(format!("{tournament} {}", date.format("%Y-%m-%d")))),
                ("placement", GeneratedValue::from(placement)),
            ]));
        }

        Ok(GeneratedValue::Array(trophies))
    }
}
