//! Field type registry.
//!
//! Every type tag maps to a [`FieldType`] strategy. The synthesizer never
//! matches on tags itself: adding a type means registering a strategy.

use crate::catalog::GameCatalog;
use crate::error::SynthesisError;
use crate::generators::{country, dob, esports, ip, name, numeric};
use chrono::NaiveDate;
use docgen_core::{DocumentBuilder, GeneratedValue, IndexFieldType, Options};
use rand::RngCore;
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a strategy can see while producing a value.
pub struct SynthesisContext<'a> {
    /// The document built so far
    pub document: &'a DocumentBuilder,
    /// Name of the field holding the value this type depends on, if one
    /// has been generated
    pub dependency: Option<&'a str>,
    /// Evaluation date for age and year computations
    pub today: NaiveDate,
}

impl<'a> SynthesisContext<'a> {
    pub fn new(document: &'a DocumentBuilder, today: NaiveDate) -> Self {
        Self {
            document,
            dependency: None,
            today,
        }
    }

    pub fn with_dependency(mut self, field: Option<&'a str>) -> Self {
        self.dependency = field;
        self
    }

    /// Value of the dependency field in the in-progress document.
    pub fn dependency_value(
        &self,
        tag: &str,
        depends_on: &str,
    ) -> Result<&'a GeneratedValue, SynthesisError> {
        self.dependency
            .and_then(|field| self.document.get(field))
            .ok_or_else(|| SynthesisError::MissingDependency {
                tag: tag.to_string(),
                depends_on: depends_on.to_string(),
            })
    }
}

/// A value synthesis strategy for one type tag.
pub trait FieldType: Send + Sync {
    /// Tag this strategy is registered under.
    fn tag(&self) -> &'static str;

    /// Tag of an earlier field whose value this type reads, if any.
    fn depends_on(&self) -> Option<&'static str> {
        None
    }

    /// Field type to use when indexing generated values.
    fn index_type(&self) -> IndexFieldType {
        IndexFieldType::Keyword
    }

    /// Produce one value.
    fn generate(
        &self,
        options: &Options,
        ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError>;
}

/// Registry of field type strategies keyed by tag.
pub struct Registry {
    types: BTreeMap<String, Box<dyn FieldType>>,
}

impl Registry {
    /// A registry with no types.
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// All built-in types, with game-dependent types backed by `catalog`.
    pub fn with_games(catalog: GameCatalog) -> Self {
        let games = Arc::new(catalog);
        let mut registry = Self::empty();

        registry.register(numeric::IntegerType);
        registry.register(name::NameType);
        registry.register(name::GamertagType);
        registry.register(dob::DobType);
        registry.register(ip::IpType);
        registry.register(country::CountryType);
        registry.register(esports::GameType::new(games.clone()));
        registry.register(esports::GameListType::roles(games.clone()));
        registry.register(esports::GameListType::orgs(games.clone()));
        registry.register(esports::TrophiesType::new(games));

        registry
    }

    /// Register a strategy, returning the one it replaced.
    pub fn register<T: FieldType + 'static>(&mut self, field_type: T) -> Option<Box<dyn FieldType>> {
        self.types
            .insert(field_type.tag().to_string(), Box::new(field_type))
    }

    /// Strategy for a tag.
    pub fn get(&self, tag: &str) -> Option<&dyn FieldType> {
        self.types.get(tag).map(|t| t.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_games(GameCatalog::default())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("tags", &self.tags()).finish()
    }
}
