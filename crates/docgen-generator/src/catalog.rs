//! Per-game registry data used by the `game`, `role`, `org` and `trophies`
//! field types.
//!
//! The default catalog carries League of Legends and Counter-Strike 2.
//! Further games can be merged in from a YAML or JSON file:
//!
//! ```yaml
//! games:
//!   valorant:
//!     aliases: [val]
//!     roles: [Duelist, Initiator, Controller, Sentinel]
//!     orgs: [Sentinels, Fnatic]
//!     tournaments: [Champions, Masters]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Error type for loading game catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Error reading catalog file
    #[error("Failed to read game catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse game catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse game catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Static tables for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTables {
    /// Short names accepted by the `game` type's `option` (case-insensitive)
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Player roles
    #[serde(default)]
    pub roles: Vec<String>,

    /// Organisations fielding teams
    #[serde(default)]
    pub orgs: Vec<String>,

    /// Tournament names
    #[serde(default)]
    pub tournaments: Vec<String>,
}

/// Game tables keyed by game identifier.
///
/// Keys are kept sorted so random selection is reproducible for a seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCatalog {
    games: BTreeMap<String, GameTables>,
}

impl GameCatalog {
    /// A catalog with no games.
    pub fn empty() -> Self {
        Self {
            games: BTreeMap::new(),
        }
    }

    /// Load a catalog file; `.yaml`/`.yml` is read as YAML, anything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Add or replace a game.
    pub fn insert(&mut self, key: impl Into<String>, tables: GameTables) -> Option<GameTables> {
        self.games.insert(key.into(), tables)
    }

    /// Merge another catalog into this one. Games present in both are replaced.
    pub fn merge(&mut self, other: GameCatalog) {
        self.games.extend(other.games);
    }

    /// Tables for a game key.
    pub fn get(&self, key: &str) -> Option<&GameTables> {
        self.games.get(key)
    }

    /// All game keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.games.keys().map(String::as_str).collect()
    }

    /// Resolve a user-supplied option (alias or key, any case) to a game key.
    pub fn resolve(&self, option: &str) -> Option<&str> {
        let wanted = option.trim().to_lowercase();
        self.games
            .iter()
            .find(|(key, tables)| {
                key.to_lowercase() == wanted
                    || tables.aliases.iter().any(|a| a.to_lowercase() == wanted)
            })
            .map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for GameCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();

        catalog.insert(
            "league_of_legends",
            GameTables {
                aliases: strings(&["lol"]),
                roles: strings(&["Top", "Jungle", "Mid", "ADC", "Support"]),
                orgs: strings(&[
                    "Gen.G Esports",
                    "T1",
                    "Anyone's Legend",
                    "Hanwha Life Esports",
                    "BiliBili Gaming DREAMSMART",
                    "FlyQuest",
                    "Top Esports",
                    "CTBC Flying Oyster",
                    "kt Rolster",
                    "Cloud9",
                    "PSG Talon",
                    "DPlus KIA",
                    "G2 Esports",
                    "Invictus Gaming",
                    "Weibo Gaming",
                    "Beijing JDG Intel Esports",
                    "Karmine Corp",
                    "GAM Esports",
                    "Team Liquid",
                    "Movistar KOI",
                    "Fnatic",
                    "Ninjas In Pyjamas",
                    "FunPlus Phoenix",
                    "100 Thieves",
                    "Team BDS",
                    "Team Vitality",
                    "Dignitas",
                    "Disguised",
                    "GIANTX",
                ]),
                tournaments: strings(&[
                    "Spring Split",
                    "Summer Split",
                    "Mid-Season Invitational",
                    "World Championship",
                    "All-Star Event",
                    "Regional Finals",
                ]),
            },
        );

        catalog.insert(
            "cs2",
            GameTables {
                aliases: strings(&["cs2"]),
                roles: strings(&[
                    "AWPer", "IGL", "Entry", "Rifler", "Support", "Lurker", "Anchor",
                ]),
                orgs: strings(&[
                    "Team Vitality",
                    "Spirit",
                    "MOUZ",
                    "The MongolZ",
                    "Natus Vincere",
                    "FURIA",
                    "Falcons",
                    "FaZe",
                    "Astralis",
                    "TYLOO",
                    "Aurora",
                    "G2 Esports",
                    "3DMAX",
                    "GamerLegion",
                    "Lynn Vision",
                    "PaiN Gaming",
                    "Virtus.pro",
                    "HEROIC",
                    "Ninjas in Pyjamas",
                    "Team Liquid",
                    "FlyQuest",
                    "Fnatic",
                ]),
                tournaments: strings(&[
                    "Major",
                    "ESL Pro League",
                    "IEM",
                    "BLAST Premier",
                    "DreamHack Masters",
                    "Regional",
                ]),
            },
        );

        catalog
    }
}
