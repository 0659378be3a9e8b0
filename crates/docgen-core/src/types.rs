//! Type tags and search-index field types.

use serde::{Deserialize, Serialize};

/// Type tags registered by the default field type registry.
pub mod tags {
    pub const INTEGER: &str = "integer";
    pub const NAME: &str = "name";
    pub const DOB: &str = "dob";
    pub const IP: &str = "ip";
    pub const COUNTRY: &str = "country";
    pub const GAME: &str = "game";
    pub const ROLE: &str = "role";
    pub const ORG: &str = "org";
    pub const TROPHIES: &str = "trophies";
    pub const GAMERTAG: &str = "gamertag";
}

/// Field type used when deriving a search-index mapping from a schema.
///
/// Every field type strategy reports one of these so exporters can build
/// an index definition without knowing about individual tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexFieldType {
    /// Exact-match string
    #[default]
    Keyword,
    /// Integer number
    Integer,
    /// Calendar date
    Date,
    /// IPv4 or IPv6 address
    Ip,
    /// Array of objects indexed as independent sub-documents
    Nested,
}

impl IndexFieldType {
    /// Name of the type as understood by the search index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Ip => "ip",
            Self::Nested => "nested",
        }
    }
}
