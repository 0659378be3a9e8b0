//! Field type strategies.
//!
//! Each module provides the [`FieldType`](crate::registry::FieldType)
//! implementations for a family of tags, plus the plain generation
//! functions they are built on. The functions take any `Rng` so they can
//! be exercised with a seeded `StdRng` directly.

pub mod countries;
pub mod country;
pub mod dob;
pub mod esports;
pub mod ip;
pub mod name;
pub mod numeric;
