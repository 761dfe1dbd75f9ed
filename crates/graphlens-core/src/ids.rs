//! Human-readable identifier types for entities and relationships.
//!
//! GraphRAG exports carry both an opaque storage key and a small integer
//! `human_readable_id`. Citation annotations refer to the integer, so that
//! is the only identifier Graphlens works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

/// Identifier of an entity row.
///
/// Separate from [`RelationshipId`] because the two id spaces overlap:
/// entity 10 and relationship 10 are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Creates an entity ID from its integer value.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphlens_core::EntityId;
    ///
    /// let id = EntityId::new(7);
    /// assert_eq!(id.get(), 7);
    /// ```
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Identifier of a relationship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(i64);

impl RelationshipId {
    /// Creates a relationship ID from its integer value.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for RelationshipId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for RelationshipId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
