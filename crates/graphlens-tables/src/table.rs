//! Id-indexed, immutable table container.
//!
//! A [`Table`] keeps rows in file order (projections preserve it) and an
//! id -> position index for constant-time lookup. Ids are unique: building a
//! table from rows with a repeated id fails.

use crate::types::{CommunityReport, Entity, Relationship};
use graphlens_core::{EntityId, Error, RelationshipId, Result};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row type that can live in a [`Table`].
pub trait Record {
    /// Identifier type of this row.
    type Id: Copy + Eq + Hash + Display + Debug;

    /// Name used in diagnostics and error messages.
    const KIND: &'static str;

    /// Returns the row's unique identifier.
    fn id(&self) -> Self::Id;

    /// Checks row-level invariants.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Record for Entity {
    type Id = EntityId;
    const KIND: &'static str = "entity";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Record for Relationship {
    type Id = RelationshipId;
    const KIND: &'static str = "relationship";

    fn id(&self) -> RelationshipId {
        self.id
    }

    fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::validation_field(
                "weight",
                format!(
                    "relationship {} has invalid weight {}",
                    self.id, self.weight
                ),
            ));
        }
        Ok(())
    }
}

impl Record for CommunityReport {
    type Id = i64;
    const KIND: &'static str = "community report";

    fn id(&self) -> i64 {
        self.community
    }
}

/// Immutable rows with a unique-id index.
#[derive(Clone, Debug)]
pub struct Table<R: Record> {
    rows: Vec<R>,
    index: HashMap<R::Id, usize>,
}

/// Entity table.
pub type EntityTable = Table<Entity>;
/// Relationship table.
pub type RelationshipTable = Table<Relationship>;
/// Community report table.
pub type ReportTable = Table<CommunityReport>;

impl<R: Record> Table<R> {
    /// Builds a table, validating every row and rejecting duplicate ids.
    pub fn from_rows(rows: Vec<R>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            row.validate()?;
            if index.insert(row.id(), pos).is_some() {
                return Err(Error::validation_field(
                    "human_readable_id",
                    format!("duplicate {} id {}", R::KIND, row.id()),
                ));
            }
        }
        Ok(Self { rows, index })
    }

    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Looks up a row by id.
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.index.get(&id).map(|&pos| &self.rows[pos])
    }

    /// Checks if a row with this id exists.
    pub fn contains(&self, id: R::Id) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, R: Record> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
