//! Row types for the three knowledge tables.
//!
//! Field names follow the GraphRAG export columns. Only the columns
//! Graphlens needs are declared; any other column in the source file is
//! ignored on load.

use graphlens_core::{EntityId, RelationshipId};
use serde::{Deserialize, Deserializer, Serialize};

/// Pandas writes missing text cells as `null`; treat them as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Entity
// ============================================================================

/// A named entity extracted from the source corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Human-readable id, as cited by `Entities (...)`.
    #[serde(rename = "human_readable_id")]
    pub id: EntityId,
    /// Unique title; relationships reference entities by this value.
    pub title: String,
    /// Entity type (e.g. "person", "era").
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub entity_type: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Entity {
    /// Creates a new entity.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        entity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(id),
            title: title.into(),
            entity_type: entity_type.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Relationship
// ============================================================================

/// A directed relationship between two entities, keyed by their titles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Human-readable id, as cited by `Relationships (...)`.
    #[serde(rename = "human_readable_id")]
    pub id: RelationshipId,
    /// Title of the source entity.
    pub source: String,
    /// Title of the target entity.
    pub target: String,
    /// Free-text description, used as the edge label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Relationship strength, never negative.
    pub weight: f64,
}

impl Relationship {
    /// Creates a new relationship.
    pub fn new(
        id: i64,
        source: impl Into<String>,
        target: impl Into<String>,
        description: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: RelationshipId::new(id),
            source: source.into(),
            target: target.into(),
            description: description.into(),
            weight,
        }
    }
}

// ============================================================================
// CommunityReport
// ============================================================================

/// Summary of one detected community.
///
/// The search service quotes excerpts of these reports as evidence; the
/// `community` value is the `id` column of those excerpts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunityReport {
    /// Community number.
    pub community: i64,
    /// Hierarchy level of the community, if exported.
    #[serde(default)]
    pub level: Option<i64>,
    /// Report title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Short summary.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    /// Full report text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_content: String,
    /// Importance rank assigned during indexing.
    #[serde(default)]
    pub rank: Option<f64>,
}

impl CommunityReport {
    /// Creates a report with only a community number and title.
    pub fn new(community: i64, title: impl Into<String>) -> Self {
        Self {
            community,
            level: None,
            title: title.into(),
            summary: String::new(),
            full_content: String::new(),
            rank: None,
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the rank.
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Some(rank);
        self
    }
}
