//! Parser for the `[Data: ...]` citation mini-format.
//!
//! GraphRAG answers cite their evidence inline:
//!
//! ```text
//! Su Shi served as prefect of Huangzhou [Data: Entities (1, 4), Relationships (10, 12)]
//! ```
//!
//! Only the `Entities (...)` and `Relationships (...)` groups matter here.
//! Other groups (`Reports`, `Claims`, `Sources`) are ignored. This is the
//! single place where malformed citation text becomes an error: an absent
//! group is an empty set, a non-integer id is [`Error::CitationFormat`].

use graphlens_core::{EntityId, Error, RelationshipId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ENTITIES_TOKEN: &str = "Entities (";
const RELATIONSHIPS_TOKEN: &str = "Relationships (";

/// Entity and relationship ids cited by one annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSet {
    /// Directly cited entity ids.
    pub entity_ids: BTreeSet<EntityId>,
    /// Cited relationship ids.
    pub relationship_ids: BTreeSet<RelationshipId>,
}

impl CitationSet {
    /// Returns `true` if nothing is cited.
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty() && self.relationship_ids.is_empty()
    }

    /// Checks whether an entity is cited directly.
    pub fn cites_entity(&self, id: EntityId) -> bool {
        self.entity_ids.contains(&id)
    }
}

/// Parse a citation annotation into its entity and relationship ids.
///
/// The text between the first `Entities (` and the next `)` is split on
/// commas; every non-empty, trimmed token must be an integer. The same
/// applies to `Relationships (`. Either group may be missing.
///
/// # Example
///
/// ```rust
/// use graphlens_graph::parse_citation;
///
/// let set = parse_citation("[Data: Entities (1, 2, 3), Relationships (10)]").unwrap();
/// assert_eq!(set.entity_ids.len(), 3);
/// assert_eq!(set.relationship_ids.len(), 1);
///
/// let empty = parse_citation("[Data: Reports (4)]").unwrap();
/// assert!(empty.is_empty());
///
/// assert!(parse_citation("[Data: Entities (1, two)]").is_err());
/// ```
pub fn parse_citation(annotation: &str) -> Result<CitationSet> {
    let entity_ids = parse_group(annotation, ENTITIES_TOKEN)?
        .into_iter()
        .map(EntityId::new)
        .collect();
    let relationship_ids = parse_group(annotation, RELATIONSHIPS_TOKEN)?
        .into_iter()
        .map(RelationshipId::new)
        .collect();

    Ok(CitationSet {
        entity_ids,
        relationship_ids,
    })
}

/// Extract the integer list following `token`, up to the next `)`.
fn parse_group(annotation: &str, token: &str) -> Result<Vec<i64>> {
    let Some(start) = annotation.find(token) else {
        return Ok(Vec::new());
    };
    let group_name = token.trim_end_matches(" (");
    let rest = &annotation[start + token.len()..];
    let end = rest.find(')').ok_or_else(|| {
        Error::citation_format(annotation, format!("unterminated {group_name} group"))
    })?;

    rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                Error::citation_format(
                    annotation,
                    format!("invalid id {token:?} in {group_name} group"),
                )
            })
        })
        .collect()
}
