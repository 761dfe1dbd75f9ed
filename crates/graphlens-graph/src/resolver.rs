//! Cross-reference resolution between cited ids and the knowledge tables.
//!
//! Entities are cited by numeric id, relationships by numeric id, but a
//! relationship names its endpoints by entity *title*. [`TitleIndex`] is the
//! explicit title -> id map used for that join; a miss is a recoverable
//! skip, never an error.

use crate::citation::CitationSet;
use crate::diagnostics::DiagnosticKind;
use graphlens_core::{EntityId, RelationshipId};
use graphlens_tables::{EntityTable, RelationshipTable};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ============================================================================
// TitleIndex
// ============================================================================

/// Lookup table: entity title -> entity id.
#[derive(Clone, Debug, Default)]
pub struct TitleIndex {
    ids: HashMap<String, EntityId>,
}

impl TitleIndex {
    /// Builds the index from an entity table.
    ///
    /// Titles are expected to be unique. If two entities share a title the
    /// first one in table order wins and a warning is logged.
    pub fn build(entities: &EntityTable) -> Self {
        let mut ids = HashMap::with_capacity(entities.len());
        for entity in entities {
            if let Some(&existing) = ids.get(&entity.title) {
                log::warn!(
                    "Duplicate entity title {:?}: keeping id {}, ignoring id {}",
                    entity.title,
                    existing,
                    entity.id
                );
                continue;
            }
            ids.insert(entity.title.clone(), entity.id);
        }
        Self { ids }
    }

    /// Resolves a title to an entity id.
    pub fn get(&self, title: &str) -> Option<EntityId> {
        self.ids.get(title).copied()
    }

    /// Returns the number of indexed titles.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no titles are indexed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Outcome of resolving one citation set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Directly cited entities that exist, plus every resolved endpoint.
    pub involved_entity_ids: BTreeSet<EntityId>,
    /// Relationships with both endpoints resolved, mapped to
    /// `(source, target)` entity ids.
    pub valid_relationships: BTreeMap<RelationshipId, (EntityId, EntityId)>,
    /// Everything that was skipped.
    pub issues: Vec<DiagnosticKind>,
}

impl Resolution {
    /// Ids of the relationships that resolved.
    pub fn valid_relationship_ids(&self) -> impl Iterator<Item = RelationshipId> + '_ {
        self.valid_relationships.keys().copied()
    }
}

/// Resolve cited ids against the entity and relationship tables.
///
/// Guarantees:
/// - every id in `involved_entity_ids` exists in `entities`
/// - every entry in `valid_relationships` exists in `relationships` and both
///   of its endpoints resolved through `titles`
pub fn resolve(
    citations: &CitationSet,
    entities: &EntityTable,
    relationships: &RelationshipTable,
    titles: &TitleIndex,
) -> Resolution {
    let mut resolution = Resolution::default();

    for &id in &citations.entity_ids {
        if entities.contains(id) {
            resolution.involved_entity_ids.insert(id);
        } else {
            log::warn!("Cited entity {id} not found in entity table, skipping");
            resolution.issues.push(DiagnosticKind::UnknownEntity { id });
        }
    }

    for &id in &citations.relationship_ids {
        let Some(relationship) = relationships.get(id) else {
            log::warn!("Cited relationship {id} not found in relationship table, skipping");
            resolution
                .issues
                .push(DiagnosticKind::UnknownRelationship { id });
            continue;
        };

        let source = titles.get(&relationship.source);
        let target = titles.get(&relationship.target);
        match (source, target) {
            (Some(source), Some(target)) => {
                resolution.involved_entity_ids.insert(source);
                resolution.involved_entity_ids.insert(target);
                resolution.valid_relationships.insert(id, (source, target));
            }
            _ => {
                for (title, resolved) in [
                    (&relationship.source, source),
                    (&relationship.target, target),
                ] {
                    if resolved.is_none() {
                        log::warn!(
                            "Relationship {id} endpoint {title:?} matches no entity, skipping"
                        );
                        resolution.issues.push(DiagnosticKind::UnresolvedEndpoint {
                            relationship: id,
                            title: title.clone(),
                        });
                    }
                }
            }
        }
    }

    resolution
}
