//! Display projections of the cited rows.
//!
//! The projections list exactly what the answer cited, which can differ from
//! the node/edge set of the graph: a cited relationship with a dangling
//! endpoint still shows up here, and context-only nodes do not.

use crate::evidence::EvidenceRow;
use graphlens_core::{EntityId, RelationshipId};
use graphlens_tables::{CommunityReport, EntityTable, RelationshipTable, ReportTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// One row of the cited-entities table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRow {
    /// Entity id.
    #[serde(rename = "ID")]
    pub id: EntityId,
    /// Entity title.
    #[serde(rename = "Name")]
    pub title: String,
    /// Entity description.
    #[serde(rename = "Description")]
    pub description: String,
}

/// One row of the cited-relationships table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRow {
    /// Relationship id.
    #[serde(rename = "ID")]
    pub id: RelationshipId,
    /// Source entity title.
    #[serde(rename = "Source")]
    pub source: String,
    /// Target entity title.
    #[serde(rename = "Target")]
    pub target: String,
    /// Relationship description.
    #[serde(rename = "Description")]
    pub description: String,
}

/// Filter both tables to the cited ids, keeping table order.
///
/// Ids missing from their table are silently absent from the output; they
/// were already reported during assembly.
pub fn project_for_display(
    entities: &EntityTable,
    relationships: &RelationshipTable,
    all_cited_entities: &BTreeSet<EntityId>,
    all_cited_relationships: &BTreeSet<RelationshipId>,
) -> (Vec<EntityRow>, Vec<RelationshipRow>) {
    let entity_rows = entities
        .iter()
        .filter(|e| all_cited_entities.contains(&e.id))
        .map(|e| EntityRow {
            id: e.id,
            title: e.title.clone(),
            description: e.description.clone(),
        })
        .collect();

    let relationship_rows = relationships
        .iter()
        .filter(|r| all_cited_relationships.contains(&r.id))
        .map(|r| RelationshipRow {
            id: r.id,
            source: r.source.clone(),
            target: r.target.clone(),
            description: r.description.clone(),
        })
        .collect();

    (entity_rows, relationship_rows)
}

/// Community reports quoted by the evidence, in evidence order.
///
/// Rows without a report id are ignored, as are ids with no report.
pub fn related_reports(reports: &ReportTable, evidence: &[EvidenceRow]) -> Vec<CommunityReport> {
    let mut seen = HashSet::new();
    evidence
        .iter()
        .filter_map(|row| row.report_id)
        .filter(|id| seen.insert(*id))
        .filter_map(|id| reports.get(id).cloned())
        .collect()
}
