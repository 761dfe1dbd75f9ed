//! Result of one query.

use graphlens_core::{EntityId, RelationshipId};
use graphlens_graph::{
    AssembledGraph, AssemblyStats, Diagnostic, EntityRow, EvidenceRow, RelationshipRow,
};
use graphlens_tables::CommunityReport;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything a front-end displays for one query.
///
/// Serializes without the graph itself; use
/// [`AssembledGraph::snapshot`] or the rendered document for that.
#[derive(Clone, Debug, Serialize)]
pub struct QueryOutcome {
    /// The query as submitted.
    pub query: String,
    /// Synthesized answer from the search service.
    pub response_text: String,
    /// Evidence rows parsed from the context table.
    pub evidence: Vec<EvidenceRow>,
    /// Assembled node/edge set.
    #[serde(skip)]
    pub graph: AssembledGraph,
    /// Union of directly cited entity ids.
    pub all_cited_entities: BTreeSet<EntityId>,
    /// Union of cited relationship ids.
    pub all_cited_relationships: BTreeSet<RelationshipId>,
    /// Cited entities for display.
    pub entities: Vec<EntityRow>,
    /// Cited relationships for display.
    pub relationships: Vec<RelationshipRow>,
    /// Community reports quoted as evidence.
    pub reports: Vec<CommunityReport>,
    /// Assembly counters and diagnostics.
    pub stats: AssemblyStats,
}

impl QueryOutcome {
    /// Skipped ids worth telling the user about.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.stats.warnings()
    }

    /// Returns `true` if no node was assembled.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
