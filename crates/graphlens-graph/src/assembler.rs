//! Per-query graph assembly from cited evidence rows.
//!
//! The assembler runs in one pass over the evidence rows:
//!
//! 1. Parse the row's `[Data: ...]` annotation.
//! 2. Resolve the cited ids against the tables.
//! 3. Upsert every involved entity as a node, merging roles upward.
//! 4. Insert every resolved relationship as an edge, deduplicated by id.
//!
//! Skipped ids never abort assembly. They are logged and recorded in
//! [`AssemblyStats::diagnostics`]. A malformed annotation does abort.

use crate::citation::parse_citation;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::evidence::EvidenceRow;
use crate::resolver::{TitleIndex, resolve};
use crate::types::{AssembledGraph, GraphEdge, GraphNode, GraphStyle, NodeRole};
use graphlens_core::{EntityId, Error, RelationshipId, Result};
use graphlens_tables::{EntityTable, RelationshipTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Output types
// ============================================================================

/// Counters and diagnostics collected while assembling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Evidence rows seen.
    pub rows_processed: usize,
    /// Rows without a `[Data: ...]` annotation.
    pub rows_without_annotation: usize,
    /// Nodes with role `cited` in the final graph.
    pub cited_nodes: usize,
    /// Nodes with role `context` in the final graph.
    pub context_nodes: usize,
    /// Distinct edges created.
    pub edges_created: usize,
    /// Edge insertions that hit an existing relationship id.
    pub deduped_edges: usize,
    /// Everything that was skipped, in row order.
    pub diagnostics: Vec<Diagnostic>,
}

impl AssemblyStats {
    /// Diagnostics worth showing to an end user.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind.is_warning())
    }

    /// Returns `true` if any cited id was skipped.
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Everything produced for one query.
#[derive(Clone, Debug, Default)]
pub struct Assembly {
    /// The node/edge set, including context-only nodes.
    pub graph: AssembledGraph,
    /// Union of directly cited entity ids across all rows.
    pub all_cited_entities: BTreeSet<EntityId>,
    /// Union of cited relationship ids across all rows.
    pub all_cited_relationships: BTreeSet<RelationshipId>,
    /// Counters and diagnostics.
    pub stats: AssemblyStats,
}

// ============================================================================
// GraphAssembler
// ============================================================================

/// Incremental graph assembler for one query.
///
/// Borrows the immutable base tables and builds its own title index, so no
/// state leaks from one query into the next.
pub struct GraphAssembler<'a> {
    entities: &'a EntityTable,
    relationships: &'a RelationshipTable,
    titles: TitleIndex,
    style: GraphStyle,
    graph: AssembledGraph,
    all_cited_entities: BTreeSet<EntityId>,
    all_cited_relationships: BTreeSet<RelationshipId>,
    stats: AssemblyStats,
}

impl<'a> GraphAssembler<'a> {
    /// Creates an assembler over the given tables with the default style.
    pub fn new(entities: &'a EntityTable, relationships: &'a RelationshipTable) -> Self {
        let titles = TitleIndex::build(entities);
        if titles.is_empty() && !relationships.is_empty() {
            log::warn!("Entity table is empty: no relationship endpoint can resolve");
        }
        Self {
            entities,
            relationships,
            titles,
            style: GraphStyle::default(),
            graph: AssembledGraph::new(),
            all_cited_entities: BTreeSet::new(),
            all_cited_relationships: BTreeSet::new(),
            stats: AssemblyStats::default(),
        }
    }

    /// Sets the style used to derive edge widths.
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Fold one evidence row into the graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CitationFormat`] if the row's annotation contains a
    /// non-integer id. Nothing from that row is added.
    pub fn add_row(&mut self, row: &EvidenceRow) -> Result<()> {
        let row_index = self.stats.rows_processed;
        self.stats.rows_processed += 1;

        let Some(annotation) = row.citation_annotation.as_deref() else {
            log::debug!("Evidence row {row_index} has no citation annotation");
            self.stats.rows_without_annotation += 1;
            self.record(row_index, DiagnosticKind::NoAnnotation);
            return Ok(());
        };

        let citations = parse_citation(annotation)?;
        log::debug!(
            "Evidence row {row_index}: {} entities, {} relationships cited",
            citations.entity_ids.len(),
            citations.relationship_ids.len()
        );

        self.all_cited_entities
            .extend(citations.entity_ids.iter().copied());
        self.all_cited_relationships
            .extend(citations.relationship_ids.iter().copied());

        let resolution = resolve(&citations, self.entities, self.relationships, &self.titles);
        for kind in resolution.issues {
            self.record(row_index, kind);
        }

        for &id in &resolution.involved_entity_ids {
            let Some(entity) = self.entities.get(id) else {
                continue;
            };
            let role = if citations.cites_entity(id) {
                NodeRole::Cited
            } else {
                NodeRole::Context
            };
            self.graph.upsert_node(GraphNode::from_entity(entity, role));
        }

        for (&id, &(source, target)) in &resolution.valid_relationships {
            let relationship = self
                .relationships
                .get(id)
                .ok_or_else(|| Error::not_found("relationship", id))?;
            let edge = GraphEdge::from_relationship(relationship, source, target, &self.style);
            if self.graph.add_edge(edge)? {
                self.stats.edges_created += 1;
            } else {
                self.stats.deduped_edges += 1;
            }
        }

        Ok(())
    }

    /// Fold every row in order.
    pub fn add_rows<'r>(&mut self, rows: impl IntoIterator<Item = &'r EvidenceRow>) -> Result<()> {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    /// Finish assembly and return the graph with its accumulators.
    pub fn finish(mut self) -> Assembly {
        self.stats.cited_nodes = self.graph.count_role(NodeRole::Cited);
        self.stats.context_nodes = self.graph.count_role(NodeRole::Context);

        log::info!(
            "Assembled graph: {} nodes ({} cited, {} context), {} edges from {} rows",
            self.graph.node_count(),
            self.stats.cited_nodes,
            self.stats.context_nodes,
            self.graph.edge_count(),
            self.stats.rows_processed
        );

        Assembly {
            graph: self.graph,
            all_cited_entities: self.all_cited_entities,
            all_cited_relationships: self.all_cited_relationships,
            stats: self.stats,
        }
    }

    fn record(&mut self, row: usize, kind: DiagnosticKind) {
        self.stats.diagnostics.push(Diagnostic { row, kind });
    }
}

/// Assemble a graph from evidence rows with the default style.
///
/// ```rust
/// use graphlens_graph::{EvidenceRow, NodeRole, assemble};
/// use graphlens_tables::{Entity, Relationship, Table};
/// use graphlens_core::EntityId;
///
/// let entities = Table::from_rows(vec![
///     Entity::new(1, "Su Shi", "person", "Song-dynasty poet"),
///     Entity::new(2, "Song Dynasty", "era", "960-1279"),
/// ]).unwrap();
/// let relationships = Table::from_rows(vec![
///     Relationship::new(10, "Su Shi", "Song Dynasty", "lived during", 1.5),
/// ]).unwrap();
/// let rows = [EvidenceRow::from_content("... [Data: Entities (1), Relationships (10)]")];
///
/// let assembly = assemble(&rows, &entities, &relationships).unwrap();
/// assert_eq!(assembly.graph.node_count(), 2);
/// assert_eq!(assembly.graph.role(EntityId::new(2)), Some(NodeRole::Context));
/// ```
pub fn assemble(
    rows: &[EvidenceRow],
    entities: &EntityTable,
    relationships: &RelationshipTable,
) -> Result<Assembly> {
    let mut assembler = GraphAssembler::new(entities, relationships);
    assembler.add_rows(rows)?;
    Ok(assembler.finish())
}

// ============================================================================
// Tests
// ============================================================================
