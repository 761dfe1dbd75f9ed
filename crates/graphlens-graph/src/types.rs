//! Core graph types for assembled answer graphs.
//!
//! An [`AssembledGraph`] is built fresh for every query from the cited
//! evidence and thrown away afterwards. Nodes are entities, edges are
//! relationships; both keep their human-readable ids so the rendered
//! document can be cross-checked against the display tables.

use graphlens_core::{EntityId, Error, RelationshipId, Result};
use graphlens_tables::{Entity, Relationship};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// NodeRole
// ============================================================================

/// Why a node is part of the graph.
///
/// Ordered as a two-point lattice, `Context < Cited`; merging two roles
/// takes the maximum, so a node only ever moves up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Pulled in only as an endpoint of a cited relationship.
    #[default]
    Context,
    /// Cited directly in an `Entities (...)` group.
    Cited,
}

impl NodeRole {
    /// Lattice join of two roles.
    ///
    /// ```rust
    /// use graphlens_graph::NodeRole;
    ///
    /// assert_eq!(NodeRole::Context.merge(NodeRole::Cited), NodeRole::Cited);
    /// assert_eq!(NodeRole::Cited.merge(NodeRole::Context), NodeRole::Cited);
    /// ```
    pub fn merge(self, other: NodeRole) -> NodeRole {
        self.max(other)
    }

    /// Returns the role name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Cited => "cited",
        }
    }
}

// ============================================================================
// NodeShape / GraphStyle
// ============================================================================

/// Shape used to draw nodes in the rendered document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    /// Circle sized to fit the label, label drawn inside.
    #[default]
    Circle,
    /// Fixed-size dot, label drawn underneath.
    Dot,
    /// Rounded box around the label.
    Box,
}

/// Visual styling shared by assembly (edge widths) and rendering (colors).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Fill color for directly cited nodes.
    pub cited_color: String,
    /// Fill color for context-only nodes.
    pub context_color: String,
    /// Stroke color for edges.
    pub edge_color: String,
    /// Node shape.
    pub node_shape: NodeShape,
    /// Base node size in pixels.
    pub node_size: u32,
    /// Edge width is `weight / weight_divisor`.
    pub weight_divisor: f64,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            cited_color: "#FFA500".to_string(),
            context_color: "#808080".to_string(),
            edge_color: "#4285F4".to_string(),
            node_shape: NodeShape::Circle,
            node_size: 20,
            weight_divisor: 3.0,
        }
    }
}

impl GraphStyle {
    /// Fill color for a node role.
    pub fn color_for(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Cited => &self.cited_color,
            NodeRole::Context => &self.context_color,
        }
    }

    /// Visual width of an edge with the given weight.
    pub fn edge_width(&self, weight: f64) -> f64 {
        if self.weight_divisor > 0.0 {
            weight / self.weight_divisor
        } else {
            weight
        }
    }
}

// ============================================================================
// GraphNode
// ============================================================================

/// A node in an assembled graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Entity id.
    pub id: EntityId,
    /// Display label (the entity title).
    pub label: String,
    /// Hover text.
    pub tooltip: String,
    /// Cited or context.
    pub role: NodeRole,
}

impl GraphNode {
    /// Creates a node from an entity row.
    pub fn from_entity(entity: &Entity, role: NodeRole) -> Self {
        Self {
            id: entity.id,
            label: entity.title.clone(),
            tooltip: format!(
                "Type: {}\nDescription: {}",
                entity.entity_type, entity.description
            ),
            role,
        }
    }
}

// ============================================================================
// GraphEdge
// ============================================================================

/// An edge in an assembled graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Relationship id this edge was built from.
    pub relationship: RelationshipId,
    /// Source entity id.
    pub source: EntityId,
    /// Target entity id.
    pub target: EntityId,
    /// Display label (the relationship description).
    pub label: String,
    /// Hover text.
    pub tooltip: String,
    /// Relationship weight.
    pub weight: f64,
    /// Stroke width derived from the weight.
    pub width: f64,
}

impl GraphEdge {
    /// Creates an edge from a relationship row whose endpoints are resolved.
    pub fn from_relationship(
        relationship: &Relationship,
        source: EntityId,
        target: EntityId,
        style: &GraphStyle,
    ) -> Self {
        Self {
            relationship: relationship.id,
            source,
            target,
            label: relationship.description.clone(),
            tooltip: format!("Weight: {}", relationship.weight),
            weight: relationship.weight,
            width: style.edge_width(relationship.weight),
        }
    }
}

// ============================================================================
// AssembledGraph
// ============================================================================

/// Node and edge set for one query.
///
/// Wraps a petgraph `DiGraph` with id lookup tables. Nodes are unique by
/// entity id and edges by relationship id; insertion order is preserved
/// for rendering.
#[derive(Clone, Debug, Default)]
pub struct AssembledGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    node_indices: HashMap<EntityId, NodeIndex>,
    edge_indices: HashMap<RelationshipId, EdgeIndex>,
}

impl AssembledGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Gets a node by entity id.
    pub fn get_node(&self, id: EntityId) -> Option<&GraphNode> {
        self.node_indices.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Gets an edge by relationship id.
    pub fn get_edge(&self, id: RelationshipId) -> Option<&GraphEdge> {
        self.edge_indices.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Checks if a node exists.
    pub fn contains_node(&self, id: EntityId) -> bool {
        self.node_indices.contains_key(&id)
    }

    /// Checks if an edge for this relationship exists.
    pub fn contains_edge(&self, id: RelationshipId) -> bool {
        self.edge_indices.contains_key(&id)
    }

    /// Returns the role of a node, if present.
    pub fn role(&self, id: EntityId) -> Option<NodeRole> {
        self.get_node(id).map(|n| n.role)
    }

    /// Iterates nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Iterates edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.graph.edge_weights()
    }

    /// Insert a node, or merge its role into the existing node.
    ///
    /// Label and tooltip of an existing node are kept; only the role moves,
    /// and only upwards.
    pub fn upsert_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node.id) {
            let existing = &mut self.graph[idx];
            existing.role = existing.role.merge(node.role);
            return idx;
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns `Ok(true)` when a new edge was created and `Ok(false)` when an
    /// edge for the same relationship already existed (its attributes are
    /// overwritten). Fails if either endpoint is not a node.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<bool> {
        let from_idx = self
            .node_indices
            .get(&edge.source)
            .copied()
            .ok_or_else(|| Error::not_found("node", edge.source))?;
        let to_idx = self
            .node_indices
            .get(&edge.target)
            .copied()
            .ok_or_else(|| Error::not_found("node", edge.target))?;

        if let Some(&existing) = self.edge_indices.get(&edge.relationship) {
            self.graph[existing] = edge;
            return Ok(false);
        }

        let id = edge.relationship;
        let idx = self.graph.add_edge(from_idx, to_idx, edge);
        self.edge_indices.insert(id, idx);
        Ok(true)
    }

    /// Counts nodes with the given role.
    pub fn count_role(&self, role: NodeRole) -> usize {
        self.nodes().filter(|n| n.role == role).count()
    }

    /// Owned, serializable copy of the node and edge lists.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }
}

/// Serializable node/edge lists, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes.
    pub nodes: Vec<GraphNode>,
    /// Edges.
    pub edges: Vec<GraphEdge>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn node(id: i64, role: NodeRole) -> GraphNode {
        GraphNode {
            id: EntityId::new(id),
            label: format!("Entity {id}"),
            tooltip: String::new(),
            role,
        }
    }

    fn edge(rel: i64, from: i64, to: i64, weight: f64) -> GraphEdge {
        GraphEdge {
            relationship: RelationshipId::new(rel),
            source: EntityId::new(from),
            target: EntityId::new(to),
            label: format!("rel {rel}"),
            tooltip: format!("Weight: {weight}"),
            weight,
            width: weight / 3.0,
        }
    }

    // ------------------------------------------------------------------------
    // NodeRole tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_role_ordering() {
        assert!(NodeRole::Context < NodeRole::Cited);
        assert_eq!(NodeRole::default(), NodeRole::Context);
    }

    #[test]
    fn test_role_merge_is_join() {
        for a in [NodeRole::Context, NodeRole::Cited] {
            for b in [NodeRole::Context, NodeRole::Cited] {
                assert_eq!(a.merge(b), b.merge(a));
                assert_eq!(a.merge(a), a);
            }
        }
        assert_eq!(NodeRole::Context.merge(NodeRole::Context), NodeRole::Context);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&NodeRole::Cited).unwrap();
        assert_eq!(json, "\"cited\"");
        assert_eq!(NodeRole::Context.name(), "context");
    }

    // ------------------------------------------------------------------------
    // GraphStyle tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_style_defaults() {
        let style = GraphStyle::default();
        assert_eq!(style.color_for(NodeRole::Cited), "#FFA500");
        assert_eq!(style.color_for(NodeRole::Context), "#808080");
        assert_eq!(style.edge_width(1.5), 0.5);
    }

    #[test]
    fn test_style_zero_divisor_falls_back_to_weight() {
        let style = GraphStyle {
            weight_divisor: 0.0,
            ..GraphStyle::default()
        };
        assert_eq!(style.edge_width(2.0), 2.0);
    }

    #[test]
    fn test_node_from_entity_tooltip() {
        let entity = Entity::new(1, "Su Shi", "person", "Song-dynasty poet");
        let node = GraphNode::from_entity(&entity, NodeRole::Cited);
        assert_eq!(node.label, "Su Shi");
        assert_eq!(node.tooltip, "Type: person\nDescription: Song-dynasty poet");
    }

    #[test]
    fn test_edge_from_relationship() {
        let rel = Relationship::new(10, "Su Shi", "Song Dynasty", "lived during", 1.5);
        let edge = GraphEdge::from_relationship(
            &rel,
            EntityId::new(1),
            EntityId::new(2),
            &GraphStyle::default(),
        );
        assert_eq!(edge.label, "lived during");
        assert_eq!(edge.tooltip, "Weight: 1.5");
        assert_eq!(edge.width, 0.5);
    }

    // ------------------------------------------------------------------------
    // AssembledGraph tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_graph_new_is_empty() {
        let graph = AssembledGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.nodes().count(), 0);
    }

    #[test]
    fn test_upsert_upgrades_role() {
        let mut graph = AssembledGraph::new();
        let first = graph.upsert_node(node(5, NodeRole::Context));
        let second = graph.upsert_node(node(5, NodeRole::Cited));

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.role(EntityId::new(5)), Some(NodeRole::Cited));
    }

    #[test]
    fn test_upsert_never_downgrades() {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(node(5, NodeRole::Cited));
        graph.upsert_node(node(5, NodeRole::Context));

        assert_eq!(graph.role(EntityId::new(5)), Some(NodeRole::Cited));
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(node(1, NodeRole::Cited));

        let result = graph.add_edge(edge(10, 1, 2, 1.0));
        assert!(matches!(result, Err(Error::NotFound { kind: "node", .. })));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_dedups_by_relationship_id() {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(node(1, NodeRole::Cited));
        graph.upsert_node(node(2, NodeRole::Context));

        assert!(graph.add_edge(edge(10, 1, 2, 1.0)).unwrap());
        assert!(!graph.add_edge(edge(10, 1, 2, 3.0)).unwrap());

        assert_eq!(graph.edge_count(), 1);
        // Last write wins
        assert_eq!(graph.get_edge(RelationshipId::new(10)).unwrap().weight, 3.0);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(node(9, NodeRole::Cited));
        graph.upsert_node(node(3, NodeRole::Context));
        graph.upsert_node(node(7, NodeRole::Cited));

        let ids: Vec<i64> = graph.nodes().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![9, 3, 7]);
        assert_eq!(graph.count_role(NodeRole::Cited), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(node(1, NodeRole::Cited));
        graph.upsert_node(node(2, NodeRole::Context));
        graph.add_edge(edge(10, 1, 2, 1.5)).unwrap();

        let snapshot = graph.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["nodes"][0]["role"], "cited");
        assert_eq!(json["edges"][0]["relationship"], 10);
        assert_eq!(json["edges"][0]["source"], 1);
    }
}
