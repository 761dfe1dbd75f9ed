//! End-to-end query pipeline tests.

use graphlens_core::{EntityId, Error, RelationshipId};
use graphlens_graph::{DiagnosticKind, NodeRole};

use crate::common::engine_with;

#[tokio::test]
async fn test_su_shi_scenario() {
    let engine = engine_with(
        "Su Shi was a poet of the Song dynasty.",
        &[(4, "Su Shi", "Su Shi lived during the Song [Data: Entities (1), Relationships (10)]")],
    );

    let outcome = engine.run("Who was Su Shi?").await.unwrap();

    assert_eq!(outcome.response_text, "Su Shi was a poet of the Song dynasty.");
    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.graph.role(EntityId::new(1)), Some(NodeRole::Cited));
    assert_eq!(outcome.graph.role(EntityId::new(2)), Some(NodeRole::Context));
    assert_eq!(outcome.graph.edge_count(), 1);

    let edge = outcome.graph.get_edge(RelationshipId::new(10)).unwrap();
    assert_eq!((edge.source, edge.target), (EntityId::new(1), EntityId::new(2)));
    assert_eq!(edge.width, 0.5);
    assert_eq!(edge.tooltip, "Weight: 1.5");
}

#[tokio::test]
async fn test_role_upgrade_is_order_independent() {
    let direct = (4, "Court", "Su Shi held office [Data: Entities (1)]");
    let via_edge = (7, "Family", "Su Zhe was his brother [Data: Relationships (13)]");

    let forward = engine_with("a", &[direct, via_edge])
        .run("q")
        .await
        .unwrap();
    let backward = engine_with("a", &[via_edge, direct])
        .run("q")
        .await
        .unwrap();

    for outcome in [&forward, &backward] {
        assert_eq!(outcome.graph.role(EntityId::new(1)), Some(NodeRole::Cited));
        assert_eq!(outcome.graph.role(EntityId::new(4)), Some(NodeRole::Context));
        assert_eq!(outcome.graph.node_count(), 2);
    }
}

#[tokio::test]
async fn test_duplicate_rows_do_not_duplicate_edges() {
    let row = (4, "Exile", "Exiled [Data: Entities (1, 3), Relationships (12)]");
    let once = engine_with("a", &[row]).run("q").await.unwrap();
    let twice = engine_with("a", &[row, row]).run("q").await.unwrap();

    assert_eq!(once.graph.snapshot(), twice.graph.snapshot());
    assert_eq!(twice.graph.edge_count(), 1);
    assert_eq!(twice.stats.deduped_edges, 1);
}

#[tokio::test]
async fn test_skipped_ids_surface_as_warnings() {
    let engine = engine_with(
        "a",
        &[
            (4, "Office", "Governed [Data: Relationships (11, 999)]"),
            (7, "Exile", "Wrote at the cliff [Data: Entities (5), Relationships (14)]"),
        ],
    );

    let outcome = engine.run("q").await.unwrap();

    // Rows after the skipped ids are still assembled.
    assert!(outcome.graph.contains_edge(RelationshipId::new(14)));
    assert!(!outcome.graph.contains_edge(RelationshipId::new(11)));
    assert!(!outcome.graph.contains_node(EntityId::new(3)));

    let kinds: Vec<_> = outcome.warnings().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnresolvedEndpoint {
                relationship: RelationshipId::new(11),
                title: "Hangzhou".to_string(),
            },
            DiagnosticKind::UnknownRelationship {
                id: RelationshipId::new(999),
            },
        ]
    );
    assert!(outcome.warnings().all(|d| d.row == 0));
}

#[tokio::test]
async fn test_row_without_annotation_is_harmless() {
    let engine = engine_with("a", &[(4, "Court", "No citation in this excerpt")]);

    let outcome = engine.run("q").await.unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.stats.rows_without_annotation, 1);
    assert_eq!(outcome.warnings().count(), 0);
}

#[tokio::test]
async fn test_projections_and_related_reports() {
    let engine = engine_with(
        "a",
        &[
            (7, "Exile", "Exiled [Data: Entities (3, 1), Relationships (12, 11)]"),
            (4, "Court", "Served [Data: Entities (1)]"),
            (42, "Missing", "No report row for this id"),
        ],
    );

    let outcome = engine.run("q").await.unwrap();

    let entity_names: Vec<&str> = outcome.entities.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(entity_names, vec!["Su Shi", "Huangzhou"]);

    // Relationship 11 is cited, so it is listed even though its edge was dropped.
    let relationship_ids: Vec<i64> = outcome.relationships.iter().map(|r| r.id.get()).collect();
    assert_eq!(relationship_ids, vec![11, 12]);

    let report_ids: Vec<i64> = outcome.reports.iter().map(|r| r.community).collect();
    assert_eq!(report_ids, vec![7, 4]);
}

#[tokio::test]
async fn test_malformed_annotation_fails_query() {
    let engine = engine_with("a", &[(4, "Court", "Bad [Data: Entities (1, +more)]")]);

    let err = engine.run("q").await.unwrap_err();
    assert!(matches!(err, Error::CitationFormat { .. }));
    assert!(err.is_data_format());
}

#[tokio::test]
async fn test_outcome_serializes_without_graph() {
    let engine = engine_with("answer", &[(4, "Court", "Served [Data: Entities (1)]")]);
    let outcome = engine.run("q").await.unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["response_text"], "answer");
    assert_eq!(json["entities"][0]["Name"], "Su Shi");
    assert_eq!(json["stats"]["cited_nodes"], 1);
    assert!(json.get("graph").is_none());
}
