//! Rendering query outcomes to HTML documents.

use graphlens_core::Error;
use graphlens_graph::{GraphStyle, NodeShape, RenderOptions};
use graphlens_query::QueryEngine;
use graphlens_search::{MockSearchEngine, ReplaySearchEngine, SearchResponse};
use std::sync::Arc;
use tempfile::tempdir;

use crate::common::{context_table, engine_with, tables};

#[tokio::test]
async fn test_render_writes_standalone_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("graph.html");
    let engine = engine_with(
        "a",
        &[(4, "Court", "Su Shi lived during the Song [Data: Entities (1), Relationships (10)]")],
    );

    let outcome = engine.run("Who was <Su Shi>?").await.unwrap();
    engine.render(&outcome, &path).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<title>Who was &lt;Su Shi&gt;?</title>"));
    assert!(html.contains("\"label\":\"Su Shi\""));
    assert!(html.contains("\"label\":\"Song Dynasty\""));
    assert!(html.contains("#FFA500"));
    assert!(html.contains("#808080"));
    assert!(!html.contains("https://"));
}

#[tokio::test]
async fn test_render_uses_configured_style() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.html");
    let style = GraphStyle {
        cited_color: "#123456".to_string(),
        node_shape: NodeShape::Dot,
        ..GraphStyle::default()
    };
    let response = SearchResponse::new("a", context_table(&[(4, "Court", "[Data: Entities (1)]")]));
    let engine = QueryEngine::new(tables(), Arc::new(MockSearchEngine::new(response)))
        .with_render_options(RenderOptions::default().with_directed(true))
        .with_style(style);

    let outcome = engine.run("q").await.unwrap();
    engine.render(&outcome, &path).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("\"color\":\"#123456\""));
    assert!(html.contains("\"shape\":\"dot\""));
    assert!(html.contains("\"directed\":true"));
}

#[tokio::test]
async fn test_render_failure_is_export_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let engine = engine_with("a", &[(4, "Court", "[Data: Entities (1)]")]);

    let outcome = engine.run("q").await.unwrap();
    let err = engine.render(&outcome, blocker.join("graph.html")).unwrap_err();

    assert!(matches!(err, Error::Export { .. }));
    // The outcome is untouched and can still be rendered elsewhere.
    engine
        .render(&outcome, dir.path().join("graph.html"))
        .unwrap();
}

#[tokio::test]
async fn test_replayed_response_renders() {
    let dir = tempdir().unwrap();
    let recording = dir.path().join("response.json");
    let response = SearchResponse::new(
        "recorded",
        context_table(&[(7, "Exile", "Exiled [Data: Entities (1), Relationships (12)]")]),
    );
    std::fs::write(&recording, serde_json::to_string(&response).unwrap()).unwrap();

    let engine = QueryEngine::new(tables(), Arc::new(ReplaySearchEngine::new(&recording)));
    let outcome = engine.run("q").await.unwrap();

    assert_eq!(outcome.response_text, "recorded");
    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.reports.len(), 1);
}
