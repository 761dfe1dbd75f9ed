//! Search failures never reach assembly.

use graphlens_core::Error;
use graphlens_query::QueryEngine;
use graphlens_search::{MockSearchEngine, SearchResponse};
use std::sync::Arc;
use std::time::Duration;

use crate::common::{context_table, tables};

#[tokio::test]
async fn test_search_error_propagates() {
    let engine = QueryEngine::new(tables(), Arc::new(MockSearchEngine::failing("HTTP 503")));

    let err = engine.run("q").await.unwrap_err();
    assert!(matches!(err, Error::Search { .. }));
    assert!(err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_search_timeout() {
    let response = SearchResponse::new("late", context_table(&[(4, "Court", "[Data: Entities (1)]")]));
    let mock = MockSearchEngine::new(response).with_delay(Duration::from_secs(30));
    let engine = QueryEngine::new(tables(), Arc::new(mock)).with_timeout(Duration::from_secs(5));

    let err = engine.run("q").await.unwrap_err();
    assert!(matches!(err, Error::Timeout { limit } if limit == Duration::from_secs(5)));
}

#[tokio::test(start_paused = true)]
async fn test_subsecond_timeout_reported_exactly() {
    let response = SearchResponse::new("late", context_table(&[(4, "Court", "[Data: Entities (1)]")]));
    let mock = MockSearchEngine::new(response).with_delay(Duration::from_secs(5));
    let engine =
        QueryEngine::new(tables(), Arc::new(mock)).with_timeout(Duration::from_millis(500));

    let err = engine.run("q").await.unwrap_err();
    assert_eq!(err.to_string(), "Search timed out after 500ms");
}

#[tokio::test]
async fn test_fast_search_within_timeout() {
    let response = SearchResponse::new("quick", context_table(&[(4, "Court", "[Data: Entities (1)]")]));
    let engine = QueryEngine::new(tables(), Arc::new(MockSearchEngine::new(response)))
        .with_timeout(Duration::from_secs(5));

    let outcome = engine.run("q").await.unwrap();
    assert_eq!(outcome.response_text, "quick");
    assert_eq!(outcome.graph.node_count(), 1);
}

#[tokio::test]
async fn test_bad_context_table_is_parse_error() {
    let response = SearchResponse::new("a", "id|title\n4|Court\n");
    let engine = QueryEngine::new(tables(), Arc::new(MockSearchEngine::new(response)));

    let err = engine.run("q").await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
