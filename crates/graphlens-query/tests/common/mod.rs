//! Common fixtures for Graphlens query integration tests.

use graphlens_query::QueryEngine;
use graphlens_search::{MockSearchEngine, SearchResponse};
use graphlens_tables::{
    CommunityReport, Entity, KnowledgeTables, Relationship, Table,
};
use std::sync::Arc;

/// Entities used across the integration tests.
pub fn entities() -> Vec<Entity> {
    vec![
        Entity::new(1, "Su Shi", "person", "Song-dynasty poet"),
        Entity::new(2, "Song Dynasty", "era", "Chinese dynasty, 960-1279"),
        Entity::new(3, "Huangzhou", "place", "Place of Su Shi's exile"),
        Entity::new(4, "Su Zhe", "person", "Su Shi's younger brother"),
        Entity::new(5, "Red Cliff", "work", "Prose poems written at Huangzhou"),
    ]
}

/// Relationships used across the integration tests. Relationship 11 points
/// at a title that is not in the entity table.
pub fn relationships() -> Vec<Relationship> {
    vec![
        Relationship::new(10, "Su Shi", "Song Dynasty", "lived during", 1.5),
        Relationship::new(11, "Su Shi", "Hangzhou", "governed", 2.0),
        Relationship::new(12, "Su Shi", "Huangzhou", "exiled to", 3.0),
        Relationship::new(13, "Su Zhe", "Su Shi", "brother of", 6.0),
        Relationship::new(14, "Su Shi", "Red Cliff", "wrote", 4.5),
    ]
}

/// Community reports quoted by the fixtures.
pub fn reports() -> Vec<CommunityReport> {
    vec![
        CommunityReport::new(4, "Su Shi and the Song court")
            .with_summary("Su Shi's official career")
            .with_rank(8.5),
        CommunityReport::new(7, "Exile in Huangzhou").with_rank(7.0),
        CommunityReport::new(9, "Unrelated community"),
    ]
}

/// All three fixture tables.
pub fn tables() -> Arc<KnowledgeTables> {
    let tables = KnowledgeTables::new(
        Table::from_rows(entities()).unwrap(),
        Table::from_rows(relationships()).unwrap(),
    )
    .with_reports(Table::from_rows(reports()).unwrap());
    Arc::new(tables)
}

/// A context table in the service's pipe-delimited format.
pub fn context_table(rows: &[(i64, &str, &str)]) -> String {
    let mut text = String::from("-----Reports-----\nid|title|content|rank\n");
    for (id, title, content) in rows {
        text.push_str(&format!("{id}|{title}|\"{content}\"|5.0\n"));
    }
    text
}

/// Engine backed by a mock returning `response_text` and a context table
/// built from `rows`.
pub fn engine_with(response_text: &str, rows: &[(i64, &str, &str)]) -> QueryEngine {
    let response = SearchResponse::new(response_text, context_table(rows));
    QueryEngine::new(tables(), Arc::new(MockSearchEngine::new(response)))
}
