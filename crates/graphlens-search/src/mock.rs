//! In-memory search engine for tests.

use crate::engine::SearchEngine;
use crate::response::SearchResponse;
use async_trait::async_trait;
use graphlens_core::{Error, Result};
use std::time::Duration;
use tokio::sync::Mutex;

/// Returns a fixed response (or failure) and records every query.
pub struct MockSearchEngine {
    outcome: std::result::Result<SearchResponse, String>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchEngine {
    /// Always answer with `response`.
    pub fn new(response: SearchResponse) -> Self {
        Self {
            outcome: Ok(response),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a search error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries received so far.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl SearchEngine for MockSearchEngine {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.queries.lock().await.push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Error::search(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
