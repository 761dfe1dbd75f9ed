//! HTTP client for a GraphRAG-compatible search endpoint.

use crate::engine::SearchEngine;
use crate::response::SearchResponse;
use async_trait::async_trait;
use graphlens_core::{Error, Result};
use serde::Serialize;

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

/// Posts `{"query": ...}` to an endpoint and decodes a [`SearchResponse`].
pub struct HttpSearchEngine {
    endpoint: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl HttpSearchEngine {
    /// Create a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Use a preconfigured client (proxies, timeouts, TLS roots).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchEngine for HttpSearchEngine {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        log::debug!("POST {} ({} chars)", self.endpoint, query.len());

        let mut request = self.client.post(&self.endpoint).json(&SearchRequest { query });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::search_with_source(format!("request to {} failed", self.endpoint), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::search(format!(
                "search endpoint {} returned HTTP {status}",
                self.endpoint
            )));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| Error::search_with_source("search response parse failed", e))
    }

    fn name(&self) -> &str {
        "http"
    }
}
