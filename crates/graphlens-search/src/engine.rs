//! The search collaborator seam.

use crate::response::SearchResponse;
use async_trait::async_trait;
use graphlens_core::Result;

/// A retrieval-augmented search service.
///
/// Implementations own everything upstream of the evidence table:
/// community ranking, map-reduce summarization, LLM calls and their retries.
/// Graphlens only awaits the final response.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Answer a query.
    async fn search(&self, query: &str) -> Result<SearchResponse>;

    /// Engine name for diagnostics.
    fn name(&self) -> &str;
}
