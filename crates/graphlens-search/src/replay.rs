//! Offline search engine answering from a recorded response.

use crate::engine::SearchEngine;
use crate::response::SearchResponse;
use async_trait::async_trait;
use graphlens_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Replays a recorded [`SearchResponse`] JSON file for every query.
///
/// The file is re-read on each search so an edited recording takes effect
/// without restarting.
#[derive(Clone, Debug)]
pub struct ReplaySearchEngine {
    path: PathBuf,
}

impl ReplaySearchEngine {
    /// Create a replay engine for the given recording.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The recording path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the recording.
    pub async fn load(&self) -> Result<SearchResponse> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))?;
        serde_json::from_str(&text).map_err(|e| {
            Error::parse(format!(
                "recorded response {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SearchEngine for ReplaySearchEngine {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        log::debug!(
            "Replaying {} for query {:?}",
            self.path.display(),
            query
        );
        self.load().await
    }

    fn name(&self) -> &str {
        "replay"
    }
}
