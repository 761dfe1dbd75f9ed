//! Search response wire types.

use crate::context::parse_context;
use graphlens_core::Result;
use graphlens_graph::EvidenceRow;
use serde::{Deserialize, Serialize};

/// Context table as returned by the service.
///
/// GraphRAG services return the table either as one string or as a list of
/// chunks that have to be concatenated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextText {
    /// Whole table in one string.
    Single(String),
    /// Table split into chunks.
    Chunks(Vec<String>),
}

impl Default for ContextText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl ContextText {
    /// The full table text.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(text) => text.clone(),
            Self::Chunks(chunks) => chunks.concat(),
        }
    }
}

impl From<&str> for ContextText {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

impl From<String> for ContextText {
    fn from(text: String) -> Self {
        Self::Single(text)
    }
}

/// Answer plus the evidence it was synthesized from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Synthesized answer.
    #[serde(alias = "response")]
    pub response_text: String,
    /// Pipe-delimited evidence table.
    #[serde(default, alias = "context")]
    pub context_text: ContextText,
}

impl SearchResponse {
    /// Creates a response.
    pub fn new(response_text: impl Into<String>, context_text: impl Into<ContextText>) -> Self {
        Self {
            response_text: response_text.into(),
            context_text: context_text.into(),
        }
    }

    /// Parse the context table into evidence rows.
    pub fn evidence(&self) -> Result<Vec<EvidenceRow>> {
        parse_context(&self.context_text.joined())
    }
}
