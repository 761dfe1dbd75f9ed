//! Evidence rows quoted by the search service.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Data: (.*?)\]").expect("annotation pattern is valid"));

/// Return the first `[Data: ...]` annotation in `content`, brackets included.
///
/// ```rust
/// use graphlens_graph::extract_annotation;
///
/// let text = "Su Shi was a poet [Data: Entities (1)] of the Song.";
/// assert_eq!(extract_annotation(text), Some("[Data: Entities (1)]"));
/// assert_eq!(extract_annotation("no citation"), None);
/// ```
pub fn extract_annotation(content: &str) -> Option<&str> {
    ANNOTATION_RE.find(content).map(|m| m.as_str())
}

/// One excerpt of a community report used as evidence for an answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRow {
    /// Community id of the quoted report, when the context table has an
    /// `id` column.
    #[serde(default)]
    pub report_id: Option<i64>,
    /// Report title, when present.
    #[serde(default)]
    pub title: Option<String>,
    /// Report rank, when present.
    #[serde(default)]
    pub rank: Option<f64>,
    /// Raw evidence text.
    pub content: String,
    /// First `[Data: ...]` annotation found in `content`.
    pub citation_annotation: Option<String>,
}

impl EvidenceRow {
    /// Creates a row from raw content, extracting its annotation.
    pub fn from_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let citation_annotation = extract_annotation(&content).map(str::to_string);
        Self {
            report_id: None,
            title: None,
            rank: None,
            content,
            citation_annotation,
        }
    }

    /// Sets the report id.
    pub fn with_report_id(mut self, id: i64) -> Self {
        self.report_id = Some(id);
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the rank.
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Some(rank);
        self
    }
}
