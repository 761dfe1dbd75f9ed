//! Non-fatal problems found while assembling a graph.
//!
//! Each one means something cited was skipped. They are logged where they
//! occur and also collected on [`AssemblyStats`](crate::AssemblyStats) so a
//! front-end can show them to the user.

use graphlens_core::{EntityId, RelationshipId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The row carries no `[Data: ...]` annotation.
    NoAnnotation,
    /// A directly cited entity id is not in the entity table.
    UnknownEntity {
        /// The cited id
        id: EntityId,
    },
    /// A cited relationship id is not in the relationship table.
    UnknownRelationship {
        /// The cited id
        id: RelationshipId,
    },
    /// A relationship endpoint title matches no entity.
    UnresolvedEndpoint {
        /// The relationship that was skipped
        relationship: RelationshipId,
        /// The title that did not resolve
        title: String,
    },
}

impl DiagnosticKind {
    /// Returns `true` for kinds worth surfacing to an end user.
    ///
    /// Rows without annotations are routine.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::NoAnnotation)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAnnotation => write!(f, "no citation annotation"),
            Self::UnknownEntity { id } => write!(f, "entity {id} not found"),
            Self::UnknownRelationship { id } => write!(f, "relationship {id} not found"),
            Self::UnresolvedEndpoint {
                relationship,
                title,
            } => write!(
                f,
                "relationship {relationship} skipped: endpoint {title:?} matches no entity"
            ),
        }
    }
}

/// A [`DiagnosticKind`] tied to the evidence row it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based evidence row index.
    pub row: usize,
    /// The problem.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.kind)
    }
}
