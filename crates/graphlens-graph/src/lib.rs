//! Citation-driven knowledge graph assembly.
//!
//! Turns the `[Data: Entities (...), Relationships (...)]` annotations that
//! a GraphRAG answer cites into a deduplicated, role-styled graph:
//!
//! 1. [`citation`] parses one annotation into a [`CitationSet`]
//! 2. [`resolver`] maps cited ids onto the entity and relationship tables,
//!    joining relationship endpoints to entities by title
//! 3. [`assembler`] merges every evidence row into one [`AssembledGraph`]
//! 4. [`projection`] and [`render`] produce display tables and a standalone
//!    HTML document
//!
//! All of it is synchronous and deterministic; nothing here performs I/O
//! except [`render::serialize`].

pub mod assembler;
pub mod citation;
pub mod diagnostics;
pub mod evidence;
pub mod projection;
pub mod render;
pub mod resolver;
pub mod types;

pub use assembler::{Assembly, AssemblyStats, GraphAssembler, assemble};
pub use citation::{CitationSet, parse_citation};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use evidence::{EvidenceRow, extract_annotation};
pub use projection::{EntityRow, RelationshipRow, project_for_display, related_reports};
pub use render::{RenderOptions, render_html, serialize};
pub use resolver::{Resolution, TitleIndex, resolve};
pub use types::{AssembledGraph, GraphEdge, GraphNode, GraphSnapshot, GraphStyle, NodeRole, NodeShape};
