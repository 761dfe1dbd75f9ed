//! Query orchestration for Graphlens.
//!
//! [`QueryEngine`] is what a front-end talks to. It exposes the two
//! operations a front-end needs: run a query and render its graph.
//!
//! ```text
//! query ─► SearchEngine ─► context table ─► EvidenceRow*
//!                                              │
//!                      KnowledgeTables ─► GraphAssembler ─► QueryOutcome ─► HTML
//! ```

pub mod engine;
pub mod outcome;

pub use engine::QueryEngine;
pub use outcome::QueryOutcome;
