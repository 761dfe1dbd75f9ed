//! Read-only knowledge tables exported by a GraphRAG indexing run.
//!
//! Graphlens never builds these tables; it loads the entity, relationship,
//! and community report exports once at startup and treats them as
//! immutable for the lifetime of the process.
//!
//! # Modules
//!
//! - [`types`]: Row types ([`Entity`], [`Relationship`], [`CommunityReport`])
//! - [`table`]: Id-indexed [`Table`] container
//! - [`loader`]: CSV and JSON loading

pub mod loader;
pub mod table;
pub mod types;

pub use loader::{KnowledgeTables, TableFormat, load_table};
pub use table::{EntityTable, Record, RelationshipTable, ReportTable, Table};
pub use types::{CommunityReport, Entity, Relationship};
