//! Graphlens Core: shared errors and identifiers.
//!
//! This crate provides the foundational types used across all Graphlens
//! crates. It has no internal Graphlens dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Human-readable entity and relationship identifiers

pub mod error;
pub mod ids;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::{EntityId, RelationshipId};
