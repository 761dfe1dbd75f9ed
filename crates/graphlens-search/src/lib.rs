//! Search collaborator for Graphlens.
//!
//! The retrieval-augmented search service is external. This crate defines
//! the [`SearchEngine`] seam, a few ways to reach a service (HTTP, recorded
//! replay, in-memory mock), and [`parse_context`] which turns the service's
//! pipe-delimited context table into evidence rows.
//!
//! # Engines
//!
//! - [`HttpSearchEngine`]: POSTs the query to a GraphRAG-compatible endpoint
//! - [`ReplaySearchEngine`]: answers from a recorded response file
//! - `MockSearchEngine`: fixed responses for tests (requires `test-utils`)

pub mod context;
pub mod engine;
pub mod http;
pub mod replay;
pub mod response;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use context::parse_context;
pub use engine::SearchEngine;
pub use http::HttpSearchEngine;
pub use replay::ReplaySearchEngine;
pub use response::{ContextText, SearchResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockSearchEngine;
