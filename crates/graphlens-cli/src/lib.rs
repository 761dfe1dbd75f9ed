//! # graphlens-cli
//!
//! Command-line front-end for Graphlens:
//! - `graphlens query`: ask a question, print the cited tables, write the graph
//! - `graphlens render`: build a graph from a recorded search response
//! - `graphlens config`: inspect and create the configuration file

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction, OutputFormat};
pub use config::GraphlensConfig;
