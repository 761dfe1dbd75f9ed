//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Graphlens - knowledge graph views of GraphRAG answers
#[derive(Parser, Debug)]
#[command(name = "graphlens", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a query and write its knowledge graph
    Query {
        /// The question to ask
        text: String,

        /// Where to write the graph document (default: render.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How to print the result
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Skip writing the graph document
        #[arg(long)]
        no_render: bool,
    },

    /// Build a graph from a recorded search response, without searching
    Render {
        /// Recorded search response (JSON)
        #[arg(short, long)]
        evidence: PathBuf,

        /// Where to write the graph document (default: render.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title for the document
        #[arg(short, long, default_value = "Recorded query")]
        query: String,
    },

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `graphlens config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `search.endpoint`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Write here instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `graphlens query`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// The full outcome as JSON
    Json,
}
