//! Graphlens CLI
//!
//! Ask a GraphRAG service a question and see the knowledge graph behind the
//! answer.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use graphlens_cli::config_handlers::handle_config_command;
use graphlens_cli::{Cli, Command, GraphlensConfig, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,graphlens=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Config { action } => handle_config_command(config_path, action)?,
        Command::Query {
            text,
            output,
            format,
            no_render,
        } => {
            let config = GraphlensConfig::load(config_path)?;
            commands::cmd_query(&config, &text, output, format, no_render).await?;
        }
        Command::Render {
            evidence,
            output,
            query,
        } => {
            let config = GraphlensConfig::load(config_path)?;
            commands::cmd_render(&config, &evidence, output, &query).await?;
        }
    }

    Ok(())
}
