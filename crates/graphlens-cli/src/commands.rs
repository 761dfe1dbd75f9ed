//! Handlers for `graphlens query` and `graphlens render`.

use crate::cli::OutputFormat;
use crate::config::GraphlensConfig;
use graphlens_core::Result;
use graphlens_query::{QueryEngine, QueryOutcome};
use graphlens_search::{ReplaySearchEngine, SearchEngine};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Build a query engine from configuration.
pub fn build_engine(config: &GraphlensConfig, search: Arc<dyn SearchEngine>) -> Result<QueryEngine> {
    let tables = config.load_tables()?;
    tracing::info!(
        entities = tables.entities.len(),
        relationships = tables.relationships.len(),
        reports = tables.reports.len(),
        "Loaded knowledge tables"
    );

    let mut engine = QueryEngine::new(Arc::new(tables), search)
        .with_render_options(config.render.options());
    if let Some(timeout) = config.search_timeout() {
        engine = engine.with_timeout(timeout);
    }
    Ok(engine)
}

/// `graphlens query`.
pub async fn cmd_query(
    config: &GraphlensConfig,
    text: &str,
    output: Option<PathBuf>,
    format: OutputFormat,
    no_render: bool,
) -> Result<()> {
    let engine = build_engine(config, config.search_engine()?)?;
    let outcome = engine.run(text).await?;

    report_warnings(&outcome);
    print_outcome(&outcome, format)?;

    if !no_render {
        let path = output.unwrap_or_else(|| config.render.output.clone());
        engine.render(&outcome, &path)?;
        tracing::info!("Graph written to {}", path.display());
    }
    Ok(())
}

/// `graphlens render`.
pub async fn cmd_render(
    config: &GraphlensConfig,
    evidence: &Path,
    output: Option<PathBuf>,
    query: &str,
) -> Result<()> {
    let replay = ReplaySearchEngine::new(evidence);
    let response = replay.load().await?;
    let engine = build_engine(config, Arc::new(replay))?;
    let outcome = engine.assemble_response(query, response)?;

    report_warnings(&outcome);

    let path = output.unwrap_or_else(|| config.render.output.clone());
    engine.render(&outcome, &path)?;
    println!(
        "Wrote {} nodes and {} edges to {}",
        outcome.graph.node_count(),
        outcome.graph.edge_count(),
        path.display()
    );
    Ok(())
}

fn report_warnings(outcome: &QueryOutcome) {
    for diagnostic in outcome.warnings() {
        eprintln!("warning: {diagnostic}");
    }
}

fn print_outcome(outcome: &QueryOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Table => print!("{}", format_outcome(outcome)),
    }
    Ok(())
}

/// Human-readable rendering of an outcome.
pub fn format_outcome(outcome: &QueryOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", outcome.response_text.trim());

    let _ = writeln!(out, "Cited entities ({})", outcome.entities.len());
    for row in &outcome.entities {
        let _ = writeln!(out, "  {:>6}  {}  {}", row.id, row.title, one_line(&row.description));
    }

    let _ = writeln!(out, "\nCited relationships ({})", outcome.relationships.len());
    for row in &outcome.relationships {
        let _ = writeln!(
            out,
            "  {:>6}  {} -> {}  {}",
            row.id,
            row.source,
            row.target,
            one_line(&row.description)
        );
    }

    if !outcome.reports.is_empty() {
        let _ = writeln!(out, "\nRelated community reports ({})", outcome.reports.len());
        for report in &outcome.reports {
            let _ = writeln!(out, "  {:>6}  {}", report.community, report.title);
        }
    }

    let _ = writeln!(
        out,
        "\nGraph: {} nodes ({} cited, {} context), {} edges",
        outcome.graph.node_count(),
        outcome.stats.cited_nodes,
        outcome.stats.context_nodes,
        outcome.graph.edge_count()
    );
    out
}

fn one_line(text: &str) -> String {
    const MAX: usize = 80;
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX {
        let cut: String = flat.chars().take(MAX - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
