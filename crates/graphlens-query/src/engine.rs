//! The query pipeline.

use crate::outcome::QueryOutcome;
use graphlens_core::{Error, Result};
use graphlens_graph::{
    GraphAssembler, GraphStyle, RenderOptions, project_for_display, related_reports, serialize,
};
use graphlens_search::{SearchEngine, SearchResponse};
use graphlens_tables::KnowledgeTables;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Runs queries against a search engine and resolves the answers' citations
/// against the knowledge tables.
///
/// The tables are shared read-only; every query builds its own title index
/// and graph.
///
/// # Example
///
/// ```rust,ignore
/// let tables = Arc::new(KnowledgeTables::load_dir("output")?);
/// let engine = QueryEngine::new(tables, Arc::new(HttpSearchEngine::new(url)))
///     .with_timeout(Duration::from_secs(120));
///
/// let outcome = engine.run("What did Su Shi write in Huangzhou?").await?;
/// engine.render(&outcome, "graph.html")?;
/// ```
pub struct QueryEngine {
    tables: Arc<KnowledgeTables>,
    search: Arc<dyn SearchEngine>,
    render_options: RenderOptions,
    timeout: Option<Duration>,
}

impl QueryEngine {
    /// Create an engine with default styling and no timeout.
    pub fn new(tables: Arc<KnowledgeTables>, search: Arc<dyn SearchEngine>) -> Self {
        Self {
            tables,
            search,
            render_options: RenderOptions::default(),
            timeout: None,
        }
    }

    /// Set the graph style used for edge widths and colors.
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.render_options.style = style;
        self
    }

    /// Set the document options used by [`render`](Self::render).
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Give up on the search call after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The shared tables.
    pub fn tables(&self) -> &KnowledgeTables {
        &self.tables
    }

    /// Run a query end to end.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a blank query
    /// - [`Error::Timeout`] or [`Error::Search`] if the search call fails;
    ///   nothing is assembled in that case
    /// - [`Error::Parse`] or [`Error::CitationFormat`] for malformed evidence
    pub async fn run(&self, query: &str) -> Result<QueryOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation_field("query", "query must not be blank"));
        }

        log::info!("Searching via {} engine", self.search.name());
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.search.search(query))
                .await
                .map_err(|_| Error::Timeout { limit })??,
            None => self.search.search(query).await?,
        };

        self.assemble_response(query, response)
    }

    /// Resolve an already-obtained search response.
    ///
    /// This is the synchronous core of [`run`](Self::run), usable with
    /// recorded responses.
    pub fn assemble_response(&self, query: &str, response: SearchResponse) -> Result<QueryOutcome> {
        let evidence = response.evidence()?;
        log::debug!("{} evidence rows for query", evidence.len());

        let tables = &*self.tables;
        let mut assembler = GraphAssembler::new(&tables.entities, &tables.relationships)
            .with_style(self.render_options.style.clone());
        assembler.add_rows(&evidence)?;
        let assembly = assembler.finish();

        for diagnostic in assembly.stats.warnings() {
            log::warn!("{diagnostic}");
        }

        let (entities, relationships) = project_for_display(
            &tables.entities,
            &tables.relationships,
            &assembly.all_cited_entities,
            &assembly.all_cited_relationships,
        );
        let reports = related_reports(&tables.reports, &evidence);

        Ok(QueryOutcome {
            query: query.to_string(),
            response_text: response.response_text,
            evidence,
            graph: assembly.graph,
            all_cited_entities: assembly.all_cited_entities,
            all_cited_relationships: assembly.all_cited_relationships,
            entities,
            relationships,
            reports,
            stats: assembly.stats,
        })
    }

    /// Write the outcome's graph as a standalone HTML document.
    ///
    /// # Errors
    ///
    /// [`Error::Export`] if the document cannot be written; an earlier
    /// document at `destination` is left intact.
    pub fn render(&self, outcome: &QueryOutcome, destination: impl AsRef<Path>) -> Result<()> {
        let options = self.render_options.clone().with_title(&outcome.query);
        serialize(&outcome.graph, destination, &options)
    }
}
