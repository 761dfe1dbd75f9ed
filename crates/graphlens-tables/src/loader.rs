//! Loading knowledge tables from CSV or JSON exports.
//!
//! The indexing pipeline writes its artifacts as columnar dumps; Graphlens
//! expects them converted to CSV (header row, comma separated) or to a JSON
//! array of records. The format is picked from the file extension.
//!
//! # Example
//!
//! ```no_run
//! use graphlens_tables::KnowledgeTables;
//!
//! let tables = KnowledgeTables::load_dir("./data/output")?;
//! println!("{} entities", tables.entities.len());
//! # Ok::<(), graphlens_core::Error>(())
//! ```

use crate::table::{EntityTable, Record, RelationshipTable, ReportTable, Table};
use graphlens_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// File stems tried for each table, in order.
const ENTITY_STEMS: &[&str] = &["entities", "create_final_entities"];
const RELATIONSHIP_STEMS: &[&str] = &["relationships", "create_final_relationships"];
const REPORT_STEMS: &[&str] = &["community_reports", "create_final_community_reports"];

/// Supported on-disk table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of row objects.
    Json,
}

impl TableFormat {
    /// All formats, in lookup preference order.
    pub const ALL: [TableFormat; 2] = [TableFormat::Csv, TableFormat::Json];

    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Loads a single table file.
pub fn load_table<R>(path: impl AsRef<Path>) -> Result<Table<R>>
where
    R: Record + DeserializeOwned,
{
    let path = path.as_ref();
    let format = TableFormat::from_path(path).ok_or_else(|| {
        Error::parse(format!(
            "Unsupported table format for {} (expected .csv or .json)",
            path.display()
        ))
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let rows: Vec<R> = match format {
        TableFormat::Csv => parse_csv(&content, path)?,
        TableFormat::Json => serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("Failed to parse {}: {e}", path.display())))?,
    };

    let table = Table::from_rows(rows)?;
    log::debug!("Loaded {} {} rows from {}", table.len(), R::KIND, path.display());
    Ok(table)
}

fn parse_csv<R: DeserializeOwned>(content: &str, path: &Path) -> Result<Vec<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<R>, csv::Error>>()
        .map_err(|e| Error::parse(format!("Failed to parse {}: {e}", path.display())))
}

/// Finds the first existing `<stem>.<ext>` file in a directory.
fn find_table_file(dir: &Path, stems: &[&str]) -> Option<PathBuf> {
    stems.iter().find_map(|stem| {
        TableFormat::ALL
            .iter()
            .map(|format| dir.join(format!("{stem}.{}", format.extension())))
            .find(|candidate| candidate.is_file())
    })
}

// ============================================================================
// KnowledgeTables
// ============================================================================

/// The three read-only tables a query is resolved against.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeTables {
    /// Entity table.
    pub entities: EntityTable,
    /// Relationship table.
    pub relationships: RelationshipTable,
    /// Community report table (empty when not exported).
    pub reports: ReportTable,
}

impl KnowledgeTables {
    /// Bundles already-loaded tables.
    pub fn new(entities: EntityTable, relationships: RelationshipTable) -> Self {
        Self {
            entities,
            relationships,
            reports: ReportTable::empty(),
        }
    }

    /// Sets the community report table.
    pub fn with_reports(mut self, reports: ReportTable) -> Self {
        self.reports = reports;
        self
    }

    /// Loads tables from explicit file paths.
    pub fn load(
        entities: impl AsRef<Path>,
        relationships: impl AsRef<Path>,
        reports: Option<&Path>,
    ) -> Result<Self> {
        let mut tables = Self::new(load_table(entities)?, load_table(relationships)?);
        if let Some(path) = reports {
            tables.reports = load_table(path)?;
        }
        Ok(tables)
    }

    /// Loads tables from a data directory using the conventional file names.
    ///
    /// Entities and relationships are required; community reports are
    /// optional and left empty when no file is found.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entities = find_table_file(dir, ENTITY_STEMS)
            .ok_or_else(|| Error::not_found("entity table", dir.display()))?;
        let relationships = find_table_file(dir, RELATIONSHIP_STEMS)
            .ok_or_else(|| Error::not_found("relationship table", dir.display()))?;
        let reports = find_table_file(dir, REPORT_STEMS);
        if reports.is_none() {
            log::info!("No community report table in {}", dir.display());
        }

        Self::load(entities, relationships, reports.as_deref())
    }
}
