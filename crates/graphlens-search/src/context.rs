//! Parsing of the pipe-delimited context table.
//!
//! The search service reports its evidence as a `|`-separated table with a
//! header row, for example:
//!
//! ```text
//! -----Reports-----
//! id|title|content|rank
//! 4|Su Shi and the Song court|"Su Shi served ... [Data: Entities (1), Relationships (10)]"|8.5
//! ```
//!
//! Only `content` is required. `id`, `title` and `rank` are kept when present.
//! Section banners (`-----Reports-----`) and header rows repeated by chunked
//! responses are dropped after the table is read, so quoted content is never
//! touched.

use graphlens_core::{Error, Result};
use graphlens_graph::EvidenceRow;

const DELIMITER: u8 = b'|';

/// Parse a context table into evidence rows.
///
/// Rows that cannot be read are skipped with a warning. An empty table
/// yields no rows.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the header has no `content` column.
pub fn parse_context(text: &str) -> Result<Vec<EvidenceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut columns: Option<Columns> = None;
    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if columns.is_none() => {
                return Err(Error::parse(format!("context table header: {e}")));
            }
            Err(e) => {
                log::warn!("Skipping unreadable context row {line}: {e}");
                continue;
            }
        };
        if is_banner(&record) {
            continue;
        }
        if columns.is_none() {
            columns = Some(Columns::from_header(record)?);
            continue;
        }
        let Some(cols) = &columns else { continue };
        if record.iter().eq(cols.header.iter()) {
            continue;
        }
        let Some(content) = record.get(cols.content) else {
            log::warn!("Skipping context row {line}: no content field");
            continue;
        };

        let mut row = EvidenceRow::from_content(content);
        if let Some(id) = cols
            .id
            .and_then(|i| record.get(i))
            .and_then(|v| v.parse::<i64>().ok())
        {
            row = row.with_report_id(id);
        }
        if let Some(title) = cols
            .title
            .and_then(|i| record.get(i))
            .filter(|v| !v.is_empty())
        {
            row = row.with_title(title);
        }
        if let Some(rank) = cols
            .rank
            .and_then(|i| record.get(i))
            .and_then(|v| v.parse::<f64>().ok())
        {
            row = row.with_rank(rank);
        }
        rows.push(row);
    }

    log::debug!("Parsed {} evidence rows from context table", rows.len());
    Ok(rows)
}

/// Column positions taken from the header row.
struct Columns {
    header: csv::StringRecord,
    content: usize,
    id: Option<usize>,
    title: Option<usize>,
    rank: Option<usize>,
}

impl Columns {
    fn from_header(header: csv::StringRecord) -> Result<Self> {
        let column = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        let content =
            column("content").ok_or_else(|| Error::parse("context table has no content column"))?;
        let (id, title, rank) = (column("id"), column("title"), column("rank"));
        Ok(Self {
            header,
            content,
            id,
            title,
            rank,
        })
    }
}

/// A `-----Section-----` record: one non-empty field shaped like a banner.
fn is_banner(record: &csv::StringRecord) -> bool {
    let mut fields = record.iter().filter(|f| !f.is_empty());
    match (fields.next(), fields.next()) {
        (Some(field), None) => {
            field.len() > 10 && field.starts_with("-----") && field.ends_with("-----")
        }
        _ => false,
    }
}
