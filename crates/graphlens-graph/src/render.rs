//! Standalone HTML rendering of an assembled graph.
//!
//! The document inlines the node/edge data as JSON plus a small canvas
//! force-layout script, so it opens without network access and without the
//! producing process running.

use crate::types::{AssembledGraph, GraphStyle, NodeShape};
use graphlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

const TEMPLATE: &str = include_str!("assets/template.html");
const SCRIPT: &str = include_str!("assets/graph.js");
const STYLESHEET: &str = include_str!("assets/graph.css");

// ============================================================================
// Options
// ============================================================================

/// Page-level rendering options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Document title.
    pub page_title: String,
    /// CSS height of the graph area.
    pub height: String,
    /// CSS width of the graph area.
    pub width: String,
    /// Colors, shape and size.
    pub style: GraphStyle,
    /// Draw arrowheads from source to target.
    pub directed: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_title: "Knowledge Graph".to_string(),
            height: "1200px".to_string(),
            width: "100%".to_string(),
            style: GraphStyle::default(),
            directed: false,
        }
    }
}

impl RenderOptions {
    /// Sets the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables or disables arrowheads.
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

// ============================================================================
// Document data
// ============================================================================

#[derive(Serialize)]
struct DocumentData<'a> {
    directed: bool,
    nodes: Vec<NodeData<'a>>,
    edges: Vec<EdgeData<'a>>,
}

#[derive(Serialize)]
struct NodeData<'a> {
    id: i64,
    label: &'a str,
    title: &'a str,
    role: &'static str,
    color: &'a str,
    shape: NodeShape,
    size: u32,
}

#[derive(Serialize)]
struct EdgeData<'a> {
    id: i64,
    from: i64,
    to: i64,
    label: &'a str,
    title: &'a str,
    width: f64,
    color: &'a str,
}

fn document_data<'a>(graph: &'a AssembledGraph, options: &'a RenderOptions) -> DocumentData<'a> {
    let style = &options.style;
    let nodes = graph
        .nodes()
        .map(|n| NodeData {
            id: n.id.get(),
            label: &n.label,
            title: &n.tooltip,
            role: n.role.name(),
            color: style.color_for(n.role),
            shape: style.node_shape,
            size: style.node_size,
        })
        .collect();
    let edges = graph
        .edges()
        .map(|e| EdgeData {
            id: e.relationship.get(),
            from: e.source.get(),
            to: e.target.get(),
            label: &e.label,
            title: &e.tooltip,
            width: e.width,
            color: &style.edge_color,
        })
        .collect();

    DocumentData {
        directed: options.directed,
        nodes,
        edges,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the graph to a self-contained HTML document.
pub fn render_html(graph: &AssembledGraph, options: &RenderOptions) -> Result<String> {
    let data = serde_json::to_string(&document_data(graph, options))?;
    // Keeps "</script>" inside string values from closing the data block.
    let data = data.replace('<', "\\u003c");

    Ok(fill_template(
        TEMPLATE,
        &[
            ("TITLE", escape_html(&options.page_title)),
            ("STYLE", STYLESHEET.to_string()),
            ("WIDTH", escape_html(&options.width)),
            ("HEIGHT", escape_html(&options.height)),
            ("CITED_COLOR", escape_html(&options.style.cited_color)),
            ("CONTEXT_COLOR", escape_html(&options.style.context_color)),
            ("DATA", data),
            ("SCRIPT", SCRIPT.to_string()),
        ],
    ))
}

/// Write the rendered document to `destination`.
///
/// The document is written to a uniquely named temporary file in the
/// destination directory and renamed into place, so a failed write never
/// leaves a truncated document behind and concurrent writers never share a
/// temporary file.
///
/// # Errors
///
/// Any filesystem failure is reported as [`Error::Export`].
pub fn serialize(
    graph: &AssembledGraph,
    destination: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let destination = destination.as_ref();
    let html = render_html(graph, options)?;

    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| Error::export(e, destination))?;

    // Dropping the temp file on any error path removes it.
    let mut tmp = tempfile::Builder::new()
        .prefix(".graphlens-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::export(e, destination))?;
    tmp.write_all(html.as_bytes())
        .map_err(|e| Error::export(e, destination))?;
    tmp.persist(destination)
        .map_err(|e| Error::export(e.error, destination))?;

    log::info!(
        "Wrote graph document ({} nodes, {} edges) to {}",
        graph.node_count(),
        graph.edge_count(),
        destination.display()
    );
    Ok(())
}


/// Single-pass `{{KEY}}` substitution; substituted text is never rescanned.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let replaced = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (v, end + 2))
        });
        match replaced {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{GraphEdge, GraphNode, NodeRole};
    use graphlens_core::{EntityId, RelationshipId};
    use tempfile::tempdir;

    fn sample_graph() -> AssembledGraph {
        let mut graph = AssembledGraph::new();
        graph.upsert_node(GraphNode {
            id: EntityId::new(1),
            label: "Su Shi".to_string(),
            tooltip: "Type: person\nDescription: Song-dynasty poet".to_string(),
            role: NodeRole::Cited,
        });
        graph.upsert_node(GraphNode {
            id: EntityId::new(2),
            label: "Song Dynasty".to_string(),
            tooltip: "Type: era\nDescription: </script><b>".to_string(),
            role: NodeRole::Context,
        });
        graph
            .add_edge(GraphEdge {
                relationship: RelationshipId::new(10),
                source: EntityId::new(1),
                target: EntityId::new(2),
                label: "lived during".to_string(),
                tooltip: "Weight: 1.5".to_string(),
                weight: 1.5,
                width: 0.5,
            })
            .unwrap();
        graph
    }

    fn embedded_data(html: &str) -> serde_json::Value {
        let open = r#"<script id="graphlens-data" type="application/json">"#;
        let start = html.find(open).unwrap() + open.len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn test_render_embeds_nodes_and_edges() {
        let html = render_html(&sample_graph(), &RenderOptions::default()).unwrap();
        let data = embedded_data(&html);

        assert_eq!(data["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(data["nodes"][0]["color"], "#FFA500");
        assert_eq!(data["nodes"][1]["color"], "#808080");
        assert_eq!(data["nodes"][0]["shape"], "circle");
        assert_eq!(data["nodes"][0]["size"], 20);
        assert_eq!(data["edges"][0]["from"], 1);
        assert_eq!(data["edges"][0]["to"], 2);
        assert_eq!(data["edges"][0]["width"], 0.5);
        assert_eq!(data["edges"][0]["title"], "Weight: 1.5");
        assert_eq!(data["directed"], false);
    }

    #[test]
    fn test_render_is_self_contained() {
        let html = render_html(&sample_graph(), &RenderOptions::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
        assert!(!html.contains("{{DATA}}"));
        assert!(html.contains("requestAnimationFrame"));
    }

    #[test]
    fn test_render_escapes_script_breakout() {
        let html = render_html(&sample_graph(), &RenderOptions::default()).unwrap();
        assert!(!html.contains("</script><b>"));
        let data = embedded_data(&html);
        assert_eq!(
            data["nodes"][1]["title"],
            "Type: era\nDescription: </script><b>"
        );
    }

    #[test]
    fn test_render_escapes_title() {
        let options = RenderOptions::default().with_title("Q & A <{{DATA}}>");
        let html = render_html(&AssembledGraph::new(), &options).unwrap();
        assert!(html.contains("<title>Q &amp; A &lt;{{DATA}}&gt;</title>"));
    }

    #[test]
    fn test_fill_template_unknown_key_kept() {
        let out = fill_template("a {{X}} b {{Y}} {{", &[("X", "1".to_string())]);
        assert_eq!(out, "a 1 b {{Y}} {{");
    }

    #[test]
    fn test_serialize_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("graph.html");

        serialize(&sample_graph(), &path, &RenderOptions::default()).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("Su Shi"));
        assert_eq!(entries(&dir.path().join("nested")), vec!["graph.html"]);
    }

    #[test]
    fn test_serialize_ignores_stale_sibling_tmp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.html");
        fs::create_dir(dir.path().join("graph.html.tmp")).unwrap();

        serialize(&sample_graph(), &path, &RenderOptions::default()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("Su Shi"));
    }

    #[test]
    fn test_repeated_serialize_replaces_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.html");
        serialize(&sample_graph(), &path, &RenderOptions::default()).unwrap();
        serialize(&AssembledGraph::new(), &path, &RenderOptions::default()).unwrap();

        assert!(!fs::read_to_string(&path).unwrap().contains("Su Shi"));
        assert_eq!(entries(dir.path()), vec!["graph.html"]);
    }

    #[test]
    fn test_serialize_failure_is_export_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("graph.html");

        let err = serialize(&sample_graph(), &path, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Export { .. }));
    }

    #[test]
    fn test_serialize_failure_leaves_destination_untouched() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the destination makes the final rename fail.
        let path = dir.path().join("graph.html");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "previous").unwrap();

        let err = serialize(&sample_graph(), &path, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Export { .. }));

        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "previous");
        assert_eq!(entries(dir.path()), vec!["graph.html"]);
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
