//! The plain text graph format.
//!
//! ```text
//! nodes:
//! 0
//! 1
//! edges:
//! 0 1
//! ```
//!
//! Blank lines are ignored; `nodes:` and `edges:` are section markers.
//! Ids are non-negative integers and each unordered pair appears at most
//! once.

use super::ParseError;
use crate::model::{NodeId, UndirectedGraph};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Nodes,
    Edges,
}

/// Parse a graph from its textual form.
pub fn parse_string(content: &str) -> Result<UndirectedGraph, ParseError> {
    let mut graph = UndirectedGraph::new();
    let mut section = Section::None;
    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "nodes:" {
            section = Section::Nodes;
            continue;
        }
        if line == "edges:" {
            section = Section::Edges;
            continue;
        }
        match section {
            Section::None => {
                return Err(ParseError::at(line_number, "content before a section marker"));
            }
            Section::Nodes => {
                let node_id: NodeId = line
                    .parse()
                    .map_err(|_| ParseError::at(line_number, format!("bad node id `{line}`")))?;
                if graph.has_node(node_id) {
                    return Err(ParseError::at(line_number, format!("duplicate node {node_id}")));
                }
                graph.add_node(node_id);
            }
            Section::Edges => {
                let mut tokens = line.split_whitespace();
                let from = parse_endpoint(tokens.next(), line_number, line)?;
                let to = parse_endpoint(tokens.next(), line_number, line)?;
                if tokens.next().is_some() {
                    return Err(ParseError::at(line_number, format!("bad edge `{line}`")));
                }
                if !graph.has_node(from) || !graph.has_node(to) {
                    return Err(ParseError::at(line_number, format!("edge on unknown node `{line}`")));
                }
                if from == to {
                    return Err(ParseError::at(line_number, format!("self-loop `{line}`")));
                }
                if graph.has_edge(from, to) {
                    return Err(ParseError::at(line_number, format!("duplicate edge `{line}`")));
                }
                graph.add_edge(from, to);
            }
        }
    }
    Ok(graph)
}

fn parse_endpoint(
    token: Option<&str>,
    line_number: usize,
    line: &str,
) -> Result<NodeId, ParseError> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ParseError::at(line_number, format!("bad edge `{line}`")))
}

/// Parse a graph file from a path.
pub fn parse_file(path: &Path) -> Result<UndirectedGraph, ParseError> {
    let content = fs::read_to_string(path)?;
    parse_string(&content)
}

/// Write a graph in textual form.
pub fn write_string(graph: &UndirectedGraph) -> String {
    let mut out = String::from("nodes:\n");
    for node_id in graph.node_ids() {
        let _ = writeln!(out, "{node_id}");
    }
    out.push_str("edges:\n");
    for edge in graph.edges() {
        let _ = writeln!(out, "{} {}", edge.from, edge.to);
    }
    out
}

/// Write a graph file to a path.
pub fn write_file(graph: &UndirectedGraph, path: &Path) -> Result<(), ParseError> {
    fs::write(path, write_string(graph))?;
    Ok(())
}
