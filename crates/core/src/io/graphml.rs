//! GraphML export.
//!
//! Nodes carry their color and, when placed, their grid position as data
//! keys; edges default to undirected.

use crate::model::{GraphAttributes, UndirectedGraph};
use std::fs;
use std::io;
use std::path::Path;

fn write_data_tag(out: &mut String, key_id: &str, value: &str) {
    out.push_str(&format!("    <data key=\"{key_id}\">{value}</data>\n"));
}

/// Render a graph (with attributes) as a GraphML document.
pub fn write_string(graph: &UndirectedGraph, attributes: &GraphAttributes) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\"\n");
    out.push_str("         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n");
    out.push_str("         xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns\n");
    out.push_str("         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n\n");
    out.push_str("  <key id=\"d0\" for=\"node\" attr.name=\"color\" attr.type=\"string\"/>\n");
    out.push_str("  <key id=\"d1\" for=\"node\" attr.name=\"pos_x\" attr.type=\"int\"/>\n");
    out.push_str("  <key id=\"d2\" for=\"node\" attr.name=\"pos_y\" attr.type=\"int\"/>\n");
    out.push('\n');
    out.push_str("  <graph id=\"G\" edgedefault=\"undirected\">\n");
    for node_id in graph.node_ids() {
        out.push_str(&format!("    <node id=\"n{node_id}\">\n"));
        if attributes.has_color(node_id) {
            write_data_tag(&mut out, "d0", attributes.color(node_id).css_name());
        }
        if attributes.has_position(node_id) {
            write_data_tag(&mut out, "d1", &attributes.position_x(node_id).to_string());
            write_data_tag(&mut out, "d2", &attributes.position_y(node_id).to_string());
        }
        out.push_str("    </node>\n");
    }
    for edge in graph.edges() {
        out.push_str(&format!(
            "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>\n",
            edge.id, edge.from, edge.to
        ));
    }
    out.push_str("  </graph>\n");
    out.push_str("</graphml>\n");
    out
}

/// Write the GraphML document to a file.
pub fn write_file(
    graph: &UndirectedGraph,
    attributes: &GraphAttributes,
    path: &Path,
) -> io::Result<()> {
    fs::write(path, write_string(graph, attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    #[test]
    fn test_graphml_contains_nodes_edges_and_keys() {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        graph.add_node(0);
        graph.add_node(1);
        graph.add_edge(0, 1);
        attributes.set_color(0, Color::Black);
        attributes.set_color(1, Color::Red);
        attributes.set_position(0, 0, 0);
        attributes.set_position(1, 100, 0);
        let xml = write_string(&graph, &attributes);
        assert!(xml.contains("<graph id=\"G\" edgedefault=\"undirected\">"));
        assert!(xml.contains("<node id=\"n0\">"));
        assert!(xml.contains("source=\"n0\" target=\"n1\""));
        assert!(xml.contains("<data key=\"d0\">red</data>"));
        assert!(xml.contains("<data key=\"d1\">100</data>"));
    }
}
