//! SVG rendering of a finished drawing.
//!
//! Edges become line segments; original (BLACK) vertices become labeled
//! squares whose side grows with degree. Bend and auxiliary vertices are
//! left undrawn so the polylines read as single edges.

use crate::model::{Color, GraphAttributes, NodeId, UndirectedGraph};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Affine map from one interval onto another.
struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    fn new(domain_start: f64, domain_end: f64, range_start: f64, range_end: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        }
    }

    fn map(&self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return (self.range_start + self.range_end) / 2.0;
        }
        self.range_start
            + (value - self.domain_start) / span * (self.range_end - self.range_start)
    }
}

const CANVAS_HEIGHT: i32 = 900;

/// Render the drawing as an SVG document.
pub fn write_string(graph: &UndirectedGraph, attributes: &GraphAttributes) -> String {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;
    for node_id in graph.node_ids() {
        min_x = min_x.min(attributes.position_x(node_id));
        max_x = max_x.max(attributes.position_x(node_id));
        min_y = min_y.min(attributes.position_y(node_id));
        max_y = max_y.max(attributes.position_y(node_id));
    }
    if min_x > max_x {
        // empty graph
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_HEIGHT}\" height=\"{CANVAS_HEIGHT}\"/>\n"
        );
    }
    let ratio = if max_y > min_y {
        (max_x - min_x) as f64 / (max_y - min_y) as f64
    } else {
        1.0
    };
    let width = ((ratio * f64::from(CANVAS_HEIGHT)).ceil() as i32).max(1);
    let scale_x = LinearScale::new(
        f64::from(min_x - 100),
        f64::from(max_x + 100),
        0.0,
        f64::from(width),
    );
    let scale_y = LinearScale::new(
        f64::from(min_y - 100),
        f64::from(max_y + 100),
        f64::from(CANVAS_HEIGHT),
        0.0,
    );

    let mut points: HashMap<NodeId, (f64, f64)> = HashMap::new();
    for node_id in graph.node_ids() {
        let x = scale_x.map(f64::from(attributes.position_x(node_id)));
        let y = scale_y.map(f64::from(attributes.position_y(node_id)));
        points.insert(node_id, (x, y));
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {width} {CANVAS_HEIGHT}\">"
    );
    for edge in graph.edges() {
        let (x1, y1) = points[&edge.from];
        let (x2, y2) = points[&edge.to];
        let _ = writeln!(
            out,
            "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"black\" stroke-width=\"2\"/>"
        );
    }
    for node_id in graph.node_ids() {
        if attributes.color(node_id) != Color::Black {
            continue;
        }
        let degree = graph.degree(node_id);
        let side = if degree <= 4 {
            25.0
        } else {
            (25.0 * ((degree - 3) as f64).sqrt()).ceil()
        };
        let (x, y) = points[&node_id];
        let _ = writeln!(
            out,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{side}\" height=\"{side}\" fill=\"{}\"/>",
            x - side / 2.0,
            y - side / 2.0,
            attributes.color(node_id).css_name()
        );
        let _ = writeln!(
            out,
            "  <text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"white\" font-size=\"14\">{node_id}</text>",
            y + 5.0
        );
    }
    out.push_str("</svg>\n");
    out
}

/// Write the SVG document to a file.
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

    #[test]
    fn test_svg_draws_black_nodes_only() {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        graph.add_node(0);
        graph.add_node(1);
        graph.add_node(2);
        graph.add_edge(0, 2);
        graph.add_edge(2, 1);
        attributes.set_color(0, Color::Black);
        attributes.set_color(1, Color::Black);
        attributes.set_color(2, Color::Red);
        attributes.set_position(0, 0, 0);
        attributes.set_position(1, 100, 100);
        attributes.set_position(2, 100, 0);
        let svg = write_string(&graph, &attributes);
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("</svg>"));
    }
}
