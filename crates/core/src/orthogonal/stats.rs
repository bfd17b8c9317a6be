//! Metrics of a finished drawing.
//!
//! Edge metrics treat a chain of bend/auxiliary vertices between two BLACK
//! endpoints as one logical edge; lengths and areas are measured on the
//! dense index grid.

use super::compaction::compute_node_index_positions;
use super::drawing::DrawingResult;
use crate::model::{Color, GraphAttributes, NodeId, UndirectedGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Summary metrics of one drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthogonalStats {
    pub crossings: usize,
    pub bends: i64,
    pub area: i64,
    pub total_edge_length: i64,
    pub max_edge_length: i64,
    pub edge_length_stddev: f64,
    pub max_bends_per_edge: i64,
    pub bends_stddev: f64,
}

/// Sample standard deviation.
fn stddev(values: &[i64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<i64>() as f64 / count;
    let variance = values
        .iter()
        .map(|&value| {
            let difference = value as f64 - mean;
            difference * difference
        })
        .sum::<f64>()
        / (count - 1.0);
    variance.sqrt()
}

/// Walk every bend chain between BLACK endpoints and collect its length
/// on the index grid.
fn compute_edge_lengths(graph: &UndirectedGraph, attributes: &GraphAttributes) -> Vec<i64> {
    let (index_x, index_y) = compute_node_index_positions(graph, attributes);
    let mut edge_lengths = Vec::new();
    for start_id in graph.node_ids() {
        if attributes.color(start_id) != Color::Black {
            continue;
        }
        let mut visited = HashSet::new();
        walk_chain_lengths(
            graph,
            attributes,
            &index_x,
            &index_y,
            start_id,
            start_id,
            0,
            &mut visited,
            &mut edge_lengths,
        );
    }
    edge_lengths
}

#[allow(clippy::too_many_arguments)]
fn walk_chain_lengths(
    graph: &UndirectedGraph,
    attributes: &GraphAttributes,
    index_x: &HashMap<NodeId, i32>,
    index_y: &HashMap<NodeId, i32>,
    current_id: NodeId,
    black_id: NodeId,
    current_length: i64,
    visited: &mut HashSet<NodeId>,
    edge_lengths: &mut Vec<i64>,
) {
    visited.insert(current_id);
    for edge in graph.edges_of(current_id) {
        let neighbor_id = edge.to;
        if visited.contains(&neighbor_id) {
            continue;
        }
        let step = (index_x[&current_id] - index_x[&neighbor_id]).abs() as i64
            + (index_y[&current_id] - index_y[&neighbor_id]).abs() as i64;
        if attributes.color(neighbor_id) != Color::Black {
            walk_chain_lengths(
                graph,
                attributes,
                index_x,
                index_y,
                neighbor_id,
                black_id,
                current_length + step,
                visited,
                edge_lengths,
            );
        } else if black_id < neighbor_id {
            edge_lengths.push(current_length + step);
        }
    }
    visited.remove(&current_id);
}

/// Bends per logical edge: every direction change along a chain counts.
fn compute_bend_counts(graph: &UndirectedGraph, attributes: &GraphAttributes) -> Vec<i64> {
    let (index_x, index_y) = compute_node_index_positions(graph, attributes);
    let mut bend_counts = Vec::new();
    for start_id in graph.node_ids() {
        if attributes.color(start_id) != Color::Black {
            continue;
        }
        let mut visited = HashSet::new();
        walk_chain_bends(
            graph,
            attributes,
            &index_x,
            &index_y,
            start_id,
            start_id,
            0,
            start_id,
            &mut visited,
            &mut bend_counts,
        );
    }
    bend_counts
}

#[allow(clippy::too_many_arguments)]
fn walk_chain_bends(
    graph: &UndirectedGraph,
    attributes: &GraphAttributes,
    index_x: &HashMap<NodeId, i32>,
    index_y: &HashMap<NodeId, i32>,
    current_id: NodeId,
    black_id: NodeId,
    count: i64,
    previous_id: NodeId,
    visited: &mut HashSet<NodeId>,
    bend_counts: &mut Vec<i64>,
) {
    visited.insert(current_id);
    for edge in graph.edges_of(current_id) {
        let neighbor_id = edge.to;
        if visited.contains(&neighbor_id) {
            continue;
        }
        if attributes.color(neighbor_id) != Color::Black {
            // stepping onto a bend vertex turns the chain, unless the
            // vertex collapses onto the cell two steps back
            let folded = index_x[&previous_id] == index_x[&neighbor_id]
                && index_y[&previous_id] == index_y[&neighbor_id];
            let next_count = if folded { count } else { count + 1 };
            walk_chain_bends(
                graph,
                attributes,
                index_x,
                index_y,
                neighbor_id,
                black_id,
                next_count,
                current_id,
                visited,
                bend_counts,
            );
        } else if black_id < neighbor_id {
            let mut final_count = count;
            if index_x[&current_id] == index_x[&neighbor_id]
                && index_y[&current_id] == index_y[&neighbor_id]
            {
                final_count -= 1;
            }
            bend_counts.push(final_count);
        }
    }
    visited.remove(&current_id);
}

/// Bounding-box area on the index grid.
fn compute_total_area(graph: &UndirectedGraph, attributes: &GraphAttributes) -> i64 {
    let (index_x, index_y) = compute_node_index_positions(graph, attributes);
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;
    for node_id in graph.node_ids() {
        min_x = min_x.min(index_x[&node_id]);
        max_x = max_x.max(index_x[&node_id]);
        min_y = min_y.min(index_y[&node_id]);
        max_y = max_y.max(index_y[&node_id]);
    }
    (max_x - min_x + 1) as i64 * (max_y - min_y + 1) as i64
}

/// Whether the open interiors of two axis-aligned segments intersect.
fn do_edges_cross(
    attributes: &GraphAttributes,
    i: NodeId,
    j: NodeId,
    k: NodeId,
    l: NodeId,
) -> bool {
    let (ix, iy) = (attributes.position_x(i), attributes.position_y(i));
    let (jx, jy) = (attributes.position_x(j), attributes.position_y(j));
    let (kx, ky) = (attributes.position_x(k), attributes.position_y(k));
    let (lx, ly) = (attributes.position_x(l), attributes.position_y(l));

    // segments touching a shared line never count as a crossing
    if ix == kx || ix == lx || iy == ky || iy == ly || jx == kx || jx == lx || jy == ky || jy == ly
    {
        return false;
    }

    let ij_horizontal = iy == jy;
    let kl_horizontal = ky == ly;
    if ij_horizontal && kl_horizontal {
        return iy == ky
            && ((ix <= kx && jx >= kx)
                || (ix <= lx && jx >= lx)
                || (jx <= kx && ix >= kx)
                || (jx <= lx && ix >= lx));
    }
    if !ij_horizontal && !kl_horizontal {
        return ix == kx
            && ((iy <= ky && jy >= ky)
                || (iy <= ly && jy >= ly)
                || (jy <= ky && iy >= ky)
                || (jy <= ly && iy >= ly));
    }
    if !ij_horizontal {
        return do_edges_cross(attributes, k, l, i, j);
    }
    if kx < ix.min(jx) || kx > ix.max(jx) {
        return false;
    }
    if iy < ky.min(ly) || iy > ky.max(ly) {
        return false;
    }
    true
}

/// Count crossing segment pairs.
fn compute_total_crossings(graph: &UndirectedGraph, attributes: &GraphAttributes) -> usize {
    let edges: Vec<_> = graph.edges().collect();
    let mut crossings = 0;
    for edge in &edges {
        let (i, j) = (edge.from.min(edge.to), edge.from.max(edge.to));
        for other in &edges {
            if edge.id >= other.id {
                continue;
            }
            let (k, l) = (other.from.min(other.to), other.from.max(other.to));
            if i == k || i == l || j == k || j == l {
                continue;
            }
            if do_edges_cross(attributes, i, j, k, l) {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Compute every drawing metric at once.
pub fn compute_all_stats(result: &DrawingResult) -> OrthogonalStats {
    let graph = &result.graph;
    let attributes = &result.attributes;
    let edge_lengths = compute_edge_lengths(graph, attributes);
    let bend_counts = compute_bend_counts(graph, attributes);
    OrthogonalStats {
        crossings: compute_total_crossings(graph, attributes),
        bends: bend_counts.iter().sum(),
        area: compute_total_area(graph, attributes),
        total_edge_length: edge_lengths.iter().sum(),
        max_edge_length: edge_lengths.iter().copied().max().unwrap_or(0),
        edge_length_stddev: stddev(&edge_lengths),
        max_bends_per_edge: bend_counts.iter().copied().max().unwrap_or(0),
        bends_stddev: stddev(&bend_counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orthogonal::drawing::make_orthogonal_drawing;

    fn cycle_graph(n: NodeId) -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n);
        }
        graph
    }

    #[test]
    fn test_square_stats() {
        let result = make_orthogonal_drawing(&cycle_graph(4)).expect("square draws");
        let stats = compute_all_stats(&result);
        assert_eq!(stats.crossings, 0);
        assert_eq!(stats.bends, 0);
        assert_eq!(stats.area, 4);
        assert_eq!(stats.total_edge_length, 4);
        assert_eq!(stats.max_edge_length, 1);
    }

    #[test]
    fn test_stddev_of_constant_is_zero() {
        assert_eq!(stddev(&[3, 3, 3]), 0.0);
        assert_eq!(stddev(&[7]), 0.0);
    }

    #[test]
    fn test_crossing_detection() {
        // a horizontal and a vertical segment crossing at (50, 50)-ish
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        for i in 0..4 {
            graph.add_node(i);
            attributes.set_color(i, Color::Black);
        }
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        attributes.set_position(0, 0, 50);
        attributes.set_position(1, 100, 50);
        attributes.set_position(2, 50, 0);
        attributes.set_position(3, 50, 100);
        assert_eq!(compute_total_crossings(&graph, &attributes), 1);
    }
}
