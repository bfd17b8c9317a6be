//! Graph generators for benchmarks and tests.

use crate::analysis::is_connected;
use crate::model::{NodeId, UndirectedGraph};
use rand::Rng;

/// A connected random graph with the exact node and edge counts.
///
/// Retries whole samples until a connected one comes out, so
/// `edge_count >= node_count - 1` is required.
///
/// # Panics
/// Panics when the edge count cannot yield a connected simple graph.
pub fn random_connected_graph(
    node_count: usize,
    edge_count: usize,
    rng: &mut impl Rng,
) -> UndirectedGraph {
    assert!(
        edge_count + 1 >= node_count,
        "random_connected_graph: too few edges for a connected graph"
    );
    assert!(
        edge_count <= node_count * (node_count - 1) / 2,
        "random_connected_graph: too many edges for a simple graph"
    );
    loop {
        let graph = random_graph_attempt(node_count, edge_count, rng, usize::MAX);
        if is_connected(&graph) {
            return graph;
        }
    }
}

/// A connected random graph in which every vertex has degree at most four.
///
/// # Panics
/// Panics when the edge count exceeds `2 * node_count` or cannot connect
/// the graph.
pub fn random_connected_graph_max_degree_4(
    node_count: usize,
    edge_count: usize,
    rng: &mut impl Rng,
) -> UndirectedGraph {
    assert!(
        edge_count <= 2 * node_count,
        "random_connected_graph_max_degree_4: too many edges"
    );
    assert!(
        edge_count + 1 >= node_count,
        "random_connected_graph_max_degree_4: too few edges for a connected graph"
    );
    loop {
        let graph = random_graph_attempt(node_count, edge_count, rng, 4);
        if is_connected(&graph) {
            return graph;
        }
    }
}

fn random_graph_attempt(
    node_count: usize,
    edge_count: usize,
    rng: &mut impl Rng,
    max_degree: usize,
) -> UndirectedGraph {
    let mut graph = UndirectedGraph::new();
    for i in 0..node_count {
        graph.add_node(i as NodeId);
    }
    let mut added_edges = 0;
    while added_edges < edge_count {
        let from = rng.gen_range(0..node_count) as NodeId;
        let to = rng.gen_range(0..node_count) as NodeId;
        if from == to || graph.has_edge(from, to) {
            continue;
        }
        if graph.degree(from) >= max_degree || graph.degree(to) >= max_degree {
            continue;
        }
        graph.add_edge(from, to);
        added_edges += 1;
    }
    graph
}

/// The frame of an `n x m` grid: the border ring plus its rung edges.
/// Both sides must exceed one.
pub fn grid_frame_graph(n: usize, m: usize) -> UndirectedGraph {
    assert!(n > 1 && m > 1, "grid_frame_graph: sides must exceed one");
    let node_count = (2 * n + 2 * m - 4) as NodeId;
    let n = n as NodeId;
    let mut m = m as NodeId;
    let mut graph = UndirectedGraph::new();
    for i in 0..node_count {
        graph.add_node(i);
    }
    for i in 0..node_count - 1 {
        graph.add_edge(i, i + 1);
    }
    graph.add_edge(0, node_count - 1);
    for i in 1..n - 1 {
        graph.add_edge(i, 2 * n + m - i - 3);
    }
    m -= 2;
    for i in 0..m {
        graph.add_edge(n + i, 2 * n + 2 * m - i - 1);
    }
    graph
}

/// A strip of stacked triangles with `3 * levels` vertices.
pub fn triangle_strip_graph(levels: usize) -> UndirectedGraph {
    let node_count = (3 * levels) as NodeId;
    let mut graph = UndirectedGraph::new();
    for i in 0..node_count {
        graph.add_node(i);
    }
    if node_count < 6 {
        return graph;
    }
    for i in 0..node_count - 3 {
        if i % 3 == 2 {
            graph.add_edge(i, i + 3);
            graph.add_edge(i + 3, i - 2);
        } else {
            graph.add_edge(i, i + 3);
            graph.add_edge(i + 1, i + 3);
        }
    }
    graph
}
