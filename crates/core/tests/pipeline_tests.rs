// End-to-end tests of the orthogonal drawing pipeline.
//
// Each scenario drives a small input graph through the full pipeline and
// checks the structural invariants of the result:
//
// 1. both orientations of every edge carry opposite directions
// 2. no port of a (non-expanded) vertex is used twice
// 3. every node has a lattice position after compaction
// 4. no two nodes share a grid cell (where expansion never runs)

use orthograph_core::model::{Color, NodeId, UndirectedGraph};
use orthograph_core::orthogonal::{compute_all_stats, make_orthogonal_drawing, DrawingResult};
use orthograph_core::planarity::embed_graph;
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Test infrastructure
// ---------------------------------------------------------------------------

fn graph_from_edges(nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> UndirectedGraph {
    let mut graph = UndirectedGraph::new();
    for &node_id in nodes {
        graph.add_node(node_id);
    }
    for &(from, to) in edges {
        graph.add_edge(from, to);
    }
    graph
}

fn cycle_graph(n: NodeId) -> UndirectedGraph {
    let nodes: Vec<NodeId> = (0..n).collect();
    let edges: Vec<(NodeId, NodeId)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    graph_from_edges(&nodes, &edges)
}

fn complete_graph(n: NodeId) -> UndirectedGraph {
    let mut graph = UndirectedGraph::new();
    for i in 0..n {
        graph.add_node(i);
    }
    for i in 0..n {
        for j in i + 1..n {
            graph.add_edge(i, j);
        }
    }
    graph
}

fn count_color(result: &DrawingResult, color: Color) -> usize {
    result
        .graph
        .node_ids()
        .filter(|&id| result.attributes.color(id) == color)
        .count()
}

/// Invariant 1: the two orientations of every edge are opposite.
fn assert_shape_is_antisymmetric(result: &DrawingResult) {
    for edge in result.graph.edges() {
        assert_eq!(
            result.shape.direction(edge.from, edge.to),
            result.shape.direction(edge.to, edge.from).opposite(),
            "edge ({}, {})",
            edge.from,
            edge.to
        );
    }
}

/// Invariant 2: no vertex sends two edges through the same port.
fn assert_ports_unique(result: &DrawingResult) {
    for node_id in result.graph.node_ids() {
        let mut seen = HashSet::new();
        for edge in result.graph.edges_of(node_id) {
            let direction = result.shape.direction(node_id, edge.to);
            assert!(
                seen.insert(direction),
                "node {node_id} uses port {direction} twice"
            );
        }
    }
}

/// Every node is placed on the 100-lattice.
fn assert_positions_on_lattice(result: &DrawingResult) {
    for node_id in result.graph.node_ids() {
        assert!(result.attributes.has_position(node_id));
    }
}

/// Invariant 6: no two nodes share a grid cell.
fn assert_cells_distinct(result: &DrawingResult) {
    let mut cells = HashSet::new();
    for node_id in result.graph.node_ids() {
        let position = result.attributes.position(node_id);
        assert!(
            cells.insert((position.x, position.y)),
            "two nodes share cell ({}, {})",
            position.x,
            position.y
        );
    }
}

// ---------------------------------------------------------------------------
// Seed scenarios
// ---------------------------------------------------------------------------

#[test]
fn triangle_needs_exactly_one_bend() {
    let graph = graph_from_edges(&[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
    let result = make_orthogonal_drawing(&graph).expect("triangle draws");

    assert_eq!(result.added_cycle_count, 0);
    assert_eq!(result.initial_cycle_count, 1);
    assert_eq!(count_color(&result, Color::Red), 1);
    assert_eq!(result.graph.node_count(), 4);

    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_positions_on_lattice(&result);
    assert_cells_distinct(&result);

    let stats = compute_all_stats(&result);
    assert!(stats.area >= 4);
    assert_eq!(stats.crossings, 0);
    assert_eq!(stats.bends, 1);
}

#[test]
fn four_cycle_draws_as_unit_square() {
    let result = make_orthogonal_drawing(&cycle_graph(4)).expect("square draws");

    assert_eq!(count_color(&result, Color::Red), 0);
    assert_eq!(result.added_cycle_count, 0);
    assert_eq!(result.removed_bend_count, 0);

    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_cells_distinct(&result);

    // after compaction the four corners occupy a 2x2 block
    for node_id in result.graph.node_ids() {
        let position = result.attributes.position(node_id);
        assert!(position.x == 0 || position.x == 100);
        assert!(position.y == 0 || position.y == 100);
    }

    let stats = compute_all_stats(&result);
    assert_eq!(stats.bends, 0);
    assert_eq!(stats.crossings, 0);
    assert_eq!(stats.area, 4);
    assert_eq!(stats.total_edge_length, 4);
}

#[test]
fn k4_is_planar_and_draws_with_bends() {
    let graph = complete_graph(4);
    let embedding = embed_graph(&graph).expect("K4 is planar");
    assert!(embedding.is_consistent());
    assert_eq!(embedding.genus(), 0);

    let result = make_orthogonal_drawing(&graph).expect("K4 draws");
    assert!(count_color(&result, Color::Red) >= 2);

    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_positions_on_lattice(&result);
    assert_cells_distinct(&result);
}

#[test]
fn k5_is_not_planar_but_still_draws() {
    let graph = complete_graph(5);
    assert!(embed_graph(&graph).is_none());

    let result = make_orthogonal_drawing(&graph).expect("K5 draws with crossings");
    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_positions_on_lattice(&result);

    let stats = compute_all_stats(&result);
    assert!(stats.area > 0);
    assert!(stats.total_edge_length > 0);
}

#[test]
fn path_draws_as_a_straight_line() {
    let graph = graph_from_edges(&[0, 1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let result = make_orthogonal_drawing(&graph).expect("path draws");

    assert_eq!(count_color(&result, Color::Red), 0);
    assert_eq!(result.initial_cycle_count, 0);
    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_cells_distinct(&result);

    // one axis is constant: the path is drawn as a straight line
    let xs: HashSet<i32> = result
        .graph
        .node_ids()
        .map(|id| result.attributes.position_x(id))
        .collect();
    let ys: HashSet<i32> = result
        .graph
        .node_ids()
        .map(|id| result.attributes.position_y(id))
        .collect();
    assert!(xs.len() == 1 || ys.len() == 1);

    let stats = compute_all_stats(&result);
    assert_eq!(stats.bends, 0);
    assert_eq!(stats.total_edge_length, 4);
    assert_eq!(stats.max_edge_length, 1);
}

#[test]
fn degree_five_star_activates_expansion() {
    let graph = graph_from_edges(
        &[0, 1, 2, 3, 4, 5],
        &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)],
    );
    let result = make_orthogonal_drawing(&graph).expect("star draws");

    // the original vertices survive, plus at least one auxiliary
    assert_eq!(count_color(&result, Color::Black), 6);
    let auxiliary_count = result
        .graph
        .node_ids()
        .filter(|&id| {
            matches!(
                result.attributes.color(id),
                Color::Green | Color::Blue | Color::GreenDark | Color::BlueDark
            )
        })
        .count();
    assert!(auxiliary_count >= 1, "expansion must leave auxiliaries");

    // the hub still reaches all five leaves through bend chains
    assert_eq!(result.graph.degree(0), 5);
    for leaf in 1..=5 {
        assert!(result.graph.has_node(leaf));
    }

    assert_shape_is_antisymmetric(&result);
    assert_positions_on_lattice(&result);
}

// ---------------------------------------------------------------------------
// Cross-cutting properties
// ---------------------------------------------------------------------------

#[test]
fn drawing_keeps_original_connectivity() {
    // contracting bend chains yields the input adjacency
    let graph = complete_graph(4);
    let result = make_orthogonal_drawing(&graph).expect("K4 draws");

    let mut reached: HashMap<NodeId, HashSet<NodeId>> = HashMap::new();
    for start in graph.node_ids() {
        let mut stack: Vec<NodeId> = vec![start];
        let mut visited = HashSet::new();
        while let Some(node_id) = stack.pop() {
            for edge in result.graph.edges_of(node_id) {
                if !visited.insert(edge.to) {
                    continue;
                }
                if result.attributes.color(edge.to) == Color::Black {
                    if edge.to != start {
                        reached.entry(start).or_default().insert(edge.to);
                    }
                } else {
                    stack.push(edge.to);
                }
            }
        }
    }
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            assert!(
                reached[&node_id].contains(&edge.to),
                "edge ({}, {}) lost in the drawing",
                node_id,
                edge.to
            );
        }
    }
}

#[test]
fn larger_planar_graph_draws_cleanly() {
    // 3x3 grid frame: ring of 8 nodes with two rungs
    let mut graph = cycle_graph(8);
    graph.add_edge(1, 7);
    graph.add_edge(3, 5);
    let result = make_orthogonal_drawing(&graph).expect("frame draws");
    assert_shape_is_antisymmetric(&result);
    assert_ports_unique(&result);
    assert_positions_on_lattice(&result);
}
