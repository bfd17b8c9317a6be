//! The orthogonal drawing pipeline.
//!
//! Shape synthesis, the metric cycle-repair loop, useless-bend removal,
//! inconsistency repair, coordinate assignment, high-degree expansion and
//! compaction, in that order. Each drawing job is self-contained and
//! single-threaded; the SAT oracle call is the only suspension point.

use super::compaction::compact_area;
use super::equivalence::{build_equivalence_classes, classes_to_orderings, EdgeLabels};
use super::expansion::{expand_high_degree, has_high_degree, spread_overlapped_edges};
use super::shape::{Direction, Shape};
use super::shape_builder::build_shape;
use crate::analysis::{cycle_basis, find_cycle_directed, is_connected, topological_sort};
use crate::error::{DrawingError, Result};
use crate::model::{Color, Cycle, DiGraph, GraphAttributes, NodeId, UndirectedGraph};
use crate::sat::{DpllSolver, SatOracle};
use crate::worker::{NoopMonitor, ProgressMonitor};
use std::collections::{HashMap, HashSet};

/// A finished drawing: the augmented graph, its attributes and shape, and
/// the repair-loop counters.
#[derive(Debug)]
pub struct DrawingResult {
    pub graph: UndirectedGraph,
    pub attributes: GraphAttributes,
    pub shape: Shape,
    /// Cycle-basis size before any metric cycle was added.
    pub initial_cycle_count: usize,
    /// Metric cycles appended by the cycle-repair loop.
    pub added_cycle_count: usize,
    /// Flat RED corners deleted after shape synthesis.
    pub removed_bend_count: usize,
}

/// Draw a graph with the built-in solver, a fixed tie-break seed, and no
/// progress reporting.
pub fn make_orthogonal_drawing(graph: &UndirectedGraph) -> Result<DrawingResult> {
    make_orthogonal_drawing_with(graph, &DpllSolver::new(), &NoopMonitor, false)
}

/// Draw a graph against a caller-chosen SAT oracle and progress monitor.
///
/// Disconnected inputs are rejected up front. Cancellation is honored
/// between solver invocations only.
pub fn make_orthogonal_drawing_with(
    graph: &UndirectedGraph,
    oracle: &dyn SatOracle,
    monitor: &dyn ProgressMonitor,
    randomize: bool,
) -> Result<DrawingResult> {
    if !is_connected(graph) {
        return Err(DrawingError::Disconnected);
    }
    let mut cycles = if graph.node_count() == 0 {
        Vec::new()
    } else {
        cycle_basis(graph)
    };
    let initial_cycle_count = cycles.len();

    // working copy owning the bend and auxiliary vertices to come
    let mut augmented = UndirectedGraph::new();
    let mut attributes = GraphAttributes::new();
    for node_id in graph.node_ids() {
        augmented.add_node(node_id);
        attributes.set_color(node_id, Color::Black);
    }
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            if node_id < edge.to {
                augmented.add_edge(node_id, edge.to);
            }
        }
    }

    let mut shape = build_shape(
        &mut augmented,
        &mut attributes,
        &mut cycles,
        oracle,
        randomize,
        monitor,
    )?;

    // metric cycle-repair loop: a cycle in an ordering graph means some
    // segment chain would have to return to where it started
    let mut added_cycle_count = 0;
    while let Some(cycle) = check_metric_violation(&shape, &augmented) {
        cycles.push(cycle);
        added_cycle_count += 1;
        shape = build_shape(
            &mut augmented,
            &mut attributes,
            &mut cycles,
            oracle,
            randomize,
            monitor,
        )?;
    }

    let size_before = augmented.node_count();
    remove_useless_bends(&mut augmented, &mut attributes, &mut shape);
    let removed_bend_count = size_before - augmented.node_count();
    // the basis no longer matches the graph once bends were spliced out
    cycles.clear();

    if has_high_degree(&augmented) {
        expand_high_degree(&mut augmented, &mut attributes, &mut shape)?;
        build_node_positions(&augmented, &mut attributes, &mut shape)?;
        spread_overlapped_edges(&mut augmented, &mut attributes, &mut shape)?;
        fix_negative_positions(&augmented, &mut attributes);
    } else {
        build_node_positions(&augmented, &mut attributes, &mut shape)?;
    }
    compact_area(&augmented, &mut attributes);

    Ok(DrawingResult {
        graph: augmented,
        attributes,
        shape,
        initial_cycle_count,
        added_cycle_count,
        removed_bend_count,
    })
}

// =========================================================================
// Ordering-cycle lifting
// =========================================================================

/// DFS path between two members of one equivalence class, following only
/// the class's own segment orientation.
fn path_in_class(
    graph: &UndirectedGraph,
    from: NodeId,
    to: NodeId,
    shape: &Shape,
    go_horizontal: bool,
) -> Vec<NodeId> {
    fn dfs(
        graph: &UndirectedGraph,
        shape: &Shape,
        current: NodeId,
        to: NodeId,
        go_horizontal: bool,
        visited: &mut HashSet<NodeId>,
        path: &mut Vec<NodeId>,
    ) {
        if current == to {
            path.push(current);
            return;
        }
        visited.insert(current);
        for edge in graph.edges_of(current) {
            let neighbor_id = edge.to;
            if visited.contains(&neighbor_id) {
                continue;
            }
            if go_horizontal == shape.is_horizontal(current, neighbor_id) {
                dfs(graph, shape, neighbor_id, to, go_horizontal, visited, path);
                if !path.is_empty() {
                    path.push(current);
                    return;
                }
            }
        }
        visited.remove(&current);
    }

    let mut visited = HashSet::new();
    let mut path = Vec::new();
    dfs(graph, shape, from, to, go_horizontal, &mut visited, &mut path);
    path.reverse();
    path
}

/// Lift a cycle of ordering classes back into a graph cycle, stitching
/// labeled ordering edges together with in-class paths.
fn lift_ordering_cycle(
    graph: &UndirectedGraph,
    shape: &Shape,
    ordering_cycle: &Cycle,
    ordering: &DiGraph,
    labels: &EdgeLabels,
    go_horizontal: bool,
) -> Cycle {
    let mut cycle_nodes = Vec::new();
    for i in 0..ordering_cycle.len() {
        let class_id = ordering_cycle.at(i);
        let next_class_id = ordering_cycle.next_of(class_id);
        let edge = ordering.edge_between(class_id, next_class_id);
        let (from, to) = labels.get(edge.id);
        cycle_nodes.push(from);
        let next_next_class_id = ordering_cycle.next_of(next_class_id);
        let next_edge = ordering.edge_between(next_class_id, next_next_class_id);
        let (next_from, _) = labels.get(next_edge.id);
        if to != next_from {
            let path = path_in_class(graph, to, next_from, shape, go_horizontal);
            for &node_id in &path[..path.len() - 1] {
                cycle_nodes.push(node_id);
            }
        }
    }
    Cycle::new(cycle_nodes)
}

/// Find a metric violation: a directed cycle in either ordering graph,
/// lifted back into the graph for the cycle-repair loop.
fn check_metric_violation(shape: &Shape, graph: &UndirectedGraph) -> Option<Cycle> {
    let (classes_x, classes_y) = build_equivalence_classes(shape, graph);
    let orderings = classes_to_orderings(&classes_x, &classes_y, graph, shape);
    if let Some(cycle) = find_cycle_directed(&orderings.ordering_x) {
        return Some(lift_ordering_cycle(
            graph,
            shape,
            &cycle,
            &orderings.ordering_x,
            &orderings.labels_x,
            false,
        ));
    }
    if let Some(cycle) = find_cycle_directed(&orderings.ordering_y) {
        return Some(lift_ordering_cycle(
            graph,
            shape,
            &cycle,
            &orderings.ordering_y,
            &orderings.labels_y,
            true,
        ));
    }
    None
}

// =========================================================================
// Useless bends
// =========================================================================

/// Delete RED corners whose two incident edges share an orientation and
/// splice their neighbors with a single direction-preserving edge.
fn remove_useless_bends(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &mut Shape,
) {
    let mut nodes_to_remove = Vec::new();
    for node_id in graph.node_ids() {
        if attributes.color(node_id) == Color::Black {
            continue;
        }
        let edges = graph.edges_of(node_id);
        let first = edges[0].to;
        let second = edges[1].to;
        if shape.is_horizontal(node_id, first) == shape.is_horizontal(node_id, second) {
            nodes_to_remove.push(node_id);
        }
    }
    for node_id in nodes_to_remove {
        let edges = graph.edges_of(node_id);
        let first = edges[0].to;
        let second = edges[1].to;
        let direction = shape.direction(first, node_id);
        graph.remove_node(node_id);
        graph.add_edge(first, second);
        shape.clear_pair(node_id, first);
        shape.clear_pair(node_id, second);
        shape.assign(first, second, direction);
        attributes.remove_node_attributes(node_id);
    }
}

// =========================================================================
// Inconsistency repair and positions
// =========================================================================

/// Rotate one auxiliary vertex on a lifted ordering cycle and mark it
/// dark so the next round does not pick it again.
fn fix_inconsistency(
    cycle: &Cycle,
    attributes: &mut GraphAttributes,
    graph: &UndirectedGraph,
    shape: &mut Shape,
    color_to_find: Color,
) -> Result<()> {
    let (direction, dark_color) = if color_to_find == Color::Green {
        (Direction::Up, Color::GreenDark)
    } else {
        (Direction::Right, Color::BlueDark)
    };
    let mut colored_node = None;
    for node_id in cycle.iter() {
        if attributes.color(node_id) == color_to_find {
            colored_node = Some(node_id);
        }
    }
    let colored_id = colored_node.ok_or_else(|| {
        DrawingError::Invariant("inconsistency repair: no auxiliary vertex on the cycle".into())
    })?;
    let neighbors = graph.neighbors(colored_id);
    if neighbors.len() != 2 {
        return Err(DrawingError::Invariant(format!(
            "inconsistency repair: auxiliary {colored_id} has degree {}",
            neighbors.len()
        )));
    }
    let target = if shape.is_up(neighbors[0], colored_id) {
        neighbors[0]
    } else {
        neighbors[1]
    };
    shape.clear_pair(colored_id, target);
    shape.assign(colored_id, target, direction);
    attributes.change_color(colored_id, dark_color);
    Ok(())
}

/// Repair ordering cycles until both ordering graphs are acyclic.
fn find_inconsistencies(
    graph: &UndirectedGraph,
    shape: &mut Shape,
    attributes: &mut GraphAttributes,
) -> Result<()> {
    loop {
        let (classes_x, classes_y) = build_equivalence_classes(shape, graph);
        let orderings = classes_to_orderings(&classes_x, &classes_y, graph, shape);
        if let Some(cycle) = find_cycle_directed(&orderings.ordering_x) {
            let lifted = lift_ordering_cycle(
                graph,
                shape,
                &cycle,
                &orderings.ordering_x,
                &orderings.labels_x,
                false,
            );
            fix_inconsistency(&lifted, attributes, graph, shape, Color::Blue)?;
            continue;
        }
        if let Some(cycle) = find_cycle_directed(&orderings.ordering_y) {
            let lifted = lift_ordering_cycle(
                graph,
                shape,
                &cycle,
                &orderings.ordering_y,
                &orderings.labels_y,
                true,
            );
            fix_inconsistency(&lifted, attributes, graph, shape, Color::Green)?;
            continue;
        }
        return Ok(());
    }
}

/// Assign positions: topologically order both ordering graphs and give
/// each class a coordinate 100 beyond the previous one.
fn build_node_positions(
    graph: &UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &mut Shape,
) -> Result<()> {
    find_inconsistencies(graph, shape, attributes)?;
    let (classes_x, classes_y) = build_equivalence_classes(shape, graph);
    let orderings = classes_to_orderings(&classes_x, &classes_y, graph, shape);
    let order_x = topological_sort(&orderings.ordering_x)
        .ok_or_else(|| DrawingError::Invariant("x-ordering still has a cycle".into()))?;
    let order_y = topological_sort(&orderings.ordering_y)
        .ok_or_else(|| DrawingError::Invariant("y-ordering still has a cycle".into()))?;
    let mut node_to_x: HashMap<NodeId, i32> = HashMap::new();
    let mut current_x = 0;
    for class_id in order_x {
        for &node_id in classes_x.elems_of(class_id) {
            node_to_x.insert(node_id, current_x);
        }
        current_x += 100;
    }
    let mut node_to_y: HashMap<NodeId, i32> = HashMap::new();
    let mut current_y = 0;
    for class_id in order_y {
        for &node_id in classes_y.elems_of(class_id) {
            node_to_y.insert(node_id, current_y);
        }
        current_y += 100;
    }
    for node_id in graph.node_ids() {
        attributes.set_position(node_id, node_to_x[&node_id], node_to_y[&node_id]);
    }
    Ok(())
}

/// Translate the drawing so every coordinate is non-negative.
fn fix_negative_positions(graph: &UndirectedGraph, attributes: &mut GraphAttributes) {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    for node_id in graph.node_ids() {
        min_x = min_x.min(attributes.position_x(node_id));
        min_y = min_y.min(attributes.position_y(node_id));
    }
    if min_x < 0 {
        for node_id in graph.node_ids() {
            let x = attributes.position_x(node_id);
            attributes.change_position_x(node_id, x - min_x);
        }
    }
    if min_y < 0 {
        for node_id in graph.node_ids() {
            let y = attributes.position_y(node_id);
            attributes.change_position_y(node_id, y - min_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_disconnected_is_rejected() {
        let mut graph = UndirectedGraph::new();
        graph.add_node(0);
        graph.add_node(1);
        let error = make_orthogonal_drawing(&graph).unwrap_err();
        assert!(matches!(error, DrawingError::Disconnected));
    }

    #[test]
    fn test_square_drawing_is_a_unit_square() {
        let result = make_orthogonal_drawing(&cycle_graph(4)).expect("square draws");
        assert_eq!(result.graph.node_count(), 4);
        assert_eq!(result.added_cycle_count, 0);
        let mut cells = HashSet::new();
        for node_id in result.graph.node_ids() {
            let position = result.attributes.position(node_id);
            assert!(cells.insert((position.x, position.y)));
            assert_eq!(position.x % 100, 0);
            assert_eq!(position.y % 100, 0);
            assert!(position.x <= 100 && position.y <= 100);
        }
    }

    #[test]
    fn test_shape_orientations_are_opposite() {
        let result = make_orthogonal_drawing(&cycle_graph(4)).expect("square draws");
        for edge in result.graph.edges() {
            assert_eq!(
                result.shape.direction(edge.from, edge.to),
                result.shape.direction(edge.to, edge.from).opposite()
            );
        }
    }
}
