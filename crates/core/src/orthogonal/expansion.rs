//! High-degree vertex expansion.
//!
//! A vertex of degree greater than four cannot place every edge on a
//! distinct port. Each incident edge is rerouted through a fresh auxiliary
//! vertex (GREEN for horizontal originals, BLUE for vertical); interim
//! positions then let the four ports reclaim their extremal auxiliary as a
//! direct edge, and the remaining overlapped edges are spread by small
//! lateral displacements through further dark auxiliaries.

use super::equivalence::{build_equivalence_classes, classes_to_orderings};
use super::shape::{Direction, Shape};
use crate::analysis::topological_sort;
use crate::error::{DrawingError, Result};
use crate::model::{Color, GraphAttributes, NodeId, UndirectedGraph};
use std::collections::HashMap;

/// Whether any vertex exceeds degree four.
pub fn has_high_degree(graph: &UndirectedGraph) -> bool {
    graph.node_ids().any(|node_id| graph.degree(node_id) > 4)
}

/// The only neighbor of `node_id` other than `exclude`.
///
/// # Panics
/// Panics when no such neighbor exists; auxiliary and bend vertices always
/// have exactly two neighbors.
fn other_neighbor(graph: &UndirectedGraph, node_id: NodeId, exclude: NodeId) -> NodeId {
    for edge in graph.edges_of(node_id) {
        if edge.to != exclude {
            return edge.to;
        }
    }
    panic!("no other neighbor for node {node_id}");
}

/// Split every incident edge of every high-degree vertex through an
/// auxiliary vertex, assign interim positions, and collapse the extremal
/// auxiliary of each port back into a direct edge.
pub fn expand_high_degree(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &mut Shape,
) -> Result<()> {
    let high_degree_nodes: Vec<NodeId> = graph
        .node_ids()
        .filter(|&node_id| graph.degree(node_id) > 4)
        .collect();
    for node_id in high_degree_nodes {
        let mut edges_to_remove = Vec::new();
        let mut edges_to_add = Vec::new();
        for edge in graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            let aux_id = graph.add_free_node();
            edges_to_add.push((aux_id, node_id));
            edges_to_add.push((aux_id, neighbor_id));
            shape.set_direction(aux_id, neighbor_id, shape.direction(node_id, neighbor_id));
            shape.set_direction(neighbor_id, aux_id, shape.direction(neighbor_id, node_id));
            if shape.is_horizontal(node_id, neighbor_id) {
                attributes.set_color(aux_id, Color::Green);
                shape.set_direction(node_id, aux_id, Direction::Up);
                shape.set_direction(aux_id, node_id, Direction::Down);
            } else {
                attributes.set_color(aux_id, Color::Blue);
                shape.set_direction(node_id, aux_id, Direction::Right);
                shape.set_direction(aux_id, node_id, Direction::Left);
            }
            shape.clear_pair(node_id, neighbor_id);
            edges_to_remove.push((node_id, neighbor_id));
        }
        for (from, to) in edges_to_add {
            graph.add_edge(from, to);
        }
        for (from, to) in edges_to_remove {
            graph.remove_edge_between(from, to);
        }
    }

    assign_interim_positions(graph, attributes, shape)?;
    reclaim_ports(graph, attributes, shape)?;
    attributes.clear_positions();
    Ok(())
}

/// Plain topological placement on the 100-grid, used only while ports are
/// resolved.
fn assign_interim_positions(
    graph: &UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &Shape,
) -> Result<()> {
    let (classes_x, classes_y) = build_equivalence_classes(shape, graph);
    let orderings = classes_to_orderings(&classes_x, &classes_y, graph, shape);
    let order_x = topological_sort(&orderings.ordering_x)
        .ok_or_else(|| DrawingError::Invariant("x-ordering cyclic after expansion".into()))?;
    let order_y = topological_sort(&orderings.ordering_y)
        .ok_or_else(|| DrawingError::Invariant("y-ordering cyclic after expansion".into()))?;
    let mut node_to_x: HashMap<NodeId, i32> = HashMap::new();
    for (index, class_id) in order_x.into_iter().enumerate() {
        for &node_id in classes_x.elems_of(class_id) {
            node_to_x.insert(node_id, 100 * index as i32);
        }
    }
    let mut node_to_y: HashMap<NodeId, i32> = HashMap::new();
    for (index, class_id) in order_y.into_iter().enumerate() {
        for &node_id in classes_y.elems_of(class_id) {
            node_to_y.insert(node_id, 100 * index as i32);
        }
    }
    for node_id in graph.node_ids() {
        attributes.set_position(node_id, node_to_x[&node_id], node_to_y[&node_id]);
    }
    Ok(())
}

#[derive(Default)]
struct PortExtremes {
    leftmost_up: Option<NodeId>,
    leftmost_down: Option<NodeId>,
    bottommost_left: Option<NodeId>,
    bottommost_right: Option<NodeId>,
}

/// For each expanded vertex find the extremal auxiliary per port: the
/// leftmost whose outgoing edge runs UP resp. DOWN, and the bottommost
/// whose outgoing edge runs LEFT resp. RIGHT.
fn find_port_extremes(
    graph: &UndirectedGraph,
    shape: &Shape,
    attributes: &GraphAttributes,
) -> Result<HashMap<NodeId, PortExtremes>> {
    let mut extremes = HashMap::new();
    for node_id in graph.node_ids() {
        if graph.degree(node_id) <= 4 {
            continue;
        }
        let mut found = PortExtremes::default();
        for edge in graph.edges_of(node_id) {
            let aux_id = edge.to;
            let other_id = other_neighbor(graph, aux_id, node_id);
            if shape.is_horizontal(node_id, aux_id) {
                if shape.is_left(node_id, aux_id) {
                    return Err(DrawingError::Invariant(
                        "expanded vertex keeps a LEFT port edge".into(),
                    ));
                }
                let slot = if shape.is_up(aux_id, other_id) {
                    &mut found.leftmost_up
                } else {
                    &mut found.leftmost_down
                };
                match slot {
                    Some(best)
                        if attributes.position_x(aux_id) >= attributes.position_x(*best) => {}
                    _ => *slot = Some(aux_id),
                }
            } else {
                if shape.is_down(node_id, aux_id) {
                    return Err(DrawingError::Invariant(
                        "expanded vertex keeps a DOWN port edge".into(),
                    ));
                }
                let slot = if shape.is_left(aux_id, other_id) {
                    &mut found.bottommost_left
                } else {
                    &mut found.bottommost_right
                };
                match slot {
                    Some(best)
                        if attributes.position_y(aux_id) >= attributes.position_y(*best) => {}
                    _ => *slot = Some(aux_id),
                }
            }
        }
        extremes.insert(node_id, found);
    }
    Ok(extremes)
}

/// Collapse one auxiliary back into a direct edge that claims the port in
/// `direction`.
fn collapse_auxiliary(
    graph: &mut UndirectedGraph,
    node_id: NodeId,
    aux_id: NodeId,
    shape: &mut Shape,
    attributes: &mut GraphAttributes,
    direction: Direction,
) {
    let other_id = other_neighbor(graph, aux_id, node_id);
    graph.remove_node(aux_id);
    attributes.remove_node_attributes(aux_id);
    graph.add_edge(node_id, other_id);
    shape.clear_pair(node_id, aux_id);
    shape.clear_pair(aux_id, other_id);
    shape.assign(node_id, other_id, direction);
}

/// Give every expanded vertex one direct edge per port.
fn reclaim_ports(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &mut Shape,
) -> Result<()> {
    let extremes = find_port_extremes(graph, shape, attributes)?;
    let missing =
        || DrawingError::Invariant("expanded vertex misses a port auxiliary".into());
    for (node_id, found) in extremes {
        let leftmost_up = found.leftmost_up.ok_or_else(missing)?;
        let leftmost_down = found.leftmost_down.ok_or_else(missing)?;
        let bottommost_left = found.bottommost_left.ok_or_else(missing)?;
        let bottommost_right = found.bottommost_right.ok_or_else(missing)?;
        collapse_auxiliary(graph, node_id, leftmost_up, shape, attributes, Direction::Up);
        collapse_auxiliary(graph, node_id, leftmost_down, shape, attributes, Direction::Down);
        collapse_auxiliary(graph, node_id, bottommost_left, shape, attributes, Direction::Left);
        collapse_auxiliary(graph, node_id, bottommost_right, shape, attributes, Direction::Right);
    }
    Ok(())
}

// =========================================================================
// Overlap spreading
// =========================================================================

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    X,
    Y,
}

fn main_position(attributes: &GraphAttributes, axis: Axis, node_id: NodeId) -> i32 {
    match axis {
        Axis::X => attributes.position_x(node_id),
        Axis::Y => attributes.position_y(node_id),
    }
}

fn cross_position(attributes: &GraphAttributes, axis: Axis, node_id: NodeId) -> i32 {
    match axis {
        Axis::X => attributes.position_y(node_id),
        Axis::Y => attributes.position_x(node_id),
    }
}

fn set_cross_position(attributes: &mut GraphAttributes, axis: Axis, node_id: NodeId, value: i32) {
    match axis {
        Axis::X => attributes.change_position_y(node_id, value),
        Axis::Y => attributes.change_position_x(node_id, value),
    }
}

/// Sort key for the members of one port group before spreading: members
/// whose outgoing edge runs in the decreasing direction come first
/// (position ascending), the BLACK neighbor stays in the middle, and
/// increasing-direction members come last (position descending), so both
/// sides fan outward from the pinned edge.
fn spread_rank(
    member_id: NodeId,
    hub_id: NodeId,
    graph: &UndirectedGraph,
    shape: &Shape,
    attributes: &GraphAttributes,
    increasing: Direction,
    axis: Axis,
) -> (u8, i32) {
    if attributes.color(member_id) == Color::Black {
        return (1, 0);
    }
    let member_other = other_neighbor(graph, member_id, hub_id);
    let direction = shape.direction(member_id, member_other);
    let position = main_position(attributes, axis, member_id);
    if direction == increasing.opposite() {
        (0, position)
    } else if direction == increasing {
        (2, -position)
    } else {
        (1, position)
    }
}

fn find_pinned_index(attributes: &GraphAttributes, group: &[NodeId]) -> usize {
    for (index, &node_id) in group.iter().enumerate() {
        if attributes.color(node_id) == Color::Black {
            return index;
        }
    }
    group.len() / 2
}

/// Spread one port group of `hub_id`: push the rest of the drawing apart
/// by 5 per slot and wire each displaced member through a fresh offset
/// auxiliary.
#[allow(clippy::too_many_arguments)]
fn spread_group(
    hub_id: NodeId,
    graph: &mut UndirectedGraph,
    shape: &mut Shape,
    attributes: &mut GraphAttributes,
    mut group: Vec<NodeId>,
    axis: Axis,
    increasing: Direction,
    color: Color,
) {
    if group.len() < 2 {
        return;
    }
    group.sort_by_key(|&member_id| {
        spread_rank(member_id, hub_id, graph, shape, attributes, increasing, axis)
    });
    let pinned_index = find_pinned_index(attributes, &group);
    let initial_position = cross_position(attributes, axis, hub_id);
    let above_offset = 5 * (group.len() as i32 - pinned_index as i32 - 1);
    let below_offset = 5 * pinned_index as i32;
    let all_nodes: Vec<NodeId> = graph.node_ids().collect();
    for node_id in all_nodes {
        let old_position = cross_position(attributes, axis, node_id);
        if old_position > initial_position {
            set_cross_position(attributes, axis, node_id, old_position + above_offset);
        }
        if old_position < initial_position {
            set_cross_position(attributes, axis, node_id, old_position - below_offset);
        }
    }
    for (index, &member_id) in group.iter().enumerate() {
        if index == pinned_index {
            continue;
        }
        let shift = (index as i32 - pinned_index as i32) * 5;
        let member_other = other_neighbor(graph, member_id, hub_id);
        let direction = shape.direction(member_id, member_other);
        let added_id = graph.add_free_node();
        attributes.set_color(added_id, color);
        shape.set_direction(hub_id, added_id, direction);
        shape.set_direction(added_id, hub_id, direction.opposite());
        shape.set_direction(added_id, member_id, direction);
        shape.set_direction(member_id, added_id, direction.opposite());
        shape.clear_pair(hub_id, member_id);
        graph.remove_edge_between(hub_id, member_id);
        graph.add_edge(hub_id, added_id);
        graph.add_edge(added_id, member_id);
        match axis {
            Axis::X => attributes.set_position(
                added_id,
                attributes.position_x(hub_id),
                initial_position + shift,
            ),
            Axis::Y => attributes.set_position(
                added_id,
                initial_position + shift,
                attributes.position_y(hub_id),
            ),
        }
        let added_cross = cross_position(attributes, axis, added_id);
        set_cross_position(attributes, axis, member_id, added_cross);
    }
}

/// Spread the still-overlapped port groups of every expanded vertex.
pub fn spread_overlapped_edges(
    graph: &mut UndirectedGraph,
    attributes: &mut GraphAttributes,
    shape: &mut Shape,
) -> Result<()> {
    let high_degree_nodes: Vec<NodeId> = graph
        .node_ids()
        .filter(|&node_id| graph.degree(node_id) > 4)
        .collect();
    for node_id in high_degree_nodes {
        let mut groups: HashMap<Direction, Vec<NodeId>> = HashMap::new();
        for edge in graph.edges_of(node_id) {
            let direction = shape.direction(node_id, edge.to);
            groups.entry(direction).or_default().push(edge.to);
        }
        spread_group(
            node_id,
            graph,
            shape,
            attributes,
            groups.remove(&Direction::Right).unwrap_or_default(),
            Axis::X,
            Direction::Up,
            Color::Green,
        );
        spread_group(
            node_id,
            graph,
            shape,
            attributes,
            groups.remove(&Direction::Up).unwrap_or_default(),
            Axis::Y,
            Direction::Right,
            Color::Blue,
        );
        spread_group(
            node_id,
            graph,
            shape,
            attributes,
            groups.remove(&Direction::Left).unwrap_or_default(),
            Axis::X,
            Direction::Up,
            Color::GreenDark,
        );
        spread_group(
            node_id,
            graph,
            shape,
            attributes,
            groups.remove(&Direction::Down).unwrap_or_default(),
            Axis::Y,
            Direction::Right,
            Color::BlueDark,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orthogonal::shape::Direction;

    /// A degree-5 star with a hand-built legal shape: two edges UP-ish is
    /// impossible, so the shape doubles RIGHT.
    fn star_with_shape() -> (UndirectedGraph, GraphAttributes, Shape) {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        for i in 0..6 {
            graph.add_node(i);
            attributes.set_color(i, Color::Black);
        }
        for i in 1..6 {
            graph.add_edge(0, i);
        }
        let mut shape = Shape::new();
        shape.assign(0, 1, Direction::Up);
        shape.assign(0, 2, Direction::Down);
        shape.assign(0, 3, Direction::Left);
        shape.assign(0, 4, Direction::Right);
        shape.assign(0, 5, Direction::Right);
        (graph, attributes, shape)
    }

    #[test]
    fn test_expansion_inserts_auxiliaries() {
        let (mut graph, mut attributes, mut shape) = star_with_shape();
        expand_high_degree(&mut graph, &mut attributes, &mut shape).expect("expansion");
        // five auxiliaries added, four collapsed back onto the ports
        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.degree(0), 5);
        let auxiliaries: Vec<NodeId> = graph
            .node_ids()
            .filter(|&id| {
                attributes.has_color(id)
                    && matches!(attributes.color(id), Color::Green | Color::Blue)
            })
            .collect();
        assert_eq!(auxiliaries.len(), 1);
        // the surviving auxiliary sits between the hub and a leaf
        let aux_id = auxiliaries[0];
        assert_eq!(graph.degree(aux_id), 2);
        assert!(graph.has_edge(0, aux_id));
    }

    #[test]
    fn test_expansion_keeps_shape_total() {
        let (mut graph, mut attributes, mut shape) = star_with_shape();
        expand_high_degree(&mut graph, &mut attributes, &mut shape).expect("expansion");
        for edge in graph.edges() {
            assert_eq!(
                shape.direction(edge.from, edge.to),
                shape.direction(edge.to, edge.from).opposite()
            );
        }
    }
}
