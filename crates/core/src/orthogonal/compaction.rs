//! Grid compaction.
//!
//! Coordinates are collapsed to dense index positions (a gap of exactly
//! 100 advances the index; the small ±5 spread offsets stay inside one
//! index). A column can slide left when its occupied y-interval does not
//! overlap the destination column's intervals; rows slide down the same
//! way. Real coordinates move in steps of 100, so the drawing stays on
//! the 100-lattice.

use crate::model::{GraphAttributes, NodeId, UndirectedGraph};
use std::collections::HashMap;

/// Collapse the 100-spaced coordinates into dense per-axis indices.
pub fn compute_node_index_positions(
    graph: &UndirectedGraph,
    attributes: &GraphAttributes,
) -> (HashMap<NodeId, i32>, HashMap<NodeId, i32>) {
    let index_of_axis = |coordinate_of: &dyn Fn(NodeId) -> i32| {
        let mut coordinate_to_nodes: HashMap<i32, Vec<NodeId>> = HashMap::new();
        for node_id in graph.node_ids() {
            coordinate_to_nodes
                .entry(coordinate_of(node_id))
                .or_default()
                .push(node_id);
        }
        let mut coordinates: Vec<i32> = coordinate_to_nodes.keys().copied().collect();
        coordinates.sort_unstable();
        let mut node_to_index = HashMap::new();
        let mut index = 0;
        for (position, &coordinate) in coordinates.iter().enumerate() {
            if position > 0 && coordinate - coordinates[position - 1] == 100 {
                index += 1;
            }
            for &node_id in &coordinate_to_nodes[&coordinate] {
                node_to_index.insert(node_id, index);
            }
        }
        node_to_index
    };
    let node_to_index_x = index_of_axis(&|node_id| attributes.position_x(node_id));
    let node_to_index_y = index_of_axis(&|node_id| attributes.position_y(node_id));
    (node_to_index_x, node_to_index_y)
}

fn can_move_to_prev_index(prev: &[(i32, i32)], to_shift: (i32, i32)) -> bool {
    let (shift_min, shift_max) = to_shift;
    for &(prev_min, prev_max) in prev {
        if !(prev_min > shift_max || shift_min > prev_max) {
            return false;
        }
    }
    true
}

fn compute_shift_amount(index: i32, index_to_intervals: &HashMap<i32, Vec<(i32, i32)>>) -> i32 {
    let to_shift = &index_to_intervals[&index];
    assert_eq!(
        to_shift.len(),
        1,
        "compaction: a sliding line holds exactly one interval"
    );
    let interval = to_shift[0];
    let mut shift = 0;
    loop {
        if index - shift == 0 {
            return shift;
        }
        let prev = &index_to_intervals[&(index - shift - 1)];
        if can_move_to_prev_index(prev, interval) {
            shift += 1;
        } else {
            break;
        }
    }
    shift
}

fn build_interval_map(
    index_to_nodes: &HashMap<i32, Vec<NodeId>>,
    cross_index: &HashMap<NodeId, i32>,
) -> HashMap<i32, Vec<(i32, i32)>> {
    let mut intervals = HashMap::new();
    for (&index, nodes) in index_to_nodes {
        let mut min = i32::MAX;
        let mut max = 0;
        for node_id in nodes {
            let value = cross_index[node_id];
            min = min.min(value);
            max = max.max(value);
        }
        intervals.insert(index, vec![(min, max)]);
    }
    intervals
}

/// Slide columns left and rows down while no occupied intervals collide.
/// Idempotent: a second run finds nothing left to slide.
pub fn compact_area(graph: &UndirectedGraph, attributes: &mut GraphAttributes) {
    let (node_to_index_x, node_to_index_y) = compute_node_index_positions(graph, attributes);
    let mut index_x_to_nodes: HashMap<i32, Vec<NodeId>> = HashMap::new();
    for (&node_id, &index) in &node_to_index_x {
        index_x_to_nodes.entry(index).or_default().push(node_id);
    }
    let mut index_y_to_nodes: HashMap<i32, Vec<NodeId>> = HashMap::new();
    for (&node_id, &index) in &node_to_index_y {
        index_y_to_nodes.entry(index).or_default().push(node_id);
    }

    // compacting x
    let mut index_to_intervals = build_interval_map(&index_x_to_nodes, &node_to_index_y);
    let mut index = 0;
    while index_to_intervals.contains_key(&(index + 1)) {
        index += 1;
        let shift_amount = compute_shift_amount(index, &index_to_intervals);
        if shift_amount == 0 {
            continue;
        }
        for &node_id in &index_x_to_nodes[&index] {
            let old_x = attributes.position_x(node_id);
            attributes.change_position_x(node_id, old_x - 100 * shift_amount);
        }
        let interval = index_to_intervals[&index][0];
        index_to_intervals
            .get_mut(&(index - shift_amount))
            .expect("destination line exists")
            .push(interval);
        index_to_intervals.get_mut(&index).expect("line exists").clear();
    }

    // compacting y
    let mut index_to_intervals = build_interval_map(&index_y_to_nodes, &node_to_index_x);
    let mut index = 0;
    while index_to_intervals.contains_key(&(index + 1)) {
        index += 1;
        let shift_amount = compute_shift_amount(index, &index_to_intervals);
        if shift_amount == 0 {
            continue;
        }
        for &node_id in &index_y_to_nodes[&index] {
            let old_y = attributes.position_y(node_id);
            attributes.change_position_y(node_id, old_y - 100 * shift_amount);
        }
        let interval = index_to_intervals[&index][0];
        index_to_intervals
            .get_mut(&(index - shift_amount))
            .expect("destination line exists")
            .push(interval);
        index_to_intervals.get_mut(&index).expect("line exists").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An L-shaped path: (0,0) - (100,0) - (100,100), plus a lone node at
    /// (300, 300) far out that can slide in.
    fn sample() -> (UndirectedGraph, GraphAttributes) {
        let mut graph = UndirectedGraph::new();
        let mut attributes = GraphAttributes::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        attributes.set_position(0, 0, 0);
        attributes.set_position(1, 100, 0);
        attributes.set_position(2, 100, 100);
        attributes.set_position(3, 300, 300);
        (graph, attributes)
    }

    #[test]
    fn test_index_positions_collapse_hundreds() {
        let (graph, attributes) = sample();
        let (index_x, index_y) = compute_node_index_positions(&graph, &attributes);
        assert_eq!(index_x[&0], 0);
        assert_eq!(index_x[&1], 1);
        // the 200 gap between 100 and 300 does not advance the index
        assert_eq!(index_x[&3], 1);
        assert_eq!(index_y[&2], 1);
    }

    #[test]
    fn test_compaction_is_idempotent() {
        let (graph, mut attributes) = sample();
        compact_area(&graph, &mut attributes);
        let after_first: Vec<(i32, i32)> = graph
            .node_ids()
            .map(|id| (attributes.position_x(id), attributes.position_y(id)))
            .collect();
        compact_area(&graph, &mut attributes);
        let after_second: Vec<(i32, i32)> = graph
            .node_ids()
            .map(|id| (attributes.position_x(id), attributes.position_y(id)))
            .collect();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_compaction_keeps_lattice() {
        let (graph, mut attributes) = sample();
        compact_area(&graph, &mut attributes);
        for node_id in graph.node_ids() {
            assert_eq!(attributes.position_x(node_id) % 100, 0);
            assert_eq!(attributes.position_y(node_id) % 100, 0);
        }
    }
}
