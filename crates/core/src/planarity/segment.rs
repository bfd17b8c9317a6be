//! Segments of a biconnected component relative to a reference cycle.
//!
//! A segment is either a maximal subgraph reachable from the cycle through
//! non-cycle edges, or a single chord. Segment graphs also carry a copy of
//! the reference cycle so they can be embedded recursively as standalone
//! biconnected graphs.

use crate::model::{Cycle, NodeId, UndirectedGraph};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet, VecDeque};

/// A segment: its owned subgraph plus the attachment vertices on the
/// reference cycle.
#[derive(Debug)]
pub struct Segment {
    graph: UndirectedGraph,
    attachments: IndexSet<NodeId>,
}

impl Segment {
    fn new() -> Self {
        Self {
            graph: UndirectedGraph::new(),
            attachments: IndexSet::new(),
        }
    }

    pub fn graph(&self) -> &UndirectedGraph {
        &self.graph
    }

    pub fn attachments(&self) -> &IndexSet<NodeId> {
        &self.attachments
    }

    pub fn has_attachment(&self, node_id: NodeId) -> bool {
        self.attachments.contains(&node_id)
    }

    fn add_attachment(&mut self, node_id: NodeId) {
        self.attachments.insert(node_id);
    }

    /// A segment is a path when every non-attachment vertex has degree at
    /// most two.
    pub fn is_path(&self) -> bool {
        for node_id in self.graph.node_ids() {
            if self.has_attachment(node_id) {
                continue;
            }
            if self.graph.degree(node_id) > 2 {
                return false;
            }
        }
        true
    }

    /// BFS path between two attachments that stays inside the segment and
    /// avoids every other attachment.
    ///
    /// # Panics
    /// Panics if no such path exists (the segment would not be a segment).
    pub fn path_between_attachments(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);
        'search: while let Some(node_id) = queue.pop_front() {
            for edge in self.graph.edges_of(node_id) {
                let neighbor_id = edge.to;
                if neighbor_id == to {
                    // skip the direct cycle edge between the two attachments
                    if node_id == from {
                        continue;
                    }
                    previous.insert(neighbor_id, node_id);
                    break 'search;
                }
                if self.has_attachment(neighbor_id) {
                    continue;
                }
                if !previous.contains_key(&neighbor_id) {
                    previous.insert(neighbor_id, node_id);
                    queue.push_back(neighbor_id);
                }
            }
            if previous.contains_key(&to) {
                break;
            }
        }
        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            path.push(current);
            current = *previous
                .get(&current)
                .expect("path_between_attachments: endpoints are not connected");
        }
        path.push(from);
        path.reverse();
        path
    }
}

fn add_cycle_edges(cycle: &Cycle, segment: &mut Segment) {
    for node_id in cycle.iter() {
        let next_id = cycle.next_of(node_id);
        segment.graph.add_edge(node_id, next_id);
    }
}

fn dfs_collect(
    graph: &UndirectedGraph,
    node_id: NodeId,
    visited: &mut HashSet<NodeId>,
    nodes: &mut Vec<NodeId>,
    cycle: &Cycle,
    edges: &mut Vec<(NodeId, NodeId)>,
) {
    nodes.push(node_id);
    visited.insert(node_id);
    for edge in graph.edges_of(node_id) {
        let neighbor_id = edge.to;
        if cycle.has_node(neighbor_id) {
            edges.push((node_id, neighbor_id));
            continue;
        }
        if node_id < neighbor_id {
            edges.push((node_id, neighbor_id));
        }
        if !visited.contains(&neighbor_id) {
            dfs_collect(graph, neighbor_id, visited, nodes, cycle, edges);
        }
    }
}

fn build_segment(nodes: &[NodeId], edges: &[(NodeId, NodeId)], cycle: &Cycle) -> Segment {
    let mut segment = Segment::new();
    for node_id in cycle.iter() {
        segment.graph.add_node(node_id);
    }
    for &node_id in nodes {
        segment.graph.add_node(node_id);
    }
    for &(from, to) in edges {
        segment.graph.add_edge(from, to);
        if cycle.has_node(from) {
            segment.add_attachment(from);
        }
        if cycle.has_node(to) {
            segment.add_attachment(to);
        }
    }
    add_cycle_edges(cycle, &mut segment);
    segment
}

fn find_segments(graph: &UndirectedGraph, cycle: &Cycle, segments: &mut Vec<Segment>) {
    let mut visited: HashSet<NodeId> = cycle.iter().collect();
    for node_id in graph.node_ids() {
        if visited.contains(&node_id) {
            continue;
        }
        // nodes and edges strictly beyond the cycle
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        dfs_collect(graph, node_id, &mut visited, &mut nodes, cycle, &mut edges);
        segments.push(build_segment(&nodes, &edges, cycle));
    }
}

fn build_chord(attachment_1: NodeId, attachment_2: NodeId, cycle: &Cycle) -> Segment {
    let mut chord = Segment::new();
    for node_id in cycle.iter() {
        chord.graph.add_node(node_id);
    }
    add_cycle_edges(cycle, &mut chord);
    chord.graph.add_edge(attachment_1, attachment_2);
    chord.add_attachment(attachment_1);
    chord.add_attachment(attachment_2);
    chord
}

fn find_chords(graph: &UndirectedGraph, cycle: &Cycle, segments: &mut Vec<Segment>) {
    for node_id in cycle.iter() {
        for edge in graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            if node_id < neighbor_id {
                continue;
            }
            if cycle.has_node(neighbor_id)
                && neighbor_id != cycle.prev_of(node_id)
                && neighbor_id != cycle.next_of(node_id)
            {
                segments.push(build_chord(node_id, neighbor_id, cycle));
            }
        }
    }
}

/// All segments of `graph` relative to `cycle`: reachable subgraphs plus
/// chords.
pub fn compute_segments(graph: &UndirectedGraph, cycle: &Cycle) -> Vec<Segment> {
    let mut segments = Vec::new();
    find_segments(graph, cycle, &mut segments);
    find_chords(graph, cycle, &mut segments);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        graph.add_edge(0, 2);
        graph.add_edge(1, 3);
        graph
    }

    #[test]
    fn test_k4_chords() {
        let graph = k4();
        let cycle = Cycle::new(vec![0, 1, 2, 3]);
        let segments = compute_segments(&graph, &cycle);
        assert_eq!(segments.len(), 2);
        for segment in &segments {
            assert_eq!(segment.attachments().len(), 2);
            assert!(segment.is_path());
        }
    }

    #[test]
    fn test_interior_segment() {
        // square with a center vertex attached to all corners
        let mut graph = UndirectedGraph::new();
        for i in 0..5 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        for i in 0..4 {
            graph.add_edge(4, i);
        }
        let cycle = Cycle::new(vec![0, 1, 2, 3]);
        let segments = compute_segments(&graph, &cycle);
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!(segment.attachments().len(), 4);
        assert!(segment.graph().has_node(4));
        assert!(!segment.is_path());
    }

    #[test]
    fn test_path_between_attachments() {
        let mut graph = UndirectedGraph::new();
        for i in 0..5 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        // a two-edge ear across the cycle through node 4
        graph.add_edge(0, 4);
        graph.add_edge(4, 2);
        let cycle = Cycle::new(vec![0, 1, 2, 3]);
        let segments = compute_segments(&graph, &cycle);
        assert_eq!(segments.len(), 1);
        let path = segments[0].path_between_attachments(0, 2);
        assert_eq!(path, vec![0, 4, 2]);
    }
}
