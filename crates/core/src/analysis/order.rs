//! Topological sorting and bipartition.

use crate::model::{DiGraph, NodeId, UndirectedGraph};
use std::collections::{HashMap, VecDeque};

/// Kahn topological order of a directed graph.
///
/// Returns `None` when the graph contains a directed cycle.
pub fn topological_sort(graph: &DiGraph) -> Option<Vec<NodeId>> {
    let mut in_degree: HashMap<NodeId, usize> = HashMap::new();
    for node_id in graph.node_ids() {
        in_degree.insert(node_id, graph.in_degree(node_id));
    }
    let mut queue: VecDeque<NodeId> = graph
        .node_ids()
        .filter(|node_id| in_degree[node_id] == 0)
        .collect();
    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(node_id) = queue.pop_front() {
        order.push(node_id);
        for edge in graph.out_edges(node_id) {
            let slot = in_degree.get_mut(&edge.to).expect("edge endpoint is live");
            *slot -= 1;
            if *slot == 0 {
                queue.push_back(edge.to);
            }
        }
    }
    if order.len() == graph.node_count() {
        Some(order)
    } else {
        None
    }
}

/// Two-color the graph by BFS.
///
/// Returns `None` when an odd cycle makes the graph non-bipartite.
pub fn bipartition(graph: &UndirectedGraph) -> Option<HashMap<NodeId, bool>> {
    let mut sides: HashMap<NodeId, bool> = HashMap::new();
    for start in graph.node_ids() {
        if sides.contains_key(&start) {
            continue;
        }
        sides.insert(start, false);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(node_id) = queue.pop_front() {
            let side = sides[&node_id];
            for edge in graph.edges_of(node_id) {
                match sides.get(&edge.to) {
                    None => {
                        sides.insert(edge.to, !side);
                        queue.push_back(edge.to);
                    }
                    Some(&neighbor_side) if neighbor_side == side => return None,
                    Some(_) => {}
                }
            }
        }
    }
    Some(sides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topological_sort_respects_edges() {
        let mut graph = DiGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 3);
        graph.add_edge(3, 2);
        let order = topological_sort(&graph).expect("DAG");
        let position: HashMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        for edge in graph.edges() {
            assert!(position[&edge.from] < position[&edge.to]);
        }
    }

    #[test]
    fn test_topological_sort_detects_cycle() {
        let mut graph = DiGraph::new();
        graph.add_node(0);
        graph.add_node(1);
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);
        assert!(topological_sort(&graph).is_none());
    }

    #[test]
    fn test_bipartition_even_cycle() {
        let mut graph = UndirectedGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        let sides = bipartition(&graph).expect("4-cycle is bipartite");
        assert_ne!(sides[&0], sides[&1]);
        assert_eq!(sides[&0], sides[&2]);
    }

    #[test]
    fn test_bipartition_odd_cycle() {
        let mut graph = UndirectedGraph::new();
        for i in 0..3 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        assert!(bipartition(&graph).is_none());
    }
}
