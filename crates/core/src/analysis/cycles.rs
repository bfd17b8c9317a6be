//! Cycle search, cycle bases, and cycle equivalence.

use crate::model::{spanning_tree, Cycle, DiGraph, NodeId, UndirectedGraph};
use std::collections::{HashMap, HashSet};

/// Find any cycle in an undirected graph.
///
/// DFS with parent tracking; the first back edge found is lifted into a
/// cycle through the parent chain.
pub fn find_cycle_undirected(graph: &UndirectedGraph) -> Option<Cycle> {
    let mut visited = HashSet::new();
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    for start in graph.node_ids() {
        if visited.contains(&start) {
            continue;
        }
        if let Some(cycle) = dfs_undirected(graph, start, &mut visited, &mut parent) {
            return Some(cycle);
        }
    }
    None
}

fn dfs_undirected(
    graph: &UndirectedGraph,
    node_id: NodeId,
    visited: &mut HashSet<NodeId>,
    parent: &mut HashMap<NodeId, NodeId>,
) -> Option<Cycle> {
    visited.insert(node_id);
    for edge in graph.edges_of(node_id) {
        let neighbor_id = edge.to;
        if parent.get(&node_id) == Some(&neighbor_id) {
            continue;
        }
        if visited.contains(&neighbor_id) {
            // back edge to an ancestor: walk the parent chain up to it
            let mut nodes = vec![node_id];
            let mut current = node_id;
            while current != neighbor_id {
                current = parent[&current];
                nodes.push(current);
            }
            nodes.reverse();
            return Some(Cycle::new(nodes));
        }
        parent.insert(neighbor_id, node_id);
        if let Some(cycle) = dfs_undirected(graph, neighbor_id, visited, parent) {
            return Some(cycle);
        }
    }
    None
}

/// Find any directed cycle via three-color DFS.
pub fn find_cycle_directed(graph: &DiGraph) -> Option<Cycle> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }
    fn dfs(
        graph: &DiGraph,
        node_id: NodeId,
        marks: &mut HashMap<NodeId, Mark>,
        parent: &mut HashMap<NodeId, NodeId>,
    ) -> Option<(NodeId, NodeId)> {
        marks.insert(node_id, Mark::Visiting);
        for edge in graph.out_edges(node_id) {
            let neighbor_id = edge.to;
            match marks.get(&neighbor_id) {
                None => {
                    parent.insert(neighbor_id, node_id);
                    if let Some(found) = dfs(graph, neighbor_id, marks, parent) {
                        return Some(found);
                    }
                }
                Some(Mark::Visiting) => return Some((neighbor_id, node_id)),
                Some(Mark::Done) => {}
            }
        }
        marks.insert(node_id, Mark::Done);
        None
    }

    let mut marks = HashMap::new();
    let mut parent = HashMap::new();
    for start in graph.node_ids() {
        if marks.contains_key(&start) {
            continue;
        }
        if let Some((cycle_start, cycle_end)) = dfs(graph, start, &mut marks, &mut parent) {
            let mut nodes = Vec::new();
            let mut current = cycle_end;
            while current != cycle_start {
                nodes.push(current);
                current = parent[&current];
            }
            nodes.push(cycle_start);
            nodes.reverse();
            return Some(Cycle::new(nodes));
        }
    }
    None
}

/// Cycle basis of a connected graph from a BFS spanning tree.
///
/// Each non-tree edge `(u, v)` contributes the cycle formed by the tree
/// paths from both endpoints to their lowest common ancestor.
///
/// # Panics
/// Panics if the graph is empty or not connected.
pub fn cycle_basis(graph: &UndirectedGraph) -> Vec<Cycle> {
    let tree = spanning_tree(graph);
    let mut cycles = Vec::new();
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            if node_id > neighbor_id {
                continue;
            }
            if tree.has_edge(node_id, neighbor_id) {
                continue;
            }
            let ancestor = tree.common_ancestor(node_id, neighbor_id);
            let mut path_u = tree.path_from_root(node_id);
            let mut path_v = tree.path_from_root(neighbor_id);
            path_u.reverse();
            path_v.reverse();
            while *path_u.last().expect("path contains the ancestor") != ancestor {
                path_u.pop();
            }
            while *path_v.last().expect("path contains the ancestor") != ancestor {
                path_v.pop();
            }
            path_u.reverse();
            path_u.extend(path_v);
            path_u.pop();
            cycles.push(Cycle::new(path_u));
        }
    }
    cycles
}

/// Whether two cycles describe the same circular node sequence, in either
/// traversal direction.
pub fn are_cycles_equivalent(a: &Cycle, b: &Cycle) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    let start = a.at(0);
    if !b.has_node(start) {
        return false;
    }
    let forward = {
        let mut current_a = start;
        let mut current_b = start;
        let mut matched = true;
        for _ in 1..a.len() {
            current_a = a.next_of(current_a);
            current_b = b.next_of(current_b);
            if current_a != current_b {
                matched = false;
                break;
            }
        }
        matched
    };
    if forward {
        return true;
    }
    let mut current_a = start;
    let mut current_b = start;
    for _ in 1..a.len() {
        current_a = a.next_of(current_a);
        current_b = b.prev_of(current_b);
        if current_a != current_b {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        graph
    }

    #[test]
    fn test_find_cycle_undirected() {
        let graph = square();
        let cycle = find_cycle_undirected(&graph).expect("square has a cycle");
        assert_eq!(cycle.len(), 4);
        // consecutive cycle nodes must be adjacent in the graph
        for node_id in cycle.iter() {
            assert!(graph.has_edge(node_id, cycle.next_of(node_id)));
        }
    }

    #[test]
    fn test_no_cycle_in_tree() {
        let mut graph = UndirectedGraph::new();
        for i in 0..3 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert!(find_cycle_undirected(&graph).is_none());
    }

    #[test]
    fn test_find_cycle_directed() {
        let mut graph = DiGraph::new();
        for i in 0..3 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert!(find_cycle_directed(&graph).is_none());
        graph.add_edge(2, 0);
        let cycle = find_cycle_directed(&graph).expect("directed triangle");
        assert_eq!(cycle.len(), 3);
    }

    #[test]
    fn test_cycle_basis_of_square() {
        let graph = square();
        let basis = cycle_basis(&graph);
        assert_eq!(basis.len(), 1);
        assert_eq!(basis[0].len(), 4);
    }

    #[test]
    fn test_cycle_basis_size_formula() {
        // K4: |E| - |V| + 1 = 6 - 4 + 1 = 3
        let mut graph = square();
        graph.add_edge(0, 2);
        graph.add_edge(1, 3);
        assert_eq!(cycle_basis(&graph).len(), 3);
    }

    #[test]
    fn test_cycle_equivalence_both_directions() {
        let a = Cycle::new(vec![0, 1, 2, 3]);
        let shifted = Cycle::new(vec![2, 3, 0, 1]);
        let reversed = Cycle::new(vec![3, 2, 1, 0]);
        let other = Cycle::new(vec![0, 2, 1, 3]);
        assert!(are_cycles_equivalent(&a, &shifted));
        assert!(are_cycles_equivalent(&a, &reversed));
        assert!(!are_cycles_equivalent(&a, &other));
    }
}
