//! Undirected simple graph with stable integer ids.
//!
//! The graph is the arena: nodes, edges, cycles, shapes and attributes all
//! reference each other through ids rather than pointers, which keeps
//! sub-graph copies (biconnected components, segments) cheap.

use super::{EdgeId, NodeId};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use std::fmt;

/// A directed view of an edge: `from` and `to` plus the stable edge id.
///
/// Stored once per undirected edge; [`UndirectedGraph::edges_of`] reorients
/// copies so every incident edge has `from` equal to the queried node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

impl GraphEdge {
    /// The same edge traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id,
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge[{} -- {}]", self.from, self.to)
    }
}

/// An undirected simple graph: at most one edge per unordered node pair,
/// no self-loops.
///
/// Node and edge iteration follow insertion order (IndexMap-backed), so
/// every algorithm in this crate is deterministic without extra sorting.
#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    next_node_id: NodeId,
    next_edge_id: EdgeId,
    nodes: IndexSet<NodeId>,
    edges: IndexMap<EdgeId, GraphEdge>,
    incident: IndexMap<NodeId, IndexSet<EdgeId>>,
    pair_to_edge: HashMap<(NodeId, NodeId), EdgeId>,
}

impl UndirectedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Node operations
    // =========================================================================

    /// Add a node with an explicit id.
    ///
    /// # Panics
    /// Panics if the id is already taken.
    pub fn add_node(&mut self, node_id: NodeId) {
        assert!(
            self.nodes.insert(node_id),
            "UndirectedGraph::add_node: node {node_id} already exists"
        );
        self.incident.insert(node_id, IndexSet::new());
    }

    /// Add a node with the minimal unused id and return it.
    pub fn add_free_node(&mut self) -> NodeId {
        while self.has_node(self.next_node_id) {
            self.next_node_id += 1;
        }
        let node_id = self.next_node_id;
        self.next_node_id += 1;
        self.add_node(node_id);
        node_id
    }

    pub fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    /// Remove a node and every edge incident to it.
    ///
    /// # Panics
    /// Panics if the node does not exist.
    pub fn remove_node(&mut self, node_id: NodeId) {
        let incident: Vec<EdgeId> = self
            .incident
            .get(&node_id)
            .unwrap_or_else(|| panic!("UndirectedGraph::remove_node: node {node_id} not found"))
            .iter()
            .copied()
            .collect();
        for edge_id in incident {
            self.remove_edge(edge_id);
        }
        self.nodes.shift_remove(&node_id);
        self.incident.shift_remove(&node_id);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    // =========================================================================
    // Edge operations
    // =========================================================================

    /// Add an undirected edge and return its id.
    ///
    /// # Panics
    /// Panics on missing endpoints, self-loops, or duplicate edges.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        assert!(
            self.has_node(from),
            "UndirectedGraph::add_edge: node {from} not found"
        );
        assert!(
            self.has_node(to),
            "UndirectedGraph::add_edge: node {to} not found"
        );
        assert_ne!(from, to, "UndirectedGraph::add_edge: self-loop");
        assert!(
            !self.has_edge(from, to),
            "UndirectedGraph::add_edge: edge ({from}, {to}) already exists"
        );
        let edge_id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.insert(
            edge_id,
            GraphEdge {
                id: edge_id,
                from,
                to,
            },
        );
        self.incident.get_mut(&from).expect("endpoint checked").insert(edge_id);
        self.incident.get_mut(&to).expect("endpoint checked").insert(edge_id);
        self.pair_to_edge.insert((from, to), edge_id);
        edge_id
    }

    /// Whether an edge connects the pair, in either orientation.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edge_id_between(from, to).is_some()
    }

    /// Edge id between two nodes, if any.
    pub fn edge_id_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.pair_to_edge
            .get(&(from, to))
            .or_else(|| self.pair_to_edge.get(&(to, from)))
            .copied()
    }

    /// Remove an edge by id.
    ///
    /// # Panics
    /// Panics if the edge does not exist.
    pub fn remove_edge(&mut self, edge_id: EdgeId) {
        let edge = self
            .edges
            .shift_remove(&edge_id)
            .unwrap_or_else(|| panic!("UndirectedGraph::remove_edge: edge {edge_id} not found"));
        self.incident
            .get_mut(&edge.from)
            .expect("edge endpoint is live")
            .shift_remove(&edge_id);
        self.incident
            .get_mut(&edge.to)
            .expect("edge endpoint is live")
            .shift_remove(&edge_id);
        self.pair_to_edge.remove(&(edge.from, edge.to));
    }

    /// Remove the edge between two nodes.
    ///
    /// # Panics
    /// Panics if no such edge exists.
    pub fn remove_edge_between(&mut self, from: NodeId, to: NodeId) {
        let edge_id = self
            .edge_id_between(from, to)
            .unwrap_or_else(|| panic!("UndirectedGraph::remove_edge_between: no edge ({from}, {to})"));
        self.remove_edge(edge_id);
    }

    /// Look up an edge by id.
    ///
    /// # Panics
    /// Panics if the edge does not exist.
    pub fn edge(&self, edge_id: EdgeId) -> GraphEdge {
        *self
            .edges
            .get(&edge_id)
            .unwrap_or_else(|| panic!("UndirectedGraph::edge: edge {edge_id} not found"))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges as stored, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.edges.values().copied()
    }

    // =========================================================================
    // Query operations
    // =========================================================================

    /// Edges incident to a node, each reoriented so `from == node_id`.
    ///
    /// # Panics
    /// Panics if the node does not exist.
    pub fn edges_of(&self, node_id: NodeId) -> Vec<GraphEdge> {
        self.incident
            .get(&node_id)
            .unwrap_or_else(|| panic!("UndirectedGraph::edges_of: node {node_id} not found"))
            .iter()
            .map(|edge_id| {
                let edge = self.edges[edge_id];
                if edge.to == node_id {
                    edge.reversed()
                } else {
                    edge
                }
            })
            .collect()
    }

    /// Neighbor ids of a node, in incident-edge order.
    pub fn neighbors(&self, node_id: NodeId) -> Vec<NodeId> {
        self.edges_of(node_id).iter().map(|edge| edge.to).collect()
    }

    pub fn degree(&self, node_id: NodeId) -> usize {
        self.incident
            .get(&node_id)
            .unwrap_or_else(|| panic!("UndirectedGraph::degree: node {node_id} not found"))
            .len()
    }

    /// First node in insertion order, if any.
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
}

impl fmt::Display for UndirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph:")?;
        for node_id in self.node_ids() {
            write!(f, "Node {} neighbors:", node_id)?;
            for neighbor in self.neighbors(node_id) {
                write!(f, " {}", neighbor)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: NodeId) -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1);
        }
        graph
    }

    #[test]
    fn test_add_and_query() {
        let graph = path_graph(3);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn test_edges_of_orientation() {
        let graph = path_graph(3);
        for edge in graph.edges_of(1) {
            assert_eq!(edge.from, 1);
        }
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = path_graph(3);
        graph.remove_node(1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_edge(0, 1));
    }

    #[test]
    fn test_add_free_node_picks_minimal_unused() {
        let mut graph = UndirectedGraph::new();
        graph.add_node(0);
        graph.add_node(1);
        graph.add_node(5);
        assert_eq!(graph.add_free_node(), 2);
        assert_eq!(graph.add_free_node(), 3);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_edge_panics() {
        let mut graph = path_graph(2);
        graph.add_edge(1, 0);
    }

    #[test]
    #[should_panic(expected = "self-loop")]
    fn test_self_loop_panics() {
        let mut graph = path_graph(2);
        graph.add_edge(0, 0);
    }
}
