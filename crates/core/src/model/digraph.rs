//! Directed simple graph, used for the x/y ordering graphs.

use super::graph::GraphEdge;
use super::{EdgeId, NodeId};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// A directed simple graph: at most one edge per ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    next_edge_id: EdgeId,
    nodes: IndexSet<NodeId>,
    edges: IndexMap<EdgeId, GraphEdge>,
    outgoing: IndexMap<NodeId, IndexSet<EdgeId>>,
    incoming: IndexMap<NodeId, IndexSet<EdgeId>>,
    pair_to_edge: HashMap<(NodeId, NodeId), EdgeId>,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with an explicit id.
    ///
    /// # Panics
    /// Panics if the id is already taken.
    pub fn add_node(&mut self, node_id: NodeId) {
        assert!(
            self.nodes.insert(node_id),
            "DiGraph::add_node: node {node_id} already exists"
        );
        self.outgoing.insert(node_id, IndexSet::new());
        self.incoming.insert(node_id, IndexSet::new());
    }

    pub fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Add a directed edge and return its id.
    ///
    /// # Panics
    /// Panics on missing endpoints or a duplicate ordered pair.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        assert!(self.has_node(from), "DiGraph::add_edge: node {from} not found");
        assert!(self.has_node(to), "DiGraph::add_edge: node {to} not found");
        assert!(
            !self.has_edge(from, to),
            "DiGraph::add_edge: edge ({from} -> {to}) already exists"
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
        self.outgoing.get_mut(&from).expect("endpoint checked").insert(edge_id);
        self.incoming.get_mut(&to).expect("endpoint checked").insert(edge_id);
        self.pair_to_edge.insert((from, to), edge_id);
        edge_id
    }

    /// Whether a directed edge `from -> to` exists.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.pair_to_edge.contains_key(&(from, to))
    }

    /// The directed edge `from -> to`.
    ///
    /// # Panics
    /// Panics if no such edge exists.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> GraphEdge {
        let edge_id = self
            .pair_to_edge
            .get(&(from, to))
            .unwrap_or_else(|| panic!("DiGraph::edge_between: no edge ({from} -> {to})"));
        self.edges[edge_id]
    }

    /// Outgoing edges of a node.
    ///
    /// # Panics
    /// Panics if the node does not exist.
    pub fn out_edges(&self, node_id: NodeId) -> Vec<GraphEdge> {
        self.outgoing
            .get(&node_id)
            .unwrap_or_else(|| panic!("DiGraph::out_edges: node {node_id} not found"))
            .iter()
            .map(|edge_id| self.edges[edge_id])
            .collect()
    }

    pub fn out_degree(&self, node_id: NodeId) -> usize {
        self.outgoing
            .get(&node_id)
            .unwrap_or_else(|| panic!("DiGraph::out_degree: node {node_id} not found"))
            .len()
    }

    pub fn in_degree(&self, node_id: NodeId) -> usize {
        self.incoming
            .get(&node_id)
            .unwrap_or_else(|| panic!("DiGraph::in_degree: node {node_id} not found"))
            .len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.edges.values().copied()
    }
}
