//! Connectivity and biconnected components.

use crate::model::{NodeId, UndirectedGraph};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Whether the graph is connected. The empty graph counts as connected.
pub fn is_connected(graph: &UndirectedGraph) -> bool {
    let Some(start) = graph.first_node() else {
        return true;
    };
    let mut visited = IndexSet::new();
    let mut stack = vec![start];
    while let Some(node_id) = stack.pop() {
        if !visited.insert(node_id) {
            continue;
        }
        for edge in graph.edges_of(node_id) {
            if !visited.contains(&edge.to) {
                stack.push(edge.to);
            }
        }
    }
    visited.len() == graph.node_count()
}

/// Number of connected components.
pub fn connected_component_count(graph: &UndirectedGraph) -> usize {
    let mut visited = IndexSet::new();
    let mut components = 0;
    for start in graph.node_ids() {
        if visited.contains(&start) {
            continue;
        }
        components += 1;
        let mut stack = vec![start];
        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            for edge in graph.edges_of(node_id) {
                if !visited.contains(&edge.to) {
                    stack.push(edge.to);
                }
            }
        }
    }
    components
}

/// The biconnected decomposition of a graph.
///
/// Each component is an owned copy of its subgraph; a cut vertex appears
/// in every component it separates.
#[derive(Debug)]
pub struct BiconnectedComponents {
    pub cut_vertices: IndexSet<NodeId>,
    pub components: Vec<UndirectedGraph>,
}

struct BiconnectedState<'a> {
    graph: &'a UndirectedGraph,
    discovery: HashMap<NodeId, usize>,
    low_point: HashMap<NodeId, usize>,
    parent: HashMap<NodeId, NodeId>,
    next_discovery: usize,
    edge_stack: Vec<(NodeId, NodeId)>,
    cut_vertices: IndexSet<NodeId>,
    components: Vec<UndirectedGraph>,
}

impl BiconnectedState<'_> {
    fn dfs(&mut self, node_id: NodeId) {
        self.discovery.insert(node_id, self.next_discovery);
        self.low_point.insert(node_id, self.next_discovery);
        self.next_discovery += 1;
        let mut child_count = 0;
        for edge in self.graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            if self.parent.get(&node_id) == Some(&neighbor_id) {
                continue;
            }
            if !self.discovery.contains_key(&neighbor_id) {
                child_count += 1;
                self.parent.insert(neighbor_id, node_id);
                self.edge_stack.push((node_id, neighbor_id));
                self.dfs(neighbor_id);
                let neighbor_low = self.low_point[&neighbor_id];
                if neighbor_low < self.low_point[&node_id] {
                    self.low_point.insert(node_id, neighbor_low);
                }
                if neighbor_low >= self.discovery[&node_id] {
                    // node_id separates the subtree below neighbor_id
                    self.pop_component(node_id, neighbor_id);
                    if self.parent.contains_key(&node_id) {
                        self.cut_vertices.insert(node_id);
                    }
                }
            } else if self.discovery[&neighbor_id] < self.discovery[&node_id] {
                self.edge_stack.push((node_id, neighbor_id));
                if self.discovery[&neighbor_id] < self.low_point[&node_id] {
                    self.low_point.insert(node_id, self.discovery[&neighbor_id]);
                }
            }
        }
        if !self.parent.contains_key(&node_id) {
            // the root is a cut vertex iff it has at least two DFS children
            if child_count >= 2 {
                self.cut_vertices.insert(node_id);
            } else if child_count == 0 {
                let mut component = UndirectedGraph::new();
                component.add_node(node_id);
                self.components.push(component);
            }
        }
    }

    fn pop_component(&mut self, from: NodeId, to: NodeId) {
        let mut component = UndirectedGraph::new();
        loop {
            let (a, b) = self
                .edge_stack
                .pop()
                .expect("biconnected components: edge stack underflow");
            if !component.has_node(a) {
                component.add_node(a);
            }
            if !component.has_node(b) {
                component.add_node(b);
            }
            if !component.has_edge(a, b) {
                component.add_edge(a, b);
            }
            if (a, b) == (from, to) {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Compute the biconnected components and cut vertices of a graph.
///
/// Isolated nodes become singleton components.
pub fn biconnected_components(graph: &UndirectedGraph) -> BiconnectedComponents {
    let mut state = BiconnectedState {
        graph,
        discovery: HashMap::new(),
        low_point: HashMap::new(),
        parent: HashMap::new(),
        next_discovery: 0,
        edge_stack: Vec::new(),
        cut_vertices: IndexSet::new(),
        components: Vec::new(),
    };
    for node_id in graph.node_ids() {
        if !state.discovery.contains_key(&node_id) {
            state.dfs(node_id);
        }
    }
    assert!(
        state.edge_stack.is_empty(),
        "biconnected components: unconsumed edges on the stack"
    );
    BiconnectedComponents {
        cut_vertices: state.cut_vertices,
        components: state.components,
    }
}
