//! Rooted trees: spanning trees, root paths, lowest common ancestors.
//!
//! The cycle-basis construction walks tree paths from the endpoints of each
//! non-tree edge up to their common ancestor.

use super::graph::UndirectedGraph;
use super::NodeId;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, VecDeque};

/// A rooted tree over node ids.
#[derive(Debug, Clone)]
pub struct Tree {
    root: NodeId,
    parents: HashMap<NodeId, NodeId>,
    children: IndexMap<NodeId, IndexSet<NodeId>>,
}

impl Tree {
    /// Create a tree containing only the root.
    pub fn new(root: NodeId) -> Self {
        let mut children = IndexMap::new();
        children.insert(root, IndexSet::new());
        Self {
            root,
            parents: HashMap::new(),
            children,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn has_node(&self, node_id: NodeId) -> bool {
        self.children.contains_key(&node_id)
    }

    pub fn is_root(&self, node_id: NodeId) -> bool {
        node_id == self.root
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Attach a new node under `parent_id`.
    ///
    /// # Panics
    /// Panics if the parent is missing or the node already exists.
    pub fn add_node(&mut self, node_id: NodeId, parent_id: NodeId) {
        assert!(
            self.has_node(parent_id),
            "Tree::add_node: parent {parent_id} not found"
        );
        assert!(
            !self.has_node(node_id),
            "Tree::add_node: node {node_id} already exists"
        );
        self.parents.insert(node_id, parent_id);
        self.children.insert(node_id, IndexSet::new());
        self.children
            .get_mut(&parent_id)
            .expect("parent checked")
            .insert(node_id);
    }

    /// Parent of a node; `None` for the root.
    ///
    /// # Panics
    /// Panics if the node does not exist.
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        assert!(self.has_node(node_id), "Tree::parent: node {node_id} not found");
        self.parents.get(&node_id).copied()
    }

    /// Whether a parent/child tree edge connects the pair.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.parent(a) == Some(b) || self.parent(b) == Some(a)
    }

    /// Path from the root to `node_id`, inclusive.
    pub fn path_from_root(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut path = vec![node_id];
        let mut current = node_id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Lowest common ancestor of two nodes.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let path_a = self.path_from_root(a);
        let path_b = self.path_from_root(b);
        let mut i = 0;
        while i < path_a.len() && i < path_b.len() && path_a[i] == path_b[i] {
            i += 1;
        }
        path_a[i - 1]
    }
}

/// Build a BFS spanning tree rooted at the first node of the graph.
///
/// # Panics
/// Panics if the graph is empty or not connected.
pub fn spanning_tree(graph: &UndirectedGraph) -> Tree {
    let root = graph
        .first_node()
        .expect("spanning_tree: graph has no nodes");
    let mut tree = Tree::new(root);
    let mut queue = VecDeque::new();
    queue.push_back(root);
    while let Some(node_id) = queue.pop_front() {
        for edge in graph.edges_of(node_id) {
            if !tree.has_node(edge.to) {
                tree.add_node(edge.to, node_id);
                queue.push_back(edge.to);
            }
        }
    }
    assert_eq!(
        tree.len(),
        graph.node_count(),
        "spanning_tree: graph is not connected"
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree {
        // 0 -> {1, 2}, 1 -> {3}
        let mut tree = Tree::new(0);
        tree.add_node(1, 0);
        tree.add_node(2, 0);
        tree.add_node(3, 1);
        tree
    }

    #[test]
    fn test_path_from_root() {
        let tree = sample_tree();
        assert_eq!(tree.path_from_root(3), vec![0, 1, 3]);
        assert_eq!(tree.path_from_root(0), vec![0]);
    }

    #[test]
    fn test_common_ancestor() {
        let tree = sample_tree();
        assert_eq!(tree.common_ancestor(3, 2), 0);
        assert_eq!(tree.common_ancestor(3, 1), 1);
    }

    #[test]
    fn test_spanning_tree_covers_graph() {
        let mut graph = UndirectedGraph::new();
        for i in 0..4 {
            graph.add_node(i);
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 0);
        let tree = spanning_tree(&graph);
        assert_eq!(tree.len(), 4);
        assert!(tree.has_edge(0, 1));
    }
}
