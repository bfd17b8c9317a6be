//! Combinatorial embeddings (rotation systems).

use crate::model::{CircularSequence, NodeId, UndirectedGraph};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

/// A combinatorial embedding: one circular neighbor ring per node.
///
/// Directed edge insertions are tracked pairwise. An embedding is
/// *consistent* once every `add_edge(u, v)` has its matching
/// `add_edge(v, u)`; faces and genus are only meaningful then.
#[derive(Debug, Clone)]
pub struct Embedding {
    rings: IndexMap<NodeId, CircularSequence<NodeId>>,
    directed_edge_count: usize,
    edges: HashSet<(NodeId, NodeId)>,
    pending_reverse: HashSet<(NodeId, NodeId)>,
}

impl Embedding {
    /// An embedding over the node set of `graph`, with empty rings.
    pub fn new(graph: &UndirectedGraph) -> Self {
        let mut rings = IndexMap::new();
        for node_id in graph.node_ids() {
            rings.insert(node_id, CircularSequence::new());
        }
        Self {
            rings,
            directed_edge_count: 0,
            edges: HashSet::new(),
            pending_reverse: HashSet::new(),
        }
    }

    /// Append `to` at the end of `from`'s ring.
    ///
    /// # Panics
    /// Panics if the directed edge was already inserted or `from` is not a
    /// node of the embedding.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        assert!(
            self.edges.insert((from, to)),
            "Embedding::add_edge: edge ({from}, {to}) already exists"
        );
        if !self.pending_reverse.remove(&(from, to)) {
            self.pending_reverse.insert((to, from));
        }
        self.rings
            .get_mut(&from)
            .unwrap_or_else(|| panic!("Embedding::add_edge: node {from} not found"))
            .push(to);
        self.directed_edge_count += 1;
    }

    /// Whether every directed insertion has its reverse.
    pub fn is_consistent(&self) -> bool {
        self.pending_reverse.is_empty()
    }

    /// The neighbor ring of a node.
    ///
    /// # Panics
    /// Panics if the node does not exist.
    pub fn ring(&self, node_id: NodeId) -> &CircularSequence<NodeId> {
        self.rings
            .get(&node_id)
            .unwrap_or_else(|| panic!("Embedding::ring: node {node_id} not found"))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rings.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.rings.len()
    }

    /// Number of directed edge insertions (twice the undirected count when
    /// consistent).
    pub fn directed_edge_count(&self) -> usize {
        self.directed_edge_count
    }

    /// Count faces by walking the rotation system.
    ///
    /// Each directed edge belongs to exactly one face walk; a walk steps
    /// from `(u, v)` to `(v, next-in-ring-of-v-after-u)`.
    pub fn face_count(&self) -> usize {
        let mut faces = 0;
        let mut visited: HashSet<(NodeId, NodeId)> = HashSet::new();
        for node_id in self.node_ids() {
            for neighbor_id in self.ring(node_id).iter() {
                if visited.contains(&(node_id, neighbor_id)) {
                    continue;
                }
                faces += 1;
                let mut current = node_id;
                let mut next = neighbor_id;
                visited.insert((current, next));
                loop {
                    let successor = self.ring(next).next_of(current);
                    if visited.contains(&(next, successor)) {
                        break;
                    }
                    visited.insert((next, successor));
                    current = next;
                    next = successor;
                    if current == node_id && next == neighbor_id {
                        break;
                    }
                }
            }
        }
        faces
    }

    fn connected_component_count(&self) -> usize {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut components = 0;
        for start in self.node_ids() {
            if visited.contains(&start) {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            while let Some(node_id) = stack.pop() {
                if !visited.insert(node_id) {
                    continue;
                }
                for neighbor_id in self.ring(node_id).iter() {
                    if !visited.contains(&neighbor_id) {
                        stack.push(neighbor_id);
                    }
                }
            }
        }
        components
    }

    /// Euler genus: `g = p - (f - e + v) / 2`.
    ///
    /// # Panics
    /// Panics if the embedding is not consistent.
    pub fn genus(&self) -> i64 {
        assert!(self.is_consistent(), "Embedding::genus: embedding is not consistent");
        let v = self.node_count() as i64;
        let e = (self.directed_edge_count / 2) as i64;
        let f = self.face_count() as i64;
        let p = self.connected_component_count() as i64;
        p - (f - e + v) / 2
    }

    /// Whether the embedding is planar (genus zero).
    pub fn is_planar(&self) -> bool {
        self.genus() == 0
    }
}

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node_id in self.node_ids() {
            write!(f, "Node {} neighbors:", node_id)?;
            for neighbor_id in self.ring(node_id).iter() {
                write!(f, " {}", neighbor_id)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_graph() -> UndirectedGraph {
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

    fn embed_all(graph: &UndirectedGraph) -> Embedding {
        let mut embedding = Embedding::new(graph);
        for node_id in graph.node_ids() {
            for edge in graph.edges_of(node_id) {
                embedding.add_edge(node_id, edge.to);
            }
        }
        embedding
    }

    #[test]
    fn test_consistency_tracking() {
        let graph = square_graph();
        let mut embedding = Embedding::new(&graph);
        embedding.add_edge(0, 1);
        assert!(!embedding.is_consistent());
        embedding.add_edge(1, 0);
        assert!(embedding.is_consistent());
    }

    #[test]
    fn test_square_faces_and_genus() {
        let graph = square_graph();
        let embedding = embed_all(&graph);
        assert!(embedding.is_consistent());
        // the square has an inner and an outer face
        assert_eq!(embedding.face_count(), 2);
        assert_eq!(embedding.genus(), 0);
        assert!(embedding.is_planar());
    }
}
