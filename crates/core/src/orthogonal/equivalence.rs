//! Equivalence classes of a shape and the induced ordering graphs.
//!
//! Nodes connected through vertical edges only must share an x coordinate
//! (one x-class); nodes connected through horizontal edges only share a y
//! coordinate. Every RIGHT edge induces a directed x-ordering edge between
//! x-classes, every UP edge a y-ordering edge between y-classes. A cycle
//! in an ordering graph is a metric impossibility that the repair loops
//! resolve.

use super::shape::Shape;
use crate::model::{DiGraph, EdgeId, NodeId, UndirectedGraph};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// A partition of node ids into integer-identified classes.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceClasses {
    elem_to_class: HashMap<NodeId, NodeId>,
    class_to_elems: IndexMap<NodeId, IndexSet<NodeId>>,
}

impl EquivalenceClasses {
    /// Put an element into a class.
    ///
    /// # Panics
    /// Panics if the element already has a class.
    pub fn set_class(&mut self, elem: NodeId, class_id: NodeId) {
        let previous = self.elem_to_class.insert(elem, class_id);
        assert!(
            previous.is_none(),
            "EquivalenceClasses::set_class: element {elem} already classified"
        );
        self.class_to_elems.entry(class_id).or_default().insert(elem);
    }

    pub fn has_class(&self, elem: NodeId) -> bool {
        self.elem_to_class.contains_key(&elem)
    }

    /// Class of an element.
    ///
    /// # Panics
    /// Panics if the element has no class.
    pub fn class_of(&self, elem: NodeId) -> NodeId {
        *self
            .elem_to_class
            .get(&elem)
            .unwrap_or_else(|| panic!("EquivalenceClasses::class_of: element {elem} unclassified"))
    }

    /// Members of a class.
    ///
    /// # Panics
    /// Panics for an unknown class.
    pub fn elems_of(&self, class_id: NodeId) -> &IndexSet<NodeId> {
        self.class_to_elems
            .get(&class_id)
            .unwrap_or_else(|| panic!("EquivalenceClasses::elems_of: unknown class {class_id}"))
    }

    pub fn class_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.class_to_elems.keys().copied()
    }

    pub fn class_count(&self) -> usize {
        self.class_to_elems.len()
    }
}

/// Grow one class from `start` over edges the filter accepts.
fn expand_class(
    shape: &Shape,
    graph: &UndirectedGraph,
    start: NodeId,
    class_id: NodeId,
    classes: &mut EquivalenceClasses,
    keep_edge: impl Fn(&Shape, NodeId, NodeId) -> bool,
) {
    let mut stack = vec![start];
    classes.set_class(start, class_id);
    while let Some(node_id) = stack.pop() {
        for edge in graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            if classes.has_class(neighbor_id) {
                continue;
            }
            if !keep_edge(shape, node_id, neighbor_id) {
                continue;
            }
            classes.set_class(neighbor_id, class_id);
            stack.push(neighbor_id);
        }
    }
}

/// Build the x-partition (vertical expansion) and y-partition (horizontal
/// expansion) of a shaped graph.
pub fn build_equivalence_classes(
    shape: &Shape,
    graph: &UndirectedGraph,
) -> (EquivalenceClasses, EquivalenceClasses) {
    let mut classes_x = EquivalenceClasses::default();
    let mut classes_y = EquivalenceClasses::default();
    let mut next_class_x = 0;
    let mut next_class_y = 0;
    for node_id in graph.node_ids() {
        if !classes_y.has_class(node_id) {
            expand_class(shape, graph, node_id, next_class_y, &mut classes_y, |s, a, b| {
                s.is_horizontal(a, b)
            });
            next_class_y += 1;
        }
        if !classes_x.has_class(node_id) {
            expand_class(shape, graph, node_id, next_class_x, &mut classes_x, |s, a, b| {
                s.is_vertical(a, b)
            });
            next_class_x += 1;
        }
    }
    (classes_x, classes_y)
}

/// Labels on ordering edges: the concrete graph edge `(u, v)` that induced
/// each ordering edge, keyed by ordering edge id. Only the first inducing
/// edge is kept; the repair loops use it to lift ordering cycles back into
/// the graph.
#[derive(Debug, Clone, Default)]
pub struct EdgeLabels {
    labels: HashMap<EdgeId, (NodeId, NodeId)>,
}

impl EdgeLabels {
    fn set(&mut self, edge_id: EdgeId, label: (NodeId, NodeId)) {
        let previous = self.labels.insert(edge_id, label);
        assert!(
            previous.is_none(),
            "EdgeLabels::set: label already set for edge {edge_id}"
        );
    }

    /// The graph edge behind an ordering edge.
    ///
    /// # Panics
    /// Panics for an unlabeled edge.
    pub fn get(&self, edge_id: EdgeId) -> (NodeId, NodeId) {
        *self
            .labels
            .get(&edge_id)
            .unwrap_or_else(|| panic!("EdgeLabels::get: no label for edge {edge_id}"))
    }
}

/// The two ordering graphs induced by a shape, with their edge labels.
#[derive(Debug)]
pub struct Orderings {
    pub ordering_x: DiGraph,
    pub ordering_y: DiGraph,
    pub labels_x: EdgeLabels,
    pub labels_y: EdgeLabels,
}

/// Build the x- and y-ordering graphs over the given partitions.
pub fn classes_to_orderings(
    classes_x: &EquivalenceClasses,
    classes_y: &EquivalenceClasses,
    graph: &UndirectedGraph,
    shape: &Shape,
) -> Orderings {
    let mut ordering_x = DiGraph::new();
    let mut ordering_y = DiGraph::new();
    for class_id in classes_x.class_ids() {
        ordering_x.add_node(class_id);
    }
    for class_id in classes_y.class_ids() {
        ordering_y.add_node(class_id);
    }
    let mut labels_x = EdgeLabels::default();
    let mut labels_y = EdgeLabels::default();
    for node_id in graph.node_ids() {
        for edge in graph.edges_of(node_id) {
            let neighbor_id = edge.to;
            if shape.is_right(node_id, neighbor_id) {
                let from_class = classes_x.class_of(node_id);
                let to_class = classes_x.class_of(neighbor_id);
                if ordering_x.has_edge(from_class, to_class) {
                    continue;
                }
                let edge_id = ordering_x.add_edge(from_class, to_class);
                labels_x.set(edge_id, (node_id, neighbor_id));
            } else if shape.is_up(node_id, neighbor_id) {
                let from_class = classes_y.class_of(node_id);
                let to_class = classes_y.class_of(neighbor_id);
                if ordering_y.has_edge(from_class, to_class) {
                    continue;
                }
                let edge_id = ordering_y.add_edge(from_class, to_class);
                labels_y.set(edge_id, (node_id, neighbor_id));
            }
        }
    }
    Orderings {
        ordering_x,
        ordering_y,
        labels_x,
        labels_y,
    }
}
