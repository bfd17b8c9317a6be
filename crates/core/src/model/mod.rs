//! Graph, tree, and attribute primitives.

pub mod attributes;
pub mod cycle;
pub mod digraph;
pub mod graph;
pub mod sequence;
pub mod tree;

/// Node identifier: non-negative and unique within a graph.
pub type NodeId = u32;

/// Edge identifier: unique within a graph.
pub type EdgeId = u32;

pub use attributes::{Color, GraphAttributes, Point};
pub use cycle::Cycle;
pub use digraph::DiGraph;
pub use graph::{GraphEdge, UndirectedGraph};
pub use sequence::CircularSequence;
pub use tree::{spanning_tree, Tree};
