//! # Orthograph
//!
//! Orthogonal grid drawings of undirected simple graphs: planarity
//! testing (Auslander–Parter), SAT-based shape synthesis with a
//! corner-insertion repair loop, equivalence-class coordinate assignment,
//! high-degree vertex expansion, and grid compaction.
//!
//! The typical entry point is
//! [`make_orthogonal_drawing`](orthogonal::make_orthogonal_drawing):
//!
//! ```rust
//! use orthograph_core::model::UndirectedGraph;
//! use orthograph_core::orthogonal::make_orthogonal_drawing;
//!
//! let mut graph = UndirectedGraph::new();
//! for i in 0..4 {
//!     graph.add_node(i);
//! }
//! for i in 0..4 {
//!     graph.add_edge(i, (i + 1) % 4);
//! }
//! let drawing = make_orthogonal_drawing(&graph).unwrap();
//! assert_eq!(drawing.added_cycle_count, 0);
//! ```

pub mod analysis;
#[cfg(feature = "parallel")]
pub mod batch;
pub mod error;
pub mod generate;
pub mod io;
pub mod model;
pub mod orthogonal;
pub mod planarity;
pub mod sat;
pub mod worker;

// Re-export commonly used types at crate root
pub use error::{DrawingError, Result};
pub use model::{Color, Cycle, DiGraph, GraphAttributes, NodeId, UndirectedGraph};
pub use orthogonal::{
    compute_all_stats, make_orthogonal_drawing, make_orthogonal_drawing_with, Direction,
    DrawingResult, OrthogonalStats, Shape,
};
pub use planarity::{embed_graph, Embedding};
pub use sat::{DpllSolver, ProcessSolver, SatOracle};
pub use worker::{CancelledError, NoopMonitor, ProgressMonitor};
