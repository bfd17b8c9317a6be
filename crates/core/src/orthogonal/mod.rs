//! Shape synthesis, repair loops, coordinates and compaction.

pub mod clauses;
pub mod compaction;
pub mod drawing;
pub mod equivalence;
pub mod expansion;
pub mod shape;
pub mod shape_builder;
pub mod stats;
pub mod variables;

pub use compaction::{compact_area, compute_node_index_positions};
pub use drawing::{make_orthogonal_drawing, make_orthogonal_drawing_with, DrawingResult};
pub use equivalence::{
    build_equivalence_classes, classes_to_orderings, EdgeLabels, EquivalenceClasses, Orderings,
};
pub use shape::{Direction, Shape, ALL_DIRECTIONS};
pub use shape_builder::build_shape;
pub use stats::{compute_all_stats, OrthogonalStats};
pub use variables::VariablesHandler;
