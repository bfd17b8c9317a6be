//! Graph algorithms shared by the planarity and drawing pipelines.

pub mod components;
pub mod cycles;
pub mod order;

pub use components::{
    biconnected_components, connected_component_count, is_connected, BiconnectedComponents,
};
pub use cycles::{
    are_cycles_equivalent, cycle_basis, find_cycle_directed, find_cycle_undirected,
};
pub use order::{bipartition, topological_sort};
