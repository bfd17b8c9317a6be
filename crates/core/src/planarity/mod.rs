//! Planarity testing and combinatorial embedding.

pub mod embedder;
pub mod embedding;
pub mod interlacement;
pub mod segment;

pub use embedder::{embed_component, embed_graph};
pub use embedding::Embedding;
pub use interlacement::compute_interlacement_graph;
pub use segment::{compute_segments, Segment};
