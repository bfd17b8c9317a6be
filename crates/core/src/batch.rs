//! Parallel batch driver (feature `parallel`).
//!
//! Each graph is an independent, self-contained job: its augmented graph,
//! shape, attributes, and solver sessions are owned by one task, so jobs
//! parallelize without shared state.

use crate::error::Result;
use crate::orthogonal::{make_orthogonal_drawing, DrawingResult};
use crate::model::UndirectedGraph;
use rayon::prelude::*;

/// Draw every graph with the built-in solver, one rayon task per graph.
pub fn draw_all(graphs: &[UndirectedGraph]) -> Vec<Result<DrawingResult>> {
    graphs
        .par_iter()
        .map(make_orthogonal_drawing)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_all_preserves_order_and_errors() {
        let mut square = UndirectedGraph::new();
        for i in 0..4 {
            square.add_node(i);
        }
        for i in 0..4 {
            square.add_edge(i, (i + 1) % 4);
        }
        let mut disconnected = UndirectedGraph::new();
        disconnected.add_node(0);
        disconnected.add_node(1);
        let results = draw_all(&[square, disconnected]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
