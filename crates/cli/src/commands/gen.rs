//! The `gen` subcommand: graph generators.

use crate::args::{GenArgs, GraphKind};
use orthograph_core::generate::{
    grid_frame_graph, random_connected_graph, random_connected_graph_max_degree_4,
    triangle_strip_graph,
};
use orthograph_core::io::text;
use orthograph_core::DrawingError;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn run(args: GenArgs, quiet: bool) -> Result<(), DrawingError> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let graph = match args.kind {
        GraphKind::Random => random_connected_graph(args.nodes, args.edges, &mut rng),
        GraphKind::RandomDeg4 => {
            random_connected_graph_max_degree_4(args.nodes, args.edges, &mut rng)
        }
        GraphKind::Grid => grid_frame_graph(args.nodes, args.edges),
        GraphKind::Triangle => triangle_strip_graph(args.nodes),
    };
    match &args.output {
        Some(path) => {
            text::write_file(&graph, path)?;
            if !quiet {
                println!(
                    "Wrote {} nodes, {} edges to {}",
                    graph.node_count(),
                    graph.edge_count(),
                    path.display()
                );
            }
        }
        None => print!("{}", text::write_string(&graph)),
    }
    Ok(())
}
