//! The `info` subcommand: structural facts about a graph file.

use crate::args::InfoArgs;
use orthograph_core::analysis::{biconnected_components, connected_component_count, is_connected};
use orthograph_core::io::text;
use orthograph_core::planarity::embed_graph;
use orthograph_core::DrawingError;

pub fn run(args: InfoArgs) -> Result<(), DrawingError> {
    let graph = text::parse_file(&args.input)?;

    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!("Connected: {}", is_connected(&graph));
    println!("Components: {}", connected_component_count(&graph));

    let max_degree = graph
        .node_ids()
        .map(|node_id| graph.degree(node_id))
        .max()
        .unwrap_or(0);
    println!("Max degree: {}", max_degree);

    let decomposition = biconnected_components(&graph);
    println!("Biconnected components: {}", decomposition.components.len());
    println!("Cut vertices: {}", decomposition.cut_vertices.len());

    match embed_graph(&graph) {
        Some(embedding) => {
            println!("Planar: true");
            println!("Faces: {}", embedding.face_count());
        }
        None => println!("Planar: false"),
    }
    Ok(())
}
