//! The `draw` subcommand: run the full drawing pipeline.

use crate::args::DrawArgs;
use crate::progress::SpinnerMonitor;
use orthograph_core::io::{graphml, svg, text};
use orthograph_core::orthogonal::compute_all_stats;
use orthograph_core::sat::{DpllSolver, ProcessSolver, SatOracle};
use orthograph_core::{make_orthogonal_drawing_with, DrawingError, NoopMonitor, ProgressMonitor};

pub fn run(args: DrawArgs, quiet: bool) -> Result<(), DrawingError> {
    let graph = text::parse_file(&args.input)?;

    let oracle: Box<dyn SatOracle> = match &args.solver {
        Some(command) => {
            Box::new(ProcessSolver::new(command).with_randomization(args.randomize))
        }
        None => Box::new(DpllSolver::new()),
    };
    let spinner = if quiet { None } else { Some(SpinnerMonitor::new()) };
    let monitor: &dyn ProgressMonitor = match &spinner {
        Some(spinner) => spinner,
        None => &NoopMonitor,
    };

    let result = make_orthogonal_drawing_with(&graph, oracle.as_ref(), monitor, args.randomize);
    if let Some(spinner) = &spinner {
        spinner.finish();
    }
    let result = result?;

    if let Some(path) = &args.svg {
        svg::write_file(&result.graph, &result.attributes, path)?;
    }
    if let Some(path) = &args.graphml {
        graphml::write_file(&result.graph, &result.attributes, path)?;
    }

    let stats = compute_all_stats(&result);
    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| DrawingError::Invariant(format!("stats serialization: {e}")))?;
        std::fs::write(path, json)?;
    }

    if !quiet {
        println!("Area: {}", stats.area);
        println!("Crossings: {}", stats.crossings);
        println!("Bends: {}", stats.bends);
        println!("Total edge length: {}", stats.total_edge_length);
        println!("Max edge length: {}", stats.max_edge_length);
        println!("Edge length stddev: {:.3}", stats.edge_length_stddev);
        println!("Max bends per edge: {}", stats.max_bends_per_edge);
        println!("Bends stddev: {:.3}", stats.bends_stddev);
        println!("Initial number of cycles: {}", result.initial_cycle_count);
        println!("Number of added cycles: {}", result.added_cycle_count);
        println!("Number of useless bends: {}", result.removed_bend_count);
    }
    Ok(())
}
