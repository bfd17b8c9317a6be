//! Orthograph CLI
//!
//! Command-line tool for orthogonal graph drawing: compute drawings,
//! inspect graphs, and generate inputs.
//!
//! ## Subcommands
//!
//! ```text
//! orthograph draw <input> [--svg out.svg] [--graphml out.xml]   Compute a drawing
//! orthograph info <input>                                       Print graph info
//! orthograph gen  --kind grid -n 4 -e 5 -o out.txt              Generate a graph
//! ```

mod args;
mod commands;
mod progress;

use args::Commands;
use clap::Parser;

// ==========================================================================
// Top-level CLI
// ==========================================================================

/// Orthograph — orthogonal grid drawings of graphs: every vertex on an
/// integer lattice, every edge a chain of axis-aligned segments.
#[derive(Parser, Debug)]
#[command(name = "orthograph", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    quiet: bool,
}

// ==========================================================================
// Main
// ==========================================================================

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Draw(args) => commands::draw::run(args, cli.quiet),
        Commands::Info(args) => commands::info::run(args),
        Commands::Gen(args) => commands::gen::run(args, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
