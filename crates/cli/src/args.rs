//! CLI argument definitions for all orthograph subcommands.
//!
//! All `clap` structs and enums live here so `main.rs` stays minimal and
//! each command handler only imports the types it needs.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ==========================================================================
// Subcommand enum
// ==========================================================================

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute an orthogonal drawing for a graph file.
    ///
    /// Reads a graph, runs the full pipeline (shape synthesis, repair
    /// loops, coordinate assignment, compaction) and prints the drawing
    /// statistics. Optional writers export the result as SVG or GraphML.
    Draw(DrawArgs),

    /// Print information about a graph file.
    ///
    /// Shows node and edge counts, connectivity, degree spread,
    /// biconnected components, and the planarity verdict.
    Info(InfoArgs),

    /// Generate a graph and write it in the textual format.
    Gen(GenArgs),
}

// ==========================================================================
// Draw command
// ==========================================================================

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Input graph file (`nodes:` / `edges:` format).
    pub input: PathBuf,

    /// Write the drawing as an SVG file.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Write the augmented graph as GraphML (with colors and positions).
    #[arg(long)]
    pub graphml: Option<PathBuf>,

    /// Write the drawing statistics as JSON.
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// External DIMACS solver command; the built-in solver runs when
    /// omitted.
    #[arg(long)]
    pub solver: Option<PathBuf>,

    /// Randomize the corner-insertion tie-break (and the external
    /// solver's search, if one is configured).
    #[arg(long)]
    pub randomize: bool,
}

// ==========================================================================
// Info command
// ==========================================================================

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input graph file (`nodes:` / `edges:` format).
    pub input: PathBuf,
}

// ==========================================================================
// Gen command
// ==========================================================================

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GraphKind {
    /// Connected random graph.
    Random,
    /// Connected random graph with maximum degree four.
    RandomDeg4,
    /// Frame of an n x m grid.
    Grid,
    /// Strip of stacked triangles.
    Triangle,
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// What to generate.
    #[arg(short, long, value_enum, default_value = "random")]
    pub kind: GraphKind,

    /// Number of nodes (random kinds), rows (grid), or levels (triangle).
    #[arg(short, long, default_value_t = 10)]
    pub nodes: usize,

    /// Number of edges (random kinds) or columns (grid).
    #[arg(short, long, default_value_t = 12)]
    pub edges: usize,

    /// Seed for the random kinds.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
