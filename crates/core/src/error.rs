//! Unified error types for the orthograph-core crate.
//!
//! All public-facing errors are collected here so callers can match on a
//! single enum.

use thiserror::Error;

/// Top-level error type for the orthograph-core crate.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// An I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parse error when reading a graph file.
    #[error("Parse error: {0}")]
    Parse(#[from] crate::io::ParseError),

    /// The input graph is not connected.
    #[error("The graph is not connected")]
    Disconnected,

    /// A SAT oracle failure (launch, malformed output, unknown verdict).
    #[error("SAT solver error: {0}")]
    Sat(#[from] crate::sat::SatError),

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled(#[from] crate::worker::CancelledError),

    /// An internal contract violation; indicates a bug.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DrawingError>;
