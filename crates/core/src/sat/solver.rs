//! The SAT oracle abstraction.
//!
//! The drawing pipeline needs exactly three capabilities from a solver:
//! build a CNF, solve it, and on UNSAT inspect the deduction transcript
//! for unit clauses. Any DRAT-style proof is sufficient.

use super::cnf::Cnf;
use thiserror::Error;

/// Outcome of one solver invocation.
#[derive(Debug, Clone)]
pub enum SatOutcome {
    /// A satisfying assignment: one signed integer per variable, positive
    /// for true, covering every variable of the formula.
    Satisfiable(Vec<i32>),
    /// Unsatisfiable, with the proof transcript: one clause per line, each
    /// terminated by ` 0`; lines starting with `d` are deletions.
    Unsatisfiable(Vec<String>),
}

/// Errors from a SAT oracle.
#[derive(Error, Debug)]
pub enum SatError {
    /// I/O failure while exchanging files with an external solver.
    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external solver process could not be launched or crashed.
    #[error("failed to run solver `{command}`: {reason}")]
    Launch { command: String, reason: String },

    /// The solver produced output this crate cannot interpret.
    #[error("malformed solver output: {0}")]
    MalformedOutput(String),

    /// The solver finished without a SAT or UNSAT verdict.
    #[error("solver returned neither SAT nor UNSAT")]
    Unknown,
}

/// A synchronous SAT oracle.
pub trait SatOracle {
    /// Solve the formula, returning either a model or an UNSAT proof
    /// transcript.
    fn solve(&self, cnf: &Cnf) -> Result<SatOutcome, SatError>;
}
