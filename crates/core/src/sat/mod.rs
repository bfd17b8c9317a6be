//! SAT formulas and solver oracles.

pub mod cnf;
pub mod dpll;
pub mod process;
pub mod solver;

pub use cnf::Cnf;
pub use dpll::DpllSolver;
pub use process::ProcessSolver;
pub use solver::{SatError, SatOracle, SatOutcome};
