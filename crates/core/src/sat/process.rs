//! External DIMACS solver invocation.
//!
//! Talks to a glucose-style solver binary: the CNF goes in through a
//! scratch file, the model comes back in an output file, and the UNSAT
//! proof in a `-certified-output` file. All scratch files live in a
//! temporary directory released when the call returns.

use super::cnf::Cnf;
use super::solver::{SatError, SatOracle, SatOutcome};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Oracle backed by an external solver process.
///
/// The solver is expected to accept
/// `<cnf-file> <output-file> -certified -certified-output=<proof-file>`,
/// write either `UNSAT` or a space-separated model as the first output
/// line, and emit a DRAT-style proof.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    command: PathBuf,
    randomize: bool,
}

impl ProcessSolver {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            randomize: false,
        }
    }

    /// Let the solver randomize its own search (`-rnd-init`).
    pub fn with_randomization(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }
}

impl SatOracle for ProcessSolver {
    fn solve(&self, cnf: &Cnf) -> Result<SatOutcome, SatError> {
        let scratch = tempfile::tempdir()?;
        let cnf_path = scratch.path().join("formula.cnf");
        let output_path = scratch.path().join("output");
        let proof_path = scratch.path().join("proof");
        fs::write(&cnf_path, cnf.to_dimacs())?;

        let mut command = Command::new(&self.command);
        command
            .arg(&cnf_path)
            .arg(&output_path)
            .arg("-certified")
            .arg(format!("-certified-output={}", proof_path.display()));
        if self.randomize {
            command.arg("-rnd-init");
        }
        // solvers exit with 10/20 for SAT/UNSAT; a missing output file is
        // what distinguishes a crash
        command.output().map_err(|error| SatError::Launch {
            command: self.command.display().to_string(),
            reason: error.to_string(),
        })?;

        let output = fs::read_to_string(&output_path).map_err(|_| SatError::Unknown)?;
        let first_line = output.lines().next().ok_or(SatError::Unknown)?;
        if first_line.trim() == "UNSAT" {
            let proof = fs::read_to_string(&proof_path).map_err(|_| SatError::Unknown)?;
            return Ok(SatOutcome::Unsatisfiable(
                proof.lines().map(str::to_owned).collect(),
            ));
        }
        let mut model = Vec::new();
        for token in first_line.split_whitespace() {
            let literal: i32 = token
                .parse()
                .map_err(|_| SatError::MalformedOutput(format!("bad literal `{token}`")))?;
            if literal != 0 {
                model.push(literal);
            }
        }
        if model.is_empty() && cnf.variable_count() > 0 {
            return Err(SatError::Unknown);
        }
        Ok(SatOutcome::Satisfiable(model))
    }
}
