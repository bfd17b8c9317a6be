//! Built-in DPLL oracle.
//!
//! Keeps the drawing pipeline and its tests self-contained: no external
//! solver binary required. On UNSAT the transcript holds the unit clauses
//! derived at the top level (forced literals and refuted branch literals),
//! followed by the empty clause — exactly the shape the corner-insertion
//! repair loop consumes.

use super::cnf::Cnf;
use super::solver::{SatError, SatOracle, SatOutcome};

/// A plain DPLL solver with top-level unit learning.
///
/// Branching always picks the lowest unassigned variable, so runs are
/// deterministic for a given formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpllSolver;

impl DpllSolver {
    pub fn new() -> Self {
        Self
    }
}

struct Conflict;

fn literal_value(assignment: &[Option<bool>], literal: i32) -> Option<bool> {
    assignment[literal.unsigned_abs() as usize].map(|value| value == (literal > 0))
}

/// Unit propagation to fixpoint. Forced literals are appended to the
/// transcript when one is supplied (top level only).
fn propagate(
    clauses: &[&[i32]],
    assignment: &mut [Option<bool>],
    mut transcript: Option<&mut Vec<String>>,
) -> Result<(), Conflict> {
    loop {
        let mut changed = false;
        for clause in clauses {
            let mut unassigned = None;
            let mut unassigned_count = 0;
            let mut satisfied = false;
            for &literal in *clause {
                match literal_value(assignment, literal) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        unassigned = Some(literal);
                        unassigned_count += 1;
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (unassigned, unassigned_count) {
                (None, _) => return Err(Conflict),
                (Some(literal), 1) => {
                    assignment[literal.unsigned_abs() as usize] = Some(literal > 0);
                    if let Some(transcript) = transcript.as_deref_mut() {
                        transcript.push(format!("{literal} 0"));
                    }
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return Ok(());
        }
    }
}

fn first_unassigned(assignment: &[Option<bool>]) -> Option<usize> {
    (1..assignment.len()).find(|&variable| assignment[variable].is_none())
}

fn to_model(assignment: &[Option<bool>]) -> Vec<i32> {
    (1..assignment.len())
        .map(|variable| {
            let value = assignment[variable].unwrap_or(false);
            if value {
                variable as i32
            } else {
                -(variable as i32)
            }
        })
        .collect()
}

/// Full recursive DPLL below the top level; no transcript bookkeeping.
fn search(clauses: &[&[i32]], mut assignment: Vec<Option<bool>>) -> Option<Vec<i32>> {
    if propagate(clauses, &mut assignment, None).is_err() {
        return None;
    }
    let Some(variable) = first_unassigned(&assignment) else {
        return Some(to_model(&assignment));
    };
    let mut trial = assignment.clone();
    trial[variable] = Some(true);
    if let Some(model) = search(clauses, trial) {
        return Some(model);
    }
    assignment[variable] = Some(false);
    search(clauses, assignment)
}

impl SatOracle for DpllSolver {
    fn solve(&self, cnf: &Cnf) -> Result<SatOutcome, SatError> {
        let clauses: Vec<&[i32]> = cnf.clauses().collect();
        let variable_count = cnf.variable_count() as usize;
        let mut assignment: Vec<Option<bool>> = vec![None; variable_count + 1];
        let mut transcript: Vec<String> = Vec::new();
        loop {
            if propagate(&clauses, &mut assignment, Some(&mut transcript)).is_err() {
                transcript.push("0".to_string());
                return Ok(SatOutcome::Unsatisfiable(transcript));
            }
            let Some(variable) = first_unassigned(&assignment) else {
                return Ok(SatOutcome::Satisfiable(to_model(&assignment)));
            };
            let mut trial = assignment.clone();
            trial[variable] = Some(true);
            if let Some(model) = search(&clauses, trial) {
                return Ok(SatOutcome::Satisfiable(model));
            }
            // the positive branch is refuted, so the negation is implied
            transcript.push(format!("{} 0", -(variable as i32)));
            assignment[variable] = Some(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_satisfies(cnf: &Cnf, model: &[i32]) -> bool {
        cnf.clauses().all(|clause| {
            clause
                .iter()
                .any(|&literal| model.contains(&literal))
        })
    }

    #[test]
    fn test_satisfiable_formula() {
        let mut cnf = Cnf::new();
        cnf.add_clause(vec![1, 2]);
        cnf.add_clause(vec![-1, 3]);
        cnf.add_clause(vec![-2, -3]);
        match DpllSolver::new().solve(&cnf).unwrap() {
            SatOutcome::Satisfiable(model) => {
                assert_eq!(model.len(), 3);
                assert!(model_satisfies(&cnf, &model));
            }
            SatOutcome::Unsatisfiable(_) => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn test_unsatisfiable_formula_has_unit_proof() {
        // x1 xor chain forced into contradiction
        let mut cnf = Cnf::new();
        cnf.add_clause(vec![1, 2]);
        cnf.add_clause(vec![1, -2]);
        cnf.add_clause(vec![-1, 2]);
        cnf.add_clause(vec![-1, -2]);
        match DpllSolver::new().solve(&cnf).unwrap() {
            SatOutcome::Satisfiable(_) => panic!("formula is unsatisfiable"),
            SatOutcome::Unsatisfiable(transcript) => {
                assert_eq!(transcript.last().map(String::as_str), Some("0"));
                let units: Vec<&String> = transcript
                    .iter()
                    .filter(|line| line.split_whitespace().count() == 2)
                    .collect();
                assert!(!units.is_empty(), "proof should contain unit clauses");
            }
        }
    }

    #[test]
    fn test_empty_formula_is_satisfiable() {
        let cnf = Cnf::new();
        match DpllSolver::new().solve(&cnf).unwrap() {
            SatOutcome::Satisfiable(model) => assert!(model.is_empty()),
            SatOutcome::Unsatisfiable(_) => panic!("empty formula"),
        }
    }
}
