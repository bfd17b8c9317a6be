//! CNF formulas in DIMACS form.

use std::fmt::Write as _;

/// One row of a CNF file: a clause (literals, no terminating zero) or a
/// comment.
#[derive(Debug, Clone)]
pub enum CnfRow {
    Clause(Vec<i32>),
    Comment(String),
}

/// A CNF formula under construction.
///
/// The variable count is the largest absolute literal seen; variable 0 is
/// reserved for the clause terminator.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    variable_count: i32,
    clause_count: usize,
    rows: Vec<CnfRow>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause.
    ///
    /// # Panics
    /// Panics on a zero literal.
    pub fn add_clause(&mut self, clause: Vec<i32>) {
        for &literal in &clause {
            assert_ne!(literal, 0, "Cnf::add_clause: literal 0 is reserved");
            self.variable_count = self.variable_count.max(literal.abs());
        }
        self.rows.push(CnfRow::Clause(clause));
        self.clause_count += 1;
    }

    /// Append a `c ...` comment row.
    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.rows.push(CnfRow::Comment(comment.into()));
    }

    pub fn variable_count(&self) -> i32 {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Iterate the clauses, skipping comments.
    pub fn clauses(&self) -> impl Iterator<Item = &[i32]> {
        self.rows.iter().filter_map(|row| match row {
            CnfRow::Clause(clause) => Some(clause.as_slice()),
            CnfRow::Comment(_) => None,
        })
    }

    /// Serialize to DIMACS: `p cnf V C` header, clauses terminated by `0`,
    /// comments prefixed by `c`.
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "p cnf {} {}", self.variable_count, self.clause_count);
        for row in &self.rows {
            match row {
                CnfRow::Comment(comment) => {
                    let _ = writeln!(out, "c {comment}");
                }
                CnfRow::Clause(clause) => {
                    for literal in clause {
                        let _ = write!(out, "{literal} ");
                    }
                    let _ = writeln!(out, "0");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dimacs_output() {
        let mut cnf = Cnf::new();
        cnf.add_comment("sample");
        cnf.add_clause(vec![1, -2]);
        cnf.add_clause(vec![2, 3]);
        assert_eq!(cnf.variable_count(), 3);
        assert_eq!(cnf.clause_count(), 2);
        assert_eq!(cnf.to_dimacs(), "p cnf 3 2\nc sample\n1 -2 0\n2 3 0\n");
    }

    #[test]
    fn test_clause_iteration_skips_comments() {
        let mut cnf = Cnf::new();
        cnf.add_clause(vec![1]);
        cnf.add_comment("ignored");
        cnf.add_clause(vec![-1, 2]);
        assert_eq!(cnf.clauses().count(), 2);
    }
}
