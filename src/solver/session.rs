#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The boundary with the external SAT solver.
//!
//! A [`SatSession`] is one solver instance loaded with one instance of one
//! puzzle: allocate variables, add clauses, solve once, read the model.
//! Sessions are never shared between encoder runs; the pipeline opens a
//! fresh one per run so no solver state can leak across puzzles.

use crate::cnf::Lit;
use batsat::{BasicSolver, SolverInterface, lbool};
use std::error::Error;
use std::fmt;

/// A satisfying assignment, indexed by variable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    /// A model assigning false to variables `1..=count`.
    #[must_use]
    pub fn all_false(count: usize) -> Self {
        Self {
            values: vec![false; count + 1],
        }
    }

    /// Whether `lit` is satisfied. Variables beyond the model read as
    /// false.
    #[must_use]
    pub fn is_true(&self, lit: Lit) -> bool {
        let var = lit.unsigned_abs() as usize;
        let value = self.values.get(var).copied().unwrap_or(false);
        if lit < 0 { !value } else { value }
    }

    /// Marks the variable of the positive literal `lit` true.
    ///
    /// # Panics
    ///
    /// Panics if `lit` is not positive or exceeds the model.
    pub fn force_true(&mut self, lit: Lit) {
        assert!(lit > 0, "only positive literals can be forced");
        self.values[lit.unsigned_abs() as usize] = true;
    }

    /// Number of variables the model covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Whether the model covers no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The solver rejected a clause because the clause set is already
/// contradictory at load time. Fatal for the run; never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseRejected;

impl fmt::Display for ClauseRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("clause set became contradictory while loading")
    }
}

impl Error for ClauseRejected {}

/// What one `solve` call established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A satisfying assignment was found.
    Sat(Model),
    /// No assignment exists.
    Unsat,
    /// The solver gave up within its own resource bounds; distinct from
    /// UNSAT.
    Inconclusive,
}

/// One solver instance for one run.
pub trait SatSession {
    /// Declares `count` fresh variables; ids continue from the previous
    /// allocation, starting at 1.
    fn allocate(&mut self, count: usize);

    /// Adds one clause of non-zero literals over allocated variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClauseRejected`] when the solver is (or becomes) in a
    /// conflicting state at load time.
    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), ClauseRejected>;

    /// Runs the search once.
    fn solve(&mut self) -> Verdict;

    /// Variables allocated so far.
    fn num_vars(&self) -> usize;

    /// Clauses accepted so far.
    fn num_clauses(&self) -> usize;
}

/// [`SatSession`] over a [`batsat`] solver instance.
pub struct BatsatSession {
    solver: BasicSolver,
    vars: Vec<batsat::Var>,
    clauses: usize,
    buffer: Vec<batsat::Lit>,
    ok: bool,
}

impl BatsatSession {
    /// Opens a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: BasicSolver::default(),
            vars: Vec::new(),
            clauses: 0,
            buffer: Vec::new(),
            ok: true,
        }
    }

    fn solver_lit(&self, lit: Lit) -> batsat::Lit {
        let var = self.vars[lit.unsigned_abs() as usize - 1];
        batsat::Lit::new(var, lit > 0)
    }
}

impl Default for BatsatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSession for BatsatSession {
    fn allocate(&mut self, count: usize) {
        self.vars.reserve(count);
        for _ in 0..count {
            self.vars.push(self.solver.new_var_default());
        }
    }

    fn add_clause(&mut self, clause: &[Lit]) -> Result<(), ClauseRejected> {
        if !self.ok {
            return Err(ClauseRejected);
        }
        self.buffer.clear();
        for &lit in clause {
            let mapped = self.solver_lit(lit);
            self.buffer.push(mapped);
        }
        let accepted = self.solver.add_clause_reuse(&mut self.buffer);
        if accepted {
            self.clauses += 1;
            Ok(())
        } else {
            self.ok = false;
            Err(ClauseRejected)
        }
    }

    fn solve(&mut self) -> Verdict {
        if !self.ok {
            return Verdict::Unsat;
        }
        let result = self.solver.solve_limited(&[]);
        if result == lbool::TRUE {
            let mut model = Model::all_false(self.vars.len());
            for (idx, &var) in self.vars.iter().enumerate() {
                if self.solver.value_var(var) == lbool::TRUE {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    model.force_true(idx as Lit + 1);
                }
            }
            Verdict::Sat(model)
        } else if result == lbool::FALSE {
            Verdict::Unsat
        } else {
            Verdict::Inconclusive
        }
    }

    fn num_vars(&self) -> usize {
        self.vars.len()
    }

    fn num_clauses(&self) -> usize {
        self.clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfiable_instance_yields_a_model() {
        let mut session = BatsatSession::new();
        session.allocate(2);
        session.add_clause(&[1]).unwrap();
        session.add_clause(&[-2]).unwrap();
        match session.solve() {
            Verdict::Sat(model) => {
                assert!(model.is_true(1));
                assert!(!model.is_true(2));
                assert!(model.is_true(-2));
            }
            other => panic!("expected SAT, got {other:?}"),
        }
        assert_eq!(session.num_vars(), 2);
        assert_eq!(session.num_clauses(), 2);
    }

    #[test]
    fn contradictory_clauses_are_unsat() {
        let mut session = BatsatSession::new();
        session.allocate(2);
        session.add_clause(&[1, 2]).unwrap();
        session.add_clause(&[-1, 2]).unwrap();
        session.add_clause(&[1, -2]).unwrap();
        session.add_clause(&[-1, -2]).unwrap();
        assert_eq!(session.solve(), Verdict::Unsat);
    }

    #[test]
    fn conflicting_units_are_rejected_at_load() {
        let mut session = BatsatSession::new();
        session.allocate(1);
        session.add_clause(&[1]).unwrap();
        assert_eq!(session.add_clause(&[-1]), Err(ClauseRejected));
        // Once rejected, the session stays in the failed state.
        assert_eq!(session.add_clause(&[1]), Err(ClauseRejected));
    }

    #[test]
    fn model_indexing_handles_out_of_range_variables() {
        let model = Model::all_false(3);
        assert!(!model.is_true(4));
        assert!(model.is_true(-4));
        assert_eq!(model.len(), 3);
    }
}
