#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The pairwise ("binomial") encoding.
//!
//! At-most-one is spelled out directly: for every unordered pair of
//! literals in a group, one 2-literal clause forbids both being true. No
//! auxiliary variables, but Θ(N⁴) clauses across the board; this is the
//! baseline the other encodings exist to beat.

use crate::cnf::{Clause, Cnf};
use crate::encoding::{EncodeError, EncodeOptions, Encoding, constraint_groups};
use crate::sudoku::Puzzle;
use itertools::Itertools;
use log::debug;

/// Pairwise encoder. Stateless apart from its options.
#[derive(Debug, Clone, Default)]
pub struct Pairwise {
    options: EncodeOptions,
}

impl Pairwise {
    /// Creates an encoder with the given options.
    #[must_use]
    pub const fn new(options: EncodeOptions) -> Self {
        Self { options }
    }
}

impl Encoding for Pairwise {
    fn label(&self) -> &'static str {
        "pairwise"
    }

    fn encode(&mut self, puzzle: &Puzzle) -> Result<Cnf, EncodeError> {
        let n = puzzle.size();
        let block = self.options.block_rule.block_size(n);
        let mut cnf = Cnf::new();

        for group in constraint_groups(n, block) {
            cnf.push(Clause::from_slice(&group.literals));
            for (&a, &b) in group.literals.iter().tuple_combinations() {
                cnf.push_pair(-a, -b);
            }
            self.options.check_budget(&cnf)?;
        }

        for clue in puzzle.clue_clauses() {
            cnf.push(clue);
        }

        debug!(
            "pairwise: {} clauses over {} variables",
            cnf.len(),
            cnf.num_vars()
        );
        Ok(cnf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::grid::{BlockRule, EXAMPLE_FOUR};

    fn encode(puzzle: &Puzzle, options: EncodeOptions) -> Cnf {
        Pairwise::new(options).encode(puzzle).unwrap()
    }

    #[test]
    fn clause_count_for_four_by_four() {
        // 64 groups of 4 literals: one at-least-one clause plus C(4,2) = 6
        // pairs each, then the clue units.
        let puzzle = Puzzle::from(EXAMPLE_FOUR);
        let cnf = encode(&puzzle, EncodeOptions::default());
        let clues = puzzle.clues().count();
        assert_eq!(cnf.len(), 64 * 7 + clues);
        assert_eq!(cnf.num_vars(), 64);
    }

    #[test]
    fn no_block_clauses_for_non_square_sizes() {
        let puzzle = Puzzle::from_rows(&vec![vec![0; 6]; 6]);
        let cnf = encode(&puzzle, EncodeOptions::default());
        // 3 families × 36 groups × (1 + C(6,2)) clauses, no clues.
        assert_eq!(cnf.len(), 108 * 16);
    }

    #[test]
    fn one_by_one_board_is_four_unit_clauses() {
        let puzzle = Puzzle::from_rows(&[vec![0]]);
        let cnf = encode(&puzzle, EncodeOptions::default());
        let units: Vec<_> = cnf.clauses().iter().map(|c| c.to_vec()).collect();
        assert_eq!(units, vec![vec![1]; 4]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let puzzle = Puzzle::from(EXAMPLE_FOUR);
        let first = encode(&puzzle, EncodeOptions::default());
        let second = encode(&puzzle, EncodeOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn budget_stops_the_run() {
        let puzzle = Puzzle::from(EXAMPLE_FOUR);
        let options = EncodeOptions {
            block_rule: BlockRule::PerfectSquare,
            max_clauses: Some(100),
        };
        assert!(matches!(
            Pairwise::new(options).encode(&puzzle),
            Err(EncodeError::ClauseBudget { budget: 100, .. })
        ));
    }
}
