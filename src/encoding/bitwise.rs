#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The bitwise ("binary", commander-style) encoding.
//!
//! Each group gets a vector of `bit_width(N)` auxiliary variables that
//! spell out, in binary, which position in the group is allowed to be
//! true. A literal at position p implies every bit of the vector equals
//! the corresponding bit of p, so two simultaneously-true literals would
//! force the vector to equal two different patterns. At-most-one in
//! Θ(N log N) clauses per group instead of Θ(N²) pairs.

use crate::cnf::vars::{VarAllocator, primary_count};
use crate::cnf::{Clause, Cnf, Lit};
use crate::encoding::{EncodeError, EncodeOptions, Encoding, constraint_groups};
use crate::sudoku::Puzzle;
use log::debug;

/// Number of bits needed to distinguish the `n` positions `0..n`, i.e. the
/// bit length of `n − 1`.
#[must_use]
pub const fn bit_width(n: usize) -> usize {
    let mut remaining = n - 1;
    let mut bits = 0;
    while remaining > 0 {
        bits += 1;
        remaining >>= 1;
    }
    bits
}

/// Bitwise encoder. Stateless apart from its options; auxiliary variables
/// are allocated afresh per run.
#[derive(Debug, Clone, Default)]
pub struct Bitwise {
    options: EncodeOptions,
}

impl Bitwise {
    /// Creates an encoder with the given options.
    #[must_use]
    pub const fn new(options: EncodeOptions) -> Self {
        Self { options }
    }
}

impl Encoding for Bitwise {
    fn label(&self) -> &'static str {
        "bitwise"
    }

    fn encode(&mut self, puzzle: &Puzzle) -> Result<Cnf, EncodeError> {
        let n = puzzle.size();
        let block = self.options.block_rule.block_size(n);
        let bits = bit_width(n);
        let mut alloc = VarAllocator::above(primary_count(n));
        let mut cnf = Cnf::new();

        for group in constraint_groups(n, block) {
            cnf.push(Clause::from_slice(&group.literals));
            let index: Vec<Lit> = (0..bits).map(|_| alloc.fresh()).collect();
            for (pos, &lit) in group.literals.iter().enumerate() {
                for (bit, &index_lit) in index.iter().enumerate() {
                    let wanted = if (pos >> bit) & 1 == 1 {
                        index_lit
                    } else {
                        -index_lit
                    };
                    cnf.push_pair(-lit, wanted);
                }
            }
            self.options.check_budget(&cnf)?;
        }

        for clue in puzzle.clue_clauses() {
            cnf.push(clue);
        }

        debug!(
            "bitwise: {} clauses over {} variables ({} auxiliary)",
            cnf.len(),
            cnf.num_vars(),
            alloc.highest() - primary_count(n)
        );
        Ok(cnf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::grid::EXAMPLE_FOUR;

    #[test]
    fn bit_width_is_the_length_of_n_minus_one() {
        assert_eq!(bit_width(1), 0);
        assert_eq!(bit_width(2), 1);
        assert_eq!(bit_width(3), 2);
        assert_eq!(bit_width(4), 2);
        assert_eq!(bit_width(5), 3);
        assert_eq!(bit_width(9), 4);
        assert_eq!(bit_width(16), 4);
        assert_eq!(bit_width(25), 5);
        assert_eq!(bit_width(36), 6);
    }

    #[test]
    fn clause_and_variable_counts_for_four_by_four() {
        // 64 groups: one at-least-one clause plus 4 literals × 2 bits each,
        // and one 2-bit index vector per group.
        let puzzle = Puzzle::from(EXAMPLE_FOUR);
        let cnf = Bitwise::new(EncodeOptions::default())
            .encode(&puzzle)
            .unwrap();
        let clues = puzzle.clues().count();
        assert_eq!(cnf.len(), 64 * (1 + 4 * 2) + clues);
        assert_eq!(cnf.num_vars(), 64 + 64 * 2);
    }

    #[test]
    fn index_clauses_match_position_bits() {
        // On an empty 2×2 board (no blocks) the first group is cell (1,1)
        // with literals [1, 2] and one index bit, variable 9. Position 0
        // wants the bit clear, position 1 wants it set.
        let puzzle = Puzzle::from_rows(&[vec![0, 0], vec![0, 0]]);
        let cnf = Bitwise::new(EncodeOptions::default())
            .encode(&puzzle)
            .unwrap();
        let clauses: Vec<Vec<Lit>> = cnf.clauses().iter().map(|c| c.to_vec()).collect();
        assert_eq!(clauses[0], vec![1, 2]);
        assert_eq!(clauses[1], vec![-1, -9]);
        assert_eq!(clauses[2], vec![-2, 9]);
    }

    #[test]
    fn one_by_one_board_needs_no_index_bits() {
        let puzzle = Puzzle::from_rows(&[vec![0]]);
        let cnf = Bitwise::new(EncodeOptions::default())
            .encode(&puzzle)
            .unwrap();
        assert_eq!(cnf.num_vars(), 1);
        assert!(cnf.clauses().iter().all(|c| c.as_slice() == [1]));
    }

    #[test]
    fn encoding_is_deterministic() {
        let puzzle = Puzzle::from(EXAMPLE_FOUR);
        let first = Bitwise::new(EncodeOptions::default())
            .encode(&puzzle)
            .unwrap();
        let second = Bitwise::new(EncodeOptions::default())
            .encode(&puzzle)
            .unwrap();
        assert_eq!(first, second);
    }
}
