#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board representation.
//!
//! A [`Puzzle`] is the immutable clue input: an N×N grid where 0 marks an
//! unknown cell. A [`Grid`] is a fully-valued board produced by decoding a
//! satisfying assignment. The [`BlockRule`] decides for which board sizes
//! the B×B sub-grid constraint applies; one rule instance is shared by all
//! encoders and the verifier within a run so they can never disagree.

use crate::cnf::Clause;
use crate::cnf::vars::CellVar;
use crate::solver::session::Model;
use smallvec::smallvec;
use std::fmt::Write as _;

/// Decides whether an `n`×`n` board carries the block constraint, and with
/// which block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockRule {
    /// Blocks apply whenever `n` is a perfect square, with B = √n.
    #[default]
    PerfectSquare,
    /// Blocks apply only for the conventional Sudoku sizes 9, 16, 25
    /// and 36. Kept for compatibility with solvers that special-case those
    /// sizes; note that it excludes 4×4 boards a perfect-square test would
    /// accept.
    Conventional,
}

impl BlockRule {
    /// The block size for an `n`×`n` board, or `None` when the rule leaves
    /// the board without block constraints.
    #[must_use]
    pub fn block_size(self, n: usize) -> Option<usize> {
        let b = n.isqrt();
        let square = b > 0 && b * b == n;
        match self {
            Self::PerfectSquare => square.then_some(b),
            Self::Conventional => (square && matches!(n, 9 | 16 | 25 | 36)).then_some(b),
        }
    }
}

/// A partially-filled puzzle. Cells hold values in `[1, N]`, with 0 for
/// unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    n: usize,
    cells: Vec<usize>,
}

impl Puzzle {
    /// Builds a puzzle from row-major cell values already validated to lie
    /// in `[0, n]`. Used by the parser after token validation.
    pub(crate) fn from_cells(n: usize, cells: Vec<usize>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        debug_assert!(cells.iter().all(|&v| v <= n));
        Self { n, cells }
    }

    /// Builds a puzzle from nested rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows are not square or a value exceeds the board size;
    /// file input goes through [`crate::sudoku::parse`] instead, which
    /// reports these as errors.
    #[must_use]
    pub fn from_rows(rows: &[Vec<usize>]) -> Self {
        let n = rows.len();
        assert!(n > 0, "empty puzzle");
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            assert_eq!(row.len(), n, "puzzle rows must form a square");
            for &v in row {
                assert!(v <= n, "cell value {v} exceeds board size {n}");
                cells.push(v);
            }
        }
        Self { n, cells }
    }

    /// Board side length N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n
    }

    /// The clue at 0-based (`row`, `col`), or `None` for an unknown cell.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<usize> {
        let v = self.cells[row * self.n + col];
        (v != 0).then_some(v)
    }

    /// Iterates the filled cells as 0-based `(row, col, value)` triples in
    /// row-major order.
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, &v)| {
            (v != 0).then_some((idx / self.n, idx % self.n, v))
        })
    }

    /// One unit clause per clue, in row-major order. The clause list is the
    /// same for every encoder since clues only mention primary variables.
    #[must_use]
    pub fn clue_clauses(&self) -> Vec<Clause> {
        self.clues()
            .map(|(row, col, value)| {
                let lit = CellVar::new(row + 1, col + 1, value).lit(self.n);
                smallvec![lit]
            })
            .collect()
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Puzzle {
    fn from(rows: [[usize; N]; N]) -> Self {
        let rows: Vec<Vec<usize>> = rows.iter().map(|r| r.to_vec()).collect();
        Self::from_rows(&rows)
    }
}

/// A fully-valued board decoded from a satisfying assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    n: usize,
    cells: Vec<usize>,
}

impl Grid {
    /// Reads the solved board out of a satisfying assignment: for each cell
    /// the first value whose primary variable is true, or 0 when none is.
    /// A cell with no true value is impossible for a correctly encoded
    /// instance and is left in the grid for the verifier to report as a
    /// range violation.
    #[must_use]
    pub fn decode(n: usize, model: &Model) -> Self {
        let mut cells = Vec::with_capacity(n * n);
        for row in 1..=n {
            for col in 1..=n {
                let value = (1..=n)
                    .find(|&v| model.is_true(CellVar::new(row, col, v).lit(n)))
                    .unwrap_or(0);
                cells.push(value);
            }
        }
        Self { n, cells }
    }

    /// Board side length N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n
    }

    /// The value at 0-based (`row`, `col`).
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> usize {
        self.cells[row * self.n + col]
    }

    /// Renders the board, inserting `|` columns and dashed rules between
    /// blocks when a block size is given.
    #[must_use]
    pub fn render(&self, block: Option<usize>) -> String {
        let width = self.n.to_string().len();
        let mut out = String::new();
        for row in 0..self.n {
            if let Some(b) = block {
                if row > 0 && row % b == 0 {
                    let cols = self.n * (width + 1) + (self.n / b - 1) * 2;
                    for _ in 0..cols {
                        out.push('-');
                    }
                    out.push('\n');
                }
            }
            for col in 0..self.n {
                if let Some(b) = block {
                    if col > 0 && col % b == 0 {
                        out.push_str("| ");
                    }
                }
                let _ = write!(out, "{:>width$} ", self.value(row, col));
            }
            out.push('\n');
        }
        out
    }
}

/// A solvable 4×4 example with 2×2 blocks.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [
    [1, 0, 0, 4],
    [0, 4, 1, 0],
    [0, 1, 4, 0],
    [4, 0, 0, 1],
];

/// The classic 9×9 example puzzle.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_square_rule() {
        assert_eq!(BlockRule::PerfectSquare.block_size(1), Some(1));
        assert_eq!(BlockRule::PerfectSquare.block_size(4), Some(2));
        assert_eq!(BlockRule::PerfectSquare.block_size(6), None);
        assert_eq!(BlockRule::PerfectSquare.block_size(9), Some(3));
        assert_eq!(BlockRule::PerfectSquare.block_size(49), Some(7));
    }

    #[test]
    fn conventional_rule_only_covers_the_hardcoded_sizes() {
        assert_eq!(BlockRule::Conventional.block_size(4), None);
        assert_eq!(BlockRule::Conventional.block_size(6), None);
        assert_eq!(BlockRule::Conventional.block_size(9), Some(3));
        assert_eq!(BlockRule::Conventional.block_size(16), Some(4));
        assert_eq!(BlockRule::Conventional.block_size(25), Some(5));
        assert_eq!(BlockRule::Conventional.block_size(36), Some(6));
        assert_eq!(BlockRule::Conventional.block_size(49), None);
    }

    #[test]
    fn clue_clauses_are_row_major_units() {
        let puzzle = Puzzle::from_rows(&[
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 3, 0],
            vec![0, 0, 0, 0],
        ]);
        let clauses = puzzle.clue_clauses();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].as_slice(), &[CellVar::new(1, 1, 1).lit(4)]);
        assert_eq!(clauses[1].as_slice(), &[CellVar::new(3, 3, 3).lit(4)]);
    }

    #[test]
    fn puzzle_accessors() {
        let puzzle = Puzzle::from(EXAMPLE_NINE);
        assert_eq!(puzzle.size(), 9);
        assert_eq!(puzzle.value(0, 0), Some(5));
        assert_eq!(puzzle.value(0, 2), None);
        assert_eq!(puzzle.clues().count(), 30);
    }

    #[test]
    #[should_panic(expected = "cell value 7 exceeds board size 4")]
    fn from_rows_rejects_out_of_range_values() {
        let _ = Puzzle::from_rows(&[
            vec![1, 0, 0, 0],
            vec![0, 7, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
    }

    #[test]
    fn render_marks_blocks() {
        let grid = Grid {
            n: 4,
            cells: vec![1, 2, 3, 4, 3, 4, 1, 2, 2, 1, 4, 3, 4, 3, 2, 1],
        };
        let text = grid.render(Some(2));
        assert!(text.contains('|'));
        assert!(text.lines().any(|l| l.chars().all(|c| c == '-')));
        let plain = grid.render(None);
        assert!(!plain.contains('|'));
    }
}
