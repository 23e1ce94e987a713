#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Validity checking for decoded grids.
//!
//! Checks run in a fixed order and stop at the first violation: value
//! ranges, then row uniqueness, then column uniqueness, then block
//! uniqueness when the block rule applies. Reported coordinates are
//! 0-based and point at the second occurrence of a duplicated value.

use crate::sudoku::grid::{BlockRule, Grid};
use bit_vec::BitVec;
use std::fmt;

/// The first rule violation found in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A cell value lies outside `[1, N]`.
    ValueOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value found there.
        value: usize,
    },
    /// A value occurs twice in one row.
    RowDuplicate {
        /// Row of the second occurrence.
        row: usize,
        /// Column of the second occurrence.
        col: usize,
    },
    /// A value occurs twice in one column.
    ColumnDuplicate {
        /// Row of the second occurrence.
        row: usize,
        /// Column of the second occurrence.
        col: usize,
    },
    /// A value occurs twice in one block.
    BlockDuplicate {
        /// Row of the second occurrence.
        row: usize,
        /// Column of the second occurrence.
        col: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange { row, col, value } => {
                write!(f, "value {value} at ({row}, {col}) is out of range")
            }
            Self::RowDuplicate { row, col } => {
                write!(f, "duplicate value in row at ({row}, {col})")
            }
            Self::ColumnDuplicate { row, col } => {
                write!(f, "duplicate value in column at ({row}, {col})")
            }
            Self::BlockDuplicate { row, col } => {
                write!(f, "duplicate value in block at ({row}, {col})")
            }
        }
    }
}

/// Checks `grid` for Latin-square validity, plus block uniqueness when
/// `rule` assigns the board a block size.
///
/// # Errors
///
/// Returns the first [`Violation`] encountered in check order.
pub fn verify(grid: &Grid, rule: BlockRule) -> Result<(), Violation> {
    let n = grid.size();

    for row in 0..n {
        for col in 0..n {
            let value = grid.value(row, col);
            if value < 1 || value > n {
                return Err(Violation::ValueOutOfRange { row, col, value });
            }
        }
    }

    for row in 0..n {
        let mut seen = BitVec::from_elem(n + 1, false);
        for col in 0..n {
            let value = grid.value(row, col);
            if seen.get(value).unwrap_or(false) {
                return Err(Violation::RowDuplicate { row, col });
            }
            seen.set(value, true);
        }
    }

    for col in 0..n {
        let mut seen = BitVec::from_elem(n + 1, false);
        for row in 0..n {
            let value = grid.value(row, col);
            if seen.get(value).unwrap_or(false) {
                return Err(Violation::ColumnDuplicate { row, col });
            }
            seen.set(value, true);
        }
    }

    if let Some(b) = rule.block_size(n) {
        for block_row in 0..b {
            for block_col in 0..b {
                let mut seen = BitVec::from_elem(n + 1, false);
                for row in block_row * b..(block_row + 1) * b {
                    for col in block_col * b..(block_col + 1) * b {
                        let value = grid.value(row, col);
                        if seen.get(value).unwrap_or(false) {
                            return Err(Violation::BlockDuplicate { row, col });
                        }
                        seen.set(value, true);
                    }
                }
            }
        }
    }

    Ok(())
}
