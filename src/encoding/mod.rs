#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The three CNF encodings of the exactly-one constraints.
//!
//! Every rule of the puzzle (each cell holds one value, each value occurs
//! once per row, per column and, when blocks apply, per block) is an
//! at-least-one/at-most-one pair over a group of N primary literals. The
//! [`constraint_groups`] builder enumerates those groups in a fixed order
//! for all four families; the encoders differ only in how they realize the
//! at-most-one half:
//!
//! - [`pairwise`]: one 2-literal clause per pair, no auxiliary variables;
//! - [`bitwise`]: a shared binary position index per group;
//! - [`sequential`]: a counter chain of prefix variables per group.
//!
//! Clause order within an encoding is deterministic so repeated runs are
//! reproducible.

pub mod bitwise;
pub mod pairwise;
pub mod sequential;

use crate::cnf::vars::CellVar;
use crate::cnf::{Cnf, Lit};
use crate::sudoku::grid::BlockRule;
use crate::sudoku::Puzzle;
use std::error::Error;
use std::fmt;

/// Which puzzle rule a constraint group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// One value per cell (fixed cell, varying value).
    Cell,
    /// Each value once per row (fixed row and value, varying column).
    Row,
    /// Each value once per column (fixed column and value, varying row).
    Column,
    /// Each value once per block (fixed value and block, varying position).
    Block,
}

/// One exactly-one constraint: `literals` is the ordered set over which at
/// least one and at most one must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The rule this group enforces.
    pub family: Family,
    /// Position of the group within its family's enumeration order.
    pub ordinal: usize,
    /// The group's positive primary literals, in iteration order.
    pub literals: Vec<Lit>,
}

/// Enumerates every constraint group of an `n`×`n` board, block family
/// last and only when `block` carries a block size.
///
/// Order is fixed: cells row-major, then rows by (row, value), then columns
/// by (column, value), then blocks by (value, block-row, block-column) with
/// cells inside a block row-major.
#[must_use]
pub fn constraint_groups(n: usize, block: Option<usize>) -> Vec<Group> {
    let mut groups = Vec::with_capacity(n * n * if block.is_some() { 4 } else { 3 });

    for row in 1..=n {
        for col in 1..=n {
            groups.push(Group {
                family: Family::Cell,
                ordinal: (row - 1) * n + (col - 1),
                literals: (1..=n).map(|v| CellVar::new(row, col, v).lit(n)).collect(),
            });
        }
    }

    for row in 1..=n {
        for value in 1..=n {
            groups.push(Group {
                family: Family::Row,
                ordinal: (row - 1) * n + (value - 1),
                literals: (1..=n)
                    .map(|col| CellVar::new(row, col, value).lit(n))
                    .collect(),
            });
        }
    }

    for col in 1..=n {
        for value in 1..=n {
            groups.push(Group {
                family: Family::Column,
                ordinal: (col - 1) * n + (value - 1),
                literals: (1..=n)
                    .map(|row| CellVar::new(row, col, value).lit(n))
                    .collect(),
            });
        }
    }

    if let Some(b) = block {
        for value in 1..=n {
            for block_row in 0..b {
                for block_col in 0..b {
                    let literals = (0..n)
                        .map(|pos| {
                            let row = block_row * b + pos / b + 1;
                            let col = block_col * b + pos % b + 1;
                            CellVar::new(row, col, value).lit(n)
                        })
                        .collect();
                    groups.push(Group {
                        family: Family::Block,
                        ordinal: (value - 1) * b * b + block_row * b + block_col,
                        literals,
                    });
                }
            }
        }
    }

    groups
}

/// Options shared by every encoder run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// When blocks apply; the same rule instance must be used for
    /// verification.
    pub block_rule: BlockRule,
    /// Abort encoding once this many clauses have been emitted. Guards
    /// against the pairwise encoder's Θ(N⁴) blow-up on large boards.
    pub max_clauses: Option<usize>,
}

impl EncodeOptions {
    /// Fails the run once the clause count passes the configured budget.
    pub(crate) fn check_budget(&self, cnf: &Cnf) -> Result<(), EncodeError> {
        match self.max_clauses {
            Some(budget) if cnf.len() > budget => Err(EncodeError::ClauseBudget {
                emitted: cnf.len(),
                budget,
            }),
            _ => Ok(()),
        }
    }
}

/// Why an encoder run was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The clause budget in [`EncodeOptions::max_clauses`] was exceeded.
    ClauseBudget {
        /// Clauses emitted when the run stopped.
        emitted: usize,
        /// The configured budget.
        budget: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClauseBudget { emitted, budget } => {
                write!(f, "clause budget exhausted: {emitted} emitted, budget {budget}")
            }
        }
    }
}

impl Error for EncodeError {}

/// One of the three at-most-one strategies, applied to a whole puzzle.
///
/// `encode` emits the four constraint families followed by the puzzle's
/// clue unit clauses, so its output is a complete instance for the solver.
pub trait Encoding {
    /// Short name for logs and reports.
    fn label(&self) -> &'static str;

    /// Translates `puzzle` into a CNF instance.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ClauseBudget`] when the configured clause
    /// budget is exhausted mid-run.
    fn encode(&mut self, puzzle: &Puzzle) -> Result<Cnf, EncodeError>;
}

/// Selects one of the three encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// Direct pairwise at-most-one clauses.
    Pairwise,
    /// Commander-style binary position index.
    Bitwise,
    /// Sequential counter chain.
    SequentialCounter,
}

impl EncodingKind {
    /// All kinds, in comparison-report order.
    pub const ALL: [Self; 3] = [Self::Pairwise, Self::Bitwise, Self::SequentialCounter];

    /// Builds a fresh encoder of this kind.
    #[must_use]
    pub fn build(self, options: EncodeOptions) -> Box<dyn Encoding> {
        match self {
            Self::Pairwise => Box::new(pairwise::Pairwise::new(options)),
            Self::Bitwise => Box::new(bitwise::Bitwise::new(options)),
            Self::SequentialCounter => Box::new(sequential::SequentialCounter::new(options)),
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pairwise => "pairwise",
            Self::Bitwise => "bitwise",
            Self::SequentialCounter => "sequential-counter",
        })
    }
}
