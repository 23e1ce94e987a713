#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Puzzle and grid types, puzzle file parsing, and solution verification.

/// Board representation: clue puzzles, solved grids, and the block rule.
pub mod grid;

/// Parser for the `N` + N² token puzzle file format.
pub mod parse;

/// Latin-square and block uniqueness checking for decoded grids.
pub mod verify;

pub use grid::{BlockRule, Grid, Puzzle};
pub use parse::{ParseError, parse_file, parse_puzzle};
pub use verify::{Violation, verify};
