//! # sudoku-sat
//!
//! Command-line front end for solving Latin-square and Sudoku puzzles by
//! SAT encoding. A puzzle file is translated into CNF under one of three
//! encodings (pairwise, bitwise, sequential-counter), handed to the
//! embedded SAT solver, and the satisfying assignment is decoded back into
//! a grid and verified against the puzzle rules.
//!
//! ```sh
//! sudoku-sat solve --path puzzle.txt --encoding all --stats
//! sudoku-sat batch --dir puzzles/ --encoding sequential-counter
//! sudoku-sat completions bash
//! ```
//!
//! Set `RUST_LOG=debug` for per-encoder clause figures.

mod command_line;

use clap::Parser;
use command_line::cli::{Cli, run};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}
