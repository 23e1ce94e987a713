#![deny(missing_docs)]
//! Latin-square and Sudoku solving by reduction to Boolean satisfiability.
//!
//! A partially-filled N×N puzzle is translated into CNF clauses over the
//! proposition "cell (i, j) holds value k", handed to an external SAT
//! solver, and the satisfying assignment (if any) is decoded back into a
//! grid and verified. Three interchangeable clause-generation strategies are
//! provided, trading clause count against auxiliary-variable count:
//!
//! 1. **Pairwise** ("binomial"): one clause per pair of literals in each
//!    at-most-one group. No auxiliary variables, Θ(N⁴) clauses.
//! 2. **Bitwise** ("binary", commander-style): every true literal in a group
//!    must agree with a shared ⌈log₂ N⌉-bit index. Θ(N² log N) clauses.
//! 3. **Sequential counter**: a chain of "some earlier literal was true"
//!    variables per group. Θ(N³) clauses and auxiliary variables overall,
//!    the asymptotically smallest of the three.
//!
//! Solving itself is delegated to [`batsat`] behind a small session trait;
//! this crate owns only the encoding, decoding and verification.

/// The `cnf` module defines literals, clauses and CNF formulas, the primary
/// variable indexing scheme shared by all encoders, and DIMACS output.
pub mod cnf;

/// The `encoding` module implements the three at-most-one encodings over a
/// common notion of constraint groups.
pub mod encoding;

/// The `solver` module wraps the external SAT solver in a per-run session
/// and drives the encode → solve → decode pipeline.
pub mod solver;

/// The `sudoku` module holds the puzzle and grid types, the puzzle file
/// parser, and the Latin-square/block verifier.
pub mod sudoku;
