#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Driving one puzzle through encode → load → solve → decode.
//!
//! A run is fully isolated: it builds a fresh encoder, opens a fresh
//! solver session, and hands back either a decoded grid, an UNSAT verdict,
//! or an inconclusive verdict, together with instance statistics. Failures
//! (a contradictory clause set at load, an exhausted clause budget) abort
//! only their own run.

pub mod session;

use crate::encoding::{EncodeError, EncodeOptions, Encoding, EncodingKind};
use crate::solver::session::{BatsatSession, SatSession, Verdict};
use crate::sudoku::grid::{Grid, Puzzle};
use log::info;
use std::error::Error as StdError;
use std::fmt;
use std::time::{Duration, Instant};

/// Instance size and wall-clock figures for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Variables allocated in the solver.
    pub variables: usize,
    /// Clauses the solver accepted.
    pub clauses: usize,
    /// Time spent generating clauses.
    pub encode_time: Duration,
    /// Time spent inside the solver.
    pub solve_time: Duration,
}

/// The answer for one puzzle under one encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunVerdict {
    /// The instance is satisfiable; here is the decoded board.
    Solved(Grid),
    /// No completion of the clues exists.
    Unsatisfiable,
    /// The solver stopped within its own bounds without an answer.
    Inconclusive,
}

/// Verdict plus statistics for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// What the solver established.
    pub verdict: RunVerdict,
    /// Size and timing figures.
    pub stats: RunStats,
}

/// Why a run aborted without a verdict.
#[derive(Debug)]
pub enum Error {
    /// The encoder hit its clause budget.
    Encode(EncodeError),
    /// The solver rejected the clause set while loading; `loaded` clauses
    /// had been accepted before the rejection.
    ClauseRejected {
        /// Clauses accepted before the rejection.
        loaded: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "encoding aborted: {e}"),
            Self::ClauseRejected { loaded } => {
                write!(f, "clause set contradictory at load after {loaded} clauses")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::ClauseRejected { .. } => None,
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

/// Runs `puzzle` through `encoding` on the given session.
///
/// # Errors
///
/// Returns [`Error::Encode`] when the clause budget is exhausted and
/// [`Error::ClauseRejected`] when the solver refuses the clause set at
/// load time.
pub fn solve_with<S: SatSession>(
    puzzle: &Puzzle,
    encoding: &mut dyn Encoding,
    session: &mut S,
) -> Result<RunReport, Error> {
    let encode_start = Instant::now();
    let cnf = encoding.encode(puzzle)?;
    let encode_time = encode_start.elapsed();

    session.allocate(cnf.num_vars());
    for (loaded, clause) in cnf.clauses().iter().enumerate() {
        session
            .add_clause(clause)
            .map_err(|_| Error::ClauseRejected { loaded })?;
    }

    let solve_start = Instant::now();
    let verdict = session.solve();
    let solve_time = solve_start.elapsed();

    let stats = RunStats {
        variables: session.num_vars(),
        clauses: session.num_clauses(),
        encode_time,
        solve_time,
    };
    info!(
        "{}: {} vars, {} clauses, encoded in {:?}, solved in {:?}",
        encoding.label(),
        stats.variables,
        stats.clauses,
        stats.encode_time,
        stats.solve_time
    );

    let verdict = match verdict {
        Verdict::Sat(model) => RunVerdict::Solved(Grid::decode(puzzle.size(), &model)),
        Verdict::Unsat => RunVerdict::Unsatisfiable,
        Verdict::Inconclusive => RunVerdict::Inconclusive,
    };
    Ok(RunReport { verdict, stats })
}

/// Runs `puzzle` under the chosen encoding on a fresh [`batsat`] session.
///
/// # Errors
///
/// As [`solve_with`].
pub fn solve_puzzle(
    puzzle: &Puzzle,
    kind: EncodingKind,
    options: EncodeOptions,
) -> Result<RunReport, Error> {
    let mut encoding = kind.build(options);
    let mut session = BatsatSession::new();
    solve_with(puzzle, encoding.as_mut(), &mut session)
}
