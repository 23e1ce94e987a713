#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Parser for the puzzle file format.
//!
//! A puzzle file is whitespace-separated tokens: first the board size N,
//! then exactly N² cell tokens in row-major order, each either a value in
//! `[1, N]` or a placeholder (`.` or `0`) for an unknown cell. Line breaks
//! carry no meaning.

use crate::sudoku::grid::Puzzle;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Everything that can go wrong while reading a puzzle file.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The input had no tokens at all.
    MissingSize,
    /// The first token was not a positive integer.
    InvalidSize(String),
    /// The input ended before N² cell tokens were read.
    MissingCells {
        /// Cell count the header demanded.
        expected: usize,
        /// Cell tokens actually present.
        found: usize,
    },
    /// More than N² cell tokens were present.
    TrailingTokens {
        /// Number of tokens past the expected count.
        extra: usize,
    },
    /// A cell token was neither a placeholder nor an integer.
    InvalidCell(String),
    /// A cell value fell outside `[1, N]`.
    ValueOutOfRange {
        /// The offending value.
        value: usize,
        /// The board size it must not exceed.
        size: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::MissingSize => write!(f, "empty puzzle input"),
            Self::InvalidSize(tok) => write!(f, "invalid board size {tok:?}"),
            Self::MissingCells { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            Self::TrailingTokens { extra } => {
                write!(f, "{extra} unexpected token(s) after the last cell")
            }
            Self::InvalidCell(tok) => write!(f, "invalid cell token {tok:?}"),
            Self::ValueOutOfRange { value, size } => {
                write!(f, "cell value {value} outside 1..={size}")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a puzzle from any reader.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found: an I/O
/// failure, a malformed size header, a wrong token count, or a malformed or
/// out-of-range cell token.
pub fn parse_puzzle<R: Read>(reader: R) -> Result<Puzzle, ParseError> {
    let mut input = String::new();
    BufReader::new(reader).read_to_string(&mut input)?;

    let mut tokens = input.split_whitespace();
    let size_tok = tokens.next().ok_or(ParseError::MissingSize)?;
    let n: usize = size_tok
        .parse()
        .map_err(|_| ParseError::InvalidSize(size_tok.to_string()))?;
    if n == 0 {
        return Err(ParseError::InvalidSize(size_tok.to_string()));
    }

    let expected = n * n;
    let cell_tokens: Vec<&str> = tokens.collect();
    if cell_tokens.len() > expected {
        return Err(ParseError::TrailingTokens {
            extra: cell_tokens.len() - expected,
        });
    }
    if cell_tokens.len() < expected {
        return Err(ParseError::MissingCells {
            expected,
            found: cell_tokens.len(),
        });
    }

    let mut cells = Vec::with_capacity(expected);
    for tok in cell_tokens {
        if tok == "." {
            cells.push(0);
            continue;
        }
        let value: usize = tok
            .parse()
            .map_err(|_| ParseError::InvalidCell(tok.to_string()))?;
        if value > n {
            return Err(ParseError::ValueOutOfRange { value, size: n });
        }
        cells.push(value);
    }

    Ok(Puzzle::from_cells(n, cells))
}

/// Parses the puzzle file at `path`.
///
/// # Errors
///
/// As [`parse_puzzle`], with file-open failures reported as
/// [`ParseError::Io`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Puzzle, ParseError> {
    parse_puzzle(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Puzzle, ParseError> {
        parse_puzzle(Cursor::new(text))
    }

    #[test]
    fn parses_dots_and_zeros_as_unknowns() {
        let puzzle = parse("4\n1 . 0 4\n. . . .\n. 2 . .\n4 . . 1\n").unwrap();
        assert_eq!(puzzle.size(), 4);
        assert_eq!(puzzle.value(0, 0), Some(1));
        assert_eq!(puzzle.value(0, 1), None);
        assert_eq!(puzzle.value(0, 2), None);
        assert_eq!(puzzle.value(2, 1), Some(2));
    }

    #[test]
    fn line_breaks_are_insignificant() {
        let one_line = parse("1 1").unwrap();
        let two_lines = parse("1\n1\n").unwrap();
        assert_eq!(one_line, two_lines);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse("   \n"), Err(ParseError::MissingSize)));
    }

    #[test]
    fn rejects_bad_size() {
        assert!(matches!(parse("x 1"), Err(ParseError::InvalidSize(_))));
        assert!(matches!(parse("0"), Err(ParseError::InvalidSize(_))));
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            parse("2\n1 2 ."),
            Err(ParseError::MissingCells {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            parse("1\n1 1 1"),
            Err(ParseError::TrailingTokens { extra: 2 })
        ));
    }

    #[test]
    fn rejects_bad_cells() {
        assert!(matches!(parse("2\n1 ? . ."), Err(ParseError::InvalidCell(_))));
        assert!(matches!(
            parse("2\n1 3 . ."),
            Err(ParseError::ValueOutOfRange { value: 3, size: 2 })
        ));
    }
}
