#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! DIMACS CNF output.
//!
//! Writes a formula in the standard `p cnf <vars> <clauses>` format so an
//! instance can be fed to any external DIMACS-speaking solver for
//! comparison or debugging.

use crate::cnf::Cnf;
use itertools::Itertools;
use std::io::{self, Write};

/// Writes `cnf` in DIMACS format to `out`.
///
/// # Errors
///
/// Returns any I/O error raised by the underlying writer.
pub fn write_dimacs<W: Write>(cnf: &Cnf, out: &mut W) -> io::Result<()> {
    writeln!(out, "p cnf {} {}", cnf.num_vars(), cnf.len())?;
    for clause in cnf.clauses() {
        writeln!(out, "{} 0", clause.iter().join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn writes_header_and_zero_terminated_clauses() {
        let mut cnf = Cnf::new();
        cnf.push(smallvec![1, -2, 3]);
        cnf.push_pair(-1, 2);
        let mut out = Vec::new();
        write_dimacs(&cnf, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "p cnf 3 2\n1 -2 3 0\n-1 2 0\n");
    }

    #[test]
    fn empty_formula_is_just_the_header() {
        let cnf = Cnf::new();
        let mut out = Vec::new();
        write_dimacs(&cnf, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "p cnf 0 0\n");
    }
}
