//! Command-line surface of the binary.

pub(crate) mod cli;
