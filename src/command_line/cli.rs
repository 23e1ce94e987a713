#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Argument definitions and command dispatch.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use sudoku_sat::cnf::dimacs::write_dimacs;
use sudoku_sat::encoding::{EncodeOptions, EncodingKind};
use sudoku_sat::solver::{Error as SolveError, RunStats, RunVerdict, solve_puzzle};
use sudoku_sat::sudoku::grid::BlockRule;
use sudoku_sat::sudoku::{Puzzle, parse_file, verify};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Command-line interface for the puzzle solver.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-sat",
    version,
    about = "Solve Latin-square and Sudoku puzzles via SAT encodings"
)]
pub(crate) struct Cli {
    /// Subcommand to execute.
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve one puzzle file.
    Solve {
        /// Path to the puzzle file (board size, then N² cells, `.` or 0
        /// for unknowns).
        #[arg(long)]
        path: PathBuf,

        /// Also write each generated instance next to the puzzle as
        /// `<file>.<encoding>.cnf` in DIMACS format.
        #[arg(long, default_value_t = false)]
        export_dimacs: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file under a directory, isolating failures.
    Batch {
        /// Directory to scan recursively.
        #[arg(long)]
        dir: PathBuf,

        /// Only files with this extension are treated as puzzles.
        #[arg(long, default_value = "txt")]
        extension: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by `solve` and `batch`.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Which encoding to run; `all` runs every encoding and checks that
    /// they agree on satisfiability.
    #[arg(short, long, value_enum, default_value_t = EncodingArg::SequentialCounter)]
    encoding: EncodingArg,

    /// When the block (sub-grid) constraint applies.
    #[arg(long, value_enum, default_value_t = BlockRuleArg::PerfectSquare)]
    block_rule: BlockRuleArg,

    /// Abort an encoding once it has emitted this many clauses.
    #[arg(long)]
    max_clauses: Option<usize>,

    /// Skip re-checking decoded grids against the puzzle rules.
    #[arg(long, default_value_t = false)]
    no_verify: bool,

    /// Print instance sizes, timings and allocator figures per run.
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// Do not print solved grids.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum EncodingArg {
    Pairwise,
    Bitwise,
    SequentialCounter,
    All,
}

impl std::fmt::Display for EncodingArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pairwise => "pairwise",
            Self::Bitwise => "bitwise",
            Self::SequentialCounter => "sequential-counter",
            Self::All => "all",
        })
    }
}

impl EncodingArg {
    fn kinds(self) -> Vec<EncodingKind> {
        match self {
            Self::Pairwise => vec![EncodingKind::Pairwise],
            Self::Bitwise => vec![EncodingKind::Bitwise],
            Self::SequentialCounter => vec![EncodingKind::SequentialCounter],
            Self::All => EncodingKind::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum BlockRuleArg {
    PerfectSquare,
    Conventional,
}

impl std::fmt::Display for BlockRuleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::PerfectSquare => "perfect-square",
            Self::Conventional => "conventional",
        })
    }
}

impl From<BlockRuleArg> for BlockRule {
    fn from(arg: BlockRuleArg) -> Self {
        match arg {
            BlockRuleArg::PerfectSquare => Self::PerfectSquare,
            BlockRuleArg::Conventional => Self::Conventional,
        }
    }
}

/// Satisfiability summary of one run, for agreement checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Sat,
    Unsat,
    Inconclusive,
}

/// Executes the parsed command line, returning the process exit code.
pub(crate) fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Solve {
            path,
            export_dimacs,
            common,
        } => match solve_one(&path, export_dimacs, &common) {
            Ok(()) => 0,
            Err(message) => {
                eprintln!("{}: {message}", path.display());
                1
            }
        },
        Commands::Batch {
            dir,
            extension,
            common,
        } => run_batch(&dir, &extension, &common),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            0
        }
    }
}

fn solve_one(path: &Path, export_dimacs: bool, common: &CommonOptions) -> Result<(), String> {
    let puzzle = parse_file(path).map_err(|e| e.to_string())?;
    if export_dimacs {
        export_instances(path, &puzzle, common)?;
    }

    let mut answers: Vec<(EncodingKind, Answer)> = Vec::new();
    for kind in common.encoding.kinds() {
        let answer = run_encoding(&puzzle, kind, common)?;
        answers.push((kind, answer));
    }

    if answers.len() > 1 {
        let (first_kind, first) = answers[0];
        for &(kind, answer) in &answers[1..] {
            if answer != first && answer != Answer::Inconclusive && first != Answer::Inconclusive {
                return Err(format!(
                    "encodings disagree: {first_kind} says {first:?}, {kind} says {answer:?}"
                ));
            }
        }
        println!("all encodings agree");
    }
    Ok(())
}

fn run_encoding(
    puzzle: &Puzzle,
    kind: EncodingKind,
    common: &CommonOptions,
) -> Result<Answer, String> {
    let options = EncodeOptions {
        block_rule: common.block_rule.into(),
        max_clauses: common.max_clauses,
    };
    match solve_puzzle(puzzle, kind, options) {
        Ok(report) => {
            if common.stats {
                print_stats(kind, &report.stats);
            }
            match report.verdict {
                RunVerdict::Solved(grid) => {
                    println!("{kind}: SAT");
                    if !common.quiet {
                        let block = options.block_rule.block_size(puzzle.size());
                        print!("{}", grid.render(block));
                    }
                    if !common.no_verify {
                        if let Err(violation) = verify(&grid, options.block_rule) {
                            return Err(format!(
                                "{kind}: decoded grid fails verification: {violation}"
                            ));
                        }
                    }
                    Ok(Answer::Sat)
                }
                RunVerdict::Unsatisfiable => {
                    println!("{kind}: UNSAT");
                    Ok(Answer::Unsat)
                }
                RunVerdict::Inconclusive => {
                    println!("{kind}: inconclusive (solver gave up)");
                    Ok(Answer::Inconclusive)
                }
            }
        }
        // A clause set the solver rejects while loading is contradictory:
        // report it as the UNSAT it implies, distinctly labelled.
        Err(SolveError::ClauseRejected { loaded }) => {
            println!("{kind}: UNSAT (contradiction while loading, {loaded} clauses in)");
            Ok(Answer::Unsat)
        }
        Err(e @ SolveError::Encode(_)) => Err(format!("{kind}: {e}")),
    }
}

fn export_instances(path: &Path, puzzle: &Puzzle, common: &CommonOptions) -> Result<(), String> {
    let options = EncodeOptions {
        block_rule: common.block_rule.into(),
        max_clauses: common.max_clauses,
    };
    for kind in common.encoding.kinds() {
        let cnf = kind
            .build(options)
            .encode(puzzle)
            .map_err(|e| format!("{kind}: {e}"))?;
        let out_path = path.with_extension(format!("{kind}.cnf"));
        let mut file = std::fs::File::create(&out_path)
            .map_err(|e| format!("{}: {e}", out_path.display()))?;
        write_dimacs(&cnf, &mut file).map_err(|e| format!("{}: {e}", out_path.display()))?;
        println!("wrote {}", out_path.display());
    }
    Ok(())
}

fn run_batch(dir: &Path, extension: &str, common: &CommonOptions) -> i32 {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    paths.sort();

    if paths.is_empty() {
        eprintln!("no .{extension} puzzle files under {}", dir.display());
        return 1;
    }

    let mut failures = 0usize;
    for path in &paths {
        println!("== {}", path.display());
        if let Err(message) = solve_one(path, false, common) {
            eprintln!("{}: {message}", path.display());
            failures += 1;
        }
    }
    println!("{} file(s), {} failure(s)", paths.len(), failures);
    i32::from(failures > 0)
}

fn print_stats(kind: EncodingKind, stats: &RunStats) {
    let allocated = allocated_bytes()
        .map_or_else(|| "n/a".to_string(), |bytes| format!("{bytes}"));
    println!(
        "{kind}: {} vars, {} clauses, encode {:?}, solve {:?}, heap {allocated} bytes",
        stats.variables, stats.clauses, stats.encode_time, stats.solve_time
    );
}

fn allocated_bytes() -> Option<usize> {
    epoch::advance().ok()?;
    stats::allocated::read().ok()
}
