//! Command-line interface for exact tour planning.
//!
//! `salesman solve` reads a points CSV, plans the optimal closed tour with
//! the configured solver backend, writes a map document for an external
//! renderer and prints a JSON report. `salesman matrix` precomputes the
//! distance table for a points file.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod backend;
mod error;
mod logging;
mod matrix;
mod solve;

pub use error::CliError;

use logging::LogLevel;
use matrix::MatrixArgs;
use solve::SolveArgs;

pub(crate) const ARG_POINTS_CSV: &str = "points-csv";
pub(crate) const ARG_DISTANCES_CSV: &str = "distances-csv";
pub(crate) const ARG_SOLVER: &str = "solver";
pub(crate) const ARG_SOLVER_PATH: &str = "solver-path";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_RENDER_OUT: &str = "render-out";
pub(crate) const ARG_MATRIX_OUT: &str = "out";
pub(crate) const ENV_SOLVE_POINTS_CSV: &str = "SALESMAN_CMDS_SOLVE_POINTS_CSV";
pub(crate) const ENV_MATRIX_POINTS_CSV: &str = "SALESMAN_CMDS_MATRIX_POINTS_CSV";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns the first failure from argument parsing, configuration
/// layering, input loading, planning or output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.log_level, cli.log_timestamp)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
        Command::Matrix(args) => matrix::run_matrix(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "salesman",
    about = "Exact travelling salesman tours over geocoded points",
    version
)]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// Prefix log lines with a millisecond timestamp.
    #[arg(long, global = true)]
    log_timestamp: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan the optimal tour and write the map document.
    Solve(SolveArgs),
    /// Precompute the distance matrix for a points file.
    Matrix(MatrixArgs),
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match salesman_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
