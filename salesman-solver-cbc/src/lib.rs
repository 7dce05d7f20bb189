//! Out-of-process MILP oracle backed by the COIN-OR CBC executable.
//!
//! [`CbcOracle`] writes the model to a scratch directory in CPLEX LP format,
//! runs `cbc model.lp [sec <limit>] solve solu model.sol` and reads the
//! solution file back into a [`RawSolution`](salesman_core::RawSolution).
//! The executable comes from
//! [`SolverSettings::solver_path`](salesman_core::SolverSettings::solver_path),
//! falling back to `cbc` on the `PATH`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod lp_format;
mod oracle;
mod process;
mod solution;

pub use error::CbcError;
pub use lp_format::LpFormat;
pub use oracle::{CbcOracle, DEFAULT_EXECUTABLE, SOLVER_NAME};
pub use solution::parse_solution;
