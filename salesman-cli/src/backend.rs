//! Selection of the oracle backend named in the configuration.

use salesman_core::{SolveError, SolverOracle};

use crate::CliError;
use crate::solve::SolveConfig;

/// Solver used when the configuration names none.
pub(crate) const DEFAULT_SOLVER: &str = "microlp";

const SUPPORTED_SOLVERS: &str = "microlp, cbc";

/// Backends this binary can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolverBackend {
    /// In-process `microlp` via `good_lp`.
    Microlp,
    /// External COIN-OR CBC executable.
    Cbc,
}

impl SolverBackend {
    /// Parse a configured solver name, ignoring ASCII case.
    ///
    /// A name no backend answers to leaves nothing to start, so it is
    /// reported as [`SolveError::SolverUnavailable`].
    pub(crate) fn from_name(name: &str) -> Result<Self, SolveError> {
        match name.to_ascii_lowercase().as_str() {
            "microlp" => Ok(Self::Microlp),
            "cbc" => Ok(Self::Cbc),
            _ => Err(SolveError::SolverUnavailable {
                solver: name.to_owned(),
                reason: format!("unsupported solver (expected one of: {SUPPORTED_SOLVERS})"),
            }),
        }
    }

    /// Name passed to the oracle in its settings.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Microlp => "microlp",
            Self::Cbc => "cbc",
        }
    }
}

/// Builds the oracle for one solve invocation.
pub(crate) trait OracleBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn SolverOracle>, CliError>;
}

/// Maps each backend onto the oracle crate compiled into this binary.
pub(crate) struct DefaultOracleBuilder;

impl OracleBuilder for DefaultOracleBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn SolverOracle>, CliError> {
        match config.solver {
            SolverBackend::Microlp => microlp(),
            SolverBackend::Cbc => cbc(),
        }
    }
}

#[cfg(feature = "solver-microlp")]
fn microlp() -> Result<Box<dyn SolverOracle>, CliError> {
    Ok(Box::new(salesman_solver_microlp::MicrolpOracle::new()))
}

#[cfg(not(feature = "solver-microlp"))]
const fn microlp() -> Result<Box<dyn SolverOracle>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-microlp",
        action: "solving with microlp",
    })
}

#[cfg(feature = "solver-cbc")]
fn cbc() -> Result<Box<dyn SolverOracle>, CliError> {
    Ok(Box::new(salesman_solver_cbc::CbcOracle::new()))
}

#[cfg(not(feature = "solver-cbc"))]
const fn cbc() -> Result<Box<dyn SolverOracle>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-cbc",
        action: "solving with cbc",
    })
}
