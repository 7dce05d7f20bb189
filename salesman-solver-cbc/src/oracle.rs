//! [`SolverOracle`] implementation running `cbc` in a scratch directory.

use std::{fs, path::PathBuf};

use salesman_core::{
    MilpModel, RawSolution, SolveError, SolverOracle, SolverSettings, TerminationStatus,
};

use crate::{CbcError, LpFormat, parse_solution, process::CbcProcess};

/// Name under which the CLI selects this backend.
pub const SOLVER_NAME: &str = "cbc";

/// Executable looked up on the `PATH` when no solver path is configured.
pub const DEFAULT_EXECUTABLE: &str = "cbc";

const MODEL_FILE: &str = "model.lp";
const SOLUTION_FILE: &str = "model.sol";

/// Exact oracle delegating to an external `cbc` process.
///
/// Every solve gets a fresh scratch directory that is removed afterwards.
/// Failing to start the executable is reported as
/// [`SolveError::SolverUnavailable`]; a failing run or an unreadable
/// solution file becomes a [`TerminationStatus::SolverError`] solution.
#[derive(Debug, Default, Clone, Copy)]
pub struct CbcOracle;

impl CbcOracle {
    /// Create the oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn run(model: &MilpModel, settings: &SolverSettings) -> Result<RawSolution, CbcError> {
        let exe = settings
            .solver_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXECUTABLE));
        let workdir = tempfile::Builder::new()
            .prefix("salesman-cbc-")
            .tempdir()
            .map_err(CbcError::Prepare)?;
        let model_path = workdir.path().join(MODEL_FILE);
        let solution_path = workdir.path().join(SOLUTION_FILE);
        fs::write(&model_path, LpFormat::new(model).to_string()).map_err(CbcError::Prepare)?;

        let output = CbcProcess::new(exe).run(&model_path, &solution_path, settings.timeout)?;
        log::trace!("cbc output:\n{}", String::from_utf8_lossy(&output.stdout));

        let text = fs::read_to_string(&solution_path).map_err(CbcError::ReadSolution)?;
        parse_solution(&text, model)
    }
}

impl SolverOracle for CbcOracle {
    fn solve(
        &self,
        model: &MilpModel,
        settings: &SolverSettings,
    ) -> Result<RawSolution, SolveError> {
        match Self::run(model, settings) {
            Ok(raw) => Ok(raw),
            Err(err @ (CbcError::Spawn { .. } | CbcError::Prepare(_))) => {
                Err(SolveError::SolverUnavailable {
                    solver: settings.solver_name.clone(),
                    reason: err.to_string(),
                })
            }
            Err(err) => {
                log::warn!("cbc run failed: {err}");
                Ok(RawSolution::failed(
                    TerminationStatus::SolverError,
                    err.to_string(),
                ))
            }
        }
    }
}
