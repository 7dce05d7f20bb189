//! The solver boundary and the settings passed across it.

use std::path::PathBuf;
use std::time::Duration;

use crate::{MilpModel, RawSolution, SolveError};

/// How to run the solver for one request.
///
/// Settings travel with each call; oracles keep no global configuration.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use salesman_core::SolverSettings;
///
/// let settings = SolverSettings::new("cbc")
///     .with_path("/usr/bin/cbc")
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(settings.solver_name, "cbc");
/// assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverSettings {
    /// Name of the configured solver, used in diagnostics.
    pub solver_name: String,
    /// Executable for out-of-process solvers.
    pub solver_path: Option<PathBuf>,
    /// Upper limit on solve time.
    pub timeout: Option<Duration>,
}

impl SolverSettings {
    /// Settings for `solver_name` with no path and no time limit.
    #[must_use]
    pub fn new(solver_name: impl Into<String>) -> Self {
        Self {
            solver_name: solver_name.into(),
            solver_path: None,
            timeout: None,
        }
    }

    /// Set the solver executable.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solver_path = Some(path.into());
        self
    }

    /// Set the time limit.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Exact MILP solver treated as a black box.
///
/// Implementations return [`SolveError::SolverUnavailable`] when the solver
/// cannot be started. Every other outcome, including infeasibility and
/// timeouts, is reported through [`RawSolution::status`]. A call makes one
/// attempt; nothing is retried.
///
/// Oracles must be `Send + Sync` so a planner can be shared between threads.
pub trait SolverOracle: Send + Sync {
    /// Solve `model` once.
    fn solve(&self, model: &MilpModel, settings: &SolverSettings)
    -> Result<RawSolution, SolveError>;
}

impl<T: SolverOracle + ?Sized> SolverOracle for &T {
    fn solve(
        &self,
        model: &MilpModel,
        settings: &SolverSettings,
    ) -> Result<RawSolution, SolveError> {
        (**self).solve(model, settings)
    }
}

impl<T: SolverOracle + ?Sized> SolverOracle for Box<T> {
    fn solve(
        &self,
        model: &MilpModel,
        settings: &SolverSettings,
    ) -> Result<RawSolution, SolveError> {
        (**self).solve(model, settings)
    }
}
