use std::time::Instant;

use good_lp::{ResolutionError, Solution, SolverModel, microlp};
use salesman_core::{
    MilpModel, RawSolution, SolveError, SolverOracle, SolverSettings, TerminationStatus,
};

use crate::translate::Translation;

/// Name under which the CLI selects this backend.
pub const SOLVER_NAME: &str = "microlp";

/// Exact oracle running `microlp` in-process.
///
/// # Examples
/// ```
/// use salesman_core::test_support::square_points;
/// use salesman_core::{SolverSettings, TourPlanner};
/// use salesman_solver_microlp::MicrolpOracle;
///
/// let planner = TourPlanner::new(MicrolpOracle::new(), SolverSettings::new("microlp"));
/// let planned = planner.plan(&square_points())?;
/// assert_eq!(planned.tour.len(), 4);
/// # Ok::<(), salesman_core::SolveError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MicrolpOracle;

impl MicrolpOracle {
    /// Create the oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SolverOracle for MicrolpOracle {
    fn solve(
        &self,
        model: &MilpModel,
        settings: &SolverSettings,
    ) -> Result<RawSolution, SolveError> {
        let Translation {
            problem,
            variables,
            objective,
            constraints,
        } = Translation::of(model);
        let unsolved = constraints
            .into_iter()
            .fold(problem.minimise(objective).using(microlp), |acc, row| {
                acc.with(row)
            });

        let started = Instant::now();
        let outcome = unsolved.solve();
        let elapsed = started.elapsed();
        log::debug!(
            "microlp returned after {:.3}s over {} variables",
            elapsed.as_secs_f64(),
            variables.len()
        );

        let raw = match outcome {
            Ok(solution) => {
                let values: Vec<f64> = variables.iter().map(|&var| solution.value(var)).collect();
                let found = model.objective_value(&values);
                match settings.timeout {
                    Some(limit) if elapsed > limit => {
                        log::warn!(
                            "microlp overran the {:.3}s limit; best objective {found:.3}",
                            limit.as_secs_f64()
                        );
                        RawSolution::new(TerminationStatus::Timeout, values)
                            .with_best_bound(found)
                    }
                    _ => RawSolution::new(TerminationStatus::Optimal, values).with_objective(found),
                }
            }
            Err(ResolutionError::Infeasible) => RawSolution::failed(
                TerminationStatus::Infeasible,
                "microlp proved the model infeasible",
            ),
            Err(other) => RawSolution::failed(TerminationStatus::SolverError, other.to_string()),
        };
        Ok(raw)
    }
}
