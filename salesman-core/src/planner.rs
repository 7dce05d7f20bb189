//! End-to-end pipeline: points to matrix to model to oracle to tour.

use std::time::{Duration, Instant};

use crate::{
    DistanceMatrix, Point, SolveError, SolverOracle, SolverSettings, TerminationStatus, Tour,
    build_model, extract_tour,
};

/// Facts about one solve, reported alongside the tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostics {
    /// Configured solver name.
    pub solver: String,
    /// Status the oracle reported.
    pub status: TerminationStatus,
    /// Objective reported by the oracle, in kilometres.
    pub objective_km: Option<f64>,
    /// Wall-clock time spent inside the oracle.
    pub solve_time: Duration,
    /// Number of model variables.
    pub variables: usize,
    /// Number of model constraints.
    pub constraints: usize,
}

/// A tour together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlannedTour {
    /// The validated tour.
    pub tour: Tour,
    /// Solve diagnostics.
    pub diagnostics: Diagnostics,
}

/// Plans optimal tours with a fixed oracle and settings.
///
/// Each call builds a fresh model; nothing is shared between requests.
///
/// # Examples
/// ```
/// use salesman_core::test_support::{EnumeratingOracle, square_points};
/// use salesman_core::{SolverSettings, TourPlanner};
///
/// let planner = TourPlanner::new(EnumeratingOracle, SolverSettings::new("enumerate"));
/// let planned = planner.plan(&square_points())?;
/// assert_eq!(planned.tour.stops().len(), 5);
/// # Ok::<(), salesman_core::SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TourPlanner<O> {
    oracle: O,
    settings: SolverSettings,
}

impl<O: SolverOracle> TourPlanner<O> {
    /// Pair `oracle` with the settings passed on every solve.
    pub const fn new(oracle: O, settings: SolverSettings) -> Self {
        Self { oracle, settings }
    }

    /// Settings passed to the oracle.
    pub const fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Compute haversine distances for `points` and plan over them.
    pub fn plan(&self, points: &[Point]) -> Result<PlannedTour, SolveError> {
        let matrix = DistanceMatrix::build(points)?;
        self.plan_with_matrix(points, &matrix)
    }

    /// Plan over a precomputed matrix whose rows follow `points`.
    pub fn plan_with_matrix(
        &self,
        points: &[Point],
        matrix: &DistanceMatrix,
    ) -> Result<PlannedTour, SolveError> {
        matrix.aligned_with(points)?;
        let model = build_model(matrix)?;
        log::debug!("{model}");

        let started = Instant::now();
        let raw = self.oracle.solve(&model, &self.settings)?;
        let solve_time = started.elapsed();
        log::info!(
            "solver {} finished with status {} in {:.3}s",
            self.settings.solver_name,
            raw.status(),
            solve_time.as_secs_f64()
        );

        let tour = extract_tour(&model, &raw, points, matrix)?;
        log::info!("optimal tour of {:.3} km: {tour}", tour.total_km());
        Ok(PlannedTour {
            tour,
            diagnostics: Diagnostics {
                solver: self.settings.solver_name.clone(),
                status: raw.status(),
                objective_km: raw.objective(),
                solve_time,
                variables: model.variables().len(),
                constraints: model.constraints().len(),
            },
        })
    }
}
