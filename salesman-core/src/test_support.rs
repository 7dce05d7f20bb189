//! Small fixtures and oracles for unit, behaviour and doc tests.
//!
//! [`EnumeratingOracle`] solves tiny models exactly by trying every
//! permutation, which lets the pipeline be exercised without a MILP solver.

use std::collections::HashMap;

use crate::{
    DistanceMatrix, MilpModel, Point, RawSolution, SolveError, SolverOracle, SolverSettings,
    TerminationStatus, Tour, build_tour,
};

/// Side length of [`square_points`], in degrees.
pub const SQUARE_SIDE_DEG: f64 = 0.1;

/// Four corners of a small square near the origin, listed so that visiting
/// them in input order crosses both diagonals.
///
/// # Panics
///
/// Never in practice; the coordinates are valid constants.
#[must_use]
pub fn square_points() -> Vec<Point> {
    [
        (1, "SW", 0.0, 0.0),
        (2, "NE", SQUARE_SIDE_DEG, SQUARE_SIDE_DEG),
        (3, "NW", SQUARE_SIDE_DEG, 0.0),
        (4, "SE", 0.0, SQUARE_SIDE_DEG),
    ]
    .into_iter()
    .map(|(id, name, lat, lon)| match Point::new(id, name, lat, lon, name) {
        Ok(point) => point,
        Err(err) => panic!("square corner {name} is invalid: {err}"),
    })
    .collect()
}

/// The perimeter tour `SW -> NW -> NE -> SE -> SW` over [`square_points`].
///
/// # Panics
///
/// Never in practice; the order is a fixed permutation.
#[must_use]
pub fn square_tour() -> Tour {
    let points = square_points();
    let tour = DistanceMatrix::build(&points)
        .map_err(SolveError::from)
        .and_then(|matrix| build_tour(&[0, 2, 1, 3], &points, &matrix));
    match tour {
        Ok(tour) => tour,
        Err(err) => panic!("square tour is invalid: {err}"),
    }
}

/// Exact oracle that enumerates every tour starting at node 0.
///
/// Only edge costs are read from the model; the returned assignment sets the
/// selected edges to 1 and the order variables to their positions. Models
/// above [`EnumeratingOracle::MAX_NODES`] are refused as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumeratingOracle;

impl EnumeratingOracle {
    /// Largest model the oracle agrees to enumerate.
    pub const MAX_NODES: usize = 8;
}

impl SolverOracle for EnumeratingOracle {
    fn solve(
        &self,
        model: &MilpModel,
        settings: &SolverSettings,
    ) -> Result<RawSolution, SolveError> {
        let n = model.size();
        if n > Self::MAX_NODES {
            return Err(SolveError::SolverUnavailable {
                solver: settings.solver_name.clone(),
                reason: format!("enumeration supports at most {} nodes", Self::MAX_NODES),
            });
        }
        if n < 2 {
            return Ok(RawSolution::failed(
                TerminationStatus::Infeasible,
                "no tour over fewer than two nodes",
            ));
        }

        let weights: HashMap<_, _> = model.objective().terms().iter().copied().collect();
        let cost = |from: usize, to: usize| {
            model
                .edge(from, to)
                .and_then(|id| weights.get(&id))
                .copied()
                .unwrap_or(f64::INFINITY)
        };

        let mut best: Option<(f64, Vec<usize>)> = None;
        let mut prefix = vec![0];
        let mut remaining: Vec<usize> = (1..n).collect();
        permute(&mut prefix, &mut remaining, &mut |order| {
            let total: f64 = order
                .iter()
                .zip(order.iter().cycle().skip(1))
                .map(|(&from, &to)| cost(from, to))
                .sum();
            if best.as_ref().is_none_or(|(current, _)| total < *current) {
                best = Some((total, order.to_vec()));
            }
        });
        let Some((objective, order)) = best else {
            return Ok(RawSolution::failed(
                TerminationStatus::Infeasible,
                "no permutation found",
            ));
        };

        let mut values = vec![0.0; model.variables().len()];
        let successors = order.iter().cycle().skip(1);
        for (k, (&from, &to)) in order.iter().zip(successors).enumerate() {
            if let Some(slot) = model.edge(from, to).and_then(|id| values.get_mut(id.index())) {
                *slot = 1.0;
            }
            if let Some(slot) = model.rank(from).and_then(|id| values.get_mut(id.index())) {
                *slot = (k + 1) as f64;
            }
        }
        Ok(RawSolution::new(TerminationStatus::Optimal, values).with_objective(objective))
    }
}

fn permute<F: FnMut(&[usize])>(prefix: &mut Vec<usize>, remaining: &mut Vec<usize>, visit: &mut F) {
    if remaining.is_empty() {
        visit(prefix);
        return;
    }
    for k in 0..remaining.len() {
        let node = remaining.remove(k);
        prefix.push(node);
        permute(prefix, remaining, visit);
        prefix.pop();
        remaining.insert(k, node);
    }
}

/// Oracle that replays a fixed outcome regardless of the model.
#[derive(Debug, Clone)]
pub struct ScriptedOracle {
    outcome: Result<RawSolution, SolveError>,
}

impl ScriptedOracle {
    /// Always return `solution`.
    #[must_use]
    pub const fn returning(solution: RawSolution) -> Self {
        Self {
            outcome: Ok(solution),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: SolveError) -> Self {
        Self { outcome: Err(error) }
    }
}

impl SolverOracle for ScriptedOracle {
    fn solve(&self, _: &MilpModel, _: &SolverSettings) -> Result<RawSolution, SolveError> {
        self.outcome.clone()
    }
}
