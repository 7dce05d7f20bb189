//! Decode raw solver output into a validated tour.
//!
//! Decoding trusts nothing: the order variables must form a permutation of
//! `1..=n`, consecutive stops must be joined by selected edges and the tour
//! length must match the objective. Any disagreement is a
//! [`MalformedSolutionError`] rather than a best-effort tour.

use crate::{
    DistanceMatrix, InvalidInputError, MalformedSolutionError, MilpModel, Point, RawSolution,
    SolveError, TerminationStatus, Tour,
};

/// Distance from the nearest integer tolerated on an order value.
pub const RANK_TOLERANCE: f64 = 1e-4;

/// Largest accepted gap between tour length and objective, in kilometres.
pub const OBJECTIVE_TOLERANCE_KM: f64 = 1e-3;

/// Edge indicators at or above this value count as selected.
const EDGE_SELECTED: f64 = 0.5;

/// Turn order values into visiting order.
///
/// `ranks[i]` is the value of `u[i]`. The result lists node indices by rank,
/// so `order[k] == i` exactly when `u[i]` rounds to `k + 1`.
///
/// # Examples
/// ```
/// use salesman_core::extract_order_index;
///
/// let order = extract_order_index(&[1.0, 3.0, 2.00001])?;
/// assert_eq!(order, vec![0, 2, 1]);
/// # Ok::<(), salesman_core::MalformedSolutionError>(())
/// ```
pub fn extract_order_index(ranks: &[f64]) -> Result<Vec<usize>, MalformedSolutionError> {
    let n = ranks.len();
    let mut slots: Vec<Option<usize>> = vec![None; n];
    for (node, &value) in ranks.iter().enumerate() {
        if !value.is_finite() {
            return Err(MalformedSolutionError::NonFiniteRank { node });
        }
        let rounded = value.round();
        if (value - rounded).abs() > RANK_TOLERANCE {
            return Err(MalformedSolutionError::NonIntegralRank { node, value });
        }
        if !(1.0..=n as f64).contains(&rounded) {
            return Err(MalformedSolutionError::RankOutOfRange {
                node,
                rank: rounded as i64,
                n,
            });
        }
        let rank = rounded as usize;
        match slots.get_mut(rank - 1) {
            Some(Some(first)) => {
                return Err(MalformedSolutionError::DuplicateRank {
                    rank,
                    first: *first,
                    second: node,
                });
            }
            Some(slot) => *slot = Some(node),
            None => {
                return Err(MalformedSolutionError::RankOutOfRange {
                    node,
                    rank: rounded as i64,
                    n,
                });
            }
        }
    }
    slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(MalformedSolutionError::InvalidOrder { expected: n, found: n })
}

/// Build the closed tour visiting `points` in `order`.
///
/// `order` must be a permutation of `0..points.len()` and `matrix` must have
/// one row per point, in the same order.
pub fn build_tour(
    order: &[usize],
    points: &[Point],
    matrix: &DistanceMatrix,
) -> Result<Tour, SolveError> {
    let n = points.len();
    if matrix.len() != n {
        return Err(InvalidInputError::LabelCountMismatch {
            labels: matrix.len(),
            rows: n,
        }
        .into());
    }
    let invalid = MalformedSolutionError::InvalidOrder {
        expected: n,
        found: order.len(),
    };
    if n == 0 || order.len() != n {
        return Err(invalid.into());
    }
    let mut seen = vec![false; n];
    for &index in order {
        match seen.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return Err(invalid.into()),
        }
    }

    let mut stops = Vec::with_capacity(n + 1);
    let mut legs = Vec::with_capacity(n);
    for (&from, &to) in order.iter().zip(order.iter().cycle().skip(1)) {
        stops.push(points[from].clone());
        legs.push(matrix.get(from, to).ok_or_else(|| invalid.clone())?);
    }
    stops.push(points[order[0]].clone());
    Ok(Tour::from_parts(order.to_vec(), stops, legs))
}

/// Decode `solution` into a tour over `points`.
///
/// Statuses without an assignment map onto their [`SolveError`] variants.
/// A claimed success is decoded and cross-checked against the selected edges
/// and the objective before a tour is returned.
pub fn extract_tour(
    model: &MilpModel,
    solution: &RawSolution,
    points: &[Point],
    matrix: &DistanceMatrix,
) -> Result<Tour, SolveError> {
    match solution.status() {
        TerminationStatus::Optimal | TerminationStatus::Feasible => {}
        TerminationStatus::Infeasible => return Err(SolveError::Infeasible),
        TerminationStatus::Timeout => {
            return Err(SolveError::Timeout {
                best_bound: solution.best_bound().or(solution.objective()),
            });
        }
        TerminationStatus::SolverError => {
            return Err(SolveError::SolverFailed(
                solution
                    .message()
                    .unwrap_or("solver reported an error")
                    .to_owned(),
            ));
        }
    }

    let values = solution.values();
    if values.len() != model.variables().len() {
        return Err(MalformedSolutionError::WrongValueCount {
            expected: model.variables().len(),
            found: values.len(),
        }
        .into());
    }

    let ranks: Vec<f64> = model
        .ranks()
        .iter()
        .map(|id| values.get(id.index()).copied().unwrap_or(f64::NAN))
        .collect();
    let order = extract_order_index(&ranks)?;
    check_edges(model, values, &order)?;

    let tour = build_tour(&order, points, matrix)?;
    let evaluated = model.objective_value(values);
    let objective = solution.objective().unwrap_or(evaluated);
    if (evaluated - objective).abs() > OBJECTIVE_TOLERANCE_KM {
        log::warn!(
            "solver objective {objective:.6} differs from evaluated assignment {evaluated:.6}"
        );
    }
    if (tour.total_km() - objective).abs() > OBJECTIVE_TOLERANCE_KM {
        return Err(MalformedSolutionError::ObjectiveMismatch {
            tour_km: tour.total_km(),
            objective_km: objective,
        }
        .into());
    }
    Ok(tour)
}

fn check_edges(
    model: &MilpModel,
    values: &[f64],
    order: &[usize],
) -> Result<(), MalformedSolutionError> {
    for (&from, &to) in order.iter().zip(order.iter().cycle().skip(1)) {
        let selected = model
            .edge(from, to)
            .and_then(|id| values.get(id.index()))
            .is_some_and(|&value| value >= EDGE_SELECTED);
        if !selected {
            return Err(MalformedSolutionError::MissingEdge { from, to });
        }
    }
    Ok(())
}
