//! Raw oracle output, before any decoding.

use std::fmt;

/// Outcome classification reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TerminationStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible but not proven optimal.
    #[cfg_attr(feature = "serde", serde(rename = "feasible-nonoptimal"))]
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// Stopped by the time limit.
    Timeout,
    /// Solver failure of any other kind.
    SolverError,
}

impl TerminationStatus {
    /// Whether the values carry an assignment worth decoding.
    #[must_use]
    pub const fn has_assignment(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Optimal => "optimal",
            Self::Feasible => "feasible-nonoptimal",
            Self::Infeasible => "infeasible",
            Self::Timeout => "timeout",
            Self::SolverError => "solver-error",
        };
        f.write_str(label)
    }
}

/// One value per model variable plus whatever the solver said about them.
///
/// `values[k]` belongs to the variable with [`crate::VarId::index`] `k`.
///
/// # Examples
/// ```
/// use salesman_core::{RawSolution, TerminationStatus};
///
/// let raw = RawSolution::new(TerminationStatus::Optimal, vec![1.0, 0.0])
///     .with_objective(42.0);
/// assert_eq!(raw.objective(), Some(42.0));
/// assert!(raw.status().has_assignment());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    status: TerminationStatus,
    values: Vec<f64>,
    objective: Option<f64>,
    best_bound: Option<f64>,
    message: Option<String>,
}

impl RawSolution {
    /// A solution with `values` and no objective information.
    #[must_use]
    pub const fn new(status: TerminationStatus, values: Vec<f64>) -> Self {
        Self {
            status,
            values,
            objective: None,
            best_bound: None,
            message: None,
        }
    }

    /// A solution without values, explained by `message`.
    #[must_use]
    pub fn failed(status: TerminationStatus, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(status, Vec::new())
        }
    }

    /// Attach the objective value reported by the solver.
    #[must_use]
    pub const fn with_objective(mut self, objective: f64) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Attach the best objective known when the solver stopped.
    #[must_use]
    pub const fn with_best_bound(mut self, bound: f64) -> Self {
        self.best_bound = Some(bound);
        self
    }

    /// Attach a free-form solver message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Reported status.
    #[must_use]
    pub const fn status(&self) -> TerminationStatus {
        self.status
    }

    /// Variable values in model order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Objective reported by the solver, if any.
    #[must_use]
    pub const fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// Best known objective, if any.
    #[must_use]
    pub const fn best_bound(&self) -> Option<f64> {
        self.best_bound
    }

    /// Solver message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
