//! Facade crate for exact travelling-salesman planning.
//!
//! This crate re-exports the core planning types and exposes the solver
//! backends behind feature flags.

#![forbid(unsafe_code)]

pub use salesman_core::{
    Diagnostics, DistanceMatrix, InvalidInputError, MalformedSolutionError, MilpModel,
    PathRenderer, PlannedTour, Point, RawSolution, RenderRequest, SolveError, SolverOracle,
    SolverSettings, TerminationStatus, Tour, TourPlanner, build_model, extract_tour,
};

#[cfg(feature = "solver-microlp")]
pub use salesman_solver_microlp::MicrolpOracle;

#[cfg(feature = "solver-cbc")]
pub use salesman_solver_cbc::CbcOracle;
