//! Core types for exact travelling-salesman planning over geocoded points.
//!
//! The pipeline runs leaf-first: [`DistanceMatrix::build`] computes
//! haversine distances, [`build_model`] formulates the Miller–Tucker–Zemlin
//! MILP, a [`SolverOracle`] solves it, and [`extract_tour`] decodes and
//! verifies the result. [`TourPlanner`] strings the stages together.
//!
//! Solver backends live in their own crates; this crate has no solver
//! dependency.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod error;
mod extract;
mod formulation;
pub mod model;
mod oracle;
mod planner;
mod point;
mod render;
mod solution;
#[doc(hidden)]
pub mod test_support;
mod tour;

pub use distance::{DistanceMatrix, EARTH_RADIUS_KM, build_matrix, distance, haversine_km};
pub use error::{InvalidInputError, MalformedSolutionError, SolveError};
pub use extract::{
    OBJECTIVE_TOLERANCE_KM, RANK_TOLERANCE, build_tour, extract_order_index, extract_tour,
};
pub use formulation::{MIN_NODES, build_model, edge_name, rank_name};
pub use model::{
    AssignmentViolation, Constraint, ConstraintFamily, LinearExpr, MilpModel, Relation, VarId,
    VarKind, Variable,
};
pub use oracle::{SolverOracle, SolverSettings};
pub use planner::{Diagnostics, PlannedTour, TourPlanner};
pub use point::Point;
pub use render::{BOUNDS_PADDING_DEG, Marker, PathRenderer, RenderRequest, Segment, padded_bounds};
pub use solution::{RawSolution, TerminationStatus};
pub use tour::{Tour, format_leg};
