//! In-process MILP oracle for the tour planner.
//!
//! [`MicrolpOracle`] translates a [`MilpModel`](salesman_core::MilpModel)
//! into `good_lp` variables and constraints and solves it with the pure-Rust
//! `microlp` branch-and-bound solver. No external executable is needed, which
//! makes this the default backend.
//!
//! `microlp` offers no way to interrupt a running solve. A configured timeout
//! is therefore checked once the solver returns; an overrun is reported as
//! [`TerminationStatus::Timeout`](salesman_core::TerminationStatus::Timeout)
//! with the objective found as best-known bound.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod oracle;
mod translate;

pub use oracle::{MicrolpOracle, SOLVER_NAME};
