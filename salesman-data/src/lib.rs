//! Persistence for the tour planner.
//!
//! Responsibilities:
//! - Read and write points and distance matrices as CSV.
//! - Write render requests as JSON for an external map tool.
//! - Open files through `cap-std` with UTF-8 paths.
//!
//! Boundaries:
//! - Do not encode planning rules (those live in `salesman-core`); every
//!   loaded value is revalidated by the core constructors.

#![forbid(unsafe_code)]

mod error;
pub mod fs;
mod matrix;
mod points;
mod render;

pub use error::DataError;
pub use matrix::{read_matrix, read_matrix_from, write_matrix, write_matrix_to};
pub use points::{read_points, read_points_from, write_points, write_points_to};
pub use render::{JsonRenderer, MapDocument};
