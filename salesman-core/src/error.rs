//! Error taxonomy shared by every stage of the tour pipeline.
//!
//! Each failure is terminal for a single solve request. Nothing in this crate
//! retries; callers decide whether to try again with different settings.

use thiserror::Error;

/// Degenerate or malformed points and distance matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// Fewer points than the operation needs.
    #[error("at least {required} points are required, found {found}")]
    TooFewPoints {
        /// Minimum number of points accepted.
        required: usize,
        /// Number of points supplied.
        found: usize,
    },
    /// A latitude outside `[-90, 90]` or not finite.
    #[error("point {name:?} has latitude {latitude} outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Name of the offending point.
        name: String,
        /// Rejected latitude in degrees.
        latitude: f64,
    },
    /// A longitude outside `[-180, 180]` or not finite.
    #[error("point {name:?} has longitude {longitude} outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Name of the offending point.
        name: String,
        /// Rejected longitude in degrees.
        longitude: f64,
    },
    /// The number of row labels differs from the number of rows.
    #[error("distance matrix has {labels} labels but {rows} rows")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of rows supplied.
        rows: usize,
    },
    /// A row does not have one entry per label.
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Index of the short or long row.
        row: usize,
        /// Entries found in that row.
        len: usize,
        /// Entries required.
        expected: usize,
    },
    /// An entry is NaN or infinite.
    #[error("distance matrix entry ({row}, {col}) is not finite")]
    NonFiniteDistance {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// An entry is below zero.
    #[error("distance matrix entry ({row}, {col}) is negative: {value}")]
    NegativeDistance {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending value.
        value: f64,
    },
    /// A diagonal entry is not zero.
    #[error("distance matrix diagonal entry {index} is {value}, expected 0")]
    NonZeroDiagonal {
        /// Diagonal index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// `matrix[row][col]` and `matrix[col][row]` disagree.
    #[error("distance matrix is asymmetric at ({row}, {col}): {forward} vs {backward}")]
    Asymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Value at `(row, col)`.
        forward: f64,
        /// Value at `(col, row)`.
        backward: f64,
    },
    /// Matrix labels do not line up with the point list.
    #[error("distance matrix row {index} is labelled {found:?}, expected {expected:?}")]
    LabelMismatch {
        /// Row index.
        index: usize,
        /// Point name at that index.
        expected: String,
        /// Matrix label at that index.
        found: String,
    },
}

/// Solver output that claims success but does not decode into a tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedSolutionError {
    /// The solution does not carry one value per model variable.
    #[error("solution has {found} values, model has {expected} variables")]
    WrongValueCount {
        /// Number of model variables.
        expected: usize,
        /// Number of values returned.
        found: usize,
    },
    /// An order value is NaN or infinite.
    #[error("order value of node {node} is not finite")]
    NonFiniteRank {
        /// Node whose order value is broken.
        node: usize,
    },
    /// An order value is not close enough to an integer.
    #[error("order value of node {node} is not integral: {value}")]
    NonIntegralRank {
        /// Node whose order value is fractional.
        node: usize,
        /// Raw value returned by the solver.
        value: f64,
    },
    /// A rounded order value falls outside `1..=n`.
    #[error("node {node} has rank {rank}, expected a rank in 1..={n}")]
    RankOutOfRange {
        /// Node carrying the rank.
        node: usize,
        /// Rounded rank.
        rank: i64,
        /// Number of nodes.
        n: usize,
    },
    /// Two nodes share a rank.
    #[error("rank {rank} is shared by nodes {first} and {second}")]
    DuplicateRank {
        /// The shared rank.
        rank: usize,
        /// First node holding the rank.
        first: usize,
        /// Second node holding the rank.
        second: usize,
    },
    /// The decoded order uses an edge the solver did not select.
    #[error("decoded order travels {from} -> {to} but that edge is not selected")]
    MissingEdge {
        /// Tail of the edge.
        from: usize,
        /// Head of the edge.
        to: usize,
    },
    /// The decoded order is not a permutation of the point list.
    #[error("order has {found} entries, expected a permutation of {expected} nodes")]
    InvalidOrder {
        /// Number of nodes.
        expected: usize,
        /// Entries in the order.
        found: usize,
    },
    /// Tour length and model objective disagree.
    #[error("tour length {tour_km} km differs from objective {objective_km} km")]
    ObjectiveMismatch {
        /// Sum of leg distances.
        tour_km: f64,
        /// Objective evaluated on the solver's assignment.
        objective_km: f64,
    },
}

/// Errors returned while planning a tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Points or distance matrix were rejected.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The oracle could not be started.
    #[error("solver {solver:?} is unavailable: {reason}")]
    SolverUnavailable {
        /// Configured solver name.
        solver: String,
        /// Why the solver could not run.
        reason: String,
    },
    /// The oracle proved the model infeasible.
    #[error("solver reported the model infeasible")]
    Infeasible,
    /// The oracle ran out of time.
    #[error("solver timed out{}", bound_suffix(.best_bound))]
    Timeout {
        /// Best objective known when time ran out, if the solver reports one.
        best_bound: Option<f64>,
    },
    /// The oracle reported an internal failure.
    #[error("solver failed: {0}")]
    SolverFailed(String),
    /// The oracle reported success but its assignment is unusable.
    #[error("malformed solution: {0}")]
    MalformedSolution(#[from] MalformedSolutionError),
}

fn bound_suffix(best_bound: &Option<f64>) -> String {
    best_bound.map_or_else(String::new, |bound| {
        format!(" (best known objective {bound:.3} km)")
    })
}
