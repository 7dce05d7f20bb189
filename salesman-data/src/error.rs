use camino::Utf8PathBuf;
use salesman_core::InvalidInputError;
use thiserror::Error;

/// Failures while reading or writing planner data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or created.
    #[error("failed to open {path}")]
    Open {
        /// File that was accessed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The CSV layer rejected the content.
    #[error("failed to process CSV in {path}")]
    Csv {
        /// File being read or written.
        path: Utf8PathBuf,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// A required column is absent from the header row.
    #[error("{path} has no {column:?} column")]
    MissingColumn {
        /// File being read.
        path: Utf8PathBuf,
        /// Missing column name.
        column: &'static str,
    },
    /// A cell could not be interpreted.
    #[error("{path} line {line}, column {column:?}: {reason}")]
    BadCell {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Column the cell belongs to.
        column: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The loaded values violate a planning invariant.
    #[error("invalid data in {path}")]
    Invalid {
        /// File being read.
        path: Utf8PathBuf,
        /// Rejection raised by the core constructors.
        #[source]
        source: InvalidInputError,
    },
    /// JSON encoding failed.
    #[error("failed to write JSON to {path}")]
    Json {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying serialisation failure.
        #[source]
        source: serde_json::Error,
    },
}
