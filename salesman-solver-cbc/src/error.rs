use std::path::PathBuf;

use thiserror::Error;

/// Failures while driving the CBC executable.
#[derive(Debug, Error)]
pub enum CbcError {
    /// The executable could not be spawned.
    #[error("failed to start {path:?}: {source}")]
    Spawn {
        /// Executable that was run.
        path: PathBuf,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },
    /// The scratch directory or model file could not be written.
    #[error("failed to prepare solver input: {0}")]
    Prepare(#[source] std::io::Error),
    /// CBC exited with a failure status.
    #[error("cbc exited with {status}.\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    ProcessFailed {
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The solution file could not be read.
    #[error("failed to read solution file: {0}")]
    ReadSolution(#[source] std::io::Error),
    /// The solution file has no status line.
    #[error("solution file is empty")]
    EmptySolution,
    /// A variable row could not be parsed.
    #[error("malformed solution row {line}: {content:?}")]
    MalformedRow {
        /// One-based line number.
        line: usize,
        /// Raw row text.
        content: String,
    },
}
