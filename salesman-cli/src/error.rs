//! Error types emitted by the `salesman` CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use salesman_core::SolveError;
use salesman_data::DataError;
use thiserror::Error;

/// Errors emitted by the `salesman` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that provides the capability.
        feature: &'static str,
        /// What was attempted.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Configured path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Configured path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the input.
        field: &'static str,
        /// Configured path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading or writing CSV input failed.
    #[error(transparent)]
    Data(#[from] DataError),
    /// Planning the tour failed.
    #[error("planning failed: {source}")]
    Solve {
        /// Pipeline failure.
        #[source]
        source: SolveError,
    },
    /// Writing the map document failed.
    #[error("failed to render the tour: {source}")]
    Render {
        /// Underlying write failure.
        #[source]
        source: DataError,
    },
    /// Serialising the solve report failed.
    #[error("failed to serialise solve report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] log::SetLoggerError),
}

impl From<SolveError> for CliError {
    fn from(source: SolveError) -> Self {
        Self::Solve { source }
    }
}
