//! Matrix command: precompute the distance table for a points file.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use salesman_core::{DistanceMatrix, SolveError};
use salesman_data::{read_points, write_matrix};
use serde::{Deserialize, Serialize};

use crate::{ARG_MATRIX_OUT, ARG_POINTS_CSV, CliError, ENV_MATRIX_POINTS_CSV, require_existing};

/// Distance table written when the configuration names none.
pub(crate) const DEFAULT_MATRIX_OUT: &str = "distances.csv";

/// CLI arguments for the `matrix` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute haversine distances between every pair of points \
                 and write them as a labelled CSV table that `solve` can \
                 reuse through --distances-csv.",
    about = "Write the distance matrix for a points file"
)]
#[ortho_config(prefix = "SALESMAN")]
pub(crate) struct MatrixArgs {
    /// Points CSV with `name`, `lat` and `lon` columns.
    #[arg(long = ARG_POINTS_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) points_csv: Option<Utf8PathBuf>,
    /// Destination CSV (default `distances.csv`).
    #[arg(long = ARG_MATRIX_OUT, value_name = "path")]
    #[serde(default)]
    pub(crate) out: Option<Utf8PathBuf>,
}

impl MatrixArgs {
    pub(crate) fn into_config(self) -> Result<MatrixConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MatrixConfig::try_from(merged)
    }
}

/// Resolved `matrix` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatrixConfig {
    pub(crate) points_csv: Utf8PathBuf,
    pub(crate) out: Utf8PathBuf,
}

impl TryFrom<MatrixArgs> for MatrixConfig {
    type Error = CliError;

    fn try_from(args: MatrixArgs) -> Result<Self, Self::Error> {
        let points_csv = args.points_csv.ok_or(CliError::MissingArgument {
            field: ARG_POINTS_CSV,
            env: ENV_MATRIX_POINTS_CSV,
        })?;
        Ok(Self {
            points_csv,
            out: args
                .out
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MATRIX_OUT)),
        })
    }
}

pub(crate) fn run_matrix(args: MatrixArgs) -> Result<Utf8PathBuf, CliError> {
    let config = args.into_config()?;
    write_distances(&config)
}

/// Compute and persist the matrix for an already resolved configuration.
pub(crate) fn write_distances(config: &MatrixConfig) -> Result<Utf8PathBuf, CliError> {
    require_existing(&config.points_csv, ARG_POINTS_CSV)?;
    let points = read_points(&config.points_csv)?;
    let matrix = DistanceMatrix::build(&points).map_err(SolveError::from)?;
    write_matrix(&config.out, &matrix)?;
    log::info!(
        "wrote {0}x{0} distance matrix to {1}",
        matrix.len(),
        config.out
    );
    Ok(config.out.clone())
}
