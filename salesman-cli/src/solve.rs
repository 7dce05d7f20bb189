//! Solve command implementation for the `salesman` CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use salesman_core::{
    DistanceMatrix, PathRenderer, PlannedTour, Point, RenderRequest, SolveError, SolverSettings,
    TourPlanner,
};
use salesman_data::{JsonRenderer, read_matrix, read_points};
use serde::{Deserialize, Serialize};

use crate::backend::{DEFAULT_SOLVER, DefaultOracleBuilder, OracleBuilder, SolverBackend};
use crate::{
    ARG_DISTANCES_CSV, ARG_POINTS_CSV, ARG_RENDER_OUT, ARG_SOLVER, ARG_SOLVER_PATH,
    ARG_TIMEOUT_SECS, CliError, ENV_SOLVE_POINTS_CSV, require_existing,
};

/// Map document written when the configuration names none.
pub(crate) const DEFAULT_RENDER_OUT: &str = "tsp_map.json";

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the shortest closed tour over a points file. The \
                 distance matrix is read from a CSV file when given and \
                 computed with the haversine formula otherwise. Settings \
                 can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Solve the travelling salesman problem exactly"
)]
#[ortho_config(prefix = "SALESMAN")]
pub(crate) struct SolveArgs {
    /// Points CSV with `name`, `lat` and `lon` columns.
    #[arg(long = ARG_POINTS_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) points_csv: Option<Utf8PathBuf>,
    /// Precomputed distance matrix CSV whose labels follow the points.
    #[arg(long = ARG_DISTANCES_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) distances_csv: Option<Utf8PathBuf>,
    /// Solver backend: `microlp` (default) or `cbc`.
    #[arg(long = ARG_SOLVER, value_name = "name")]
    #[serde(default)]
    pub(crate) solver: Option<String>,
    /// Solver executable, for backends that run one.
    #[arg(long = ARG_SOLVER_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) solver_path: Option<Utf8PathBuf>,
    /// Time limit handed to the solver.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Where to write the map document (default `tsp_map.json`).
    #[arg(long = ARG_RENDER_OUT, value_name = "path")]
    #[serde(default)]
    pub(crate) render_out: Option<Utf8PathBuf>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    pub(crate) points_csv: Utf8PathBuf,
    pub(crate) distances_csv: Option<Utf8PathBuf>,
    pub(crate) solver: SolverBackend,
    pub(crate) solver_path: Option<Utf8PathBuf>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) render_out: Utf8PathBuf,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.points_csv, ARG_POINTS_CSV)?;
        if let Some(distances) = &self.distances_csv {
            require_existing(distances, ARG_DISTANCES_CSV)?;
        }
        Ok(())
    }

    pub(crate) fn settings(&self) -> SolverSettings {
        let mut settings = SolverSettings::new(self.solver.name());
        if let Some(path) = &self.solver_path {
            settings = settings.with_path(path.as_std_path());
        }
        if let Some(limit) = self.timeout {
            settings = settings.with_timeout(limit);
        }
        settings
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let points_csv = args.points_csv.ok_or(CliError::MissingArgument {
            field: ARG_POINTS_CSV,
            env: ENV_SOLVE_POINTS_CSV,
        })?;
        let solver = SolverBackend::from_name(args.solver.as_deref().unwrap_or(DEFAULT_SOLVER))?;
        Ok(Self {
            points_csv,
            distances_csv: args.distances_csv,
            solver,
            solver_path: args.solver_path,
            timeout: args.timeout_secs.map(Duration::from_secs),
            render_out: args
                .render_out
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_RENDER_OUT)),
        })
    }
}

/// What `solve` prints on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SolveReport {
    pub(crate) solver: String,
    pub(crate) status: String,
    pub(crate) objective_km: Option<f64>,
    pub(crate) solve_time_secs: f64,
    pub(crate) total_km: f64,
    /// Stop names in visiting order, closing on the first.
    pub(crate) path: Vec<String>,
    /// One `"<km> K.M."` label per leg.
    pub(crate) legs: Vec<String>,
    pub(crate) map: Utf8PathBuf,
}

impl SolveReport {
    fn new(planned: &PlannedTour, map: Utf8PathBuf) -> Self {
        Self {
            solver: planned.diagnostics.solver.clone(),
            status: planned.diagnostics.status.to_string(),
            objective_km: planned.diagnostics.objective_km,
            solve_time_secs: planned.diagnostics.solve_time.as_secs_f64(),
            total_km: planned.tour.total_km(),
            path: planned
                .tour
                .stop_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            legs: planned.tour.leg_labels(),
            map,
        }
    }
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DefaultOracleBuilder, &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn OracleBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let report = execute_solve(&config, builder)?;
    write_report(writer, &report)
}

pub(crate) fn execute_solve(
    config: &SolveConfig,
    builder: &dyn OracleBuilder,
) -> Result<SolveReport, CliError> {
    let points = read_points(&config.points_csv)?;
    let matrix = load_matrix(config.distances_csv.as_deref(), &points)?;
    let oracle = builder.build(config)?;
    let planned = TourPlanner::new(oracle, config.settings()).plan_with_matrix(&points, &matrix)?;
    log::info!(
        "minimum travelling distance {:.2} km: {}",
        planned.tour.total_km(),
        planned.tour
    );

    let map = JsonRenderer::new(config.render_out.clone())
        .render(&RenderRequest::from_tour(&planned.tour))
        .map_err(|source| CliError::Render { source })?;
    Ok(SolveReport::new(&planned, map))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Read the matrix from `distances_csv` when given, else compute it.
fn load_matrix(
    distances_csv: Option<&Utf8Path>,
    points: &[Point],
) -> Result<DistanceMatrix, CliError> {
    distances_csv.map_or_else(
        || DistanceMatrix::build(points).map_err(|err| CliError::from(SolveError::from(err))),
        |path| read_matrix(path).map_err(CliError::from),
    )
}

fn write_report(writer: &mut dyn Write, report: &SolveReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
