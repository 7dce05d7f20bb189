//! Behaviour-driven step definitions driving the matrix CLI scenarios.

use super::helpers::Workspace;
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use salesman_core::test_support::square_points;
use std::cell::RefCell;

use crate::matrix::run_matrix;

#[derive(Debug)]
struct MatrixWorld {
    workspace: Workspace,
    points_path: Utf8PathBuf,
    out_path: Utf8PathBuf,
    result: RefCell<Option<Result<Utf8PathBuf, CliError>>>,
}

#[fixture]
fn world() -> MatrixWorld {
    let workspace = Workspace::new();
    let points_path = workspace.path("points.csv");
    let out_path = workspace.path("tables/distances.csv");
    MatrixWorld {
        workspace,
        points_path,
        out_path,
        result: RefCell::new(None),
    }
}

#[given("a points file listing the corners of a small square")]
fn square_points_file(#[from(world)] world: &MatrixWorld) {
    world.workspace.square_points_csv("points.csv");
}

#[given("the points file is absent")]
fn points_file_absent(#[from(world)] world: &MatrixWorld) {
    assert!(!world.points_path.exists());
}

#[when("I run the matrix command")]
fn run_matrix_command(#[from(world)] world: &MatrixWorld) {
    let argv = [
        "salesman".to_owned(),
        "matrix".to_owned(),
        format!("--{ARG_POINTS_CSV}"),
        world.points_path.as_str().to_owned(),
        format!("--{ARG_MATRIX_OUT}"),
        world.out_path.as_str().to_owned(),
    ];
    let outcome = Cli::try_parse_from(argv)
        .map_err(CliError::from)
        .and_then(|cli| match cli.command {
            Command::Matrix(args) => run_matrix(args),
            Command::Solve(_) => panic!("expected matrix command"),
        });
    world.result.replace(Some(outcome));
}

#[then("the distance matrix file lists every point")]
fn matrix_lists_points(#[from(world)] world: &MatrixWorld) {
    let borrowed = world.result.borrow();
    let written = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");
    assert_eq!(*written, world.out_path);

    let matrix = salesman_data::read_matrix(written).expect("matrix reads back");
    let names: Vec<String> = square_points()
        .iter()
        .map(|point| point.name().to_owned())
        .collect();
    assert_eq!(matrix.labels(), names.as_slice());
}

#[then("the command fails because the points file is missing")]
fn command_fails_missing_file(#[from(world)] world: &MatrixWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(*field, ARG_POINTS_CSV);
            assert_eq!(*path, world.points_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
    assert!(!world.out_path.exists());
}

#[scenario(path = "tests/features/matrix_command.feature", index = 0)]
fn matrix_writes_table(#[from(world)] world: MatrixWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matrix_command.feature", index = 1)]
fn matrix_missing_points(#[from(world)] world: MatrixWorld) {
    let _ = world;
}
