#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural coverage for CSV persistence and JSON rendering.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use salesman_core::test_support::{square_points, square_tour};
use salesman_core::{DistanceMatrix, PathRenderer, Point, RenderRequest};
use salesman_data::{DataError, JsonRenderer, read_matrix, read_points, write_matrix, write_points};
use tempfile::TempDir;

#[derive(Debug)]
struct DataWorld {
    dir: TempDir,
    points_path: RefCell<Option<Utf8PathBuf>>,
    loaded: RefCell<Option<Result<Vec<Point>, DataError>>>,
    matrix: RefCell<Option<DistanceMatrix>>,
    rendered: RefCell<Option<serde_json::Value>>,
}

impl DataWorld {
    fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    fn points(&self) -> Vec<Point> {
        self.loaded
            .borrow()
            .as_ref()
            .expect("points should have been loaded")
            .as_ref()
            .expect("points load cleanly")
            .clone()
    }
}

#[fixture]
fn world() -> DataWorld {
    DataWorld {
        dir: tempfile::tempdir().expect("tempdir"),
        points_path: RefCell::new(None),
        loaded: RefCell::new(None),
        matrix: RefCell::new(None),
        rendered: RefCell::new(None),
    }
}

#[given("a points file with the corners of a small square")]
fn given_square_file(world: &DataWorld) {
    let path = world.root().join("input/points.csv");
    write_points(&path, &square_points()).expect("points written");
    *world.points_path.borrow_mut() = Some(path);
}

#[given("a points file containing a point at latitude {latitude}")]
fn given_bad_latitude(world: &DataWorld, latitude: f64) {
    let path = world.root().join("points.csv");
    std::fs::write(&path, format!("name,lat,lon\nNowhere,{latitude},10.0\n")).expect("write");
    *world.points_path.borrow_mut() = Some(path);
}

#[when("the points file is loaded")]
fn when_loaded(world: &DataWorld) {
    let path = world.points_path.borrow().clone().expect("points path");
    *world.loaded.borrow_mut() = Some(read_points(&path));
}

#[when("its distance matrix is written and read back")]
fn when_matrix_round_trip(world: &DataWorld) {
    let matrix = DistanceMatrix::build(&world.points()).expect("matrix");
    let path = world.root().join("output/distances.csv");
    write_matrix(&path, &matrix).expect("matrix written");
    *world.matrix.borrow_mut() = Some(read_matrix(&path).expect("matrix read"));
}

#[when("the perimeter tour is rendered to JSON")]
fn when_rendered(world: &DataWorld) {
    assert_eq!(world.points(), square_points());
    let renderer = JsonRenderer::new(world.root().join("tsp_map.json"));
    let written = renderer
        .render(&RenderRequest::from_tour(&square_tour()))
        .expect("rendered");
    let text = std::fs::read_to_string(written).expect("read JSON");
    *world.rendered.borrow_mut() = Some(serde_json::from_str(&text).expect("valid JSON"));
}

#[then("the matrix has {rows} rows")]
fn then_matrix_rows(world: &DataWorld, rows: usize) {
    let matrix = world.matrix.borrow();
    assert_eq!(matrix.as_ref().expect("matrix").len(), rows);
}

#[then("the matrix matches the one computed from the points")]
fn then_matrix_matches(world: &DataWorld) {
    let expected = DistanceMatrix::build(&square_points()).expect("matrix");
    assert_eq!(world.matrix.borrow().as_ref(), Some(&expected));
}

#[then("the JSON lists {markers} markers and {segments} segments")]
fn then_json_shape(world: &DataWorld, markers: usize, segments: usize) {
    let rendered = world.rendered.borrow();
    let value = rendered.as_ref().expect("rendered JSON");
    assert_eq!(value["markers"].as_array().map(Vec::len), Some(markers));
    assert_eq!(value["segments"].as_array().map(Vec::len), Some(segments));
}

#[then("loading fails with invalid data")]
fn then_invalid(world: &DataWorld) {
    let loaded = world.loaded.borrow();
    let result = loaded.as_ref().expect("load attempted");
    assert!(
        matches!(result, Err(DataError::Invalid { .. })),
        "unexpected outcome {result:?}"
    );
}

#[scenario(path = "tests/features/data_files.feature", index = 0)]
fn matrix_round_trip(world: DataWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/data_files.feature", index = 1)]
fn tour_rendered_as_json(world: DataWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/data_files.feature", index = 2)]
fn latitude_out_of_range(world: DataWorld) {
    let _ = world;
}
