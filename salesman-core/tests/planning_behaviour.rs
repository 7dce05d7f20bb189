#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural coverage for the planning pipeline using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use salesman_core::test_support::{EnumeratingOracle, ScriptedOracle, square_points, square_tour};
use salesman_core::{
    InvalidInputError, PlannedTour, RawSolution, SolveError, SolverOracle, SolverSettings,
    TerminationStatus, TourPlanner,
};

/// World state shared by planning scenarios.
#[derive(Debug, Default)]
struct PlanningWorld {
    points: RefCell<Vec<salesman_core::Point>>,
    scripted: RefCell<Option<ScriptedOracle>>,
    result: RefCell<Option<Result<PlannedTour, SolveError>>>,
}

impl PlanningWorld {
    fn result(&self) -> Result<PlannedTour, SolveError> {
        self.result
            .borrow()
            .clone()
            .expect("a plan should have been attempted")
    }
}

#[fixture]
fn world() -> PlanningWorld {
    PlanningWorld::default()
}

#[given("the four corners of a small square")]
fn given_square(world: &PlanningWorld) {
    *world.points.borrow_mut() = square_points();
}

#[given("a single point")]
fn given_single_point(world: &PlanningWorld) {
    *world.points.borrow_mut() = square_points().into_iter().take(1).collect();
}

#[given("a solver that reports infeasibility")]
fn given_infeasible_solver(world: &PlanningWorld) {
    *world.scripted.borrow_mut() = Some(ScriptedOracle::returning(RawSolution::new(
        TerminationStatus::Infeasible,
        Vec::new(),
    )));
}

#[given("a solver that times out with best bound {bound}")]
fn given_timeout_solver(world: &PlanningWorld, bound: f64) {
    *world.scripted.borrow_mut() = Some(ScriptedOracle::returning(
        RawSolution::new(TerminationStatus::Timeout, Vec::new()).with_best_bound(bound),
    ));
}

#[when("I plan a tour")]
fn when_plan(world: &PlanningWorld) {
    let oracle: Box<dyn SolverOracle> = match world.scripted.borrow().clone() {
        Some(scripted) => Box::new(scripted),
        None => Box::new(EnumeratingOracle),
    };
    let planner = TourPlanner::new(oracle, SolverSettings::new("test"));
    let result = planner.plan(&world.points.borrow());
    *world.result.borrow_mut() = Some(result);
}

#[then("the tour follows the perimeter")]
fn then_perimeter(world: &PlanningWorld) {
    let planned = world.result().expect("planning succeeds");
    let names = planned.tour.stop_names();
    assert!(
        names == ["SW", "NW", "NE", "SE", "SW"] || names == ["SW", "SE", "NE", "NW", "SW"],
        "tour crosses a diagonal: {names:?}"
    );
}

#[then("the tour length equals the perimeter")]
fn then_length(world: &PlanningWorld) {
    let planned = world.result().expect("planning succeeds");
    let perimeter = square_tour().total_km();
    assert!((planned.tour.total_km() - perimeter).abs() < 1e-3);
}

#[then("an invalid input error is returned")]
fn then_invalid_input(world: &PlanningWorld) {
    let err = world.result().expect_err("planning fails");
    assert!(matches!(
        err,
        SolveError::InvalidInput(InvalidInputError::TooFewPoints { .. })
    ));
}

#[then("an infeasible error is returned")]
fn then_infeasible(world: &PlanningWorld) {
    assert_eq!(world.result().expect_err("planning fails"), SolveError::Infeasible);
}

#[then("a timeout error with bound {bound} is returned")]
fn then_timeout(world: &PlanningWorld, bound: f64) {
    assert_eq!(
        world.result().expect_err("planning fails"),
        SolveError::Timeout {
            best_bound: Some(bound)
        }
    );
}

#[scenario(path = "tests/features/planning.feature", index = 0)]
fn square_perimeter(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning.feature", index = 1)]
fn single_point_rejected(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning.feature", index = 2)]
fn infeasible_model(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning.feature", index = 3)]
fn timeout_without_tour(world: PlanningWorld) {
    let _ = world;
}
