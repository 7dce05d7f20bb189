//! Shared test harness modules for the `salesman` CLI.
#![expect(
    clippy::expect_used,
    reason = "tests fail fast on fixture setup errors"
)]

use super::*;

mod helpers;
mod matrix_steps;
