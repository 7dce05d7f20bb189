//! Reader for the files `cbc` writes with `solu`.
//!
//! The first line carries the status and objective, e.g.
//! `Optimal - objective value 12.00000000`. Every following line is a
//! variable row `index name value reduced_cost`, optionally prefixed with
//! `**` when the value violates a bound. Variables that are absent were
//! zero in the solution.

use std::collections::HashMap;

use salesman_core::{MilpModel, RawSolution, TerminationStatus};

use crate::CbcError;

/// Parse solution-file `text` for `model`.
///
/// # Errors
///
/// [`CbcError::EmptySolution`] when there is no status line, and
/// [`CbcError::MalformedRow`] when a variable row cannot be read.
///
/// # Examples
/// ```
/// use salesman_core::{DistanceMatrix, TerminationStatus, build_model};
/// use salesman_solver_cbc::parse_solution;
///
/// let matrix = DistanceMatrix::from_rows(
///     vec!["A".into(), "B".into()],
///     vec![vec![0.0, 5.0], vec![5.0, 0.0]],
/// )?;
/// let model = build_model(&matrix)?;
/// let text = "Optimal - objective value 10.00000000\n\
///             0 x_0_1 1 5\n\
///             1 x_1_0 1 5\n\
///             2 u_0 1 0\n\
///             3 u_1 2 0\n";
/// let raw = parse_solution(text, &model)?;
/// assert_eq!(raw.status(), TerminationStatus::Optimal);
/// assert_eq!(raw.objective(), Some(10.0));
/// assert_eq!(raw.values(), &[1.0, 1.0, 1.0, 2.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_solution(text: &str, model: &MilpModel) -> Result<RawSolution, CbcError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Err(CbcError::EmptySolution);
    };
    let header = header.trim();
    let status = status_of(header);
    if !status.has_assignment() && status != TerminationStatus::Timeout {
        return Ok(RawSolution::failed(status, header));
    }

    let index: HashMap<&str, usize> = model
        .variables()
        .iter()
        .enumerate()
        .map(|(k, var)| (var.name.as_str(), k))
        .collect();
    let mut values = vec![0.0; model.variables().len()];
    for (number, line) in lines {
        let (name, value) = parse_row(line).ok_or_else(|| CbcError::MalformedRow {
            line: number + 1,
            content: line.to_owned(),
        })?;
        let Some(slot) = index.get(name).and_then(|&k| values.get_mut(k)) else {
            log::warn!("ignoring unknown variable {name} in cbc solution");
            continue;
        };
        *slot = value;
    }

    let raw = RawSolution::new(status, values);
    Ok(match (status, objective_of(header)) {
        (TerminationStatus::Timeout, Some(bound)) => {
            raw.with_best_bound(bound).with_message(header)
        }
        (TerminationStatus::Timeout, None) => raw.with_message(header),
        (_, Some(objective)) => raw.with_objective(objective),
        (_, None) => raw,
    })
}

fn status_of(header: &str) -> TerminationStatus {
    if header.starts_with("Optimal") {
        TerminationStatus::Optimal
    } else if header.starts_with("Stopped on") {
        TerminationStatus::Timeout
    } else if header.starts_with("Infeasible") || header.starts_with("Integer infeasible") {
        TerminationStatus::Infeasible
    } else {
        TerminationStatus::SolverError
    }
}

fn objective_of(header: &str) -> Option<f64> {
    header
        .split_once("objective value")
        .and_then(|(_, rest)| rest.trim().parse().ok())
}

fn parse_row(line: &str) -> Option<(&str, f64)> {
    let mut fields = line.split_whitespace().skip_while(|field| *field == "**");
    let _index = fields.next()?;
    let name = fields.next()?;
    let value = fields.next()?.parse().ok()?;
    Some((name, value))
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "fixtures should fail fast during setup")]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use salesman_core::{DistanceMatrix, build_model};

    #[fixture]
    fn pair() -> MilpModel {
        let matrix = DistanceMatrix::from_rows(
            vec!["A".into(), "B".into()],
            vec![vec![0.0, 5.0], vec![5.0, 0.0]],
        )
        .expect("matrix");
        build_model(&matrix).expect("model")
    }

    #[rstest]
    #[case::optimal("Optimal - objective value 10.0", TerminationStatus::Optimal)]
    #[case::stopped_on_time("Stopped on time - objective value 10.0", TerminationStatus::Timeout)]
    #[case::stopped_on_iterations(
        "Stopped on iterations - objective value 10.0",
        TerminationStatus::Timeout
    )]
    #[case::infeasible("Infeasible - objective value 0.0", TerminationStatus::Infeasible)]
    #[case::integer_infeasible(
        "Integer infeasible - objective value 0.0",
        TerminationStatus::Infeasible
    )]
    #[case::unbounded("Unbounded - objective value 0.0", TerminationStatus::SolverError)]
    fn header_sets_status(pair: MilpModel, #[case] header: &str, #[case] expected: TerminationStatus) {
        let raw = parse_solution(&format!("{header}\n0 x_0_1 1 0\n"), &pair).expect("parsed");
        assert_eq!(raw.status(), expected);
    }

    #[rstest]
    fn stopped_runs_report_a_bound(pair: MilpModel) {
        let raw = parse_solution("Stopped on time - objective value 12.5\n", &pair).expect("parsed");
        assert_eq!(raw.best_bound(), Some(12.5));
        assert_eq!(raw.objective(), None);
    }

    #[rstest]
    fn flagged_and_missing_rows_are_handled(pair: MilpModel) {
        let text = "Optimal - objective value 10\n** 0 x_0_1 1 0\n3 u_1 2 0\n";
        let raw = parse_solution(text, &pair).expect("parsed");
        assert_eq!(raw.values(), &[1.0, 0.0, 0.0, 2.0]);
    }

    #[rstest]
    fn infeasible_runs_carry_no_values(pair: MilpModel) {
        let raw = parse_solution("Infeasible - objective value 0\n0 x_0_1 1 0\n", &pair)
            .expect("parsed");
        assert!(raw.values().is_empty());
        assert_eq!(raw.message(), Some("Infeasible - objective value 0"));
    }

    #[rstest]
    fn unknown_variables_are_ignored(pair: MilpModel) {
        let raw = parse_solution("Optimal - objective value 10\n7 y_9 1 0\n", &pair)
            .expect("parsed");
        assert_eq!(raw.values(), &[0.0; 4]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("\n  \n")]
    fn empty_files_are_rejected(pair: MilpModel, #[case] text: &str) {
        let err = parse_solution(text, &pair).expect_err("empty");
        assert!(matches!(err, CbcError::EmptySolution));
    }

    #[rstest]
    fn unreadable_rows_name_their_line(pair: MilpModel) {
        let err = parse_solution("Optimal - objective value 10\n0 x_0_1 one 0\n", &pair)
            .expect_err("bad value");
        assert!(matches!(err, CbcError::MalformedRow { line: 2, .. }));
    }
}
