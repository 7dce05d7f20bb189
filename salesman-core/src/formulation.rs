//! Assignment + Miller–Tucker–Zemlin formulation of the travelling salesman
//! problem.
//!
//! For `n` nodes the model has a binary `x[i][j]` for every ordered pair
//! `i != j` and an integer order variable `u[i]` for every node:
//!
//! - `sum_k x[i][k] = 1` and `sum_k x[k][j] = 1` (one edge out, one edge in);
//! - `u[0]` fixed to 1, `u[i]` in `[2, n]` otherwise;
//! - `u[i] - u[j] + (n - 1) x[i][j] <= n - 2` for `i, j >= 1`, `i != j`.
//!
//! The last family is `u[i] - u[j] + 1 <= (n - 1)(1 - x[i][j])` moved into
//! normal form. It forces `u[j] >= u[i] + 1` along every selected edge that
//! avoids node 0, so a cycle that skips node 0 cannot be ranked. Node 0 is
//! never part of an MTZ pair, which is what lets the tour close.

use crate::model::{Constraint, ConstraintFamily, LinearExpr, MilpModel, Relation, VarKind, Variable};
use crate::{DistanceMatrix, InvalidInputError};

/// Smallest instance the formulation accepts.
pub const MIN_NODES: usize = 2;

/// Name of the edge indicator `x[from][to]`.
#[must_use]
pub fn edge_name(from: usize, to: usize) -> String {
    format!("x_{from}_{to}")
}

/// Name of the order variable `u[node]`.
#[must_use]
pub fn rank_name(node: usize) -> String {
    format!("u_{node}")
}

/// Build the MTZ model for `matrix`.
///
/// Fails with [`InvalidInputError::TooFewPoints`] when the matrix has fewer
/// than [`MIN_NODES`] rows.
///
/// # Examples
/// ```
/// use salesman_core::{DistanceMatrix, build_model};
///
/// let matrix = DistanceMatrix::from_rows(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 1.5], vec![2.0, 1.5, 0.0]],
/// )?;
/// let model = build_model(&matrix)?;
/// assert_eq!(model.size(), 3);
/// // six edges plus three order variables
/// assert_eq!(model.variables().len(), 9);
/// # Ok::<(), salesman_core::InvalidInputError>(())
/// ```
pub fn build_model(matrix: &DistanceMatrix) -> Result<MilpModel, InvalidInputError> {
    let n = matrix.len();
    if n < MIN_NODES {
        return Err(InvalidInputError::TooFewPoints {
            required: MIN_NODES,
            found: n,
        });
    }

    let mut model = MilpModel::with_size(n);
    let mut objective = LinearExpr::new();

    for (i, row) in matrix.rows().iter().enumerate() {
        for (j, &km) in row.iter().enumerate() {
            if i == j {
                continue;
            }
            let x = model.add_variable(Variable {
                name: edge_name(i, j),
                kind: VarKind::Binary,
                lower: 0.0,
                upper: 1.0,
            });
            model.set_edge(i, j, x);
            objective.add_term(km, x);
        }
    }
    model.set_objective(objective);

    let last_rank = n as f64;
    for node in 0..n {
        let (lower, upper) = if node == 0 { (1.0, 1.0) } else { (2.0, last_rank) };
        let u = model.add_variable(Variable {
            name: rank_name(node),
            kind: VarKind::Integer,
            lower,
            upper,
        });
        model.push_rank(u);
    }

    add_degree_constraints(&mut model);
    add_subtour_elimination(&mut model);

    log::debug!(
        "formulated TSP over {n} nodes: {} variables, {} constraints",
        model.variables().len(),
        model.constraints().len()
    );
    Ok(model)
}

fn add_degree_constraints(model: &mut MilpModel) {
    let n = model.size();
    for i in 0..n {
        let expr = (0..n)
            .filter_map(|k| model.edge(i, k))
            .fold(LinearExpr::new(), |expr, x| expr.plus(1.0, x));
        model.add_constraint(Constraint {
            name: format!("out_{i}"),
            family: ConstraintFamily::OutDegree,
            expr,
            relation: Relation::Equal,
            rhs: 1.0,
        });
    }
    for j in 0..n {
        let expr = (0..n)
            .filter_map(|k| model.edge(k, j))
            .fold(LinearExpr::new(), |expr, x| expr.plus(1.0, x));
        model.add_constraint(Constraint {
            name: format!("in_{j}"),
            family: ConstraintFamily::InDegree,
            expr,
            relation: Relation::Equal,
            rhs: 1.0,
        });
    }
}

fn add_subtour_elimination(model: &mut MilpModel) {
    let n = model.size();
    let big_m = (n - 1) as f64;
    for i in 1..n {
        for j in 1..n {
            if i == j {
                continue;
            }
            let (Some(u_i), Some(u_j), Some(x_ij)) = (model.rank(i), model.rank(j), model.edge(i, j))
            else {
                continue;
            };
            model.add_constraint(Constraint {
                name: format!("mtz_{i}_{j}"),
                family: ConstraintFamily::SubtourElimination,
                expr: LinearExpr::new()
                    .plus(1.0, u_i)
                    .plus(-1.0, u_j)
                    .plus(big_m, x_ij),
                relation: Relation::LessOrEqual,
                rhs: big_m - 1.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uniform_matrix(n: usize) -> DistanceMatrix {
        let labels = (0..n).map(|i| format!("P{i}")).collect();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect();
        DistanceMatrix::from_rows(labels, rows).expect("uniform matrix is valid")
    }

    #[rstest]
    #[case(2, 0)]
    #[case(3, 2)]
    #[case(5, 12)]
    fn constraint_counts(#[case] n: usize, #[case] mtz_rows: usize) {
        let model = build_model(&uniform_matrix(n)).expect("model");
        assert_eq!(model.count_family(ConstraintFamily::OutDegree), n);
        assert_eq!(model.count_family(ConstraintFamily::InDegree), n);
        assert_eq!(model.count_family(ConstraintFamily::SubtourElimination), mtz_rows);
        assert_eq!(model.variables().len(), n * (n - 1) + n);
    }

    #[rstest]
    fn self_loops_are_not_modelled() {
        let model = build_model(&uniform_matrix(4)).expect("model");
        assert!((0..4).all(|i| model.edge(i, i).is_none()));
        assert!(model.edge(0, 4).is_none());
    }

    #[rstest]
    fn start_rank_is_fixed_to_one() {
        let model = build_model(&uniform_matrix(4)).expect("model");
        let u0 = model
            .rank(0)
            .and_then(|id| model.variable(id))
            .expect("u_0 exists");
        assert_eq!((u0.lower, u0.upper), (1.0, 1.0));
        for node in 1..4 {
            let u = model
                .rank(node)
                .and_then(|id| model.variable(id))
                .expect("rank exists");
            assert_eq!((u.lower, u.upper), (2.0, 4.0));
            assert_eq!(u.kind, VarKind::Integer);
        }
    }

    #[rstest]
    fn subtour_rows_never_mention_the_start_node() {
        let n = 5;
        let model = build_model(&uniform_matrix(n)).expect("model");
        let mut start_vars = vec![model.rank(0).expect("u_0")];
        for k in 1..n {
            start_vars.push(model.edge(0, k).expect("x_0_k"));
            start_vars.push(model.edge(k, 0).expect("x_k_0"));
        }
        for row in model
            .constraints()
            .iter()
            .filter(|c| c.family == ConstraintFamily::SubtourElimination)
        {
            assert!(
                row.expr.terms().iter().all(|(var, _)| !start_vars.contains(var)),
                "{} references node 0",
                row.name
            );
        }
    }

    #[rstest]
    fn subtour_row_has_normal_form_coefficients() {
        let model = build_model(&uniform_matrix(4)).expect("model");
        let row = model
            .constraints()
            .iter()
            .find(|c| c.name == "mtz_1_2")
            .expect("mtz_1_2 exists");
        let coefficients: Vec<f64> = row.expr.terms().iter().map(|&(_, c)| c).collect();
        assert_eq!(coefficients, vec![1.0, -1.0, 3.0]);
        assert_eq!(row.relation, Relation::LessOrEqual);
        assert!((row.rhs - 2.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn objective_weights_edges_by_distance() {
        let matrix = DistanceMatrix::from_rows(
            vec!["A".into(), "B".into()],
            vec![vec![0.0, 7.5], vec![7.5, 0.0]],
        )
        .expect("matrix");
        let model = build_model(&matrix).expect("model");
        let x01 = model.edge(0, 1).expect("x_0_1");
        let x10 = model.edge(1, 0).expect("x_1_0");
        let mut values = vec![0.0; model.variables().len()];
        values[x01.index()] = 1.0;
        values[x10.index()] = 1.0;
        assert!((model.objective_value(&values) - 15.0).abs() < 1e-12);
    }
}
