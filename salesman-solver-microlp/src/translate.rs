//! Mapping from the solver-agnostic model onto `good_lp` types.

use good_lp::{
    Constraint, Expression, ProblemVariables, Variable, VariableDefinition, constraint, variable,
};
use salesman_core::{LinearExpr, MilpModel, Relation, VarKind};

/// A model rewritten in `good_lp` terms.
///
/// `variables[k]` is the `good_lp` variable for the model variable with
/// index `k`.
pub(crate) struct Translation {
    pub(crate) problem: ProblemVariables,
    pub(crate) variables: Vec<Variable>,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
}

impl Translation {
    pub(crate) fn of(model: &MilpModel) -> Self {
        let mut problem = ProblemVariables::new();
        let variables: Vec<Variable> = model
            .variables()
            .iter()
            .map(|var| problem.add(definition(var)))
            .collect();
        let objective = expression(model.objective(), &variables);
        let constraints = model
            .constraints()
            .iter()
            .map(|row| {
                let lhs = expression(&row.expr, &variables);
                match row.relation {
                    Relation::Equal => constraint::eq(lhs, row.rhs),
                    Relation::LessOrEqual => constraint::leq(lhs, row.rhs),
                    Relation::GreaterOrEqual => constraint::geq(lhs, row.rhs),
                }
            })
            .collect();
        Self {
            problem,
            variables,
            objective,
            constraints,
        }
    }
}

fn definition(var: &salesman_core::Variable) -> VariableDefinition {
    let named = variable().name(var.name.clone());
    match var.kind {
        VarKind::Binary => named.binary(),
        VarKind::Integer => named.integer().min(var.lower).max(var.upper),
        VarKind::Continuous => named.min(var.lower).max(var.upper),
    }
}

fn expression(expr: &LinearExpr, variables: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .fold(Expression::from(0.0), |acc, &(id, coefficient)| {
            match variables.get(id.index()) {
                Some(&var) => acc + coefficient * var,
                None => acc,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use salesman_core::{DistanceMatrix, build_model};

    #[rstest]
    fn every_model_variable_and_row_is_translated() {
        let matrix = DistanceMatrix::from_rows(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0], vec![2.0, 3.0, 0.0]],
        )
        .unwrap_or_else(|err| panic!("matrix: {err}"));
        let model = build_model(&matrix).unwrap_or_else(|err| panic!("model: {err}"));
        let translation = Translation::of(&model);
        assert_eq!(translation.variables.len(), model.variables().len());
        assert_eq!(translation.constraints.len(), model.constraints().len());
    }
}
