//! Solver-agnostic representation of a mixed-integer linear program.
//!
//! The model is plain data: named variables with kinds and bounds, named
//! linear constraints and a linear objective to minimise. Oracle backends
//! translate it into whatever their solver consumes. The model can also
//! evaluate an assignment, which is how solver output is verified.

use std::fmt;

use thiserror::Error;

/// Tolerance used when checking bounds, integrality and constraints.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Index of a variable within its [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in [`MilpModel::variables`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Integer restricted to `{0, 1}`.
    Binary,
    /// Integer within its bounds.
    Integer,
    /// Real value within its bounds.
    Continuous,
}

impl VarKind {
    /// Whether values of this kind must be integral.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Binary | Self::Integer)
    }
}

/// A named decision variable with inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name used in solver input files; unique within a model.
    pub name: String,
    /// Variable domain.
    pub kind: VarKind,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

/// Sum of `coefficient * variable` terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// An expression with no terms.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append `coefficient * var`.
    #[must_use]
    pub fn plus(mut self, coefficient: f64, var: VarId) -> Self {
        self.terms.push((var, coefficient));
        self
    }

    /// Append `coefficient * var` in place.
    pub fn add_term(&mut self, coefficient: f64, var: VarId) {
        self.terms.push((var, coefficient));
    }

    /// Terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Evaluate against one value per model variable.
    ///
    /// Variables without a value contribute zero.
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| {
                coefficient * values.get(var.index()).copied().unwrap_or(0.0)
            })
            .sum()
    }
}

/// Comparison between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr == rhs`
    Equal,
    /// `expr <= rhs`
    LessOrEqual,
    /// `expr >= rhs`
    GreaterOrEqual,
}

impl Relation {
    /// Operator as written in LP files.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        }
    }

    fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Equal => (lhs - rhs).abs() <= FEASIBILITY_TOLERANCE,
            Self::LessOrEqual => lhs <= rhs + FEASIBILITY_TOLERANCE,
            Self::GreaterOrEqual => lhs >= rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

/// Which group of the tour formulation a constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintFamily {
    /// Exactly one edge leaves each node.
    OutDegree,
    /// Exactly one edge enters each node.
    InDegree,
    /// Miller–Tucker–Zemlin ordering between two non-start nodes.
    SubtourElimination,
}

/// A named linear constraint `expr (=|<=|>=) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name used in solver input files; unique within a model.
    pub name: String,
    /// Formulation group.
    pub family: ConstraintFamily,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison.
    pub relation: Relation,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// First reason an assignment fails to satisfy a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentViolation {
    /// Wrong number of values.
    #[error("assignment has {found} values, model has {expected} variables")]
    WrongLength {
        /// Number of model variables.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A value lies outside its variable's bounds.
    #[error("{name} = {value} lies outside [{lower}, {upper}]")]
    OutOfBounds {
        /// Variable name.
        name: String,
        /// Offending value.
        value: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// An integral variable has a fractional value.
    #[error("{name} = {value} is not integral")]
    NotIntegral {
        /// Variable name.
        name: String,
        /// Offending value.
        value: f64,
    },
    /// A constraint does not hold.
    #[error("constraint {name} violated: {lhs} {relation} {rhs} is false")]
    ConstraintViolated {
        /// Constraint name.
        name: String,
        /// Evaluated left-hand side.
        lhs: f64,
        /// Operator.
        relation: &'static str,
        /// Right-hand side.
        rhs: f64,
    },
}

/// A tour-shaped MILP built over `n` nodes.
///
/// Besides the generic variable and constraint lists the model remembers
/// which variable is the edge indicator `x[i][j]` and which is the order
/// variable `u[i]`, so solutions can be decoded without parsing names.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpModel {
    size: usize,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    edges: Vec<Option<VarId>>,
    ranks: Vec<VarId>,
}

impl MilpModel {
    /// Start an empty model over `size` nodes.
    pub(crate) fn with_size(size: usize) -> Self {
        Self {
            size,
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
            edges: vec![None; size * size],
            ranks: Vec::with_capacity(size),
        }
    }

    pub(crate) fn add_variable(&mut self, variable: Variable) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(variable);
        id
    }

    pub(crate) fn set_edge(&mut self, from: usize, to: usize, var: VarId) {
        if let Some(slot) = self.edges.get_mut(from * self.size + to) {
            *slot = Some(var);
        }
    }

    pub(crate) fn push_rank(&mut self, var: VarId) {
        self.ranks.push(var);
    }

    pub(crate) fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Number of nodes, `n`.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All variables in [`VarId`] order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Look up a variable.
    #[must_use]
    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    /// All constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Objective to minimise.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Edge indicator `x[from][to]`; `None` for self-loops and bad indices.
    #[must_use]
    pub fn edge(&self, from: usize, to: usize) -> Option<VarId> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.edges.get(from * self.size + to).copied().flatten()
    }

    /// Order variable `u[node]`.
    #[must_use]
    pub fn rank(&self, node: usize) -> Option<VarId> {
        self.ranks.get(node).copied()
    }

    /// Order variables `u[0..n)` in node order.
    #[must_use]
    pub fn ranks(&self) -> &[VarId] {
        &self.ranks
    }

    /// Number of constraints of one family.
    #[must_use]
    pub fn count_family(&self, family: ConstraintFamily) -> usize {
        self.constraints
            .iter()
            .filter(|c| c.family == family)
            .count()
    }

    /// Objective value of an assignment holding one value per variable.
    #[must_use]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Check bounds, integrality and every constraint.
    ///
    /// Reports the first violation found.
    pub fn check_assignment(&self, values: &[f64]) -> Result<(), AssignmentViolation> {
        if values.len() != self.variables.len() {
            return Err(AssignmentViolation::WrongLength {
                expected: self.variables.len(),
                found: values.len(),
            });
        }
        for (variable, &value) in self.variables.iter().zip(values) {
            if !(value >= variable.lower - FEASIBILITY_TOLERANCE
                && value <= variable.upper + FEASIBILITY_TOLERANCE)
            {
                return Err(AssignmentViolation::OutOfBounds {
                    name: variable.name.clone(),
                    value,
                    lower: variable.lower,
                    upper: variable.upper,
                });
            }
            if variable.kind.is_integral() && (value - value.round()).abs() > FEASIBILITY_TOLERANCE
            {
                return Err(AssignmentViolation::NotIntegral {
                    name: variable.name.clone(),
                    value,
                });
            }
        }
        for constraint in &self.constraints {
            let lhs = constraint.expr.evaluate(values);
            if !constraint.relation.holds(lhs, constraint.rhs) {
                return Err(AssignmentViolation::ConstraintViolated {
                    name: constraint.name.clone(),
                    lhs,
                    relation: constraint.relation.symbol(),
                    rhs: constraint.rhs,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for MilpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count_kind = |kind: VarKind| self.variables.iter().filter(|v| v.kind == kind).count();
        writeln!(f, "TSP model over {} nodes", self.size)?;
        writeln!(
            f,
            "  variables: {} binary, {} integer, {} continuous",
            count_kind(VarKind::Binary),
            count_kind(VarKind::Integer),
            count_kind(VarKind::Continuous)
        )?;
        writeln!(
            f,
            "  constraints: {} out-degree, {} in-degree, {} subtour elimination",
            self.count_family(ConstraintFamily::OutDegree),
            self.count_family(ConstraintFamily::InDegree),
            self.count_family(ConstraintFamily::SubtourElimination)
        )?;
        write!(f, "  objective: minimise {} weighted edges", self.objective.terms().len())
    }
}
