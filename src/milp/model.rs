//! Binary linear program representation.
//!
//! A `MilpModel` is a list of binary variables, linear constraints of the
//! form `expr (<=|>=|=) rhs`, and one linear objective to maximize. All
//! coefficients are integers; every rule of the rostering formulation is
//! integral.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a variable inside its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl VarId {
    /// Raw index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A binary decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique, human-readable name (e.g. `shift_3_12`).
    pub name: String,
}

/// Linear expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Terms; a variable may appear more than once.
    pub terms: Vec<(VarId, i64)>,
    /// Constant offset.
    pub constant: i64,
}

impl LinearExpr {
    /// The zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of variables, each with coefficient 1.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }

    /// A single term.
    pub fn term(var: VarId, coef: i64) -> Self {
        Self {
            terms: vec![(var, coef)],
            constant: 0,
        }
    }

    /// Adds a term.
    pub fn plus(mut self, var: VarId, coef: i64) -> Self {
        self.terms.push((var, coef));
        self
    }

    /// Adds every term of another expression, scaled.
    pub fn plus_scaled(mut self, other: &LinearExpr, factor: i64) -> Self {
        self.terms
            .extend(other.terms.iter().map(|&(v, c)| (v, c * factor)));
        self.constant += other.constant * factor;
        self
    }

    /// Adds a constant.
    pub fn plus_constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    /// Evaluates the expression for 0/1 values.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .filter(|(v, _)| values[v.index()])
                .map(|(_, c)| c)
                .sum::<i64>()
    }

    /// Whether the expression has no term.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// `expr <= rhs`
    LessEqual,
    /// `expr >= rhs`
    GreaterEqual,
    /// `expr == rhs`
    Equal,
}

impl Relation {
    /// Whether `lhs relation rhs` holds.
    #[inline]
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::LessEqual => lhs <= rhs,
            Relation::GreaterEqual => lhs >= rhs,
            Relation::Equal => lhs == rhs,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEqual => f.write_str("<="),
            Relation::GreaterEqual => f.write_str(">="),
            Relation::Equal => f.write_str("="),
        }
    }
}

/// A named linear constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constraint name, for diagnostics.
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: i64,
}

impl LinearConstraint {
    /// Whether the constraint holds for 0/1 values.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        self.relation.holds(self.expr.evaluate(values), self.rhs)
    }
}

/// A maximization problem over binary variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilpModel {
    /// Model name.
    pub name: String,
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl MilpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name: name.into() });
        id
    }

    /// Adds a constraint `expr relation rhs`.
    pub fn constrain(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: i64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    /// Forces a variable to a value.
    pub fn fix(&mut self, name: impl Into<String>, var: VarId, value: bool) {
        self.constrain(name, LinearExpr::term(var, 1), Relation::Equal, i64::from(value));
    }

    /// Sets the objective to maximize.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Variables in creation order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Constraints in creation order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective to maximize.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints broken by a full 0/1 assignment.
    pub fn violated_constraints<'a>(
        &'a self,
        values: &'a [bool],
    ) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints.iter().filter(move |c| !c.is_satisfied(values))
    }

    /// Whether a full 0/1 assignment satisfies every constraint.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len() && self.violated_constraints(values).next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_evaluation() {
        let mut m = MilpModel::new("t");
        let x = m.add_binary("x");
        let y = m.add_binary("y");
        let e = LinearExpr::sum([x, y]).plus(x, 2).plus_constant(-1);
        assert_eq!(e.evaluate(&[true, false]), 2);
        assert_eq!(e.evaluate(&[true, true]), 3);
        assert_eq!(e.evaluate(&[false, false]), -1);
    }

    #[test]
    fn test_plus_scaled() {
        let x = VarId(0);
        let y = VarId(1);
        let a = LinearExpr::sum([x, y]).plus_constant(1);
        let e = LinearExpr::term(x, 1).plus_scaled(&a, -3);
        assert_eq!(e.evaluate(&[true, true]), 1 - 6 - 3);
    }

    #[test]
    fn test_constraint_satisfaction() {
        let mut m = MilpModel::new("t");
        let x = m.add_binary("x");
        let y = m.add_binary("y");
        m.constrain("at_most_one", LinearExpr::sum([x, y]), Relation::LessEqual, 1);
        m.fix("x_on", x, true);
        assert_eq!(m.variable_count(), 2);
        assert_eq!(m.constraint_count(), 2);
        assert!(m.is_satisfied(&[true, false]));
        assert!(!m.is_satisfied(&[true, true]));
        assert!(!m.is_satisfied(&[false, false]));
        assert_eq!(m.violated_constraints(&[false, true]).count(), 1);
        assert!(!m.is_satisfied(&[true]));
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::LessEqual.to_string(), "<=");
        assert!(Relation::Equal.holds(2, 2));
        assert!(!Relation::GreaterEqual.holds(1, 2));
    }
}
