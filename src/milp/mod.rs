//! Mixed-integer linear programming seam.
//!
//! The rostering formulation is expressed against [`MilpModel`], a small
//! binary linear program, and handed to any [`MilpSolver`]. The bundled
//! exact engine, [`BranchAndBoundSolver`], proves optimality quickly on
//! rosters whose quotas leave slack, a month of twenty people included.
//! Tightly capacitated rosters can still take exponential time in it; a
//! binding to an external MIP engine implements the same trait.
//!
//! # Reference
//! - Wolsey (1998), "Integer Programming", Ch. 7: Branch and Bound
//! - Achterberg (2007), "Constraint Integer Programming", Ch. 7: Domain Propagation

mod branch_and_bound;
mod model;

pub use branch_and_bound::{BranchAndBoundSolver, SearchStatistics};
pub use model::{LinearConstraint, LinearExpr, MilpModel, Relation, VarId, Variable};

use serde::{Deserialize, Serialize};

/// Outcome class of a MILP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// An optimal assignment was found.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
}

/// Result of a MILP solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpSolution {
    /// Outcome class.
    pub status: SolveStatus,
    /// One value per variable, indexed by [`VarId`]. Empty unless optimal.
    pub values: Vec<f64>,
    /// Objective value, when optimal.
    pub objective: Option<f64>,
}

impl MilpSolution {
    /// An optimal solution.
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            objective: Some(objective),
        }
    }

    /// An infeasible outcome.
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: Vec::new(),
            objective: None,
        }
    }

    /// An unbounded outcome.
    pub fn unbounded() -> Self {
        Self {
            status: SolveStatus::Unbounded,
            values: Vec::new(),
            objective: None,
        }
    }

    /// Value of a variable, if present.
    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Whether a variable is set to 1 (values are rounded at 0.5).
    pub fn is_set(&self, var: VarId) -> Option<bool> {
        self.value(var).map(|v| v > 0.5)
    }
}

/// A MILP engine.
pub trait MilpSolver {
    /// Maximizes the model's objective subject to its constraints.
    fn solve(&self, model: &MilpModel) -> MilpSolution;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_rounding() {
        let s = MilpSolution::optimal(vec![0.0, 1.0, 0.9999, 0.2], 2.0);
        assert_eq!(s.is_set(VarId(0)), Some(false));
        assert_eq!(s.is_set(VarId(1)), Some(true));
        assert_eq!(s.is_set(VarId(2)), Some(true));
        assert_eq!(s.is_set(VarId(3)), Some(false));
        assert_eq!(s.is_set(VarId(4)), None);
    }

    #[test]
    fn test_non_optimal_outcomes_carry_no_values() {
        assert!(MilpSolution::infeasible().values.is_empty());
        assert_eq!(MilpSolution::unbounded().status, SolveStatus::Unbounded);
        assert_eq!(MilpSolution::unbounded().objective, None);
    }
}
