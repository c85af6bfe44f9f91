//! Solve driver.
//!
//! Runs one synchronous solve, maps the outcome class to the crate's error
//! taxonomy, and decodes an optimal solution into assignment records.

use tracing::{info, warn};

use crate::error::{PlanningError, Result};
use crate::formulation::{DecisionVariables, PlanningMilpBuilder, PlanningModel};
use crate::milp::{MilpSolution, MilpSolver, SolveStatus, VarId};
use crate::models::{AssignmentRecord, AssignmentState, Assignments, EventKind, Parameters, Planning};

/// Builds the model for `planning`, solves it and decodes the assignments.
///
/// # Errors
/// - `UnsupportedGapModality` when the parameters ask for an unimplemented
///   gap modality
/// - `PlanningInfeasible` / `PlanningUnbounded` for non-optimal outcomes
/// - `SolutionInconsistent` when the solver breaks its contract
pub fn solve_planning<S: MilpSolver + ?Sized>(
    planning: &Planning,
    params: &Parameters,
    solver: &S,
) -> Result<Assignments> {
    PlanningMilpBuilder::new(planning, params).solve(solver)
}

/// Solves an already built model and decodes the assignments.
pub fn solve_model<S: MilpSolver + ?Sized>(
    planning: &Planning,
    built: &PlanningModel,
    solver: &S,
) -> Result<Assignments> {
    let solution = solver.solve(&built.model);
    match solution.status {
        SolveStatus::Optimal => {
            info!(objective = ?solution.objective, "planning solved");
            decode_solution(planning, &built.variables, &solution)
        }
        SolveStatus::Infeasible => {
            warn!("planning is infeasible");
            Err(PlanningError::PlanningInfeasible)
        }
        SolveStatus::Unbounded => {
            warn!("planning is unbounded");
            Err(PlanningError::PlanningUnbounded)
        }
    }
}

/// Decodes an optimal solution.
///
/// Every shift, gap and screening variable at 1 becomes an `Assigned` row
/// (ordered by kind, person, then date); every referent variable at 1 then
/// upgrades the matching shift row.
///
/// # Errors
/// `SolutionInconsistent` when the variable layout was built for another
/// planning, a variable has no value, or a referent has no shift row.
pub fn decode_solution(
    planning: &Planning,
    vars: &DecisionVariables,
    solution: &MilpSolution,
) -> Result<Assignments> {
    if !vars.fits(planning.person_count(), planning.date_count()) {
        return Err(PlanningError::SolutionInconsistent(format!(
            "variable layout does not match a planning of {} persons and {} dates",
            planning.person_count(),
            planning.date_count()
        )));
    }

    let is_set = |var: VarId| -> Result<bool> {
        solution.is_set(var).ok_or_else(|| {
            PlanningError::SolutionInconsistent(format!("no value for variable {}", var.index()))
        })
    };

    let persons = planning.persons();
    let dates = planning.dates();
    let mut assignments = Assignments::new();

    for kind in DecisionVariables::MODELED_KINDS {
        let Some(matrix) = vars.for_kind(kind) else {
            continue;
        };
        for (p, row) in matrix.iter().enumerate() {
            for (d, &var) in row.iter().enumerate() {
                if is_set(var)? {
                    assignments.push(AssignmentRecord::assigned(&persons[p].name, dates[d], kind));
                }
            }
        }
    }

    for (p, row) in vars.referent.iter().enumerate() {
        for (d, &var) in row.iter().enumerate() {
            if !is_set(var)? {
                continue;
            }
            let name = &persons[p].name;
            let record = assignments
                .find_mut(name, dates[d], EventKind::Shift)
                .ok_or_else(|| {
                    PlanningError::SolutionInconsistent(format!(
                        "'{name}' is referent on {} without a shift",
                        dates[d]
                    ))
                })?;
            record.state = AssignmentState::Referent;
        }
    }

    Ok(assignments)
}
