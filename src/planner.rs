//! One-call planning pipeline.
//!
//! # Algorithm
//!
//! 1. Check the parameters.
//! 2. Build the MILP from the planning and parameters.
//! 3. Solve it and decode the assignment table.
//! 4. Validate the table against the same policy.
//! 5. Compute the KPIs.
//!
//! A failed solve aborts the run. A successful solve always proceeds to
//! validation, whose report is advisory.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::formulation::PlanningMilpBuilder;
use crate::kpi::PlanningKpi;
use crate::milp::{BranchAndBoundSolver, MilpSolver};
use crate::models::{Assignments, Parameters, Planning};
use crate::solve::solve_model;
use crate::validation::{validate_assignments, ViolationReport};

/// Everything a planning run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    /// Decoded assignment table.
    pub assignments: Assignments,
    /// Validator findings on that table.
    pub report: ViolationReport,
    /// Quality indicators.
    pub kpi: PlanningKpi,
}

impl PlanOutcome {
    /// Whether the validator found nothing.
    pub fn is_compliant(&self) -> bool {
        self.report.is_empty()
    }
}

/// Runs build, solve, decode, validation and KPIs with one solver.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::models::{AvailabilityRecord, Event, EventKind, Parameters, Person, Planning};
/// use u_roster::planner::Planner;
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
/// let names = ["Ana", "Bob", "Cid"];
/// let planning = Planning::new(
///     vec![Event::new(day).with_shift()],
///     names.iter().map(|n| Person::new(*n)).collect(),
///     names
///         .iter()
///         .map(|n| AvailabilityRecord::available(*n, day, EventKind::Shift))
///         .collect(),
/// )
/// .unwrap();
///
/// let outcome = Planner::default().plan(&planning, &Parameters::default()).unwrap();
/// assert_eq!(outcome.assignments.len(), 3);
/// assert!(outcome.is_compliant());
/// ```
#[derive(Debug, Clone)]
pub struct Planner<S> {
    solver: S,
    big_m: Option<i64>,
}

impl Default for Planner<BranchAndBoundSolver> {
    fn default() -> Self {
        Self::new(BranchAndBoundSolver::new())
    }
}

impl<S: MilpSolver> Planner<S> {
    /// Creates a planner around a solver.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            big_m: None,
        }
    }

    /// Overrides the big-M constant of the formulation.
    pub fn with_big_m(mut self, big_m: i64) -> Self {
        self.big_m = Some(big_m);
        self
    }

    /// The wrapped solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Plans one period.
    ///
    /// # Errors
    /// Configuration errors from the parameters, and solve-time errors
    /// (`PlanningInfeasible`, `PlanningUnbounded`, `SolutionInconsistent`).
    pub fn plan(&self, planning: &Planning, params: &Parameters) -> Result<PlanOutcome> {
        params.check()?;

        let mut builder = PlanningMilpBuilder::new(planning, params);
        if let Some(big_m) = self.big_m {
            builder = builder.with_big_m(big_m);
        }
        let built = builder.build()?;

        let assignments = solve_model(planning, &built, &self.solver)?;
        let report = validate_assignments(planning, &assignments, params)?;
        let kpi = PlanningKpi::calculate(planning, &assignments);

        info!(
            rows = assignments.len(),
            violations = report.len(),
            coverage = kpi.coverage_rate,
            "planning finished"
        );
        if !report.is_empty() {
            warn!(violations = report.len(), "solver output breaks policy rules");
        }

        Ok(PlanOutcome {
            assignments,
            report,
            kpi,
        })
    }
}
