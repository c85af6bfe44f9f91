//! Error types for planning operations.
//!
//! Only fatal conditions live here: bad configuration, broken input
//! invariants, and solves that cannot produce a schedule. Policy breaches
//! found in an assignment table are never errors; they are reported by
//! [`crate::validation::validate_assignments`].

use thiserror::Error;

use crate::models::GapModality;
use crate::validation::InputError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanningError>;

/// Errors raised while configuring, building, solving, or validating a plan.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// The gap modality is recognized but has no implementation.
    #[error("gap modality '{0}' is not handled")]
    UnsupportedGapModality(GapModality),

    /// Parameters are internally contradictory.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Parameters could not be parsed.
    #[error("could not parse parameters: {0}")]
    ParametersParse(#[from] serde_json::Error),

    /// The input bundle breaks a structural invariant.
    #[error("invalid planning input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<InputError>),

    /// No assignment satisfies every hard constraint.
    #[error("infeasible planning: no assignment satisfies all hard constraints")]
    PlanningInfeasible,

    /// The objective is unconstrained; the model is defective.
    #[error("unbounded planning: the objective is not constrained")]
    PlanningUnbounded,

    /// The solver returned values that break its own contract.
    #[error("inconsistent solver output: {0}")]
    SolutionInconsistent(String),
}

fn summarize(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
