//! Duty rostering for a planning period.
//!
//! Assigns people to recurring dated duties (shifts, referent roles,
//! shared-meeting "gap" attendance, screenings) under availability and
//! policy rules, and independently checks any assignment table against the
//! same rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Event`, `Person`, `AvailabilityRecord`,
//!   `AssignmentRecord`, `Parameters`, and the validated `Planning` bundle
//! - **`milp`**: Binary linear programs, the `MilpSolver` seam, and a
//!   bundled branch-and-bound engine
//! - **`formulation`**: Rostering rules as linear constraints
//! - **`solve`**: Solve driver and solution decoding
//! - **`validation`**: Input integrity checks and the policy rule validator
//! - **`kpi`**: Coverage and load indicators
//! - **`planner`**: Build, solve, validate and measure in one call
//!
//! # Architecture
//!
//! The model builder and the validator encode the same rules twice, from
//! different sides: the builder over decision variables, the validator
//! over assignment rows. Solver output is always re-validated, so an
//! encoding mistake on either side surfaces as a report finding.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Wolsey (1998), "Integer Programming"

pub mod error;
pub mod formulation;
pub mod kpi;
pub mod milp;
pub mod models;
pub mod planner;
pub mod solve;
pub mod validation;

pub use error::{PlanningError, Result};
pub use planner::{PlanOutcome, Planner};
