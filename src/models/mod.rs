//! Rostering domain models.
//!
//! Provides the typed records shared by the model builder, the solve
//! driver, and the rule validator.
//!
//! # Domain Mappings
//!
//! | u-roster | Volunteer shop | Clinic | Help desk |
//! |----------|----------------|--------|-----------|
//! | Event | Opening day | Clinic day | Support day |
//! | Shift | Till duty | Ward shift | On-call slot |
//! | Referent | Shift lead | Charge nurse | Escalation owner |
//! | Gap | Members' meeting | Staff briefing | Team sync |

mod assignment;
mod availability;
mod event;
mod parameters;
mod person;
mod planning;

pub use assignment::{AssignmentQuery, AssignmentRecord, AssignmentState, Assignments};
pub use availability::AvailabilityRecord;
pub use event::{Event, EventKind};
pub use parameters::{GapModality, GoalModality, Parameters};
pub use person::{Language, Person};
pub use planning::Planning;
