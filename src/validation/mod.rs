//! Validation of planning inputs and assignment tables.
//!
//! Two layers:
//! - **`input`**: structural integrity of the ingestion tables (duplicate
//!   dates or names, dangling references). Failures are fatal.
//! - **`rules`**: policy compliance of an assignment table, recomputed from
//!   the rows alone. Findings are reported, never raised.
//!
//! The rule checks are the acceptance oracle for solver output and for
//! hand-edited schedules: they are written independently of the model
//! builder so that an encoding mistake in one shows up in the other.

mod comparator;
mod input;
mod report;
mod rules;

pub use comparator::{Comparison, DayMonth};
pub use input::{validate_input, InputCheckResult, InputError, InputErrorKind};
pub use report::{CategoryPath, RuleScope, Violation, ViolationReport};
pub use rules::{category, validate_assignments};
