//! Input integrity checks for a planning period.
//!
//! Checks the structural invariants of the ingestion tables before any
//! model is built. Detects:
//! - Duplicate event dates
//! - Duplicate or empty person names
//! - Availability rows naming an unknown person
//! - Availability rows on a date with no event row
//!
//! Every problem is collected; nothing stops at the first one.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AvailabilityRecord, Event, Person};

/// Input check result.
pub type InputCheckResult = Result<(), Vec<InputError>>;

/// A structural problem in the input tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputErrorKind {
    /// Two event rows share a date.
    DuplicateDate,
    /// Two persons share a name.
    DuplicatePerson,
    /// A person has an empty name.
    EmptyName,
    /// An availability row names a person that doesn't exist.
    UnknownPerson,
    /// An availability row is on a date with no event row.
    UnknownDate,
}

impl InputError {
    pub(crate) fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input tables of a planning period.
///
/// Checks:
/// 1. No two events on the same date
/// 2. No empty person name
/// 3. No duplicate person name
/// 4. Every availability row names an existing person
/// 5. Every availability row falls on an existing event date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    events: &[Event],
    persons: &[Person],
    availabilities: &[AvailabilityRecord],
) -> InputCheckResult {
    let mut errors = Vec::new();

    let mut dates: HashSet<NaiveDate> = HashSet::new();
    for event in events {
        if !dates.insert(event.date) {
            errors.push(InputError::new(
                InputErrorKind::DuplicateDate,
                format!("Duplicate event date: {}", event.date),
            ));
        }
    }

    let mut names: HashSet<&str> = HashSet::new();
    for person in persons {
        if person.name.trim().is_empty() {
            errors.push(InputError::new(
                InputErrorKind::EmptyName,
                "A person has an empty name",
            ));
        }
        if !names.insert(person.name.as_str()) {
            errors.push(InputError::new(
                InputErrorKind::DuplicatePerson,
                format!("Duplicate person name: {}", person.name),
            ));
        }
    }

    // Report each dangling reference once, however many rows repeat it.
    let mut unknown_persons: HashSet<&str> = HashSet::new();
    let mut unknown_dates: HashSet<NaiveDate> = HashSet::new();
    for record in availabilities {
        if !names.contains(record.person.as_str()) && unknown_persons.insert(&record.person) {
            errors.push(InputError::new(
                InputErrorKind::UnknownPerson,
                format!("Availability references unknown person '{}'", record.person),
            ));
        }
        if !dates.contains(&record.date) && unknown_dates.insert(record.date) {
            errors.push(InputError::new(
                InputErrorKind::UnknownDate,
                format!("Availability references date {} with no event", record.date),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
