//! Availability records.
//!
//! Availability is a total relation over (person, date, kind): a triple
//! without a record is unavailable. Records on closed events are kept but
//! never consulted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EventKind;

/// Whether a person can attend a given event kind on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Person name.
    pub person: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Event kind.
    pub kind: EventKind,
    /// Declared available.
    pub available: bool,
}

impl AvailabilityRecord {
    /// Creates a record.
    pub fn new(person: impl Into<String>, date: NaiveDate, kind: EventKind, available: bool) -> Self {
        Self {
            person: person.into(),
            date,
            kind,
            available,
        }
    }

    /// Shorthand for an `available = true` record.
    pub fn available(person: impl Into<String>, date: NaiveDate, kind: EventKind) -> Self {
        Self::new(person, date, kind, true)
    }

    /// Shorthand for an `available = false` record.
    pub fn unavailable(person: impl Into<String>, date: NaiveDate, kind: EventKind) -> Self {
        Self::new(person, date, kind, false)
    }
}
