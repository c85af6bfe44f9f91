//! Planning input bundle.
//!
//! Groups the three tables handed over by the ingestion collaborator
//! (events, persons, availability) and derives the lookups the builder and
//! the validator share. Construction checks the structural invariants once,
//! so downstream code can index without re-checking.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use super::{AvailabilityRecord, Event, EventKind, Person};
use crate::error::{PlanningError, Result};
use crate::validation::validate_input;

/// Validated input of one planning period.
#[derive(Debug, Clone, Serialize)]
pub struct Planning {
    events: Vec<Event>,
    persons: Vec<Person>,
    availabilities: Vec<AvailabilityRecord>,
    #[serde(skip)]
    dates: Vec<NaiveDate>,
    #[serde(skip)]
    event_by_date: HashMap<NaiveDate, usize>,
    #[serde(skip)]
    person_by_name: HashMap<String, usize>,
    #[serde(skip)]
    availability: HashMap<(usize, NaiveDate, EventKind), bool>,
}

impl Planning {
    /// Builds the bundle.
    ///
    /// # Errors
    /// `PlanningError::InvalidInput` listing every duplicate date, duplicate
    /// person name, or availability row pointing at an unknown person or date.
    pub fn new(
        events: Vec<Event>,
        persons: Vec<Person>,
        availabilities: Vec<AvailabilityRecord>,
    ) -> Result<Self> {
        validate_input(&events, &persons, &availabilities).map_err(PlanningError::InvalidInput)?;

        let mut dates: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
        dates.sort();

        let event_by_date = events
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.date, idx))
            .collect();
        let person_by_name: HashMap<String, usize> = persons
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.name.clone(), idx))
            .collect();

        // Later rows win when the same triple is declared twice.
        let mut availability = HashMap::with_capacity(availabilities.len());
        for record in &availabilities {
            if let Some(&person_idx) = person_by_name.get(&record.person) {
                availability.insert((person_idx, record.date, record.kind), record.available);
            }
        }

        Ok(Self {
            events,
            persons,
            availabilities,
            dates,
            event_by_date,
            person_by_name,
            availability,
        })
    }

    /// Event rows in input order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Persons in input order. Person indices refer to this slice.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Raw availability rows.
    pub fn availabilities(&self) -> &[AvailabilityRecord] {
        &self.availabilities
    }

    /// Distinct event dates, ascending. Date indices refer to this slice.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of persons.
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Number of distinct dates.
    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Index of a person by name.
    pub fn person_index(&self, name: &str) -> Option<usize> {
        self.person_by_name.get(name).copied()
    }

    /// Person by name.
    pub fn person(&self, name: &str) -> Option<&Person> {
        self.person_index(name).map(|idx| &self.persons[idx])
    }

    /// Event row of a date.
    pub fn event_on(&self, date: NaiveDate) -> Option<&Event> {
        self.event_by_date.get(&date).map(|&idx| &self.events[idx])
    }

    /// Whether `kind` takes place on `date`. Unknown dates are closed.
    pub fn is_open(&self, date: NaiveDate, kind: EventKind) -> bool {
        self.event_on(date).is_some_and(|e| e.is_open(kind))
    }

    /// Dates on which `kind` is open, ascending.
    pub fn open_dates(&self, kind: EventKind) -> Vec<NaiveDate> {
        self.dates
            .iter()
            .copied()
            .filter(|&d| self.is_open(d, kind))
            .collect()
    }

    /// Whether the person declared themselves available.
    ///
    /// A triple with no record is unavailable.
    pub fn is_available(&self, person_idx: usize, date: NaiveDate, kind: EventKind) -> bool {
        self.availability
            .get(&(person_idx, date, kind))
            .copied()
            .unwrap_or(false)
    }

    /// Same as [`Planning::is_available`], by name. Unknown persons are unavailable.
    pub fn is_available_by_name(&self, name: &str, date: NaiveDate, kind: EventKind) -> bool {
        self.person_index(name)
            .is_some_and(|idx| self.is_available(idx, date, kind))
    }
}
