//! Assignment (solution) model.
//!
//! An assignment table records which person attends which event kind on
//! which date. The solve driver is the only producer of tables from a
//! solve, but the validator also accepts hand-edited ones, so nothing here
//! assumes the table is consistent.

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::EventKind;

/// State of a (person, date, kind) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    /// Not attending.
    Unassigned,
    /// Attending.
    Assigned,
    /// Attending a shift as the day's referent. Implies `Assigned`.
    Referent,
}

impl AssignmentState {
    /// Whether the person attends (assigned or referent).
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, AssignmentState::Unassigned)
    }
}

/// One (person, date, kind) → state row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Person name.
    pub person: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Event kind.
    pub kind: EventKind,
    /// Assignment state.
    pub state: AssignmentState,
}

impl AssignmentRecord {
    /// Creates a record.
    pub fn new(
        person: impl Into<String>,
        date: NaiveDate,
        kind: EventKind,
        state: AssignmentState,
    ) -> Self {
        Self {
            person: person.into(),
            date,
            kind,
            state,
        }
    }

    /// An `Assigned` record.
    pub fn assigned(person: impl Into<String>, date: NaiveDate, kind: EventKind) -> Self {
        Self::new(person, date, kind, AssignmentState::Assigned)
    }

    /// A `Referent` shift record.
    pub fn referent(person: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(person, date, EventKind::Shift, AssignmentState::Referent)
    }
}

/// Filter over an assignment table. Unset fields match everything.
///
/// Only active records (assigned or referent) ever match.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentQuery<'q> {
    person: Option<&'q str>,
    date: Option<NaiveDate>,
    kind: Option<EventKind>,
    referent_only: bool,
}

impl<'q> AssignmentQuery<'q> {
    /// Matches every active record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one person.
    pub fn person(mut self, name: &'q str) -> Self {
        self.person = Some(name);
        self
    }

    /// Restricts to one date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Restricts to one event kind.
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to referent shift records. A `Referent` state on any
    /// other kind is malformed and never counts as a referent duty.
    pub fn referents(mut self) -> Self {
        self.referent_only = true;
        self
    }

    /// Whether a record satisfies the filter.
    pub fn matches(&self, record: &AssignmentRecord) -> bool {
        record.state.is_active()
            && self.person.map_or(true, |p| record.person == p)
            && self.date.map_or(true, |d| record.date == d)
            && self.kind.map_or(true, |k| record.kind == k)
            && (!self.referent_only
                || (record.state == AssignmentState::Referent && record.kind == EventKind::Shift))
    }
}

/// An ordered assignment table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignments {
    /// Rows in production order.
    pub records: Vec<AssignmentRecord>,
}

impl Assignments {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing rows.
    pub fn from_records(records: Vec<AssignmentRecord>) -> Self {
        Self { records }
    }

    /// Appends a row.
    pub fn push(&mut self, record: AssignmentRecord) {
        self.records.push(record);
    }

    /// Builder: appends a row and returns self.
    pub fn with(mut self, record: AssignmentRecord) -> Self {
        self.push(record);
        self
    }

    /// Rows matching the query, in table order.
    pub fn filter<'a>(
        &'a self,
        query: AssignmentQuery<'a>,
    ) -> impl Iterator<Item = &'a AssignmentRecord> + 'a {
        self.records.iter().filter(move |r| query.matches(r))
    }

    /// Number of rows matching the query.
    ///
    /// Duplicated rows are counted once each; use [`Self::count_persons`]
    /// or [`Self::dates_of`] for head counts.
    pub fn count(&self, query: AssignmentQuery<'_>) -> usize {
        self.records.iter().filter(|r| query.matches(r)).count()
    }

    /// Number of distinct persons among the rows matching the query.
    pub fn count_persons(&self, query: AssignmentQuery<'_>) -> usize {
        self.filter(query)
            .map(|r| r.person.as_str())
            .collect::<IndexSet<_>>()
            .len()
    }

    /// Sorted, de-duplicated dates of the rows matching the query.
    pub fn dates_of(&self, query: AssignmentQuery<'_>) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.filter(query).map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// (person, date, kind) slots held by more than one row, with their row
    /// count, in order of first appearance. Unassigned rows count too.
    pub fn duplicates(&self) -> Vec<(&AssignmentRecord, usize)> {
        let mut seen: IndexMap<(&str, NaiveDate, EventKind), (&AssignmentRecord, usize)> =
            IndexMap::new();
        for record in &self.records {
            seen.entry((record.person.as_str(), record.date, record.kind))
                .or_insert((record, 0))
                .1 += 1;
        }
        seen.into_values().filter(|&(_, n)| n > 1).collect()
    }

    /// Active rows (assigned or referent).
    pub fn active(&self) -> impl Iterator<Item = &AssignmentRecord> {
        self.records.iter().filter(|r| r.state.is_active())
    }

    /// Sorted, de-duplicated shift dates of a person.
    pub fn shift_dates_of(&self, person: &str) -> Vec<NaiveDate> {
        self.dates_of(AssignmentQuery::new().person(person).kind(EventKind::Shift))
    }

    /// Sorted, de-duplicated dates with at least one active shift row.
    pub fn open_shift_dates(&self) -> Vec<NaiveDate> {
        self.dates_of(AssignmentQuery::new().kind(EventKind::Shift))
    }

    /// Mutable access to the row for (person, date, kind), if any.
    pub fn find_mut(
        &mut self,
        person: &str,
        date: NaiveDate,
        kind: EventKind,
    ) -> Option<&mut AssignmentRecord> {
        self.records
            .iter_mut()
            .find(|r| r.person == person && r.date == date && r.kind == kind)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
