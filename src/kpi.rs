//! Planning quality indicators (KPIs).
//!
//! Computes summary indicators of an assignment table against its
//! planning input. Unlike the validator, the KPIs do not judge compliance;
//! they describe how much of the calendar is covered and how the load is
//! spread. Duplicated rows count once.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Open shift dates | Shift-open dates with at least one person |
//! | Coverage rate | Open shift dates / shift-open dates |
//! | Person-shifts | Distinct (person, date) shift slots |
//! | Load per person | Shifts and referent duties per person |
//! | Gap attendance | Persons per franco gap date |
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering", §3: Objectives

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AssignmentQuery, Assignments, EventKind, Planning};

/// Planning indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningKpi {
    /// Shift-open dates with at least one assigned person.
    pub open_shift_dates: usize,
    /// Dates whose event has the shift kind open.
    pub shift_event_dates: usize,
    /// `open_shift_dates / shift_event_dates` (1.0 when there is no shift event).
    pub coverage_rate: f64,
    /// Number of distinct (person, date) shift slots.
    pub total_person_shifts: usize,
    /// Mean shifts per person (0.0 without persons).
    pub avg_shifts_per_person: f64,
    /// Shifts per person, every person listed.
    pub shifts_by_person: BTreeMap<String, usize>,
    /// Referent duties per person, every person listed.
    pub referents_by_person: BTreeMap<String, usize>,
    /// Attendance per franco gap date, every gap-open date listed.
    pub gap_attendance: BTreeMap<NaiveDate, usize>,
    /// Persons with more shifts than their wish.
    pub persons_over_wish: Vec<String>,
    /// Persons with no shift at all.
    pub persons_without_shift: Vec<String>,
}

impl PlanningKpi {
    /// Computes the indicators.
    ///
    /// Rows naming unknown persons count towards date totals but not
    /// towards per-person maps.
    pub fn calculate(planning: &Planning, assignments: &Assignments) -> Self {
        let shift_dates = planning.open_dates(EventKind::Shift);
        let open_shift_dates = shift_dates
            .iter()
            .filter(|&&d| assignments.count(AssignmentQuery::new().on(d).kind(EventKind::Shift)) > 0)
            .count();
        let staffed = |d: NaiveDate| {
            assignments.count_persons(AssignmentQuery::new().on(d).kind(EventKind::Shift))
        };
        let coverage_rate = if shift_dates.is_empty() {
            1.0
        } else {
            open_shift_dates as f64 / shift_dates.len() as f64
        };

        let mut shifts_by_person = BTreeMap::new();
        let mut referents_by_person = BTreeMap::new();
        let mut persons_over_wish = Vec::new();
        let mut persons_without_shift = Vec::new();
        for person in planning.persons() {
            let shifts = assignments.shift_dates_of(&person.name).len();
            let referents = assignments
                .dates_of(AssignmentQuery::new().person(&person.name).referents())
                .len();
            if person.shift_wish.is_some_and(|wish| shifts > wish as usize) {
                persons_over_wish.push(person.name.clone());
            }
            if shifts == 0 {
                persons_without_shift.push(person.name.clone());
            }
            shifts_by_person.insert(person.name.clone(), shifts);
            referents_by_person.insert(person.name.clone(), referents);
        }

        let gap_attendance = planning
            .open_dates(EventKind::GapFranco)
            .into_iter()
            .map(|d| {
                (
                    d,
                    assignments.count_persons(AssignmentQuery::new().on(d).kind(EventKind::GapFranco)),
                )
            })
            .collect();

        let total_person_shifts = assignments
            .open_shift_dates()
            .into_iter()
            .map(staffed)
            .sum();
        let avg_shifts_per_person = if planning.person_count() == 0 {
            0.0
        } else {
            shifts_by_person.values().sum::<usize>() as f64 / planning.person_count() as f64
        };

        Self {
            open_shift_dates,
            shift_event_dates: shift_dates.len(),
            coverage_rate,
            total_person_shifts,
            avg_shifts_per_person,
            shifts_by_person,
            referents_by_person,
            gap_attendance,
            persons_over_wish,
            persons_without_shift,
        }
    }

    /// Whether the coverage rate reaches `min_coverage` and nobody exceeds
    /// their wish.
    pub fn meets_thresholds(&self, min_coverage: f64) -> bool {
        self.coverage_rate >= min_coverage && self.persons_over_wish.is_empty()
    }
}
