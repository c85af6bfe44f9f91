//! Policy rule checks over an assignment table.
//!
//! Every rule the model builder encodes is recomputed here directly from
//! the assignment rows, never from solver variables. The checks accept
//! hand-edited tables, so nothing assumes the rows are consistent.

use chrono::NaiveDate;
use tracing::debug;

use super::comparator::{Comparison, DayMonth};
use super::report::ViolationReport;
use crate::error::Result;
use crate::models::{
    AssignmentQuery, AssignmentState, Assignments, EventKind, GapModality, Parameters, Planning,
};

/// Category titles and subtitles used in reports.
pub mod category {
    /// Table integrity group.
    pub const ASSIGNMENTS: &str = "assignments";
    /// Several rows for one (person, date, kind) slot.
    pub const DUPLICATE_ASSIGNMENT: &str = "duplicate_assignment";

    /// Availability group.
    pub const AVAILABILITIES: &str = "availabilities";
    /// Active row without an `available = true` record.
    pub const ASSIGNED_WITHOUT_AVAILABILITY: &str = "assigned_without_availability";

    /// Event calendar group.
    pub const EVENTS: &str = "events";
    /// Active row on a closed (date, kind).
    pub const CLOSED_EVENT: &str = "closed_event";

    /// Shift group.
    pub const SHIFT_RULES: &str = "shift_rules";
    /// Shift quota.
    pub const MAX_SHIFT_PER_PERSON: &str = "max_shift_per_person_per_month";
    /// Nonzero attendance under the minimum.
    pub const MIN_PER_SHIFT_OPEN: &str = "min_per_shift_open";
    /// Shift-open date left unstaffed while coverage is mandatory.
    pub const UNCOVERED_OPEN_SHIFT: &str = "uncovered_open_shift";
    /// Two shifts of one person too close together.
    pub const SHIFT_SPACING: &str = "max_person_per_shift";
    /// More shifts than the person wished.
    pub const SHIFT_WISH: &str = "shift_wish";

    /// Referent group.
    pub const REFERENCE_RULES: &str = "reference_rules";
    /// Referent quota.
    pub const MAX_REFERENCE_PER_PERSON: &str = "max_number_reference_per_person_per_month";
    /// Newcomer holding a referent duty.
    pub const NO_REFERENCE_FOR_NEWCOMERS: &str = "no_reference_for_babies";
    /// Referent duty without consent.
    pub const REFERENT_WITHOUT_CONSENT: &str = "referent_without_consent";
    /// Referent state on a kind other than shift.
    pub const REFERENT_OUTSIDE_SHIFT: &str = "referent_outside_shift";
    /// Wrong referent count on an open shift.
    pub const EXACT_REFERENT_PER_OPEN_SHIFT: &str = "exact_number_referent_per_open_shift";

    /// Gap group.
    pub const GAP_RULES: &str = "gap_rules";
    /// More than one gap for a person.
    pub const MAX_GAP_PER_PERSON: &str = "max_gap_per_person";
    /// Gap over capacity.
    pub const MAX_PERSON_IN_GAP: &str = "max_number_person_in_gap";
    /// Nonzero gap attendance under the minimum.
    pub const MIN_PERSON_IN_GAP: &str = "min_number_person_in_gap";
    /// Shift before the first gap.
    pub const NO_SHIFT_IF_NO_GAP_BEFORE: &str = "no_shift_if_no_gap_before";
}

use category::*;

/// Checks an assignment table against the planning input and parameters.
///
/// Pure: the same inputs always yield the same report, in the same order.
/// Rule groups are checked in a fixed order: assignments, availabilities,
/// events, shifts, referents, gaps. Duplicated rows are reported once and
/// then count as a single attendance everywhere else.
///
/// # Errors
/// `PlanningError::UnsupportedGapModality` if the gap modality has no
/// implementation. No other condition is an error; everything else is a
/// finding in the report.
pub fn validate_assignments(
    planning: &Planning,
    assignments: &Assignments,
    params: &Parameters,
) -> Result<ViolationReport> {
    params.require_supported_gap_modality()?;

    let mut report = ViolationReport::new();
    check_duplicates(&mut report, assignments);
    check_availabilities(&mut report, planning, assignments);
    check_events(&mut report, planning, assignments);
    check_shift_rules(&mut report, planning, assignments, params);
    check_reference_rules(&mut report, planning, assignments, params);
    check_gap_rules(&mut report, planning, assignments, params);

    debug!(
        rows = assignments.len(),
        violations = report.len(),
        "assignment table validated"
    );
    Ok(report)
}

fn check_duplicates(report: &mut ViolationReport, assignments: &Assignments) {
    let mut scope = report.scope(ASSIGNMENTS, DUPLICATE_ASSIGNMENT);
    for (record, rows) in assignments.duplicates() {
        scope.add(format!(
            "'{}' on '{}' for the '{}' appears in '{rows}' rows.",
            record.person,
            DayMonth(record.date),
            record.kind
        ));
    }
}

fn check_availabilities(report: &mut ViolationReport, planning: &Planning, assignments: &Assignments) {
    let mut scope = report.scope(AVAILABILITIES, ASSIGNED_WITHOUT_AVAILABILITY);
    for record in assignments.active() {
        if !planning.is_available_by_name(&record.person, record.date, record.kind) {
            scope.add(format!(
                "'{}' on '{}' for the '{}' is not available but has been assigned to it.",
                record.person,
                DayMonth(record.date),
                record.kind
            ));
        }
    }
}

fn check_events(report: &mut ViolationReport, planning: &Planning, assignments: &Assignments) {
    let mut scope = report.scope(EVENTS, CLOSED_EVENT);
    for record in assignments.active() {
        if !planning.is_open(record.date, record.kind) {
            scope.add(format!(
                "'{}' is assigned to the '{}' on '{}' but it is not open.",
                record.person,
                record.kind,
                DayMonth(record.date)
            ));
        }
    }
}

fn check_shift_rules(
    report: &mut ViolationReport,
    planning: &Planning,
    assignments: &Assignments,
    params: &Parameters,
) {
    let shifts_of = |name: &str| assignments.shift_dates_of(name).len();
    let staffed = |date: NaiveDate| {
        assignments.count_persons(AssignmentQuery::new().on(date).kind(EventKind::Shift))
    };

    let mut scope = report.scope(SHIFT_RULES, MAX_SHIFT_PER_PERSON);
    for person in planning.persons() {
        scope.check_person(
            &person.name,
            "has too many shifts on the month",
            shifts_of(&person.name),
            Comparison::Greater,
            params.max_shift_per_person_per_month as usize,
        );
    }

    let min = params.min_person_per_shift as usize;
    let mut scope = report.scope(SHIFT_RULES, MIN_PER_SHIFT_OPEN);
    for &date in planning.dates() {
        let n = staffed(date);
        if n > 0 && n < min {
            scope.add(format!(
                "On '{}' the number of persons on the shift is abnormal : 0 < '{n}' < '{min}'",
                DayMonth(date)
            ));
        }
    }

    if params.require_shift_coverage {
        let mut scope = report.scope(SHIFT_RULES, UNCOVERED_OPEN_SHIFT);
        for date in planning.open_dates(EventKind::Shift) {
            if staffed(date) == 0 {
                scope.add(format!("On '{}' the open shift has nobody.", DayMonth(date)));
            }
        }
    }

    let min_days = i64::from(params.min_days_between_two_shifts);
    let mut scope = report.scope(SHIFT_RULES, SHIFT_SPACING);
    for person in planning.persons() {
        let dates = assignments.shift_dates_of(&person.name);
        for pair in dates.windows(2) {
            let (d1, d2) = (pair[0], pair[1]);
            scope.check_person(
                &person.name,
                &format!(
                    "has two shifts too close, difference between '{}' and '{}'",
                    DayMonth(d1),
                    DayMonth(d2)
                ),
                (d2 - d1).num_days(),
                Comparison::Less,
                min_days,
            );
        }
    }

    if params.respect_shift_wishes {
        let mut scope = report.scope(SHIFT_RULES, SHIFT_WISH);
        for person in planning.persons() {
            if let Some(wish) = person.shift_wish {
                scope.check_person(
                    &person.name,
                    "has more shifts than wished",
                    shifts_of(&person.name),
                    Comparison::Greater,
                    wish as usize,
                );
            }
        }
    }
}

fn check_reference_rules(
    report: &mut ViolationReport,
    planning: &Planning,
    assignments: &Assignments,
    params: &Parameters,
) {
    let references_of =
        |name: &str| assignments.dates_of(AssignmentQuery::new().person(name).referents()).len();

    let mut scope = report.scope(REFERENCE_RULES, MAX_REFERENCE_PER_PERSON);
    for person in planning.persons() {
        scope.check_person(
            &person.name,
            "has too many references",
            references_of(&person.name),
            Comparison::Greater,
            params.max_reference_per_person_per_month as usize,
        );
    }

    let mut scope = report.scope(REFERENCE_RULES, NO_REFERENCE_FOR_NEWCOMERS);
    for person in planning.persons().iter().filter(|p| p.is_new) {
        let n = references_of(&person.name);
        if n > 0 {
            scope.add(format!(
                "'{}' is a newcomer but holds '{n}' reference(s).",
                person.name
            ));
        }
    }

    // Newcomers are already covered above.
    if params.referents_need_consent {
        let mut scope = report.scope(REFERENCE_RULES, REFERENT_WITHOUT_CONSENT);
        for person in planning
            .persons()
            .iter()
            .filter(|p| !p.is_new && !p.agrees_to_be_referent)
        {
            let n = references_of(&person.name);
            if n > 0 {
                scope.add(format!(
                    "'{}' did not agree to be referent but holds '{n}' reference(s).",
                    person.name
                ));
            }
        }
    }

    let mut scope = report.scope(REFERENCE_RULES, REFERENT_OUTSIDE_SHIFT);
    for record in assignments
        .records
        .iter()
        .filter(|r| r.state == AssignmentState::Referent && r.kind != EventKind::Shift)
    {
        scope.add(format!(
            "'{}' is referent on '{}' for the '{}', which is not a shift.",
            record.person,
            DayMonth(record.date),
            record.kind
        ));
    }

    let exact = params.exact_referent_per_open_shift as usize;
    let mut scope = report.scope(REFERENCE_RULES, EXACT_REFERENT_PER_OPEN_SHIFT);
    for date in assignments.open_shift_dates() {
        scope.check_on(
            date,
            "there is not the right number of referents on an open shift",
            assignments.count_persons(AssignmentQuery::new().on(date).referents()),
            Comparison::NotEqual,
            exact,
        );
    }
}

fn check_gap_rules(
    report: &mut ViolationReport,
    planning: &Planning,
    assignments: &Assignments,
    params: &Parameters,
) {
    let gap_dates_of = |name: &str| {
        assignments.dates_of(AssignmentQuery::new().person(name).kind(EventKind::GapFranco))
    };

    let mut scope = report.scope(GAP_RULES, MAX_GAP_PER_PERSON);
    for person in planning.persons() {
        scope.check_person(
            &person.name,
            "attends too many gaps",
            gap_dates_of(&person.name).len(),
            Comparison::Greater,
            1,
        );
    }

    let gap_dates = planning.open_dates(EventKind::GapFranco);
    let attendance = |date: NaiveDate| {
        assignments.count_persons(AssignmentQuery::new().on(date).kind(EventKind::GapFranco))
    };

    let mut scope = report.scope(GAP_RULES, MAX_PERSON_IN_GAP);
    for &date in &gap_dates {
        scope.check_on(
            date,
            "there are too many persons on the gap",
            attendance(date),
            Comparison::Greater,
            params.max_person_per_gap as usize,
        );
    }

    let mut scope = report.scope(GAP_RULES, MIN_PERSON_IN_GAP);
    for &date in &gap_dates {
        let n = attendance(date);
        if n > 0 {
            scope.check_on(
                date,
                "there are too few persons on the gap",
                n,
                Comparison::Less,
                params.min_person_per_gap as usize,
            );
        }
    }

    match params.gap_modality {
        GapModality::Month => {
            let mut scope = report.scope(GAP_RULES, NO_SHIFT_IF_NO_GAP_BEFORE);
            for person in planning.persons().iter().filter(|p| !p.did_gap_last_period) {
                let first_gap = gap_dates_of(&person.name).first().copied();
                for shift in assignments.shift_dates_of(&person.name) {
                    match first_gap {
                        Some(gap) => {
                            scope.check_person(
                                &person.name,
                                "did not do a gap last month and has a shift not after their gap",
                                DayMonth(shift),
                                Comparison::LessOrEqual,
                                DayMonth(gap),
                            );
                        }
                        None => scope.add(format!(
                            "'{}' did not do a gap last month and has a shift on '{}' without any gap.",
                            person.name,
                            DayMonth(shift)
                        )),
                    }
                }
            }
        }
        // Rejected up front by `require_supported_gap_modality`.
        GapModality::Shifts => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanningError;
    use crate::models::{AssignmentRecord, AvailabilityRecord, Event, Person};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    /// Three persons, shifts on the 2nd, 4th and 12th, gap on the 1st.
    /// Everyone is available for everything.
    fn planning_with(persons: Vec<Person>) -> Planning {
        let events = vec![
            Event::new(day(1)).with_gap(),
            Event::new(day(2)).with_shift(),
            Event::new(day(4)).with_shift(),
            Event::new(day(12)).with_shift(),
        ];
        let mut avail = Vec::new();
        for p in &persons {
            for e in &events {
                for kind in EventKind::ALL {
                    if e.is_open(kind) {
                        avail.push(AvailabilityRecord::available(p.name.clone(), e.date, kind));
                    }
                }
            }
        }
        Planning::new(events, persons, avail).unwrap()
    }

    fn trio() -> Vec<Person> {
        vec![Person::new("Ana"), Person::new("Bob"), Person::new("Cid")]
    }

    fn params() -> Parameters {
        Parameters::default()
    }

    /// A compliant table: everyone on the 2nd, Ana referent.
    fn compliant() -> Assignments {
        Assignments::new()
            .with(AssignmentRecord::referent("Ana", day(2)))
            .with(AssignmentRecord::assigned("Bob", day(2), EventKind::Shift))
            .with(AssignmentRecord::assigned("Cid", day(2), EventKind::Shift))
    }

    #[test]
    fn test_compliant_table_has_no_violation() {
        let report = validate_assignments(&planning_with(trio()), &compliant(), &params()).unwrap();
        assert!(report.is_empty(), "{report}");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let planning = planning_with(trio());
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(4), EventKind::Shift))
            .with(AssignmentRecord::assigned("Zoe", day(3), EventKind::Screening));
        let first = validate_assignments(&planning, &table, &params()).unwrap();
        let second = validate_assignments(&planning, &table, &params()).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_assignment_without_availability() {
        let planning = Planning::new(
            vec![Event::new(day(2)).with_shift()],
            vec![Person::new("Ana")],
            vec![AvailabilityRecord::unavailable("Ana", day(2), EventKind::Shift)],
        )
        .unwrap();
        let table = Assignments::new().with(AssignmentRecord::assigned("Ana", day(2), EventKind::Shift));
        let p = params().with_min_person_per_shift(1).with_exact_referents(0);
        let report = validate_assignments(&planning, &table, &p).unwrap();
        assert_eq!(report.count_in(AVAILABILITIES, ASSIGNED_WITHOUT_AVAILABILITY), 1);
        assert!(report.violations()[0].message.contains("'Ana' on '02/05'"));
    }

    #[test]
    fn test_closed_event() {
        let table = compliant().with(AssignmentRecord::assigned("Bob", day(2), EventKind::GapFranco));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        assert_eq!(report.count_in(EVENTS, CLOSED_EVENT), 1);
    }

    #[test]
    fn test_shift_quota() {
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(12), EventKind::Shift));
        let report =
            validate_assignments(&planning_with(trio()), &table, &params().with_max_shifts(1)).unwrap();
        let found: Vec<_> = report.in_category(SHIFT_RULES, MAX_SHIFT_PER_PERSON).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "'Ana' has too many shifts on the month : '2' > '1'");
    }

    #[test]
    fn test_abnormal_shift_attendance() {
        let table = Assignments::new()
            .with(AssignmentRecord::referent("Ana", day(2)))
            .with(AssignmentRecord::assigned("Bob", day(2), EventKind::Shift));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        assert_eq!(report.count_in(SHIFT_RULES, MIN_PER_SHIFT_OPEN), 1);
    }

    #[test]
    fn test_uncovered_open_shift() {
        let planning = planning_with(trio());
        let report = validate_assignments(&planning, &compliant(), &params()).unwrap();
        assert_eq!(report.count_in(SHIFT_RULES, UNCOVERED_OPEN_SHIFT), 0);

        let strict = params().with_shift_coverage(true);
        let report = validate_assignments(&planning, &compliant(), &strict).unwrap();
        let found: Vec<_> = report.in_category(SHIFT_RULES, UNCOVERED_OPEN_SHIFT).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].message, "On '04/05' the open shift has nobody.");
    }

    #[test]
    fn test_spacing_names_both_dates() {
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(4), EventKind::Shift))
            .with(AssignmentRecord::assigned("Ana", day(12), EventKind::Shift));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        let found: Vec<_> = report.in_category(SHIFT_RULES, SHIFT_SPACING).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("'02/05'"));
        assert!(found[0].message.contains("'04/05'"));
        assert!(found[0].message.ends_with(": '2' < '6'"));
    }

    #[test]
    fn test_spacing_exact_gap_is_allowed() {
        let table = compliant().with(AssignmentRecord::assigned("Ana", day(12), EventKind::Shift));
        let p = params().with_min_days_between_shifts(10);
        let report = validate_assignments(&planning_with(trio()), &table, &p).unwrap();
        assert_eq!(report.count_in(SHIFT_RULES, SHIFT_SPACING), 0);
    }

    #[test]
    fn test_shift_wish() {
        let persons = vec![
            Person::new("Ana"),
            Person::new("Bob").with_shift_wish(0),
            Person::new("Cid"),
        ];
        let planning = planning_with(persons);
        let report = validate_assignments(&planning, &compliant(), &params()).unwrap();
        assert_eq!(report.count_in(SHIFT_RULES, SHIFT_WISH), 1);

        let relaxed = params().with_shift_wishes(false);
        let report = validate_assignments(&planning, &compliant(), &relaxed).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_newcomer_referent() {
        let persons = vec![Person::new("Ana").newcomer(), Person::new("Bob"), Person::new("Cid")];
        let report = validate_assignments(&planning_with(persons), &compliant(), &params()).unwrap();
        assert_eq!(report.count_in(REFERENCE_RULES, NO_REFERENCE_FOR_NEWCOMERS), 1);
        assert_eq!(report.count_in(REFERENCE_RULES, REFERENT_WITHOUT_CONSENT), 0);
    }

    #[test]
    fn test_referent_without_consent() {
        let persons = vec![
            Person::new("Ana").with_referent_consent(false),
            Person::new("Bob"),
            Person::new("Cid"),
        ];
        let report = validate_assignments(&planning_with(persons), &compliant(), &params()).unwrap();
        assert_eq!(report.count_in(REFERENCE_RULES, REFERENT_WITHOUT_CONSENT), 1);
    }

    #[test]
    fn test_referent_quota_and_outside_shift() {
        let table = compliant()
            .with(AssignmentRecord::new(
                "Ana",
                day(1),
                EventKind::GapFranco,
                AssignmentState::Referent,
            ));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        assert_eq!(report.count_in(REFERENCE_RULES, REFERENT_OUTSIDE_SHIFT), 1);
        assert_eq!(report.count_in(REFERENCE_RULES, MAX_REFERENCE_PER_PERSON), 0);
        assert_eq!(report.count_in(REFERENCE_RULES, EXACT_REFERENT_PER_OPEN_SHIFT), 0);

        let table = compliant().with(AssignmentRecord::referent("Ana", day(4)));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        assert_eq!(report.count_in(REFERENCE_RULES, MAX_REFERENCE_PER_PERSON), 1);
    }

    #[test]
    fn test_duplicated_rows_do_not_staff_a_shift() {
        let table = Assignments::new()
            .with(AssignmentRecord::referent("Ana", day(2)))
            .with(AssignmentRecord::assigned("Bob", day(2), EventKind::Shift))
            .with(AssignmentRecord::assigned("Bob", day(2), EventKind::Shift));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        let found: Vec<_> = report.in_category(ASSIGNMENTS, DUPLICATE_ASSIGNMENT).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "'Bob' on '02/05' for the 'shift' appears in '2' rows.");
        assert_eq!(report.count_in(SHIFT_RULES, MIN_PER_SHIFT_OPEN), 1);
        assert_eq!(report.len(), 2, "{report}");
    }

    #[test]
    fn test_assigned_and_referent_rows_for_one_slot() {
        let table = compliant().with(AssignmentRecord::assigned("Ana", day(2), EventKind::Shift));
        let p = params().with_min_person_per_shift(4);
        let report = validate_assignments(&planning_with(trio()), &table, &p).unwrap();
        assert_eq!(report.count_in(ASSIGNMENTS, DUPLICATE_ASSIGNMENT), 1);
        assert_eq!(report.count_in(SHIFT_RULES, MIN_PER_SHIFT_OPEN), 1);
        assert_eq!(report.count_in(SHIFT_RULES, MAX_SHIFT_PER_PERSON), 0);
        assert_eq!(report.count_in(REFERENCE_RULES, EXACT_REFERENT_PER_OPEN_SHIFT), 0);
    }

    #[test]
    fn test_duplicated_gap_rows_count_once() {
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(1), EventKind::GapFranco))
            .with(AssignmentRecord::assigned("Ana", day(1), EventKind::GapFranco));
        let p = params().with_gap_bounds(2, 10);
        let report = validate_assignments(&planning_with(trio()), &table, &p).unwrap();
        assert_eq!(report.count_in(ASSIGNMENTS, DUPLICATE_ASSIGNMENT), 1);
        assert_eq!(report.count_in(GAP_RULES, MAX_GAP_PER_PERSON), 0);
        assert_eq!(report.count_in(GAP_RULES, MIN_PERSON_IN_GAP), 1);
    }

    #[test]
    fn test_exact_referent_count() {
        let table = Assignments::new()
            .with(AssignmentRecord::assigned("Ana", day(2), EventKind::Shift))
            .with(AssignmentRecord::assigned("Bob", day(2), EventKind::Shift))
            .with(AssignmentRecord::assigned("Cid", day(2), EventKind::Shift));
        let report = validate_assignments(&planning_with(trio()), &table, &params()).unwrap();
        let found: Vec<_> = report
            .in_category(REFERENCE_RULES, EXACT_REFERENT_PER_OPEN_SHIFT)
            .collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].message.starts_with("On '02/05'"));
    }

    #[test]
    fn test_gap_bounds_and_quota() {
        let table = Assignments::new()
            .with(AssignmentRecord::assigned("Ana", day(1), EventKind::GapFranco))
            .with(AssignmentRecord::assigned("Bob", day(1), EventKind::GapFranco));
        let p = params().with_gap_bounds(3, 10);
        let report = validate_assignments(&planning_with(trio()), &table, &p).unwrap();
        assert_eq!(report.count_in(GAP_RULES, MIN_PERSON_IN_GAP), 1);
        assert_eq!(report.count_in(GAP_RULES, MAX_PERSON_IN_GAP), 0);

        let p = params().with_gap_bounds(1, 1);
        let report = validate_assignments(&planning_with(trio()), &table, &p).unwrap();
        assert_eq!(report.count_in(GAP_RULES, MAX_PERSON_IN_GAP), 1);
        assert_eq!(report.count_in(GAP_RULES, MAX_GAP_PER_PERSON), 0);
    }

    #[test]
    fn test_shift_before_gap() {
        let persons = vec![
            Person::new("Ana").with_gap_last_period(false),
            Person::new("Bob").with_gap_last_period(false),
            Person::new("Cid"),
        ];
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(4), EventKind::GapFranco));
        let report = validate_assignments(&planning_with(persons), &table, &params()).unwrap();
        let found: Vec<_> = report.in_category(GAP_RULES, NO_SHIFT_IF_NO_GAP_BEFORE).collect();
        // Ana: shift on 02/05 not after gap on 04/05. Bob: no gap at all.
        assert_eq!(found.len(), 2);
        assert!(found[0].message.contains("'02/05' <= '04/05'"));
        assert!(found[1].message.contains("without any gap"));
    }

    #[test]
    fn test_gap_before_shift_is_compliant() {
        let persons = vec![
            Person::new("Ana").with_gap_last_period(false),
            Person::new("Bob"),
            Person::new("Cid"),
        ];
        let table = compliant()
            .with(AssignmentRecord::assigned("Ana", day(1), EventKind::GapFranco));
        let report = validate_assignments(&planning_with(persons), &table, &params()).unwrap();
        assert!(report.is_empty(), "{report}");
    }

    #[test]
    fn test_shifts_modality_fails_fast() {
        let p = params().with_gap_modality(GapModality::Shifts);
        let err = validate_assignments(&planning_with(trio()), &compliant(), &p).unwrap_err();
        assert!(matches!(err, PlanningError::UnsupportedGapModality(GapModality::Shifts)));
    }
}
