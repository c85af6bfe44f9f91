//! MILP formulation of the rostering problem.
//!
//! Translates a [`Planning`] and its [`Parameters`] into a binary
//! [`MilpModel`] that any [`MilpSolver`](crate::milp::MilpSolver) can solve.
//!
//! # Model
//!
//! Per person and date: `shift`, `referent`, `gap` (franco) and `screening`.
//! Per date: `open_shift` and `open_gap`, the selectors of the "zero or at
//! least the minimum" disjunctions.
//!
//! Rules, in emission order:
//! 1. closed events force their variables to 0
//! 2. missing availability forces the variable to 0
//! 3. shift quota per person, capped by the shift wish when enabled
//! 4. shift attendance is 0 or at least `min_person_per_shift`; with
//!    `require_shift_coverage`, every shift-open date is staffed
//! 5. two shifts of a person are at least `min_days_between_two_shifts` apart
//! 6. reference quota per person
//! 7. newcomers (and non-consenting persons) are never referent
//! 8. an open shift has exactly `exact_referent_per_open_shift` referents
//! 9. a referent works the shift
//! 10. at most one gap per person
//! 11. gap attendance is 0 or within `[min_person_per_gap, max_person_per_gap]`
//! 12. persons without a gap last period attend one before their first shift
//!
//! The objective ranks the two goals lexicographically: the dominant term
//! is scaled by one more than the largest value the other can take.
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Williams (2013), "Model Building in Mathematical Programming", §9.1

mod variables;

pub use variables::DecisionVariables;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::milp::{LinearExpr, MilpModel, MilpSolver, Relation, VarId};
use crate::models::{Assignments, EventKind, GoalModality, Parameters, Planning};

/// A built model together with its variable layout.
#[derive(Debug, Clone)]
pub struct PlanningModel {
    /// The binary program.
    pub model: MilpModel,
    /// Variable layout, for decoding.
    pub variables: DecisionVariables,
    /// Big-M used by the disjunctions.
    pub big_m: i64,
    /// Weight of the dominant objective term.
    pub dominance: i64,
}

/// Builds the rostering MILP from a planning and its parameters.
///
/// # Example
/// ```no_run
/// use u_roster::formulation::PlanningMilpBuilder;
/// use u_roster::milp::BranchAndBoundSolver;
/// # fn run(planning: &u_roster::models::Planning) -> u_roster::Result<()> {
/// let params = u_roster::models::Parameters::default();
/// let assignments = PlanningMilpBuilder::new(planning, &params)
///     .solve(&BranchAndBoundSolver::new())?;
/// # Ok(()) }
/// ```
pub struct PlanningMilpBuilder<'a> {
    planning: &'a Planning,
    params: &'a Parameters,
    big_m: Option<i64>,
}

impl<'a> PlanningMilpBuilder<'a> {
    /// Creates a builder.
    pub fn new(planning: &'a Planning, params: &'a Parameters) -> Self {
        Self {
            planning,
            params,
            big_m: None,
        }
    }

    /// Overrides the big-M constant.
    pub fn with_big_m(mut self, big_m: i64) -> Self {
        self.big_m = Some(big_m);
        self
    }

    /// Big-M in effect: the override, or one more than the largest count a
    /// disjunction can need.
    pub fn big_m(&self) -> i64 {
        self.big_m.unwrap_or_else(|| {
            let p = self.params;
            let largest = [
                self.planning.person_count() as u32,
                p.min_person_per_shift,
                p.exact_referent_per_open_shift,
                p.min_person_per_gap,
            ]
            .into_iter()
            .max()
            .unwrap_or(0);
            i64::from(largest) + 1
        })
    }

    /// Builds the model.
    ///
    /// # Errors
    /// - `PlanningError::InvalidParameters` for contradictory parameters
    /// - `PlanningError::UnsupportedGapModality` for any gap modality other
    ///   than `Month`
    pub fn build(&self) -> Result<PlanningModel> {
        self.params.check()?;
        self.params.require_supported_gap_modality()?;

        let planning = self.planning;
        let mut model = MilpModel::new("planning");
        let vars = DecisionVariables::register(&mut model, planning.persons(), planning.dates());
        let big_m = self.big_m();

        let mut emitted = model.constraint_count();
        let mut log_rule = |model: &MilpModel, rule: &str| {
            debug!(rule, constraints = model.constraint_count() - emitted, "rule emitted");
            emitted = model.constraint_count();
        };

        self.add_closed_events(&mut model, &vars);
        log_rule(&model, "closed_events");
        self.add_unavailability(&mut model, &vars);
        log_rule(&model, "unavailability");
        self.add_shift_quota(&mut model, &vars);
        log_rule(&model, "shift_quota");
        self.add_shift_occupancy(&mut model, &vars, big_m);
        log_rule(&model, "shift_occupancy");
        self.add_shift_spacing(&mut model, &vars);
        log_rule(&model, "shift_spacing");
        self.add_reference_quota(&mut model, &vars);
        log_rule(&model, "reference_quota");
        self.add_referent_eligibility(&mut model, &vars);
        log_rule(&model, "referent_eligibility");
        self.add_referent_coverage(&mut model, &vars, big_m);
        log_rule(&model, "referent_coverage");
        self.add_referent_implies_shift(&mut model, &vars);
        log_rule(&model, "referent_implies_shift");
        self.add_gap_quota(&mut model, &vars);
        log_rule(&model, "gap_quota");
        self.add_gap_attendance(&mut model, &vars, big_m);
        log_rule(&model, "gap_attendance");
        self.add_gap_before_shift(&mut model, &vars);
        log_rule(&model, "gap_before_shift");

        let dominance = self.set_objective(&mut model, &vars);

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            big_m,
            dominance,
            "planning model built"
        );

        Ok(PlanningModel {
            model,
            variables: vars,
            big_m,
            dominance,
        })
    }

    /// Builds, solves and decodes in one call.
    pub fn solve<S: MilpSolver + ?Sized>(&self, solver: &S) -> Result<Assignments> {
        let built = self.build()?;
        crate::solve::solve_model(self.planning, &built, solver)
    }

    fn person_name(&self, p: usize) -> &str {
        &self.planning.persons()[p].name
    }

    fn dates(&self) -> &[NaiveDate] {
        self.planning.dates()
    }

    // Rule 1
    fn add_closed_events(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        for (d, &date) in self.dates().iter().enumerate() {
            for kind in DecisionVariables::MODELED_KINDS {
                if self.planning.is_open(date, kind) {
                    continue;
                }
                if let Some(gate) = vars.gate_for(kind) {
                    model.fix(format!("closed_{kind}[{date}]"), gate[d], false);
                }
                let Some(matrix) = vars.for_kind(kind) else {
                    continue;
                };
                for (p, row) in matrix.iter().enumerate() {
                    model.fix(
                        format!("closed_{kind}[{}][{date}]", self.person_name(p)),
                        row[d],
                        false,
                    );
                    if kind == EventKind::Shift {
                        model.fix(
                            format!("closed_referent[{}][{date}]", self.person_name(p)),
                            vars.referent[p][d],
                            false,
                        );
                    }
                }
            }
        }
    }

    // Rule 2
    fn add_unavailability(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        for (d, &date) in self.dates().iter().enumerate() {
            for kind in DecisionVariables::MODELED_KINDS {
                if !self.planning.is_open(date, kind) {
                    continue;
                }
                let Some(matrix) = vars.for_kind(kind) else {
                    continue;
                };
                for (p, row) in matrix.iter().enumerate() {
                    if !self.planning.is_available(p, date, kind) {
                        model.fix(
                            format!("unavailable_{kind}[{}][{date}]", self.person_name(p)),
                            row[d],
                            false,
                        );
                    }
                }
            }
        }
    }

    // Rule 3
    fn add_shift_quota(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        let max = i64::from(self.params.max_shift_per_person_per_month);
        for (p, person) in self.planning.persons().iter().enumerate() {
            let total = LinearExpr::sum(vars.shift[p].iter().copied());
            model.constrain(
                format!("shift_quota[{}]", person.name),
                total.clone(),
                Relation::LessEqual,
                max,
            );
            if self.params.respect_shift_wishes {
                if let Some(wish) = person.shift_wish {
                    model.constrain(
                        format!("shift_wish[{}]", person.name),
                        total,
                        Relation::LessEqual,
                        i64::from(wish),
                    );
                }
            }
        }
    }

    // Rule 4
    fn add_shift_occupancy(&self, model: &mut MilpModel, vars: &DecisionVariables, big_m: i64) {
        let min = i64::from(self.params.min_person_per_shift);
        for (d, &date) in self.dates().iter().enumerate() {
            let attendance = LinearExpr::sum(DecisionVariables::column(&vars.shift, d));
            add_gated_count(
                model,
                &format!("shift_occupancy[{date}]"),
                attendance,
                vars.open_shift[d],
                min,
                big_m,
            );
            if self.params.require_shift_coverage && self.planning.is_open(date, EventKind::Shift) {
                model.fix(format!("shift_coverage[{date}]"), vars.open_shift[d], true);
            }
        }
    }

    // Rule 5
    fn add_shift_spacing(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        let min_days = i64::from(self.params.min_days_between_two_shifts);
        let open: Vec<(usize, NaiveDate)> = self
            .dates()
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, date)| self.planning.is_open(date, EventKind::Shift))
            .collect();

        for (start, &(_, anchor)) in open.iter().enumerate() {
            let window: Vec<usize> = open[start..]
                .iter()
                .take_while(|&&(_, date)| (date - anchor).num_days() < min_days)
                .map(|&(d, _)| d)
                .collect();
            if window.len() < 2 {
                continue;
            }
            for (p, row) in vars.shift.iter().enumerate() {
                model.constrain(
                    format!("shift_spacing[{}][{anchor}]", self.person_name(p)),
                    LinearExpr::sum(window.iter().map(|&d| row[d])),
                    Relation::LessEqual,
                    1,
                );
            }
        }
    }

    // Rule 6
    fn add_reference_quota(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        let max = i64::from(self.params.max_reference_per_person_per_month);
        for (p, row) in vars.referent.iter().enumerate() {
            model.constrain(
                format!("reference_quota[{}]", self.person_name(p)),
                LinearExpr::sum(row.iter().copied()),
                Relation::LessEqual,
                max,
            );
        }
    }

    // Rule 7
    fn add_referent_eligibility(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        let consent_required = self.params.referents_need_consent;
        for (p, person) in self.planning.persons().iter().enumerate() {
            if person.can_be_referent(consent_required) {
                continue;
            }
            for (d, date) in self.dates().iter().enumerate() {
                model.fix(
                    format!("not_referent[{}][{date}]", person.name),
                    vars.referent[p][d],
                    false,
                );
            }
        }
    }

    // Rule 8
    fn add_referent_coverage(&self, model: &mut MilpModel, vars: &DecisionVariables, big_m: i64) {
        let exact = i64::from(self.params.exact_referent_per_open_shift);
        for (d, &date) in self.dates().iter().enumerate() {
            let referents = LinearExpr::sum(DecisionVariables::column(&vars.referent, d));
            add_gated_count(
                model,
                &format!("referent_coverage[{date}]"),
                referents.clone(),
                vars.open_shift[d],
                exact,
                big_m,
            );
            model.constrain(
                format!("referent_cap[{date}]"),
                referents,
                Relation::LessEqual,
                exact,
            );
        }
    }

    // Rule 9
    fn add_referent_implies_shift(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        for (p, row) in vars.referent.iter().enumerate() {
            for (d, date) in self.dates().iter().enumerate() {
                model.constrain(
                    format!("referent_on_shift[{}][{date}]", self.person_name(p)),
                    LinearExpr::term(row[d], 1).plus(vars.shift[p][d], -1),
                    Relation::LessEqual,
                    0,
                );
            }
        }
    }

    // Rule 10
    fn add_gap_quota(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        for (p, row) in vars.gap.iter().enumerate() {
            model.constrain(
                format!("gap_quota[{}]", self.person_name(p)),
                LinearExpr::sum(row.iter().copied()),
                Relation::LessEqual,
                1,
            );
        }
    }

    // Rule 11
    fn add_gap_attendance(&self, model: &mut MilpModel, vars: &DecisionVariables, big_m: i64) {
        let min = i64::from(self.params.min_person_per_gap);
        let max = i64::from(self.params.max_person_per_gap);
        for (d, &date) in self.dates().iter().enumerate() {
            let attendance = LinearExpr::sum(DecisionVariables::column(&vars.gap, d));
            model.constrain(
                format!("gap_capacity[{date}]"),
                attendance.clone(),
                Relation::LessEqual,
                max,
            );
            add_gated_count(
                model,
                &format!("gap_attendance[{date}]"),
                attendance,
                vars.open_gap[d],
                min,
                big_m,
            );
        }
    }

    // Rule 12 (Month modality)
    fn add_gap_before_shift(&self, model: &mut MilpModel, vars: &DecisionVariables) {
        for (p, person) in self.planning.persons().iter().enumerate() {
            if person.did_gap_last_period {
                continue;
            }
            for (d, date) in self.dates().iter().enumerate() {
                let expr = vars.gap[p][..d]
                    .iter()
                    .fold(LinearExpr::term(vars.shift[p][d], 1), |e, &g| e.plus(g, -1));
                model.constrain(
                    format!("gap_before_shift[{}][{date}]", person.name),
                    expr,
                    Relation::LessEqual,
                    0,
                );
            }
        }
    }

    /// Sets the lexicographic objective and returns the dominance factor.
    fn set_objective(&self, model: &mut MilpModel, vars: &DecisionVariables) -> i64 {
        let open_dates = self.planning.open_dates(EventKind::Shift).len() as i64;
        let persons = self.planning.person_count() as i64;

        let open_shifts = LinearExpr::sum(vars.open_shift.iter().copied());
        let person_shifts = LinearExpr::sum(vars.shift.iter().flatten().copied());

        let (primary, secondary, secondary_max) = match self.params.goal_modality {
            GoalModality::OpenShiftPriority => (open_shifts, person_shifts, persons * open_dates),
            GoalModality::NumberPersonShiftPriority => (person_shifts, open_shifts, open_dates),
        };
        let dominance = secondary_max + 1;
        model.set_objective(
            LinearExpr::new()
                .plus_scaled(&primary, dominance)
                .plus_scaled(&secondary, 1),
        );
        dominance
    }
}

/// Emits `count = 0` when `gate = 0` and `count >= min` when `gate = 1`:
///
/// ```text
/// count - M·gate <= 0
/// count - M·gate >= min - M
/// ```
fn add_gated_count(
    model: &mut MilpModel,
    name: &str,
    count: LinearExpr,
    gate: VarId,
    min: i64,
    big_m: i64,
) {
    let gated = count.plus(gate, -big_m);
    model.constrain(format!("{name}.upper"), gated.clone(), Relation::LessEqual, 0);
    model.constrain(format!("{name}.lower"), gated, Relation::GreaterEqual, min - big_m);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanningError;
    use crate::models::{AvailabilityRecord, Event, GapModality, Person};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn shift_planning(names: &[&str], days: &[u32]) -> Planning {
        let events = days.iter().map(|&d| Event::new(day(d)).with_shift()).collect();
        let persons = names.iter().map(|n| Person::new(*n)).collect();
        let availabilities = names
            .iter()
            .flat_map(|n| {
                days.iter()
                    .map(move |&d| AvailabilityRecord::available(*n, day(d), EventKind::Shift))
            })
            .collect();
        Planning::new(events, persons, availabilities).unwrap()
    }

    fn values_with(built: &PlanningModel, ones: &[VarId]) -> Vec<bool> {
        let mut values = vec![false; built.model.variable_count()];
        for v in ones {
            values[v.index()] = true;
        }
        values
    }

    #[test]
    fn test_variable_layout() {
        let planning = shift_planning(&["A", "B", "C"], &[1, 8]);
        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert_eq!(built.model.variable_count(), 4 * 3 * 2 + 2 * 2);
        assert!(built.model.constraint_count() > 0);
    }

    #[test]
    fn test_big_m_default_and_override() {
        let planning = shift_planning(&["A", "B"], &[1]);
        let params = Parameters::default().with_min_person_per_shift(5);
        let builder = PlanningMilpBuilder::new(&planning, &params);
        assert_eq!(builder.big_m(), 6);
        assert_eq!(builder.with_big_m(50).big_m(), 50);

        let params = Parameters::default();
        assert_eq!(PlanningMilpBuilder::new(&planning, &params).big_m(), 4);
    }

    #[test]
    fn test_unsupported_gap_modality() {
        let planning = shift_planning(&["A"], &[1]);
        let params = Parameters::default().with_gap_modality(GapModality::Shifts);
        let err = PlanningMilpBuilder::new(&planning, &params).build().unwrap_err();
        assert!(matches!(err, PlanningError::UnsupportedGapModality(GapModality::Shifts)));
    }

    #[test]
    fn test_contradictory_parameters_are_rejected() {
        let planning = shift_planning(&["A"], &[1]);
        let params = Parameters::default().with_gap_bounds(4, 2);
        let err = PlanningMilpBuilder::new(&planning, &params).build().unwrap_err();
        assert!(matches!(err, PlanningError::InvalidParameters(_)));

        let solver = crate::milp::BranchAndBoundSolver::new();
        let err = crate::solve::solve_planning(&planning, &params, &solver).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidParameters(_)));
    }

    #[test]
    fn test_full_attendance_is_feasible() {
        let planning = shift_planning(&["A", "B", "C"], &[1]);
        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let values = values_with(
            &built,
            &[v.open_shift[0], v.shift[0][0], v.shift[1][0], v.shift[2][0], v.referent[0][0]],
        );
        assert!(built.model.is_satisfied(&values));
        assert_eq!(built.model.objective().evaluate(&values), built.dominance + 3);
    }

    #[test]
    fn test_attendance_below_minimum_is_rejected() {
        let planning = shift_planning(&["A", "B", "C"], &[1]);
        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let values = values_with(
            &built,
            &[v.open_shift[0], v.shift[0][0], v.shift[1][0], v.referent[0][0]],
        );
        assert!(!built.model.is_satisfied(&values));
        // Shifts without the gate are also rejected.
        let values = values_with(&built, &[v.shift[0][0], v.shift[1][0], v.shift[2][0]]);
        assert!(!built.model.is_satisfied(&values));
    }

    #[test]
    fn test_mandatory_coverage_forces_gate() {
        let planning = shift_planning(&["A", "B", "C"], &[1]);
        let params = Parameters::default().with_shift_coverage(true);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert!(!built.model.is_satisfied(&values_with(&built, &[])));

        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert!(built.model.is_satisfied(&values_with(&built, &[])));
    }

    #[test]
    fn test_open_shift_requires_exact_referents() {
        let planning = shift_planning(&["A", "B", "C"], &[1]);
        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let staffed = [v.open_shift[0], v.shift[0][0], v.shift[1][0], v.shift[2][0]];
        assert!(!built.model.is_satisfied(&values_with(&built, &staffed)));

        let mut two_referents = staffed.to_vec();
        two_referents.extend([v.referent[0][0], v.referent[1][0]]);
        assert!(!built.model.is_satisfied(&values_with(&built, &two_referents)));
    }

    #[test]
    fn test_closed_and_unavailable_are_zeroed() {
        let events = vec![Event::new(day(1)).with_shift(), Event::new(day(9))];
        let persons = vec![Person::new("A"), Person::new("B")];
        let availabilities = vec![
            AvailabilityRecord::available("A", day(1), EventKind::Shift),
            AvailabilityRecord::available("A", day(9), EventKind::Shift),
        ];
        let planning = Planning::new(events, persons, availabilities).unwrap();
        let params = Parameters::default().with_min_person_per_shift(1);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;

        let ok = values_with(&built, &[v.open_shift[0], v.shift[0][0], v.referent[0][0]]);
        assert!(built.model.is_satisfied(&ok));

        // B never declared availability.
        let unavailable = values_with(&built, &[v.open_shift[0], v.shift[1][0], v.referent[1][0]]);
        assert!(!built.model.is_satisfied(&unavailable));

        // Day 9 is closed even though A is available.
        let closed = values_with(&built, &[v.open_shift[1], v.shift[0][1], v.referent[0][1]]);
        assert!(!built.model.is_satisfied(&closed));
    }

    #[test]
    fn test_spacing_windows_use_day_difference() {
        let planning = shift_planning(&["A"], &[1, 3, 7]);
        let params = Parameters::default()
            .with_min_person_per_shift(1)
            .with_max_shifts(3);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;

        let close = values_with(
            &built,
            &[v.open_shift[0], v.open_shift[1], v.shift[0][0], v.shift[0][1], v.referent[0][0], v.referent[0][1]],
        );
        assert!(!built.model.is_satisfied(&close));

        // Exactly six days apart is allowed.
        let params = params.with_max_references(2);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let spaced = values_with(
            &built,
            &[v.open_shift[0], v.open_shift[2], v.shift[0][0], v.shift[0][2], v.referent[0][0], v.referent[0][2]],
        );
        assert!(built.model.is_satisfied(&spaced));
    }

    #[test]
    fn test_shift_wish_caps_quota() {
        let events = vec![Event::new(day(1)).with_shift(), Event::new(day(10)).with_shift()];
        let persons = vec![Person::new("A").with_shift_wish(1)];
        let availabilities = vec![
            AvailabilityRecord::available("A", day(1), EventKind::Shift),
            AvailabilityRecord::available("A", day(10), EventKind::Shift),
        ];
        let planning = Planning::new(events, persons, availabilities).unwrap();
        let params = Parameters::default()
            .with_min_person_per_shift(1)
            .with_max_references(2);
        let two = |built: &PlanningModel| {
            let v = &built.variables;
            values_with(
                built,
                &[v.open_shift[0], v.open_shift[1], v.shift[0][0], v.shift[0][1], v.referent[0][0], v.referent[0][1]],
            )
        };

        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert!(!built.model.is_satisfied(&two(&built)));

        let relaxed = params.with_shift_wishes(false);
        let built = PlanningMilpBuilder::new(&planning, &relaxed).build().unwrap();
        assert!(built.model.is_satisfied(&two(&built)));
    }

    #[test]
    fn test_newcomer_cannot_be_referent() {
        let events = vec![Event::new(day(1)).with_shift()];
        let persons = vec![Person::new("New").newcomer()];
        let availabilities = vec![AvailabilityRecord::available("New", day(1), EventKind::Shift)];
        let planning = Planning::new(events, persons, availabilities).unwrap();
        let params = Parameters::default().with_min_person_per_shift(1);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let values = values_with(&built, &[v.open_shift[0], v.shift[0][0], v.referent[0][0]]);
        assert!(!built.model.is_satisfied(&values));
    }

    #[test]
    fn test_gap_must_precede_first_shift() {
        let events = vec![
            Event::new(day(1)).with_gap(),
            Event::new(day(2)).with_shift().with_gap(),
        ];
        let persons = vec![Person::new("A").with_gap_last_period(false)];
        let availabilities = vec![
            AvailabilityRecord::available("A", day(1), EventKind::GapFranco),
            AvailabilityRecord::available("A", day(2), EventKind::GapFranco),
            AvailabilityRecord::available("A", day(2), EventKind::Shift),
        ];
        let planning = Planning::new(events, persons, availabilities).unwrap();
        let params = Parameters::default().with_min_person_per_shift(1);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        let v = &built.variables;
        let shift = [v.open_shift[1], v.shift[0][1], v.referent[0][1]];

        let mut before = shift.to_vec();
        before.extend([v.open_gap[0], v.gap[0][0]]);
        assert!(built.model.is_satisfied(&values_with(&built, &before)));

        let mut same_day = shift.to_vec();
        same_day.extend([v.open_gap[1], v.gap[0][1]]);
        assert!(!built.model.is_satisfied(&values_with(&built, &same_day)));
    }

    #[test]
    fn test_objective_dominance() {
        let planning = shift_planning(&["A", "B", "C"], &[1, 10]);
        let params = Parameters::default();
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert_eq!(built.dominance, 3 * 2 + 1);

        let params = params.with_goal_modality(GoalModality::NumberPersonShiftPriority);
        let built = PlanningMilpBuilder::new(&planning, &params).build().unwrap();
        assert_eq!(built.dominance, 2 + 1);
    }
}
