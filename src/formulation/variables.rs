//! Decision variable matrices.

use chrono::NaiveDate;

use crate::milp::{MilpModel, VarId};
use crate::models::{EventKind, Person};

/// Binary decision variables of the rostering model.
///
/// Person-indexed matrices are `[person][date]`, following the order of
/// `Planning::persons()` and `Planning::dates()`.
#[derive(Debug, Clone)]
pub struct DecisionVariables {
    /// `open_shift[d]`: the shift on date `d` is staffed.
    pub open_shift: Vec<VarId>,
    /// `shift[p][d]`: person `p` works the shift on date `d`.
    pub shift: Vec<Vec<VarId>>,
    /// `referent[p][d]`: person `p` is the referent on date `d`.
    pub referent: Vec<Vec<VarId>>,
    /// `open_gap[d]`: the franco gap on date `d` is attended.
    pub open_gap: Vec<VarId>,
    /// `gap[p][d]`: person `p` attends the franco gap on date `d`.
    pub gap: Vec<Vec<VarId>>,
    /// `screening[p][d]`: person `p` attends the screening on date `d`.
    pub screening: Vec<Vec<VarId>>,
}

impl DecisionVariables {
    /// Event kinds backed by a person × date matrix.
    pub const MODELED_KINDS: [EventKind; 3] =
        [EventKind::Shift, EventKind::Screening, EventKind::GapFranco];

    /// Registers every variable on `model`.
    pub fn register(model: &mut MilpModel, persons: &[Person], dates: &[NaiveDate]) -> Self {
        let per_date = |model: &mut MilpModel, prefix: &str| -> Vec<VarId> {
            dates
                .iter()
                .map(|d| model.add_binary(format!("{prefix}[{d}]")))
                .collect()
        };
        let per_person = |model: &mut MilpModel, prefix: &str| -> Vec<Vec<VarId>> {
            persons
                .iter()
                .map(|p| {
                    dates
                        .iter()
                        .map(|d| model.add_binary(format!("{prefix}[{}][{d}]", p.name)))
                        .collect()
                })
                .collect()
        };

        let open_shift = per_date(model, "open_shift");
        let shift = per_person(model, "shift");
        let referent = per_person(model, "referent");
        let open_gap = per_date(model, "open_gap");
        let gap = per_person(model, "gap");
        let screening = per_person(model, "screening");
        Self {
            open_shift,
            shift,
            referent,
            open_gap,
            gap,
            screening,
        }
    }

    /// Matrix backing an event kind. `GapBilingual` is not modeled.
    pub fn for_kind(&self, kind: EventKind) -> Option<&[Vec<VarId>]> {
        match kind {
            EventKind::Shift => Some(&self.shift),
            EventKind::Screening => Some(&self.screening),
            EventKind::GapFranco => Some(&self.gap),
            EventKind::GapBilingual => None,
        }
    }

    /// Per-date gate of an event kind, when it has one.
    pub fn gate_for(&self, kind: EventKind) -> Option<&[VarId]> {
        match kind {
            EventKind::Shift => Some(&self.open_shift),
            EventKind::GapFranco => Some(&self.open_gap),
            EventKind::Screening | EventKind::GapBilingual => None,
        }
    }

    /// Whether the layout was registered for `persons` × `dates`.
    pub fn fits(&self, persons: usize, dates: usize) -> bool {
        let matrix_fits =
            |m: &[Vec<VarId>]| m.len() == persons && m.iter().all(|row| row.len() == dates);
        self.open_shift.len() == dates
            && self.open_gap.len() == dates
            && matrix_fits(&self.shift)
            && matrix_fits(&self.referent)
            && matrix_fits(&self.gap)
            && matrix_fits(&self.screening)
    }

    /// Column of a matrix: every person's variable on date index `d`.
    pub fn column(matrix: &[Vec<VarId>], d: usize) -> impl Iterator<Item = VarId> + '_ {
        matrix.iter().map(move |row| row[d])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(persons: usize, days: u32) -> (MilpModel, DecisionVariables) {
        let persons: Vec<Person> = (0..persons).map(|i| Person::new(format!("P{i}"))).collect();
        let dates: Vec<NaiveDate> = (1..=days)
            .map(|d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap())
            .collect();
        let mut model = MilpModel::new("vars");
        let vars = DecisionVariables::register(&mut model, &persons, &dates);
        (model, vars)
    }

    #[test]
    fn test_variable_count() {
        let (model, vars) = setup(3, 4);
        assert_eq!(model.variable_count(), 4 * 3 * 4 + 2 * 4);
        assert_eq!(vars.shift.len(), 3);
        assert_eq!(vars.shift[0].len(), 4);
        assert_eq!(vars.open_gap.len(), 4);
    }

    #[test]
    fn test_layout_fits_its_dimensions() {
        let (_, vars) = setup(3, 4);
        assert!(vars.fits(3, 4));
        assert!(!vars.fits(2, 4));
        assert!(!vars.fits(3, 5));
    }

    #[test]
    fn test_registration_order() {
        let (model, vars) = setup(2, 2);
        assert_eq!(vars.open_shift[0], VarId(0));
        assert_eq!(vars.shift[0][0], VarId(2));
        assert!(vars.referent[0][0] > vars.shift[1][1]);
        assert!(vars.screening[0][0] > vars.gap[1][1]);
        assert_eq!(model.variables()[2].name, "shift[P0][2024-05-01]");
    }

    #[test]
    fn test_kind_lookup() {
        let (_, vars) = setup(2, 2);
        assert!(vars.for_kind(EventKind::GapBilingual).is_none());
        assert_eq!(vars.for_kind(EventKind::GapFranco).unwrap()[1][0], vars.gap[1][0]);
        assert!(vars.gate_for(EventKind::Screening).is_none());
        let col: Vec<VarId> = DecisionVariables::column(&vars.shift, 1).collect();
        assert_eq!(col, vec![vars.shift[0][1], vars.shift[1][1]]);
    }
}
