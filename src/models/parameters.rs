//! Planning parameters.
//!
//! One immutable parameter set governs a planning period. It can be built
//! in code with the `with_*` setters or loaded from JSON, where missing
//! fields fall back to [`Parameters::default`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlanningError, Result};

/// Granularity at which "attend a gap before any shift" is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapModality {
    /// Within the month: a gap on an earlier date unlocks later shifts.
    Month,
    /// Per shift. Recognized but not implemented.
    Shifts,
}

impl fmt::Display for GapModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapModality::Month => f.write_str("MONTH"),
            GapModality::Shifts => f.write_str("SHIFTS"),
        }
    }
}

/// Which objective term dominates the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalModality {
    /// Cover as many shift dates as possible, then add people.
    OpenShiftPriority,
    /// Place as many person-shifts as possible, then cover dates.
    NumberPersonShiftPriority,
}

/// Policy parameters of a planning period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Upper bound on shifts per person.
    pub max_shift_per_person_per_month: u32,
    /// Lower bound on attendance of an open shift.
    pub min_person_per_shift: u32,
    /// Minimum distance in days between two shifts of one person.
    pub min_days_between_two_shifts: u32,
    /// Upper bound on referent duties per person.
    pub max_reference_per_person_per_month: u32,
    /// Referents required on every open shift.
    pub exact_referent_per_open_shift: u32,
    /// Upper bound on gap attendance.
    pub max_person_per_gap: u32,
    /// Lower bound on attendance of an active gap.
    pub min_person_per_gap: u32,
    /// Gap ordering granularity.
    pub gap_modality: GapModality,
    /// Objective priority.
    pub goal_modality: GoalModality,
    /// Cap each person's shifts at their declared wish.
    pub respect_shift_wishes: bool,
    /// Only persons who agreed may be referent.
    pub referents_need_consent: bool,
    /// Every shift-open date must be staffed; otherwise an unstaffable date
    /// is simply left closed.
    pub require_shift_coverage: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_shift_per_person_per_month: 3,
            min_person_per_shift: 3,
            min_days_between_two_shifts: 6,
            max_reference_per_person_per_month: 1,
            exact_referent_per_open_shift: 1,
            max_person_per_gap: 10,
            min_person_per_gap: 1,
            gap_modality: GapModality::Month,
            goal_modality: GoalModality::OpenShiftPriority,
            respect_shift_wishes: true,
            referents_need_consent: true,
            require_shift_coverage: false,
        }
    }
}

impl Parameters {
    /// Parses parameters from JSON and checks them.
    ///
    /// Missing fields take their default value; unknown modality names are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Parameters = serde_json::from_str(json)?;
        params.check()?;
        Ok(params)
    }

    /// Rejects contradictory bounds.
    pub fn check(&self) -> Result<()> {
        if self.min_person_per_gap > self.max_person_per_gap {
            return Err(PlanningError::InvalidParameters(format!(
                "min_person_per_gap ({}) exceeds max_person_per_gap ({})",
                self.min_person_per_gap, self.max_person_per_gap
            )));
        }
        if self.exact_referent_per_open_shift > self.min_person_per_shift.max(1) {
            return Err(PlanningError::InvalidParameters(format!(
                "exact_referent_per_open_shift ({}) exceeds min_person_per_shift ({})",
                self.exact_referent_per_open_shift, self.min_person_per_shift
            )));
        }
        Ok(())
    }

    /// Fails unless the gap modality is implemented.
    pub fn require_supported_gap_modality(&self) -> Result<()> {
        match self.gap_modality {
            GapModality::Month => Ok(()),
            other => Err(PlanningError::UnsupportedGapModality(other)),
        }
    }

    /// Sets the shift quota.
    pub fn with_max_shifts(mut self, n: u32) -> Self {
        self.max_shift_per_person_per_month = n;
        self
    }

    /// Sets the minimum attendance of an open shift.
    pub fn with_min_person_per_shift(mut self, n: u32) -> Self {
        self.min_person_per_shift = n;
        self
    }

    /// Sets the minimum day gap between two shifts.
    pub fn with_min_days_between_shifts(mut self, days: u32) -> Self {
        self.min_days_between_two_shifts = days;
        self
    }

    /// Sets the referent quota.
    pub fn with_max_references(mut self, n: u32) -> Self {
        self.max_reference_per_person_per_month = n;
        self
    }

    /// Sets the required referent count per open shift.
    pub fn with_exact_referents(mut self, n: u32) -> Self {
        self.exact_referent_per_open_shift = n;
        self
    }

    /// Sets the gap attendance bounds.
    pub fn with_gap_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_person_per_gap = min;
        self.max_person_per_gap = max;
        self
    }

    /// Sets the gap modality.
    pub fn with_gap_modality(mut self, modality: GapModality) -> Self {
        self.gap_modality = modality;
        self
    }

    /// Sets the goal modality.
    pub fn with_goal_modality(mut self, modality: GoalModality) -> Self {
        self.goal_modality = modality;
        self
    }

    /// Enables or disables the shift-wish cap.
    pub fn with_shift_wishes(mut self, respect: bool) -> Self {
        self.respect_shift_wishes = respect;
        self
    }

    /// Enables or disables the referent consent rule.
    pub fn with_referent_consent(mut self, required: bool) -> Self {
        self.referents_need_consent = required;
        self
    }

    /// Makes staffing every shift-open date mandatory.
    pub fn with_shift_coverage(mut self, required: bool) -> Self {
        self.require_shift_coverage = required;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Parameters::default();
        assert_eq!(p.max_shift_per_person_per_month, 3);
        assert_eq!(p.min_person_per_shift, 3);
        assert_eq!(p.min_days_between_two_shifts, 6);
        assert_eq!(p.max_reference_per_person_per_month, 1);
        assert_eq!(p.max_person_per_gap, 10);
        assert_eq!(p.gap_modality, GapModality::Month);
        assert!(p.check().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let p = Parameters::from_json(
            r#"{"min_person_per_shift": 2, "goal_modality": "NUMBER_PERSON_SHIFT_PRIORITY"}"#,
        )
        .unwrap();
        assert_eq!(p.min_person_per_shift, 2);
        assert_eq!(p.goal_modality, GoalModality::NumberPersonShiftPriority);
        assert_eq!(p.max_shift_per_person_per_month, 3);
        assert!(!p.require_shift_coverage);

        let p = Parameters::from_json(r#"{"require_shift_coverage": true}"#).unwrap();
        assert!(p.require_shift_coverage);
        assert_eq!(p, Parameters::default().with_shift_coverage(true));
    }

    #[test]
    fn test_from_json_unknown_modality() {
        let err = Parameters::from_json(r#"{"gap_modality": "WEEK"}"#).unwrap_err();
        assert!(matches!(err, PlanningError::ParametersParse(_)));
    }

    #[test]
    fn test_from_json_contradictory_gap_bounds() {
        let err = Parameters::from_json(r#"{"min_person_per_gap": 5, "max_person_per_gap": 2}"#)
            .unwrap_err();
        assert!(matches!(err, PlanningError::InvalidParameters(_)));
    }

    #[test]
    fn test_shifts_modality_unsupported() {
        let p = Parameters::default().with_gap_modality(GapModality::Shifts);
        assert!(matches!(
            p.require_supported_gap_modality(),
            Err(PlanningError::UnsupportedGapModality(GapModality::Shifts))
        ));
        assert!(Parameters::default().require_supported_gap_modality().is_ok());
    }
}
