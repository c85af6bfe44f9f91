//! Event calendar model.
//!
//! An event row pairs one calendar date with an "open" flag per event
//! kind. A date may host several kinds at once (a shift and a gap on the
//! same day is common).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of duty that can take place on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Staffed duty slot with a minimum headcount.
    Shift,
    /// Screening session.
    Screening,
    /// Shared meeting, French-speaking group.
    GapFranco,
    /// Shared meeting, bilingual group.
    GapBilingual,
}

impl EventKind {
    /// Every kind, in canonical order.
    pub const ALL: [EventKind; 4] = [
        EventKind::Shift,
        EventKind::Screening,
        EventKind::GapFranco,
        EventKind::GapBilingual,
    ];

    /// Stable snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Shift => "shift",
            EventKind::Screening => "screening",
            EventKind::GapFranco => "gap_franco",
            EventKind::GapBilingual => "gap_bilingual",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calendar date and the event kinds open on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Calendar date.
    pub date: NaiveDate,
    /// A shift is scheduled.
    pub shift: bool,
    /// A screening is scheduled.
    pub screening: bool,
    /// A French-speaking gap is scheduled.
    pub gap_franco: bool,
    /// A bilingual gap is scheduled.
    pub gap_bilingual: bool,
}

impl Event {
    /// Creates an event row with every kind closed.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            shift: false,
            screening: false,
            gap_franco: false,
            gap_bilingual: false,
        }
    }

    /// Opens the given kind on this date.
    pub fn with_open(mut self, kind: EventKind) -> Self {
        *self.flag_mut(kind) = true;
        self
    }

    /// Opens a shift.
    pub fn with_shift(self) -> Self {
        self.with_open(EventKind::Shift)
    }

    /// Opens a French-speaking gap.
    pub fn with_gap(self) -> Self {
        self.with_open(EventKind::GapFranco)
    }

    /// Opens a screening.
    pub fn with_screening(self) -> Self {
        self.with_open(EventKind::Screening)
    }

    /// Whether `kind` takes place on this date.
    #[inline]
    pub fn is_open(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Shift => self.shift,
            EventKind::Screening => self.screening,
            EventKind::GapFranco => self.gap_franco,
            EventKind::GapBilingual => self.gap_bilingual,
        }
    }

    fn flag_mut(&mut self, kind: EventKind) -> &mut bool {
        match kind {
            EventKind::Shift => &mut self.shift,
            EventKind::Screening => &mut self.screening,
            EventKind::GapFranco => &mut self.gap_franco,
            EventKind::GapBilingual => &mut self.gap_bilingual,
        }
    }
}
