//! Person model.
//!
//! A person is created once per planning period from the ingestion
//! collaborator's data and never changes while the period is solved or
//! validated. Names are the identity and must be unique in a period.

use serde::{Deserialize, Serialize};

/// Language group a person belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// French speakers only.
    FrenchOnly,
    /// English speakers only.
    EnglishOnly,
    /// Speaks both.
    Bilingual,
}

/// A person who can be rostered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique name within the planning period.
    pub name: String,
    /// Newcomer; never eligible as referent.
    pub is_new: bool,
    /// Preferred number of shifts. `None` means "don't care", `Some(0)` a pause.
    pub shift_wish: Option<u32>,
    /// Agreed to act as the day's referent.
    pub agrees_to_be_referent: bool,
    /// Attended a gap during the previous period.
    pub did_gap_last_period: bool,
    /// Language group.
    pub language: Language,
}

impl Person {
    /// Creates an experienced French-speaking person with no preferences,
    /// willing to be referent, whose gap obligation is already satisfied.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_new: false,
            shift_wish: None,
            agrees_to_be_referent: true,
            did_gap_last_period: true,
            language: Language::FrenchOnly,
        }
    }

    /// Marks the person as a newcomer.
    pub fn newcomer(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Sets the preferred number of shifts.
    pub fn with_shift_wish(mut self, wish: u32) -> Self {
        self.shift_wish = Some(wish);
        self
    }

    /// Sets the referent consent.
    pub fn with_referent_consent(mut self, agrees: bool) -> Self {
        self.agrees_to_be_referent = agrees;
        self
    }

    /// Sets whether the gap obligation was met last period.
    pub fn with_gap_last_period(mut self, done: bool) -> Self {
        self.did_gap_last_period = done;
        self
    }

    /// Sets the language group.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Whether this person may be chosen as a referent.
    ///
    /// Newcomers never qualify. When `consent_required`, the person must
    /// also have agreed.
    #[inline]
    pub fn can_be_referent(&self, consent_required: bool) -> bool {
        !self.is_new && (!consent_required || self.agrees_to_be_referent)
    }
}
