//! Violation report.
//!
//! Violations are accumulated in emission order, each tagged with a
//! two-level category path (rule group / rule). The report can be read as a
//! flat list, grouped by category, counted, or rendered as an indented tree.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::comparator::{Comparison, DayMonth};

/// Two-level category of a violation, e.g. `shift_rules / max_person_per_shift`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    /// Rule group.
    pub title: String,
    /// Rule within the group.
    pub subtitle: String,
}

impl CategoryPath {
    /// Creates a path.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Whether the path is `title / subtitle`.
    pub fn is(&self, title: &str, subtitle: &str) -> bool {
        self.title == title && self.subtitle == subtitle
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.title, self.subtitle)
    }
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Category path.
    pub category: CategoryPath,
    /// Human-readable description.
    pub message: String,
}

/// Ordered list of violations. Empty means the schedule complies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    violations: Vec<Violation>,
}

impl ViolationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a category scope; messages added through it carry its path.
    pub fn scope(&mut self, title: &str, subtitle: &str) -> RuleScope<'_> {
        RuleScope {
            report: self,
            category: CategoryPath::new(title, subtitle),
        }
    }

    /// Appends a violation.
    pub fn push(&mut self, category: CategoryPath, message: impl Into<String>) {
        self.violations.push(Violation {
            category,
            message: message.into(),
        });
    }

    /// Violations in emission order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterates in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the schedule complies.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one category, in emission order.
    pub fn in_category<'a>(
        &'a self,
        title: &'a str,
        subtitle: &'a str,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.category.is(title, subtitle))
    }

    /// Number of violations of one category.
    pub fn count_in(&self, title: &str, subtitle: &str) -> usize {
        self.in_category(title, subtitle).count()
    }

    /// Counts per category, in order of first appearance.
    pub fn counts(&self) -> IndexMap<&CategoryPath, usize> {
        let mut counts: IndexMap<&CategoryPath, usize> = IndexMap::new();
        for v in &self.violations {
            *counts.entry(&v.category).or_insert(0) += 1;
        }
        counts
    }

    /// Messages grouped by title then subtitle, in order of first appearance.
    pub fn grouped(&self) -> IndexMap<&str, IndexMap<&str, Vec<&str>>> {
        let mut groups: IndexMap<&str, IndexMap<&str, Vec<&str>>> = IndexMap::new();
        for v in &self.violations {
            groups
                .entry(v.category.title.as_str())
                .or_default()
                .entry(v.category.subtitle.as_str())
                .or_default()
                .push(v.message.as_str());
        }
        groups
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "no violation");
        }
        for (title, rules) in self.grouped() {
            writeln!(f, "{title}")?;
            for (subtitle, messages) in rules {
                writeln!(f, "  {subtitle} ({})", messages.len())?;
                for message in messages {
                    writeln!(f, "    - {message}")?;
                }
            }
        }
        Ok(())
    }
}

/// Borrowed report positioned on one category.
pub struct RuleScope<'r> {
    report: &'r mut ViolationReport,
    category: CategoryPath,
}

impl RuleScope<'_> {
    /// Adds a free-form message.
    pub fn add(&mut self, message: impl Into<String>) {
        self.report.push(self.category.clone(), message);
    }

    /// Adds `"{label} : 'a' op 'b'"` when `a op b` holds.
    ///
    /// Returns whether a violation was added.
    pub fn check<T>(&mut self, label: &str, a: T, cmp: Comparison, b: T) -> bool
    where
        T: PartialOrd + fmt::Display,
    {
        if !cmp.holds(&a, &b) {
            return false;
        }
        self.add(format!("{label} : '{a}' {cmp} '{b}'"));
        true
    }

    /// [`RuleScope::check`] prefixed with the person's name.
    pub fn check_person<T>(&mut self, person: &str, label: &str, a: T, cmp: Comparison, b: T) -> bool
    where
        T: PartialOrd + fmt::Display,
    {
        self.check(&format!("'{person}' {label}"), a, cmp, b)
    }

    /// [`RuleScope::check`] prefixed with the date.
    pub fn check_on<T>(&mut self, date: NaiveDate, label: &str, a: T, cmp: Comparison, b: T) -> bool
    where
        T: PartialOrd + fmt::Display,
    {
        self.check(&format!("On '{}' {label}", DayMonth(date)), a, cmp, b)
    }
}
