//! Day/hour overlap detection between rules.
//!
//! Hour markers are inclusive, so `[9,17]` and `[17,22]` share the single
//! value `17`. One shared value is adjacency; two or more is a conflict.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::schema::{Rule, Weekday};
use crate::store::RuleStore;

/// Shared hour values at or below this count are adjacency, not overlap.
const MAX_SHARED_HOURS: usize = 1;

/// Decides whether a candidate rule collides with the saved rules in a store.
pub struct ConflictDetector<'a> {
    rules: &'a [Rule],
}

impl<'a> ConflictDetector<'a> {
    pub fn new(store: &'a RuleStore) -> Self {
        Self::over(store.as_slice())
    }

    /// Build a detector over an arbitrary rule slice.
    pub fn over(rules: &'a [Rule]) -> Self {
        Self { rules }
    }

    /// Whether saving `candidate` would overlap another rule on a shared day
    /// by more than one hour value. The rule holding `exclude_serial` is
    /// skipped so a row is never compared with itself.
    pub fn is_duplicate(&self, candidate: &Rule, exclude_serial: Option<u32>) -> bool {
        self.find_duplicate(candidate, exclude_serial).is_some()
    }

    /// Like [`is_duplicate`](Self::is_duplicate) but returns the first
    /// colliding rule.
    pub fn find_duplicate(&self, candidate: &Rule, exclude_serial: Option<u32>) -> Option<&'a Rule> {
        for other in self.rules {
            if exclude_serial == Some(other.serial) {
                continue;
            }
            if common_days(candidate, other).is_empty() {
                continue;
            }
            let shared = common_hours(candidate, other);
            debug!(serial = other.serial, shared, "compared hour ranges");
            if shared > MAX_SHARED_HOURS {
                return Some(other);
            }
        }
        None
    }
}

/// Two rules in one collection that overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub first: u32,
    pub second: u32,
    pub days: BTreeSet<Weekday>,
    pub shared_hours: usize,
}

/// Audit a whole collection pairwise, reporting every overlapping pair by
/// serial. Intended for trusted snapshots that bypass save validation.
pub fn find_conflicts(rules: &[Rule]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            let days = common_days(a, b);
            if days.is_empty() {
                continue;
            }
            let shared_hours = common_hours(a, b);
            if shared_hours > MAX_SHARED_HOURS {
                conflicts.push(Conflict {
                    first: a.serial,
                    second: b.serial,
                    days,
                    shared_hours,
                });
            }
        }
    }
    conflicts
}

/// Everything wrong with a collection that save validation would have
/// caught.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Audit {
    /// Rules with no days or `to <= from`.
    pub malformed: Vec<Rule>,
    pub conflicts: Vec<Conflict>,
}

impl Audit {
    pub fn problem_count(&self) -> usize {
        self.malformed.len() + self.conflicts.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Audit a numbered collection for malformed and overlapping rules.
pub fn audit(rules: &[Rule]) -> Audit {
    Audit {
        malformed: rules.iter().filter(|r| !r.is_well_formed()).cloned().collect(),
        conflicts: find_conflicts(rules),
    }
}

pub fn common_days(a: &Rule, b: &Rule) -> BTreeSet<Weekday> {
    a.days.intersection(&b.days).copied().collect()
}

/// Number of hour values shared by the inclusive ranges `[a.from, a.to]` and
/// `[b.from, b.to]`. An inverted range is empty.
pub fn common_hours(a: &Rule, b: &Rule) -> usize {
    if a.from > a.to || b.from > b.to {
        return 0;
    }
    let lo = a.from.max(b.from);
    let hi = a.to.min(b.to);
    if lo > hi {
        0
    } else {
        usize::from(hi - lo) + 1
    }
}
