//! The schedule entry itself.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Interval, Weekday};

/// A schedule entry: the repeat interval in force on `days` between the
/// inclusive hour markers `from` and `to`.
///
/// `serial` is the 1-based row position the rule currently occupies. It is
/// reassigned on every structural change and is not an identity; inbound
/// payloads may omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub serial: u32,
    #[serde(default)]
    pub days: BTreeSet<Weekday>,
    #[serde(default)]
    pub interval: Interval,
    pub from: u8,
    pub to: u8,
}

/// Serial-insensitive view of a rule: `(days, interval, from, to)`.
pub type RuleShape = (BTreeSet<Weekday>, Interval, u8, u8);

impl Rule {
    pub fn new(
        days: impl IntoIterator<Item = Weekday>,
        interval: u32,
        from: u8,
        to: u8,
    ) -> Self {
        Self {
            serial: 0,
            days: days.into_iter().collect(),
            interval: Interval(interval),
            from,
            to,
        }
    }

    /// Field values of a freshly added row before anything is picked.
    pub fn blank() -> Self {
        Self {
            serial: 0,
            days: BTreeSet::new(),
            interval: Interval::default(),
            from: 0,
            to: 0,
        }
    }

    /// Everything but the serial. Serials are positions that change on every
    /// reload or delete, so two collections hold the same rules when their
    /// shapes match in order.
    pub fn shape(&self) -> RuleShape {
        (self.days.clone(), self.interval, self.from, self.to)
    }

    /// Whether `hour` on `day` falls inside this rule, treating the range as
    /// half-open `[from, to)` so back-to-back rules never both match.
    pub fn is_active_at(&self, day: Weekday, hour: u8) -> bool {
        self.days.contains(&day) && self.from <= hour && hour < self.to
    }

    /// Whether the rule satisfies the structural checks a save enforces
    /// (at least one day, `to > from`). Conflicts are not considered.
    pub fn is_well_formed(&self) -> bool {
        !self.days.is_empty() && self.to > self.from
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = self.days.iter().map(|d| d.token()).collect();
        write!(
            f,
            "#{} [{}] {:02}-{:02} every {}",
            self.serial,
            days.join(","),
            self.from,
            self.to,
            self.interval
        )
    }
}
