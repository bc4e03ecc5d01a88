//! Resolve which rule is in force at a given moment.
//!
//! Hours are matched half-open (`from <= hour < to`), so at the shared
//! boundary of two adjacent rules only the later one applies. Times are
//! naive wall-clock values; there is no timezone handling.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::schema::{Interval, Rule, Weekday};

/// First rule in row order covering `hour` on `day`.
pub fn active_rule(rules: &[Rule], day: Weekday, hour: u8) -> Option<&Rule> {
    rules.iter().find(|r| r.is_active_at(day, hour))
}

/// Interval in force at `at`, if any rule covers it.
pub fn interval_at(rules: &[Rule], at: NaiveDateTime) -> Option<Interval> {
    let day = Weekday::from(at.weekday());
    let hour = at.hour() as u8;
    active_rule(rules, day, hour).map(|r| r.interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new([Weekday::Mon, Weekday::Wed], 1, 9, 17),
            Rule::new([Weekday::Mon], 5, 17, 22),
        ]
    }

    #[test]
    fn boundary_hour_belongs_to_later_rule() {
        let rules = rules();
        assert_eq!(active_rule(&rules, Weekday::Mon, 16).unwrap().interval, Interval(1));
        assert_eq!(active_rule(&rules, Weekday::Mon, 17).unwrap().interval, Interval(5));
        assert!(active_rule(&rules, Weekday::Mon, 22).is_none());
        assert!(active_rule(&rules, Weekday::Wed, 17).is_none());
    }

    #[test]
    fn no_rule_on_uncovered_day() {
        assert!(active_rule(&rules(), Weekday::Sun, 10).is_none());
    }

    #[test]
    fn interval_at_uses_weekday_and_hour() {
        // 2024-01-01 was a Monday.
        let monday_evening = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(interval_at(&rules(), monday_evening), Some(Interval(5)));

        let tuesday_noon = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(interval_at(&rules(), tuesday_noon), None);
    }
}
