//! Mapping between raw editor row fields and [`Rule`] values.
//!
//! Widgets submit strings; the engine only ever sees parsed rules. Errors
//! here are malformed input, separate from save validation.

use serde::{Deserialize, Serialize};
use timeslot_core::config::HoursConfig;

use crate::schema::{Interval, Rule, Weekday};

/// Inclusive bounds for hour markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourDomain {
    pub min: u8,
    pub max: u8,
}

impl HourDomain {
    pub fn contains(&self, hour: u8) -> bool {
        self.min <= hour && hour <= self.max
    }
}

impl Default for HourDomain {
    fn default() -> Self {
        Self { min: 0, max: 24 }
    }
}

impl From<HoursConfig> for HourDomain {
    fn from(cfg: HoursConfig) -> Self {
        Self {
            min: cfg.min,
            max: cfg.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("unknown day '{0}'")]
    UnknownDay(String),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfDomain {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}

/// Field values of one editor row as the widgets hold them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFields {
    pub interval: String,
    /// Checked day tokens.
    pub days: Vec<String>,
    pub from: String,
    pub to: String,
}

impl RowFields {
    /// Parse the row into a rule. The resulting serial is `0`; the store
    /// assigns it.
    pub fn parse(&self, domain: &HourDomain) -> Result<Rule, FieldError> {
        let interval = parse_number::<u32>("interval", &self.interval)?;
        let from = parse_hour("from", &self.from, domain)?;
        let to = parse_hour("to", &self.to, domain)?;
        let days = self
            .days
            .iter()
            .map(|d| d.parse::<Weekday>().map_err(|_| FieldError::UnknownDay(d.clone())))
            .collect::<Result<_, _>>()?;

        Ok(Rule {
            serial: 0,
            days,
            interval: Interval(interval),
            from,
            to,
        })
    }
}

/// Replacement values for some of a row's fields; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub interval: Option<String>,
    pub days: Option<Vec<String>>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FieldPatch {
    pub fn is_empty(&self) -> bool {
        self.interval.is_none() && self.days.is_none() && self.from.is_none() && self.to.is_none()
    }

    /// Overwrite the fields this patch carries.
    pub fn apply_to(self, fields: &mut RowFields) {
        if let Some(interval) = self.interval {
            fields.interval = interval;
        }
        if let Some(days) = self.days {
            fields.days = days;
        }
        if let Some(from) = self.from {
            fields.from = from;
        }
        if let Some(to) = self.to {
            fields.to = to;
        }
    }
}

impl From<&Rule> for RowFields {
    fn from(rule: &Rule) -> Self {
        Self {
            interval: rule.interval.to_string(),
            days: rule.days.iter().map(|d| d.token().to_string()).collect(),
            from: rule.from.to_string(),
            to: rule.to.to_string(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, FieldError> {
    raw.trim().parse().map_err(|_| FieldError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_hour(field: &'static str, raw: &str, domain: &HourDomain) -> Result<u8, FieldError> {
    let value = parse_number::<u8>(field, raw)?;
    if !domain.contains(value) {
        return Err(FieldError::OutOfDomain {
            field,
            value,
            min: domain.min,
            max: domain.max,
        });
    }
    Ok(value)
}
