//! Repeat interval code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat interval selected for a rule, carried as the integer code the
/// editor's interval picker submits. The engine never interprets the code;
/// it is stored and published as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(pub u32);

impl Interval {
    pub fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for Interval {
    fn from(code: u32) -> Self {
        Interval(code)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
