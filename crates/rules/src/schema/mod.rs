//! Rule data model with serde (de)serialization.
//!
//! - `Weekday`: day tokens (`Mon`..`Sun`) a rule applies to
//! - `Interval`: repeat interval code selected for a rule
//! - `Rule`: one schedule entry (days, interval, inclusive hour markers)

mod interval;
mod rule;
mod weekday;

pub use interval::*;
pub use rule::*;
pub use weekday::*;
