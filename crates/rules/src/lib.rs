//! Weekly time-slot rule engine.
//!
//! This crate provides:
//! - YAML/JSON rule model (days, repeat interval, hour markers)
//! - Ordered rule store with positional serial numbering
//! - Overlap detection with one-hour boundary adjacency allowed
//! - Row-based editor state machine with save validation and change events
//! - Snapshot file persistence with hot-reload via `notify` watcher
//! - File-backed editing sessions as run by the `timeslot` binary
//! - Lookup of the interval in force at a given weekday and hour

pub mod conflict;
pub mod editor;
pub mod events;
pub mod form;
pub mod loader;
pub mod lookup;
pub mod schema;
pub mod session;
pub mod store;
pub mod validation;

pub use conflict::{audit, find_conflicts, Audit, Conflict, ConflictDetector};
pub use editor::{EditorError, RuleEditor, Row, RowState};
pub use events::{EditorCommand, EditorEvent, EventSink};
pub use schema::{Interval, Rule, Weekday};
pub use session::{Session, SessionError};
pub use store::RuleStore;
pub use validation::{validate, ValidationError};
