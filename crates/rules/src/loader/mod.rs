//! YAML snapshot persistence with hot-reload via `notify` watcher.
//!
//! The editor publishes the full collection after every committed change;
//! [`SnapshotFile`] writes that collection to disk and feeds external edits
//! of the file back to the editor as "rules applied" snapshots.

mod core;
mod error;
mod watcher;

#[cfg(test)]
mod tests;

pub use self::core::{parse_snapshot, SnapshotFile};
pub use self::error::{Result, SnapshotError};
