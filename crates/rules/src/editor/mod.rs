//! Row-based rule editor: the state machine behind add / edit / save /
//! delete and snapshot reloads.
//!
//! The editor owns a [`RuleStore`](crate::store::RuleStore) holding the
//! last committed rule of every saved row, in row order. Rows that were
//! never saved have no store entry, so they neither conflict with anything
//! nor shift the serials of saved rules. A row enters the store on its
//! first save, at the slot matching its row order.
//!
//! The store is the published collection: the serial a collaborator sees
//! in a "rules updated" payload is the serial it claims when saving that
//! rule again.

mod core;
mod error;
mod row;
mod service;


pub use self::core::RuleEditor;
pub use self::error::EditorError;
pub use self::row::{Row, RowState};
pub use self::service::run;
