//! Inbound commands and outbound notifications of the rule editor.
//!
//! Collaborators drive the editor with [`EditorCommand`]s and observe it via
//! an [`EventSink`] receiving [`EditorEvent`]s.

mod sink;
pub mod topics;

pub use sink::EventSink;

use serde::{Deserialize, Serialize};

use crate::schema::Rule;
use crate::validation::ValidationError;

/// Requests delivered to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Wholesale reload from an external snapshot ("rules applied").
    ApplyRules { rules: Vec<Rule> },
    /// Append an empty row ("new rule requested").
    AddRule,
    /// Row field values changed.
    Edit { position: usize, draft: Rule },
    /// A field changed but the caller does not hand over values.
    MarkDirty { position: usize },
    /// Validate and commit a row.
    Save {
        position: usize,
        #[serde(default)]
        claimed_serial: Option<u32>,
    },
    /// Remove a row without validation.
    Delete { position: usize },
}

impl EditorCommand {
    pub fn topic(&self) -> &'static str {
        match self {
            EditorCommand::ApplyRules { .. } => topics::RULES_APPLIED,
            EditorCommand::AddRule => topics::RULE_REQUESTED,
            EditorCommand::Edit { .. } | EditorCommand::MarkDirty { .. } => topics::ROW_EDITED,
            EditorCommand::Save { .. } => topics::ROW_SAVED,
            EditorCommand::Delete { .. } => topics::ROW_DELETED,
        }
    }
}

/// Notifications published by the editor after a committed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Full collection after a save or delete, serials freshly renumbered.
    RulesUpdated { rules: Vec<Rule> },
    /// No rows remain.
    CollectionEmpty,
    /// A save request arriving over a channel failed validation; carries
    /// the message kind to show the user.
    SaveRejected {
        position: usize,
        reason: ValidationError,
    },
}

impl EditorEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            EditorEvent::RulesUpdated { .. } => topics::RULES_UPDATED,
            EditorEvent::CollectionEmpty => topics::RULES_EMPTY,
            EditorEvent::SaveRejected { .. } => topics::SAVE_REJECTED,
        }
    }
}
