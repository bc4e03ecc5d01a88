//! Editor-local row state.

use serde::Serialize;

use crate::schema::Rule;

/// Lifecycle of one editor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    /// Just added, nothing picked yet.
    New,
    /// Fields changed since the last commit.
    Dirty,
    /// Matches the committed rule.
    Saved,
}

/// One row: the current field values plus transient editing state.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct Row {
    draft: Rule,
    state: RowState,
    committed: bool,
}

impl Row {
    pub(super) fn blank() -> Self {
        Self {
            draft: Rule::blank(),
            state: RowState::New,
            committed: false,
        }
    }

    pub(super) fn loaded(rule: Rule) -> Self {
        Self {
            draft: rule,
            state: RowState::Saved,
            committed: true,
        }
    }

    /// Field values currently shown in the row.
    pub fn draft(&self) -> &Rule {
        &self.draft
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// Whether the save affordance should be offered.
    pub fn is_dirty(&self) -> bool {
        self.state != RowState::Saved
    }

    /// Whether the row has been saved at least once and so contributes to
    /// the published collection.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub(super) fn set_draft(&mut self, draft: Rule) {
        self.draft = draft;
        self.state = RowState::Dirty;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.state = RowState::Dirty;
    }

    pub(super) fn mark_saved(&mut self) {
        self.state = RowState::Saved;
        self.committed = true;
    }
}
