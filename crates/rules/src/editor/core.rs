//! [`RuleEditor`]: orchestrates row transitions against the store.

use tracing::{debug, info, warn};

use crate::conflict::audit;
use crate::events::{EditorCommand, EditorEvent, EventSink};
use crate::schema::Rule;
use crate::store::RuleStore;
use crate::validation::validate;

use super::error::EditorError;
use super::row::Row;

/// Rule editor controller.
///
/// All mutation goes through the transition methods below; each runs to
/// completion before the next request is looked at, so the store needs no
/// locking. Notifications go to the sink `S` only after the store has been
/// updated and renumbered.
pub struct RuleEditor<S> {
    /// Committed rules of the saved rows, in row order.
    store: RuleStore,
    rows: Vec<Row>,
    sink: S,
}

impl<S: EventSink> RuleEditor<S> {
    /// Create an editor with no rows.
    pub fn new(sink: S) -> Self {
        Self {
            store: RuleStore::new(),
            rows: Vec::new(),
            sink,
        }
    }

    /// Replace every row with the given snapshot. Each incoming rule becomes
    /// a saved row; serials are reassigned by order.
    ///
    /// Snapshots are trusted and not validated. Overlaps and malformed rules
    /// are logged so they can be spotted, then kept as-is. Nothing is
    /// published except the empty-collection signal.
    pub fn apply(&mut self, rules: Vec<Rule>) {
        self.store.replace_all(rules);
        self.rows = self.store.iter().cloned().map(Row::loaded).collect();

        let findings = audit(self.store.as_slice());
        for rule in &findings.malformed {
            warn!(serial = rule.serial, rule = %rule, "applied snapshot contains a malformed rule");
        }
        for conflict in &findings.conflicts {
            warn!(
                first = conflict.first,
                second = conflict.second,
                shared_hours = conflict.shared_hours,
                "applied snapshot contains overlapping rules"
            );
        }

        info!(count = self.rows.len(), "applied rule snapshot");
        if self.rows.is_empty() {
            self.sink.publish(EditorEvent::CollectionEmpty);
        }
    }

    /// Append a new, empty row. It stays out of the store, and so out of
    /// the published collection, until its first save. Returns its position.
    pub fn add(&mut self) -> usize {
        self.rows.push(Row::blank());
        let position = self.rows.len() - 1;
        debug!(position, "added rule row");
        position
    }

    /// Replace a row's field values. Marks it dirty; no validation.
    pub fn edit(&mut self, position: usize, draft: Rule) -> Result<(), EditorError> {
        self.row_mut(position)?.set_draft(draft);
        Ok(())
    }

    /// Flag a row as having unsaved changes.
    pub fn mark_dirty(&mut self, position: usize) -> Result<(), EditorError> {
        self.row_mut(position)?.mark_dirty();
        Ok(())
    }

    /// Validate the row's current fields and commit them.
    ///
    /// `claimed_serial` names the saved rule this row corresponds to, so the
    /// overlap check skips it. On success the re-derived collection is
    /// published and returned. On failure the row stays dirty and nothing
    /// else changes.
    pub fn save(
        &mut self,
        position: usize,
        claimed_serial: Option<u32>,
    ) -> Result<Vec<Rule>, EditorError> {
        let candidate = self.row(position).ok_or(EditorError::RowNotFound(position))?.draft().clone();

        if let Err(e) = validate(&candidate, &self.store, claimed_serial) {
            info!(position, reason = e.code(), "rejected rule save");
            self.row_mut(position)?.mark_dirty();
            return Err(e.into());
        }

        let slot = self.committed_before(position);
        match self.store_index(position) {
            Some(index) => {
                self.store.replace_at(index, candidate);
            }
            None if slot == self.store.len() => {
                self.store.append(candidate);
            }
            None => {
                self.store.insert_at(slot, candidate);
            }
        }
        self.row_mut(position)?.mark_saved();
        self.store.renumber();

        let rules = self.rules();
        info!(position, count = rules.len(), "saved rule");
        self.sink.publish(EditorEvent::RulesUpdated { rules: rules.clone() });
        Ok(rules)
    }

    /// Remove a row unconditionally and publish the remaining collection.
    /// Signals an empty collection when no rows are left.
    pub fn delete(&mut self, position: usize) -> Result<Vec<Rule>, EditorError> {
        if position >= self.rows.len() {
            return Err(EditorError::RowNotFound(position));
        }
        if let Some(index) = self.store_index(position) {
            self.store.remove_at(index);
        }
        self.rows.remove(position);
        self.store.renumber();

        let rules = self.rules();
        info!(position, count = rules.len(), "deleted rule");
        self.sink.publish(EditorEvent::RulesUpdated { rules: rules.clone() });
        if self.rows.is_empty() {
            self.sink.publish(EditorEvent::CollectionEmpty);
        }
        Ok(rules)
    }

    /// Dispatch an inbound command.
    pub fn handle(&mut self, command: EditorCommand) -> Result<(), EditorError> {
        match command {
            EditorCommand::ApplyRules { rules } => self.apply(rules),
            EditorCommand::AddRule => {
                self.add();
            }
            EditorCommand::Edit { position, draft } => self.edit(position, draft)?,
            EditorCommand::MarkDirty { position } => self.mark_dirty(position)?,
            EditorCommand::Save {
                position,
                claimed_serial,
            } => {
                self.save(position, claimed_serial)?;
            }
            EditorCommand::Delete { position } => {
                self.delete(position)?;
            }
        }
        Ok(())
    }
}

impl<S> RuleEditor<S> {
    /// The committed collection in row order with serials 1..M. Rows never
    /// saved are left out.
    pub fn rules(&self) -> Vec<Rule> {
        self.store.snapshot()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Published serial of the row at `position`; `None` until first saved.
    pub fn serial_of(&self, position: usize) -> Option<u32> {
        self.store_index(position)
            .and_then(|index| self.store.get(index))
            .map(|r| r.serial)
    }

    /// Row position of the saved rule holding `serial`.
    pub fn position_of(&self, serial: u32) -> Option<usize> {
        let index = self.store.position_of(serial)?;
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_committed())
            .nth(index)
            .map(|(position, _)| position)
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Whether there are no rows (drives the empty-state placeholder).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Number of saved rows above `position`: where the row's rule sits,
    /// or would be inserted, in the store.
    fn committed_before(&self, position: usize) -> usize {
        self.rows[..position.min(self.rows.len())]
            .iter()
            .filter(|row| row.is_committed())
            .count()
    }

    fn store_index(&self, position: usize) -> Option<usize> {
        let row = self.rows.get(position)?;
        row.is_committed().then(|| self.committed_before(position))
    }

    fn row_mut(&mut self, position: usize) -> Result<&mut Row, EditorError> {
        self.rows
            .get_mut(position)
            .ok_or(EditorError::RowNotFound(position))
    }
}

impl<S: EventSink + Default> Default for RuleEditor<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
