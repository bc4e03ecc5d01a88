//! [`RuleStore`]: the canonical ordered rule sequence.
//!
//! Order is editor row order and `serial` is the 1-based position. Every
//! structural change ends with [`RuleStore::renumber`], so readers never see
//! a gap or a duplicate serial.

use tracing::debug;

use crate::schema::Rule;

/// Ordered collection of rules that owns serial assignment.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Full ordered read, used for reporting to collaborators.
    pub fn snapshot(&self) -> Vec<Rule> {
        self.rules.clone()
    }

    /// Atomically replace the whole collection, reassigning serials 1..N in
    /// the given order. Incoming serials are ignored.
    pub fn replace_all(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
        self.renumber();
        debug!(count = self.rules.len(), "replaced rule store contents");
    }

    /// Add a rule at the end with the provisional serial `len + 1`.
    /// Returns the position it landed at.
    pub fn append(&mut self, mut rule: Rule) -> usize {
        rule.serial = self.next_serial();
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Insert a rule at `position` (clamped to the end) and renumber.
    /// Returns the position it landed at.
    pub fn insert_at(&mut self, position: usize, rule: Rule) -> usize {
        let position = position.min(self.rules.len());
        self.rules.insert(position, rule);
        self.renumber();
        position
    }

    /// Remove the rule at `position` and renumber the remainder.
    pub fn remove_at(&mut self, position: usize) -> Option<Rule> {
        if position >= self.rules.len() {
            return None;
        }
        let removed = self.rules.remove(position);
        self.renumber();
        Some(removed)
    }

    /// Overwrite the rule at `position`, keeping that slot's serial.
    /// Returns the previous value.
    pub fn replace_at(&mut self, position: usize, mut rule: Rule) -> Option<Rule> {
        let slot = self.rules.get_mut(position)?;
        rule.serial = slot.serial;
        Some(std::mem::replace(slot, rule))
    }

    /// Recompute `serial = 1..N` by current order.
    pub fn renumber(&mut self) {
        for (idx, rule) in self.rules.iter_mut().enumerate() {
            rule.serial = idx as u32 + 1;
        }
    }

    pub fn get(&self, position: usize) -> Option<&Rule> {
        self.rules.get(position)
    }

    /// Position of the rule currently holding `serial`.
    pub fn position_of(&self, serial: u32) -> Option<usize> {
        self.rules.iter().position(|r| r.serial == serial)
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn next_serial(&self) -> u32 {
        self.rules.len() as u32 + 1
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
