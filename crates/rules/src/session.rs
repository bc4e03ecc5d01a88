//! [`Session`]: one round of editing the rules file.
//!
//! A session loads the file as a trusted snapshot, drives the editor the
//! same way an interactive caller would, and writes the published
//! collection back after every successful save or delete. A rejected save
//! leaves the file untouched.

use tracing::debug;

use crate::conflict::{audit, Audit};
use crate::editor::{EditorError, RuleEditor};
use crate::events::EditorEvent;
use crate::form::{FieldError, FieldPatch, HourDomain, RowFields};
use crate::loader::{SnapshotError, SnapshotFile};
use crate::schema::Rule;

/// Why a session operation failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("invalid rule fields: {0}")]
    Field(#[from] FieldError),

    #[error("rule not saved: {0}")]
    Editor(#[from] EditorError),

    #[error("no rule with serial {0}")]
    UnknownSerial(u32),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Rules file opened for editing.
pub struct Session {
    file: SnapshotFile,
    editor: RuleEditor<Vec<EditorEvent>>,
}

impl Session {
    /// Load `file` into a fresh editor.
    pub fn open(file: SnapshotFile) -> Result<Self> {
        let mut editor = RuleEditor::new(Vec::new());
        editor.apply(file.load()?);
        Ok(Self { file, editor })
    }

    pub fn file(&self) -> &SnapshotFile {
        &self.file
    }

    /// The collection as currently published.
    pub fn rules(&self) -> Vec<Rule> {
        self.editor.rules()
    }

    /// Malformed and overlapping rules in the loaded collection.
    pub fn audit(&self) -> Audit {
        audit(self.editor.store().as_slice())
    }

    /// Append a row with `fields`, save it and write the file.
    pub fn add(&mut self, fields: &RowFields, domain: &HourDomain) -> Result<Vec<Rule>> {
        let draft = fields.parse(domain)?;
        let position = self.editor.add();
        self.editor.edit(position, draft)?;
        let rules = self.editor.save(position, None)?;
        self.persist(&rules)?;
        Ok(rules)
    }

    /// Patch the saved rule holding `serial`, re-save it under that serial
    /// and write the file.
    pub fn edit(&mut self, serial: u32, patch: FieldPatch, domain: &HourDomain) -> Result<Vec<Rule>> {
        let position = self.position_of(serial)?;
        let row = self
            .editor
            .row(position)
            .ok_or(SessionError::UnknownSerial(serial))?;

        let mut fields = RowFields::from(row.draft());
        patch.apply_to(&mut fields);
        let draft = fields.parse(domain)?;

        self.editor.edit(position, draft)?;
        let rules = self.editor.save(position, Some(serial))?;
        self.persist(&rules)?;
        Ok(rules)
    }

    /// Remove the saved rule holding `serial` and write the file.
    pub fn delete(&mut self, serial: u32) -> Result<Vec<Rule>> {
        let position = self.position_of(serial)?;
        let rules = self.editor.delete(position)?;
        self.persist(&rules)?;
        Ok(rules)
    }

    fn position_of(&self, serial: u32) -> Result<usize> {
        self.editor
            .position_of(serial)
            .ok_or(SessionError::UnknownSerial(serial))
    }

    fn persist(&self, rules: &[Rule]) -> Result<()> {
        self.file.write(rules)?;
        debug!(count = rules.len(), "session wrote rules file");
        Ok(())
    }
}
