//! Save-time validation of a candidate rule.
//!
//! Three checks run in a fixed order and the first failure wins:
//! days selected, `to > from`, no overlap with another saved rule.

use serde::{Deserialize, Serialize};

use crate::conflict::ConflictDetector;
use crate::schema::Rule;
use crate::store::RuleStore;

/// Why a save was rejected. Every variant is a user-correctable input error;
/// the display string is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// Save attempted with zero selected days.
    #[error("Please select days")]
    NoDaysSelected,

    /// `to <= from`.
    #[error("To hours must be greater than from hours")]
    InvalidRange,

    /// Overlaps a saved rule on a shared day by more than one hour value.
    #[error("Duplicate rule")]
    DuplicateRule,
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NoDaysSelected => "no_days_selected",
            ValidationError::InvalidRange => "invalid_range",
            ValidationError::DuplicateRule => "duplicate_rule",
        }
    }
}

/// Validate `candidate` against `store`, skipping the rule that holds
/// `claimed_serial` during the overlap check.
pub fn validate(
    candidate: &Rule,
    store: &RuleStore,
    claimed_serial: Option<u32>,
) -> Result<(), ValidationError> {
    if candidate.days.is_empty() {
        return Err(ValidationError::NoDaysSelected);
    }
    if candidate.to <= candidate.from {
        return Err(ValidationError::InvalidRange);
    }
    if ConflictDetector::new(store).is_duplicate(candidate, claimed_serial) {
        return Err(ValidationError::DuplicateRule);
    }
    Ok(())
}
