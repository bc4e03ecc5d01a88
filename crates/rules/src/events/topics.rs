//! Topic names for editor traffic, following `<domain>.<event>`.

// ── Inbound ───────────────────────────────────────────────────────────────

/// A full snapshot arrived from outside and replaces the collection.
pub const RULES_APPLIED: &str = "rules.applied";

/// The user asked for a new empty rule row.
pub const RULE_REQUESTED: &str = "rules.requested";

pub const ROW_EDITED: &str = "rules.row.edited";
pub const ROW_SAVED: &str = "rules.row.saved";
pub const ROW_DELETED: &str = "rules.row.deleted";

// ── Outbound ──────────────────────────────────────────────────────────────

/// The committed collection changed (save or delete).
pub const RULES_UPDATED: &str = "rules.updated";

/// The editor has no rows left.
pub const RULES_EMPTY: &str = "rules.empty";

/// A queued save failed validation.
pub const SAVE_REJECTED: &str = "rules.rejected";
