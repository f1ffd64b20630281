// =============================================================================
// TABLES
// =============================================================================

pub const PROFILES_TABLE: &str = "profiles";

pub const MESSAGES_TABLE: &str = "messages";

// =============================================================================
// STORAGE
// =============================================================================

/// Maximum entries returned by a folder listing (no pagination beyond this)
pub const STORAGE_LIST_LIMIT: usize = 100;

pub const AVATARS_FOLDER: &str = "avatars";

pub const PORTFOLIO_FOLDER: &str = "portfolio";

pub const ATTACHMENTS_FOLDER: &str = "attachments";

// =============================================================================
// MESSAGING
// =============================================================================

/// Sender address used when a chat viewer does not identify themselves
pub const DEFAULT_VISITOR_EMAIL: &str = "visitor@example.com";
