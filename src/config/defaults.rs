//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use pseudolink_proto::DEFAULT_MAX_LINE_LEN;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Bot Identity Defaults
// =============================================================================

pub fn default_user_mode() -> String {
    "+i".to_string()
}

/// Prefix mode letters granted in the FJOIN membership entry.
pub fn default_join_mode() -> String {
    "o".to_string()
}

/// Mode change applied to the bot right after each FJOIN.
pub fn default_after_join_mode() -> String {
    "+o".to_string()
}

// =============================================================================
// Link Defaults
// =============================================================================

pub fn default_read_timeout_secs() -> u64 {
    300
}

pub fn default_write_timeout_secs() -> u64 {
    30
}

pub fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}
