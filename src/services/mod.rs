//! Bot services.
//!
//! The bot answers addressed PRIVMSGs with a small sub-command table. It
//! never touches the link itself; it returns effects that the PRIVMSG
//! handler turns into outbound lines.

pub mod bot;

pub use bot::Bot;

/// Unified effect type returned by bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEffect {
    /// Send a NOTICE from the bot to a channel or user.
    Reply {
        /// Channel name or sender UID.
        target: String,
        /// Notice body, sent as the trailing parameter.
        text: String,
    },

    /// Write a line to the link verbatim.
    Raw(String),
}

/// Result type for bot commands - a list of effects to apply.
pub type ServiceResult = Vec<ServiceEffect>;
