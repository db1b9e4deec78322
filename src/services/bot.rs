//! The bot's sub-command table.

use pseudolink_proto::format::{find_illegal_control_char, strip_illegal_control_chars};
use tracing::{info, warn};

use super::{ServiceEffect, ServiceResult};
use crate::config::LinkSettings;

/// Sub-command that writes its arguments to the link as a raw line.
pub const RAW_COMMAND: &str = "`";

/// A sub-command split off an addressed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand<'a> {
    /// Upper-cased sub-command name.
    pub name: String,
    /// Argument tokens in order.
    pub args: Vec<&'a str>,
}

impl<'a> BotCommand<'a> {
    /// Split `text` on single spaces. Runs of spaces produce empty tokens so
    /// that [`joined_args`](Self::joined_args) gives back the text verbatim.
    pub fn parse(text: &'a str) -> Self {
        let mut parts = text.split(' ');
        let name = parts.next().unwrap_or_default().to_uppercase();
        Self {
            name,
            args: parts.collect(),
        }
    }

    /// Arguments re-joined with single spaces.
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// The bot, borrowing the link settings for its identity.
pub struct Bot<'a> {
    settings: &'a LinkSettings,
}

impl<'a> Bot<'a> {
    /// Create a bot bound to the given settings.
    pub fn new(settings: &'a LinkSettings) -> Self {
        Self { settings }
    }

    /// Handle an addressed message from `sender`, replying to `reply_to`.
    pub fn handle_command(&self, sender: &str, reply_to: &str, text: &str) -> ServiceResult {
        let command = BotCommand::parse(text);

        match command.name.as_str() {
            "HELP" => self.help_reply(reply_to),
            RAW_COMMAND if command.args.iter().any(|a| !a.is_empty()) => {
                self.raw_command(sender, reply_to, &command)
            }
            _ => self.unknown_command(reply_to, &command.name),
        }
    }

    fn reply_effect(&self, target: &str, text: &str) -> ServiceEffect {
        ServiceEffect::Reply {
            target: target.to_string(),
            text: text.to_string(),
        }
    }

    fn help_reply(&self, target: &str) -> ServiceResult {
        vec![self.reply_effect(target, &help_text(self.settings.source_link()))]
    }

    fn unknown_command(&self, target: &str, name: &str) -> ServiceResult {
        vec![self.reply_effect(
            target,
            &format!(
                "Unknown command: \x02{}\x02. Use \x02HELP\x02 for a list of commands.",
                strip_illegal_control_chars(name)
            ),
        )]
    }

    fn raw_command(&self, sender: &str, target: &str, command: &BotCommand<'_>) -> ServiceResult {
        if !self.settings.may_send_raw(sender) {
            warn!(sender = %sender, "Raw passthrough denied");
            return vec![self.reply_effect(
                target,
                &format!("Permission denied: \x02{}\x02 is restricted.", RAW_COMMAND),
            )];
        }

        let line = command.joined_args();
        if let Some(ch) = find_illegal_control_char(&line) {
            warn!(sender = %sender, char = ?ch, "Raw line carries a control character");
            return vec![self.reply_effect(target, "Raw line rejected: control characters are not allowed.")];
        }

        info!(sender = %sender, line = %line, "Raw passthrough");
        vec![ServiceEffect::Raw(line)]
    }
}

/// The fixed HELP text.
pub fn help_text(source_url: Option<&str>) -> String {
    let intro = format!(
        "\x02{}\x02 {} is a pseudoserver bot. Commands: \x02HELP\x02.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    match source_url {
        Some(url) => format!("{intro} Source: {url}"),
        None => intro,
    }
}
