//! Telemetry utilities for command timing and message correlation.

use std::time::Instant;

use pseudolink_proto::ParsedMessage;

/// Guard for timing command execution.
///
/// Logs the handler latency at `trace` level when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        tracing::trace!(
            command = self.command,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "command handled"
        );
    }
}

/// Extract msgid from the raw tag block if present.
pub fn extract_msgid<'a>(msg: &ParsedMessage<'a>) -> Option<&'a str> {
    msg.tags?
        .split(';')
        .filter_map(|tag| tag.split_once('='))
        .find(|(key, _)| *key == "msgid")
        .map(|(_, value)| value)
}

/// Standardized span constructors for link observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for the server link.
    pub fn link(sid: &str, name: &str, remote: &str) -> Span {
        info_span!("link", sid = %sid, name = %name, remote = %remote)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, source: &str, msgid: Option<&str>) -> Span {
        if let Some(msgid) = msgid {
            info_span!("command", name = %name, source = %source, msgid = %msgid)
        } else {
            info_span!("command", name = %name, source = %source)
        }
    }
}
