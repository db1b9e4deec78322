//! Link command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! inbound lines to the appropriate handler.
//!
//! ## Borrowed messages
//!
//! Handlers receive a `ParsedMessage<'_>` borrowing the line just read, and
//! queue their replies on the [`Context`]. The link writes the queue before
//! it reads the next line, so replies never overtake each other.

mod connection;
mod messaging;

pub use connection::PingHandler;
pub use messaging::PrivmsgHandler;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use pseudolink_proto::{Message, ParsedMessage};
use tracing::trace;

use crate::config::LinkSettings;
pub use crate::error::{HandlerError, HandlerResult};
use crate::telemetry::CommandTimer;

/// Per-line handler context.
pub struct Context<'a> {
    /// Link settings (immutable for the link's lifetime).
    pub settings: &'a LinkSettings,
    /// Replies queued for the link to write, in order.
    outbound: &'a mut Vec<Message>,
}

impl<'a> Context<'a> {
    /// Create a context queueing replies into `outbound`.
    pub fn new(settings: &'a LinkSettings, outbound: &'a mut Vec<Message>) -> Self {
        Self { settings, outbound }
    }

    /// Queue a line for the link to write.
    pub fn send(&mut self, msg: Message) {
        self.outbound.push(msg);
    }

    /// Queue a line sourced from this server.
    pub fn send_from_server(&mut self, msg: Message) {
        let msg = msg.with_prefix(self.settings.sid.as_str());
        self.send(msg);
    }
}

/// Trait implemented by all command handlers.
///
/// Handlers hold no per-invocation state; everything they need arrives in
/// the context and the message.
pub trait Handler: Send + Sync {
    /// Handle an inbound message.
    fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage<'_>) -> HandlerResult;
}

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters, logged when the link closes
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Registry {
    /// Create a new registry with the built-in handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            command_counts: HashMap::new(),
        };

        registry.register("PING", PingHandler);
        registry.register("PRIVMSG", PrivmsgHandler);

        registry
    }

    /// Register (or replace) the handler for `command`.
    pub fn register(&mut self, command: &'static str, handler: impl Handler + 'static) {
        self.handlers.insert(command, Box::new(handler));
        self.command_counts.entry(command).or_insert_with(|| AtomicU64::new(0));
    }

    /// Whether a handler is registered for exactly `command`.
    #[cfg(test)]
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Get command usage statistics, most used first.
    pub fn get_command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0) // Only include used commands
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch a message to its handler.
    ///
    /// Lookup is an exact, case-sensitive match on the command token. Unknown
    /// commands are not an error and produce no output.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &ParsedMessage<'_>) -> HandlerResult {
        let Some((&name, handler)) = self.handlers.get_key_value(msg.command) else {
            trace!(command = %msg.command, "Ignoring unhandled command");
            return Ok(());
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let _timer = CommandTimer::new(name);
        handler.handle(ctx, msg)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::tests::sample;

    struct Echo;

    impl Handler for Echo {
        fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage<'_>) -> HandlerResult {
            ctx.send(Message::raw(msg.command.to_string()));
            Ok(())
        }
    }

    fn run(registry: &Registry, line: &str) -> (HandlerResult, Vec<String>) {
        let settings = sample();
        let mut out = Vec::new();
        let msg = ParsedMessage::parse(line).unwrap();
        let result = registry.dispatch(&mut Context::new(&settings, &mut out), &msg);
        (result, out.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::new();
        assert!(registry.contains("PING"));
        assert!(registry.contains("PRIVMSG"));
        assert!(!registry.contains("ping"));
    }

    #[test]
    fn test_unknown_command_is_silent() {
        let registry = Registry::new();
        let (result, out) = run(&registry, ":0AB FJOIN #x 1 + :,0ABAAAAAA");
        assert_eq!(result, Ok(()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::new();
        let (result, out) = run(&registry, ":0AB ping :42X");
        assert_eq!(result, Ok(()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_register_extends_table() {
        let mut registry = Registry::new();
        registry.register("VERSION", Echo);
        let (_, out) = run(&registry, ":0AB VERSION");
        assert_eq!(out, vec!["VERSION"]);
    }

    #[test]
    fn test_command_stats() {
        let registry = Registry::new();
        let settings = sample();
        let mut out = Vec::new();
        for line in [":0AB PING :42X", ":0AB PING :42X", ":0ABAAAAAA PRIVMSG #nope :hi"] {
            let msg = ParsedMessage::parse(line).unwrap();
            let _ = registry.dispatch(&mut Context::new(&settings, &mut out), &msg);
        }
        assert_eq!(registry.get_command_stats(), vec![("PING", 2), ("PRIVMSG", 1)]);
    }
}
