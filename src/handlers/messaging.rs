//! PRIVMSG handler: routes addressed messages to the bot.

use pseudolink_proto::{Message, ParsedMessage};
use tracing::debug;

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::services::{Bot, ServiceEffect};

/// Handler for PRIVMSG command.
///
/// A message reaches the bot when it is sent to a joined channel and starts
/// with `<nick>: `, or when it is sent straight to the bot's UID. Everything
/// else is not for us and is dropped without a reply.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage<'_>) -> HandlerResult {
        let sender = msg.source().ok_or(HandlerError::NoPrefix("PRIVMSG"))?;
        let (Some(destination), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams("PRIVMSG"));
        };

        let settings = ctx.settings;
        let (reply_to, text) = if destination.starts_with('#') {
            if !settings.is_joined(destination) {
                debug!(channel = %destination, "Dropping PRIVMSG for unjoined channel");
                return Ok(());
            }
            let address = format!("{}: ", settings.nick);
            let Some(text) = text.strip_prefix(address.as_str()) else {
                return Ok(());
            };
            (destination, text)
        } else if destination == settings.full_uid() {
            (sender, text)
        } else {
            debug!(target = %destination, "Dropping PRIVMSG for unknown target");
            return Ok(());
        };

        let effects = Bot::new(settings).handle_command(sender, reply_to, text);
        apply_effects(ctx, effects);
        Ok(())
    }
}

/// Turn bot effects into outbound lines, in order.
fn apply_effects(ctx: &mut Context<'_>, effects: Vec<ServiceEffect>) {
    let bot_uid = ctx.settings.full_uid();
    for effect in effects {
        let msg = match effect {
            ServiceEffect::Reply { target, text } => {
                Message::notice(target, text).with_prefix(bot_uid.as_str())
            }
            ServiceEffect::Raw(line) => Message::raw(line),
        };
        ctx.send(msg);
    }
}
