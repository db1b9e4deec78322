//! PING handler.

use pseudolink_proto::{Command, Message, ParsedMessage};

use super::{Context, Handler, HandlerError, HandlerResult};

/// Handler for PING command.
///
/// `PING <sid>` from a neighbour is answered with `PONG :<source>`, and the
/// two-parameter form `PING <origin> <target>` is bounced back as
/// `PONG <origin> :<target>`.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage<'_>) -> HandlerResult {
        let pong = match msg.params.as_slice() {
            [target] => {
                if *target != ctx.settings.sid {
                    return Err(HandlerError::PingTargetMismatch(target.to_string()));
                }
                let source = msg.source().ok_or(HandlerError::NoPrefix("PING"))?;
                Command::PONG(None, source.to_string())
            }
            [origin, target] => Command::PONG(Some(origin.to_string()), target.to_string()),
            params => {
                return Err(HandlerError::ParamCount {
                    command: "PING",
                    expected: "1 or 2",
                    got: params.len(),
                });
            }
        };

        ctx.send_from_server(Message::from(pong));
        Ok(())
    }
}
