//! The server link: one stream, one settings record, one sequential loop.

use std::mem;

use futures_util::{SinkExt, StreamExt};
use pseudolink_proto::format::find_illegal_control_char;
use pseudolink_proto::message::tokenize;
use pseudolink_proto::{LineCodec, Message};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, trace, warn};

use super::handshake::opening_sequence;
use crate::config::LinkSettings;
use crate::error::{HandlerError, LinkError};
use crate::handlers::{Context, Registry};
use crate::telemetry::{extract_msgid, spans};

/// A link to the remote server over any byte stream.
///
/// The link writes its opening sequence, then reads one line at a time,
/// dispatches it and writes every queued reply before reading again.
pub struct Link<S> {
    framed: Framed<S, LineCodec>,
    settings: LinkSettings,
    registry: Registry,
    /// Replies queued by handlers for the line being processed
    outbound: Vec<Message>,
}

impl<S> Link<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a link with the built-in handlers.
    pub fn new(stream: S, settings: LinkSettings) -> Self {
        Self::with_registry(stream, settings, Registry::new())
    }

    /// Create a link with a custom handler registry.
    pub fn with_registry(stream: S, settings: LinkSettings, registry: Registry) -> Self {
        let codec = LineCodec::with_max_len(settings.max_line_len);
        Self {
            framed: Framed::new(stream, codec),
            settings,
            registry,
            outbound: Vec::new(),
        }
    }

    /// Run the link until shutdown or a fatal error.
    ///
    /// Returns `Ok(())` only when `shutdown` is cancelled. A peer closing the
    /// stream is [`LinkError::Closed`].
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<(), LinkError> {
        let span = spans::link(
            &self.settings.sid,
            &self.settings.server_name,
            &self.settings.remote,
        );

        async move {
            let result = self.drive(&shutdown).await;

            let stats = self.registry.get_command_stats();
            match &result {
                Ok(()) => info!(commands = ?stats, "Link closed"),
                Err(e) => warn!(code = e.error_code(), error = %e, commands = ?stats, "Link failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(&mut self, shutdown: &CancellationToken) -> Result<(), LinkError> {
        if shutdown.is_cancelled() {
            return Ok(());
        }

        self.handshake().await?;

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested");
                    self.write_lines(vec![Message::error("Shutting down")]).await?;
                    return Ok(());
                }
                next = self.next_line() => next?,
            };

            let Some(line) = next else {
                return Err(LinkError::Closed);
            };

            self.process_line(&line);
            self.flush_outbound().await?;
        }
    }

    /// Write the opening sequence. Nothing is read before this completes.
    async fn handshake(&mut self) -> Result<(), LinkError> {
        let now = chrono::Utc::now().timestamp();
        let lines = opening_sequence(&self.settings, now);
        let count = lines.len();

        self.write_lines(lines).await?;

        info!(
            lines = count,
            channels = self.settings.channels.len(),
            "Burst sent"
        );
        Ok(())
    }

    /// Read the next line, honouring the read deadline.
    async fn next_line(&mut self) -> Result<Option<String>, LinkError> {
        let next = match self.settings.read_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.framed.next())
                .await
                .map_err(|_| LinkError::ReadTimeout(limit))?,
            None => self.framed.next().await,
        };
        Ok(next.transpose()?)
    }

    /// Tokenize and dispatch one line, queueing replies and error lines.
    fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            trace!("Skipping empty line");
            return;
        }

        let msg = match tokenize(line) {
            Ok(msg) => msg,
            Err(cause) => {
                warn!(line = %line, error = %cause, "Malformed line");
                self.queue_error(HandlerError::from(cause));
                return;
            }
        };

        let span = spans::command(msg.command, msg.source().unwrap_or("*"), extract_msgid(&msg));
        let _enter = span.enter();
        debug!(tags = ?msg.tags, params = ?msg.params, "Received");

        let mut ctx = Context::new(&self.settings, &mut self.outbound);
        if let Err(e) = self.registry.dispatch(&mut ctx, &msg) {
            warn!(code = e.error_code(), error = %e, "Command failed");
            self.queue_error(e);
        }
    }

    fn queue_error(&mut self, error: HandlerError) {
        self.outbound.push(error.to_error_line());
    }

    async fn flush_outbound(&mut self) -> Result<(), LinkError> {
        if self.outbound.is_empty() {
            return Ok(());
        }
        let lines = mem::take(&mut self.outbound)
            .into_iter()
            .map(frame_safe)
            .collect();
        self.write_lines(lines).await
    }

    /// Write and flush `lines` in order, honouring the write deadline.
    async fn write_lines(&mut self, lines: Vec<Message>) -> Result<(), LinkError> {
        let framed = &mut self.framed;
        let write = async move {
            for msg in lines {
                trace!(line = %msg, "Sending");
                framed.feed(msg).await?;
            }
            SinkExt::<Message>::flush(framed).await
        };

        match self.settings.write_timeout() {
            Some(limit) => tokio::time::timeout(limit, write)
                .await
                .map_err(|_| LinkError::WriteTimeout(limit))??,
            None => write.await?,
        }
        Ok(())
    }
}

/// Swap a reply the codec would refuse for an `ERROR` line.
///
/// Replies echo peer text (prefixes, targets), and a CR or NUL smuggled into
/// it must not end the link.
fn frame_safe(msg: Message) -> Message {
    let Some(ch) = find_illegal_control_char(&msg.to_string()) else {
        return msg;
    };
    let command = msg.command.name();
    warn!(command, char = ?ch, "Dropping reply carrying a control character");
    Message::error(format!(
        "{command} reply dropped: echoed text contains a control character"
    ))
}
