//! Line-based codec for tokio.
//!
//! Server links frame every line with a single `\n`. Inbound, a `\r` directly
//! before the terminator is tolerated and stripped. Outbound, exactly one
//! `\n` is appended and lines that would break framing are refused.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::error::{self, ProtocolError};
use crate::format::find_illegal_control_char;
use crate::message::Message;

/// Default maximum inbound line length, terminator included.
///
/// Burst lines from a busy hub (FJOIN with many members, METADATA) exceed the
/// 512 bytes of client lines by a wide margin.
pub const DEFAULT_MAX_LINE_LEN: usize = 8192;

/// Codec yielding `\n`-terminated lines as `String`s without the terminator.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// The configured maximum line length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        // Look for newline starting from where we left off
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            return Ok(None);
        };

        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        if line.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: line.len(),
                limit: self.max_len,
            });
        }

        let mut body = &line[..line.len() - 1];
        if let Some(stripped) = body.strip_suffix(b"\r") {
            body = stripped;
        }

        let data = std::str::from_utf8(body)
            .map_err(|e| ProtocolError::InvalidUtf8 {
                byte_pos: e.valid_up_to(),
                details: e.to_string(),
            })?
            .to_owned();

        trace!(line = %data, "decoded line");
        Ok(Some(data))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            None => Err(ProtocolError::UnterminatedLine { pending: src.len() }),
        }
    }
}

impl Encoder<Message> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        let line = msg.to_string();
        if let Some(ch) = find_illegal_control_char(&line) {
            return Err(ProtocolError::IllegalControlChar(ch));
        }

        dst.reserve(line.len() + 1);
        dst.put_slice(line.as_bytes());
        dst.put_u8(b'\n');
        Ok(())
    }
}
