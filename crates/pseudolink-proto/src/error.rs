//! Error types for the link protocol library.
//!
//! [`ProtocolError`] covers framing and I/O failures on the line codec,
//! [`MessageParseError`] the ways a single line can fail to tokenize.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in an inbound line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// The stream ended in the middle of a line.
    #[error("stream ended with {pending} bytes of an unterminated line")]
    UnterminatedLine {
        /// Bytes buffered after the last terminator.
        pending: usize,
    },

    /// Outbound line carries a character that would break framing.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// A line could not be tokenized.
    #[error("malformed message: {cause} (input: {string:?})")]
    MalformedMessage {
        /// The offending line.
        string: String,
        /// The underlying tokenizer error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when tokenizing a protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// The `@` tag block was not followed by a space.
    #[error("tag block is not followed by a space")]
    UnterminatedTags,

    /// The `:` source prefix was not followed by a space.
    #[error("prefix is not followed by a space")]
    UnterminatedPrefix,
}
