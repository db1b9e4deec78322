//! Unified error handling for pseudolink.
//!
//! Two layers: [`HandlerError`] for recoverable protocol-level problems that
//! are reported to the peer as an `ERROR` line, and [`LinkError`] for faults
//! that end the link.

use std::time::Duration;

use pseudolink_proto::format::strip_illegal_control_chars;
use pseudolink_proto::{Message, MessageParseError, ProtocolError};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur while handling one inbound line.
///
/// None of these end the link. The peer is told via [`to_error_line`] and the
/// read loop carries on with the next line.
///
/// [`to_error_line`]: HandlerError::to_error_line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("malformed message: {0}")]
    Malformed(#[from] MessageParseError),

    #[error("{0} requires a source prefix")]
    NoPrefix(&'static str),

    #[error("not enough parameters for {0}")]
    NeedMoreParams(&'static str),

    #[error("{command} takes {expected} parameters, got {got}")]
    ParamCount {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("PING target {0} is not this server")]
    PingTargetMismatch(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::NoPrefix(_) => "no_prefix",
            Self::NeedMoreParams(_) => "need_more_params",
            Self::ParamCount { .. } => "param_count",
            Self::PingTargetMismatch(_) => "ping_target_mismatch",
        }
    }

    /// Convert to the `ERROR` line sent to the peer.
    ///
    /// Echoed peer text loses any CR, LF or NUL so the line stays sendable.
    pub fn to_error_line(&self) -> Message {
        let text = self.to_string();
        Message::error(strip_illegal_control_chars(&text))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Link Errors (fatal)
// ============================================================================

/// Faults that end the link.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to connect to {remote}: {source}")]
    Connect {
        remote: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake with {server_name} failed: {source}")]
    Tls {
        server_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("no line received for {0:?}")]
    ReadTimeout(Duration),

    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),

    #[error("connection closed by peer")]
    Closed,
}

impl LinkError {
    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Tls { .. } => "tls",
            Self::InvalidServerName(_) => "invalid_server_name",
            Self::Io(_) => "io",
            Self::Protocol(_) => "protocol",
            Self::ReadTimeout(_) => "read_timeout",
            Self::WriteTimeout(_) => "write_timeout",
            Self::Closed => "closed",
        }
    }
}
