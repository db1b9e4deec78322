//! # pseudolink-proto
//!
//! Protocol pieces for a pseudoserver linked into an InspIRCd-style network
//! over the spanning-tree (server-to-server) protocol.
//!
//! ## Features
//!
//! - A tokenizer turning one raw protocol line into a borrowed
//!   [`ParsedMessage`] (tag block, prefix, command, parameters)
//! - A typed vocabulary of the outbound commands a pseudoserver emits
//!   during its burst and while answering the network
//! - Optional Tokio integration: a `\n`-terminated line codec
//!
//! ## Quick Start
//!
//! ### Tokenizing inbound lines
//!
//! ```rust
//! use pseudolink_proto::ParsedMessage;
//!
//! let msg = ParsedMessage::parse(":0AB PRIVMSG #ops :bot: help").unwrap();
//! assert_eq!(msg.prefix, Some("0AB"));
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.params.as_slice(), &["#ops", "bot: help"]);
//! ```
//!
//! ### Building outbound lines
//!
//! ```rust
//! use pseudolink_proto::{Command, Message};
//!
//! let pong = Message::from(Command::PONG(None, "hub.example".to_string())).with_prefix("42X");
//! assert_eq!(pong.to_string(), ":42X PONG :hub.example");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod format;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;

pub use self::command::{Command, Member, PROTOCOL_VERSION};
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::message::{Message, ParsedMessage};
