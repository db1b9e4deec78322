//! Protocol messages: tokenized inbound lines and owned outbound lines.

mod parse;
mod serialize;
mod types;

pub use self::parse::{tokenize, ParsedMessage};
pub use self::types::Message;
