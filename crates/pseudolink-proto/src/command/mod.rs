//! Outbound server-link commands.

mod serialize;
mod types;
pub mod util;

pub use self::types::{Command, Member, PROTOCOL_VERSION};
