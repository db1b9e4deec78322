//! Link handshake.
//!
//! An outbound pseudoserver link opens with capability negotiation and the
//! SERVER introduction, then bursts immediately without waiting for the
//! remote side:
//!
//! ```text
//! CAPAB START 1205
//! CAPAB END
//! SERVER <name> <password> <sid> :<description>
//! :<sid> BURST <now>
//! ...
//! :<sid> ENDBURST
//! ```

use pseudolink_proto::{Command, Message, PROTOCOL_VERSION};

use super::burst::generate_burst;
use crate::config::LinkSettings;

/// The unprefixed introduction: CAPAB negotiation and SERVER.
pub fn introduction(settings: &LinkSettings) -> Vec<Message> {
    vec![
        Message::from(Command::CAPAB(vec![
            "START".to_string(),
            PROTOCOL_VERSION.to_string(),
        ])),
        Message::from(Command::CAPAB(vec!["END".to_string()])),
        Message::from(Command::SERVER(
            settings.server_name.clone(),
            settings.password.clone(),
            settings.sid.clone(),
            settings.description.clone(),
        )),
    ]
}

/// The complete opening sequence: introduction followed by the burst.
///
/// Always `6 + 2 * channels` lines.
pub fn opening_sequence(settings: &LinkSettings, now: i64) -> Vec<Message> {
    let mut lines = introduction(settings);
    lines.extend(generate_burst(settings, now));
    lines
}
