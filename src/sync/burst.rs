//! State Burst Generation.
//!
//! Right after introducing itself the pseudoserver bursts its whole state,
//! bounded by `BURST`/`ENDBURST`:
//! - `UID` for the bot
//! - `FJOIN` + `MODE` for each configured channel, in configured order
//!
//! There is no other state to burst; the pseudoserver never learns about the
//! rest of the network.

use pseudolink_proto::{Command, Member, Message};

use crate::config::LinkSettings;

/// Generates the burst of commands announcing the bot and its channels.
///
/// `now` is the burst time as a Unix timestamp. It is used for `BURST` and as
/// the creation time of every channel. Every line carries the SID prefix.
pub fn generate_burst(settings: &LinkSettings, now: i64) -> Vec<Message> {
    let sid = settings.sid.as_str();
    let uid = settings.full_uid();

    let mut commands = Vec::with_capacity(3 + 2 * settings.channels.len());

    commands.push(Command::BURST(now));

    commands.push(Command::UID {
        uid: uid.clone(),
        nick_ts: settings.nick_ts,
        nick: settings.nick.clone(),
        real_host: settings.real_host.clone(),
        visible_host: settings.visible_host.clone(),
        ident: settings.ident.clone(),
        address: settings.address.clone(),
        user_ts: settings.user_ts,
        modes: settings.user_mode.clone(),
        realname: settings.gecos.clone(),
    });

    for channel in &settings.channels {
        commands.push(Command::FJOIN {
            channel: channel.clone(),
            ts: now,
            modes: "+".to_string(),
            members: vec![Member::new(settings.join_mode.as_str(), uid.as_str())],
        });
        commands.push(Command::MODE(
            channel.clone(),
            settings.after_join_mode.clone(),
            vec![uid.clone()],
        ));
    }

    commands.push(Command::ENDBURST);

    commands
        .into_iter()
        .map(|cmd| Message::from(cmd).with_prefix(sid))
        .collect()
}
