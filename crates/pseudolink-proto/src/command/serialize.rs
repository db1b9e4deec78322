use std::fmt::{self, Write};

use super::types::Command;
use super::util::{write_cmd, write_cmd_freeform};

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CAPAB(args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, "CAPAB", &args)
            }
            Command::SERVER(name, password, sid, description) => {
                write_cmd_freeform(f, "SERVER", &[name, password, sid, description])
            }
            Command::BURST(ts) => write!(f, "BURST {}", ts),
            Command::ENDBURST => f.write_str("ENDBURST"),
            Command::UID {
                uid,
                nick_ts,
                nick,
                real_host,
                visible_host,
                ident,
                address,
                user_ts,
                modes,
                realname,
            } => write_cmd_freeform(
                f,
                "UID",
                &[
                    uid,
                    &nick_ts.to_string(),
                    nick,
                    real_host,
                    visible_host,
                    ident,
                    address,
                    &user_ts.to_string(),
                    modes,
                    realname,
                ],
            ),
            Command::FJOIN {
                channel,
                ts,
                modes,
                members,
            } => {
                write!(f, "FJOIN {} {} {} :", channel, ts, modes)?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
            Command::MODE(target, modes, args) => {
                let mut all: Vec<&str> = Vec::with_capacity(args.len() + 2);
                all.push(target);
                all.push(modes);
                all.extend(args.iter().map(String::as_str));
                write_cmd(f, "MODE", &all)
            }
            Command::PONG(Some(origin), target) => write_cmd_freeform(f, "PONG", &[origin, target]),
            Command::PONG(None, target) => write_cmd_freeform(f, "PONG", &[target]),
            Command::NOTICE(target, text) => write_cmd_freeform(f, "NOTICE", &[target, text]),
            Command::ERROR(text) => write_cmd_freeform(f, "ERROR", &[text]),
            Command::Raw(line) => f.write_str(line),
        }
    }
}
