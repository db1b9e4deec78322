use std::fmt;

/// Spanning-tree protocol version announced in `CAPAB START`.
///
/// 1205 is the InspIRCd 3.x link protocol: `SERVER` carries no hop count and
/// `UID` carries a single ident.
pub const PROTOCOL_VERSION: u32 = 1205;

/// Outbound commands a pseudoserver sends on a server link.
///
/// Each variant serializes to one wire line via `Display`. Parameters are not
/// validated here; the line codec rejects framing-breaking characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `CAPAB <args...>`, e.g. `CAPAB START 1205` / `CAPAB END`.
    CAPAB(Vec<String>),
    /// `SERVER <name> <password> <sid> :<description>`
    SERVER(String, String, String, String),
    /// `BURST <timestamp>`
    BURST(i64),
    /// `ENDBURST`
    ENDBURST,
    /// Introduce a user.
    ///
    /// `UID <uid> <nick_ts> <nick> <real_host> <visible_host> <ident> <address> <user_ts> <modes> :<realname>`
    UID {
        /// Full UID (SID + suffix).
        uid: String,
        /// Nickname timestamp.
        nick_ts: u64,
        /// Nickname.
        nick: String,
        /// Real hostname.
        real_host: String,
        /// Displayed hostname.
        visible_host: String,
        /// Ident (username).
        ident: String,
        /// IP address.
        address: String,
        /// Signon timestamp.
        user_ts: u64,
        /// User mode string, e.g. `+i`.
        modes: String,
        /// Real name ("gecos").
        realname: String,
    },
    /// Forced channel membership during burst.
    ///
    /// `FJOIN <channel> <ts> <modes> :<member> [<member>...]`
    FJOIN {
        /// Channel name.
        channel: String,
        /// Channel creation timestamp.
        ts: i64,
        /// Channel mode string, `+` for none.
        modes: String,
        /// Members with their prefix modes.
        members: Vec<Member>,
    },
    /// `MODE <target> <modes> [<args>...]`
    MODE(String, String, Vec<String>),
    /// `PONG [<origin>] :<target>`
    PONG(Option<String>, String),
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
    /// `ERROR :<text>`
    ERROR(String),
    /// A line written exactly as given.
    Raw(String),
}

impl Command {
    /// The command word as it appears on the wire (`Raw` lines report `RAW`).
    pub fn name(&self) -> &'static str {
        match self {
            Command::CAPAB(_) => "CAPAB",
            Command::SERVER(..) => "SERVER",
            Command::BURST(_) => "BURST",
            Command::ENDBURST => "ENDBURST",
            Command::UID { .. } => "UID",
            Command::FJOIN { .. } => "FJOIN",
            Command::MODE(..) => "MODE",
            Command::PONG(..) => "PONG",
            Command::NOTICE(..) => "NOTICE",
            Command::ERROR(_) => "ERROR",
            Command::Raw(_) => "RAW",
        }
    }
}

/// One `FJOIN` membership entry: `<prefix modes>,<uid>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Channel prefix mode letters granted on join (may be empty).
    pub modes: String,
    /// Member UID.
    pub uid: String,
}

impl Member {
    /// Create a membership entry.
    pub fn new(modes: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            modes: modes.into(),
            uid: uid.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.modes, self.uid)
    }
}
