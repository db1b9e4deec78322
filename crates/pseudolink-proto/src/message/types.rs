use crate::command::Command;

/// An owned outbound message: optional source prefix plus a command.
///
/// `Display` renders the exact wire text *without* a line terminator; the
/// line codec appends `\n`.
///
/// # Example
///
/// ```
/// use pseudolink_proto::{Command, Message};
///
/// let msg = Message::from(Command::ENDBURST).with_prefix("42X");
/// assert_eq!(msg.to_string(), ":42X ENDBURST");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Source prefix (a SID or UID on server links).
    pub prefix: Option<String>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Set the source prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from(Command::NOTICE(target.into(), text.into()))
    }

    /// `ERROR :<text>`
    pub fn error(text: impl Into<String>) -> Self {
        Self::from(Command::ERROR(text.into()))
    }

    /// A line written to the wire verbatim.
    pub fn raw(line: impl Into<String>) -> Self {
        Self::from(Command::Raw(line.into()))
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Self {
            prefix: None,
            command,
        }
    }
}
