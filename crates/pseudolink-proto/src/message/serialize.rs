use std::fmt::{self, Display, Formatter};

use super::parse::ParsedMessage;
use super::types::Message;
use crate::command::util::needs_colon_prefix;

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}", self.command)
    }
}

/// Canonical reconstruction of a tokenized line.
///
/// The last parameter is colon-introduced only when it has to be, so the
/// output may differ textually from the input while tokenizing to the same
/// parts.
impl Display for ParsedMessage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(tags) = self.tags {
            write!(f, "@{} ", tags)?;
        }

        if let Some(prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if needs_colon_prefix(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        Ok(())
    }
}
