//! Line tokenizer.
//!
//! Splits one protocol line (terminator already removed) into its parts:
//!
//! ```text
//! [@tags ][:prefix ]<command>[ <param>]*[ :<trailing>]
//! ```
//!
//! Every step works on an explicit remaining slice; nothing is unescaped and
//! consecutive spaces are *not* collapsed, so `a  b` yields an empty middle
//! parameter exactly as the peer's own splitter would.

use smallvec::SmallVec;

use crate::error::{MessageParseError, ProtocolError};

/// A tokenized protocol line borrowing from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
    /// Raw tag block (without the leading `@`), if present. Not parsed further.
    pub tags: Option<&'a str>,
    /// Source prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command token, exactly as sent.
    pub command: &'a str,
    /// Parameters in order; the last one may contain spaces.
    pub params: SmallVec<[&'a str; 15]>,
}

impl<'a> ParsedMessage<'a> {
    /// Tokenize a single line.
    ///
    /// Returns [`ProtocolError::MalformedMessage`] carrying the offending line
    /// when the tag block or prefix is not followed by a space, or when the
    /// line is empty.
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        tokenize(line).map_err(|cause| ProtocolError::MalformedMessage {
            string: line.to_owned(),
            cause,
        })
    }

    /// Get a parameter by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// Number of parameters (the command is not counted).
    #[inline]
    pub fn arg_count(&self) -> usize {
        self.params.len()
    }

    /// The prefix, treating an empty `:` prefix as absent.
    #[inline]
    pub fn source(&self) -> Option<&'a str> {
        self.prefix.filter(|p| !p.is_empty())
    }
}

/// Tokenize without wrapping the error, for callers that want the bare cause.
pub fn tokenize(line: &str) -> Result<ParsedMessage<'_>, MessageParseError> {
    if line.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let (tags, rest) = match line.strip_prefix('@') {
        Some(after) => {
            let (tags, rest) = after
                .split_once(' ')
                .ok_or(MessageParseError::UnterminatedTags)?;
            (Some(tags), rest)
        }
        None => (None, line),
    };

    let (prefix, rest) = match rest.strip_prefix(':') {
        Some(after) => {
            let (prefix, rest) = after
                .split_once(' ')
                .ok_or(MessageParseError::UnterminatedPrefix)?;
            (Some(prefix), rest)
        }
        None => (None, rest),
    };

    let (command, mut next) = split_token(rest);
    let mut params = SmallVec::new();
    while let Some(rest) = next {
        let (token, after) = split_token(rest);
        params.push(token);
        next = after;
    }

    Ok(ParsedMessage {
        tags,
        prefix,
        command,
        params,
    })
}

/// Take one token off the front of `rest`.
///
/// Returns the token and the remainder after the separating space, or `None`
/// once the token was the last one (trailing parameter or no space left).
#[inline]
fn split_token(rest: &str) -> (&str, Option<&str>) {
    if let Some(trailing) = rest.strip_prefix(':') {
        return (trailing, None);
    }
    match rest.split_once(' ') {
        Some((token, after)) => (token, Some(after)),
        None => (rest, None),
    }
}
