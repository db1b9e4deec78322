//! Character classes that matter for line framing.

use std::borrow::Cow;

/// Returns true for characters that must never appear inside a single
/// outbound protocol line.
///
/// CR and LF would split the line on the peer side, NUL truncates it in
/// C-based daemons. Formatting codes (bold, colour, ...) are fine.
#[inline]
pub fn is_illegal_control_char(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\0')
}

/// Returns the first framing-breaking character in `line`, if any.
pub fn find_illegal_control_char(line: &str) -> Option<char> {
    line.chars().find(|&ch| is_illegal_control_char(ch))
}

/// Remove framing-breaking characters from text echoed back to a peer.
///
/// Borrows when there is nothing to remove.
pub fn strip_illegal_control_chars(text: &str) -> Cow<'_, str> {
    if find_illegal_control_char(text).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&ch| !is_illegal_control_char(ch)).collect())
}
