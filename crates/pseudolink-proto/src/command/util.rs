//! Serialization helpers shared by the command writers.

use std::fmt::{self, Write};

/// Whether a final parameter must be colon-introduced.
#[inline]
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write `cmd` and its arguments, colon-prefixing the last one only when
/// [`needs_colon_prefix`] says so.
pub fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;

    let Some((trailing, middle)) = args.split_last() else {
        return Ok(());
    };

    for param in middle {
        f.write_char(' ')?;
        f.write_str(param)?;
    }

    f.write_char(' ')?;
    if needs_colon_prefix(trailing) {
        f.write_char(':')?;
    }
    f.write_str(trailing)
}

/// Write `cmd` and its arguments, always colon-prefixing the last one.
///
/// Used for free-text parameters (descriptions, real names, notices) where
/// the peer expects the trailing form regardless of content.
pub fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;

    let Some((trailing, middle)) = args.split_last() else {
        return Ok(());
    };

    for arg in middle {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }

    f.write_str(" :")?;
    f.write_str(trailing)
}
