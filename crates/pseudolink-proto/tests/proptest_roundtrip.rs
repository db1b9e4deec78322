//! Property-based tests for line tokenizing.
//!
//! Uses proptest to generate random line components and verify that:
//! 1. Tokenizing never panics on arbitrary input
//! 2. Tags, prefix, command and parameters come back exactly as assembled
//! 3. The canonical `Display` form tokenizes to the same parts

use proptest::prelude::*;
use pseudolink_proto::message::tokenize;
use pseudolink_proto::ParsedMessage;

// =============================================================================
// STRATEGIES - Generators for line components
// =============================================================================

/// Raw tag block: `key[=value]` pairs joined by `;`.
fn tags_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[a-z][a-z0-9\\-]{0,10}(=[a-zA-Z0-9.:]{0,10})?")
            .expect("valid regex"),
        1..4,
    )
    .prop_map(|tags| tags.join(";"))
}

/// Source prefix: a SID, UID or `nick!user@host`.
fn prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[0-9][A-Z0-9]{2}").expect("valid regex"),
        prop::string::string_regex("[0-9][A-Z0-9]{2}[A-Z][A-Z0-9]{5}").expect("valid regex"),
        prop::string::string_regex("[a-z]{1,9}![a-z]{1,9}@[a-z.]{1,20}").expect("valid regex"),
    ]
}

fn command_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{1,10}").expect("valid regex")
}

/// Middle parameter: no spaces and no leading colon.
fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#&+\\-.,][a-zA-Z0-9#&+\\-.,:]{0,20}")
        .expect("valid regex")
}

/// Trailing text: anything but the line terminators and NUL.
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(":".to_string()),
        Just("  leading spaces".to_string()),
        Just("bot: ` ECHO THIS".to_string()),
        prop::string::string_regex("[^\r\n\0]{0,100}").expect("valid regex"),
    ]
}

#[derive(Debug, Clone)]
struct Parts {
    tags: Option<String>,
    prefix: Option<String>,
    command: String,
    middle: Vec<String>,
    trailing: Option<String>,
}

impl Parts {
    fn line(&self) -> String {
        let mut line = String::new();
        if let Some(tags) = &self.tags {
            line.push('@');
            line.push_str(tags);
            line.push(' ');
        }
        if let Some(prefix) = &self.prefix {
            line.push(':');
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(&self.command);
        for param in &self.middle {
            line.push(' ');
            line.push_str(param);
        }
        if let Some(trailing) = &self.trailing {
            line.push_str(" :");
            line.push_str(trailing);
        }
        line
    }

    fn params(&self) -> Vec<&str> {
        self.middle
            .iter()
            .map(String::as_str)
            .chain(self.trailing.as_deref())
            .collect()
    }
}

fn parts_strategy() -> impl Strategy<Value = Parts> {
    (
        prop::option::of(tags_strategy()),
        prop::option::of(prefix_strategy()),
        command_strategy(),
        prop::collection::vec(middle_strategy(), 0..20),
        prop::option::of(trailing_strategy()),
    )
        .prop_map(|(tags, prefix, command, middle, trailing)| Parts {
            tags,
            prefix,
            command,
            middle,
            trailing,
        })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn tokenize_never_panics(line in "\\PC{0,200}") {
        let _ = tokenize(&line);
    }

    #[test]
    fn tokenize_recovers_parts(parts in parts_strategy()) {
        let line = parts.line();
        let msg = ParsedMessage::parse(&line).expect("assembled line tokenizes");

        prop_assert_eq!(msg.tags, parts.tags.as_deref());
        prop_assert_eq!(msg.prefix, parts.prefix.as_deref());
        prop_assert_eq!(msg.command, parts.command.as_str());
        prop_assert_eq!(msg.params.to_vec(), parts.params());
    }

    #[test]
    fn canonical_form_tokenizes_identically(parts in parts_strategy()) {
        let line = parts.line();
        let canonical;
        let msg = ParsedMessage::parse(&line).expect("assembled line tokenizes");
        canonical = msg.to_string();
        let reparsed = ParsedMessage::parse(&canonical).expect("canonical line tokenizes");

        prop_assert_eq!(msg, reparsed);
    }

    #[test]
    fn trailing_is_verbatim(text in "[^\r\n\0]{0,100}") {
        let line = format!(":0AB PRIVMSG #chan :{}", text);
        let msg = ParsedMessage::parse(&line).expect("tokenizes");
        prop_assert_eq!(msg.params.len(), 2);
        prop_assert_eq!(msg.params[1], text.as_str());
    }
}
