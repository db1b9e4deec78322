//! Configuration validation.
//!
//! Validates settings at startup so a bad file fails before connecting
//! rather than as an `ERROR` from the remote after the burst.

use super::LinkSettings;
use thiserror::Error;

/// Smallest accepted `max_line_len` (one client-sized line).
const MIN_LINE_LEN: usize = 512;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must not contain spaces")]
    ContainsSpace(&'static str),
    #[error("sid must be exactly 3 characters, got {0}")]
    InvalidSid(usize),
    #[error("sid must match pattern [0-9][A-Z0-9][A-Z0-9], got '{0}'")]
    InvalidSidFormat(String),
    #[error("uid must be 6 characters of [A-Z0-9] starting with a letter, got '{0}'")]
    InvalidUid(String),
    #[error("invalid channel name '{0}'")]
    InvalidChannel(String),
    #[error("remote must be host:port, got '{0}'")]
    InvalidRemote(String),
    #[error("max_line_len must be at least 512, got {0}")]
    LineLimitTooSmall(usize),
}

/// Validate settings, returning all errors found.
pub fn validate(settings: &LinkSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Required fields
    let required = [
        ("sid", &settings.sid),
        ("server_name", &settings.server_name),
        ("password", &settings.password),
        ("description", &settings.description),
        ("nick", &settings.nick),
        ("real_host", &settings.real_host),
        ("visible_host", &settings.visible_host),
        ("ident", &settings.ident),
        ("address", &settings.address),
        ("user_mode", &settings.user_mode),
        ("gecos", &settings.gecos),
        ("after_join_mode", &settings.after_join_mode),
        ("uid", &settings.uid),
        ("remote", &settings.remote),
    ];
    for (name, value) in required {
        if value.is_empty() {
            errors.push(ValidationError::Missing(name));
        }
    }

    // Everything but the description and gecos lands in a middle parameter
    let single_token = [
        ("server_name", &settings.server_name),
        ("password", &settings.password),
        ("nick", &settings.nick),
        ("real_host", &settings.real_host),
        ("visible_host", &settings.visible_host),
        ("ident", &settings.ident),
        ("address", &settings.address),
        ("user_mode", &settings.user_mode),
        ("join_mode", &settings.join_mode),
        ("after_join_mode", &settings.after_join_mode),
    ];
    for (name, value) in single_token {
        if value.contains(char::is_whitespace) {
            errors.push(ValidationError::ContainsSpace(name));
        }
    }

    // SID validation
    let sid = &settings.sid;
    if !sid.is_empty() {
        if sid.len() != 3 {
            errors.push(ValidationError::InvalidSid(sid.len()));
        } else {
            let chars: Vec<char> = sid.chars().collect();
            let valid = chars[0].is_ascii_digit()
                && (chars[1].is_ascii_uppercase() || chars[1].is_ascii_digit())
                && (chars[2].is_ascii_uppercase() || chars[2].is_ascii_digit());
            if !valid {
                errors.push(ValidationError::InvalidSidFormat(sid.clone()));
            }
        }
    }

    // UID suffix
    let uid = &settings.uid;
    if !uid.is_empty() && !is_valid_uid_suffix(uid) {
        errors.push(ValidationError::InvalidUid(uid.clone()));
    }

    for channel in &settings.channels {
        if !channel.starts_with('#') || channel.len() < 2 || channel.contains([' ', ',', '\x07'])
        {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if !settings.remote.is_empty() && !is_host_port(&settings.remote) {
        errors.push(ValidationError::InvalidRemote(settings.remote.clone()));
    }

    // HELP must always link to the source
    if settings.source_link().is_none() {
        errors.push(ValidationError::Missing("source_url"));
    }

    if settings.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall(settings.max_line_len));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_uid_suffix(uid: &str) -> bool {
    uid.len() == 6
        && uid.starts_with(|c: char| c.is_ascii_uppercase())
        && uid
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn is_host_port(remote: &str) -> bool {
    let Some((host, port)) = remote.rsplit_once(':') else {
        return false;
    };
    !host.is_empty() && !host.contains(char::is_whitespace) && port.parse::<u16>().is_ok_and(|p| p > 0)
}
