//! The link settings record.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::defaults::{
    default_after_join_mode, default_join_mode, default_max_line_len, default_read_timeout_secs,
    default_true, default_user_mode, default_write_timeout_secs,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the pseudoserver needs to link and burst.
///
/// Loaded once before connecting and never mutated afterwards; the link owns
/// it for its whole lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkSettings {
    /// Server ID (3 characters, e.g. `42X`).
    pub sid: String,
    /// Server name announced in SERVER (e.g. `bot.example.net`).
    pub server_name: String,
    /// Link password (must match the remote's link block).
    pub password: String,
    /// Server description.
    pub description: String,

    /// Bot nickname.
    pub nick: String,
    /// Bot real hostname.
    pub real_host: String,
    /// Bot displayed hostname.
    pub visible_host: String,
    /// Bot ident.
    pub ident: String,
    /// Bot IP address.
    pub address: String,
    /// Nickname timestamp.
    pub nick_ts: u64,
    /// Signon timestamp.
    pub user_ts: u64,
    /// User modes set on introduction.
    #[serde(default = "default_user_mode")]
    pub user_mode: String,
    /// Real name.
    pub gecos: String,

    /// Channels joined during burst, in order.
    #[serde(default, deserialize_with = "list_or_csv")]
    pub channels: Vec<String>,
    /// Prefix mode letters in the FJOIN membership entry.
    #[serde(default = "default_join_mode")]
    pub join_mode: String,
    /// Mode change applied to the bot after each join.
    #[serde(default = "default_after_join_mode")]
    pub after_join_mode: String,
    /// UID suffix; the full UID is `sid + uid`.
    pub uid: String,

    /// Remote endpoint as `host:port`.
    pub remote: String,
    /// Whether to wrap the connection in TLS.
    #[serde(default = "default_true")]
    pub tls: bool,
    /// Whether to verify the remote certificate (only applies when tls = true).
    /// Set to false only for testing or self-signed certs.
    #[serde(default = "default_true")]
    pub verify_cert: bool,
    /// Name checked against the certificate; defaults to the host of `remote`.
    #[serde(default)]
    pub tls_server_name: Option<String>,
    /// Seconds without an inbound line before the link fails (0 disables).
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Seconds allowed for each outbound write (0 disables).
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Maximum inbound line length in bytes.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,

    /// Link to the source code, shown in HELP. Overrides the package
    /// repository; required when the package has none.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Senders allowed to use the raw passthrough. Empty allows everyone.
    #[serde(default, deserialize_with = "list_or_csv")]
    pub raw_allow: Vec<String>,
}

impl LinkSettings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The bot's full UID (`sid` followed by `uid`).
    pub fn full_uid(&self) -> String {
        format!("{}{}", self.sid, self.uid)
    }

    /// Whether the bot joins `channel` during burst (exact match).
    pub fn is_joined(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c == channel)
    }

    /// Source link for HELP: `source_url`, else the package repository.
    pub fn source_link(&self) -> Option<&str> {
        self.source_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| Some(env!("CARGO_PKG_REPOSITORY")).filter(|url| !url.is_empty()))
    }

    /// Whether `sender` may use the raw passthrough.
    pub fn may_send_raw(&self, sender: &str) -> bool {
        self.raw_allow.is_empty() || self.raw_allow.iter().any(|s| s == sender)
    }

    /// Host part of `remote`.
    pub fn remote_host(&self) -> &str {
        self.remote
            .rsplit_once(':')
            .map_or(self.remote.as_str(), |(host, _)| host)
            .trim_start_matches('[')
            .trim_end_matches(']')
    }

    /// Name used for SNI and certificate verification.
    pub fn tls_server_name(&self) -> &str {
        self.tls_server_name
            .as_deref()
            .unwrap_or_else(|| self.remote_host())
    }

    /// Read deadline, `None` when disabled.
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }

    /// Write deadline, `None` when disabled.
    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_secs > 0).then(|| Duration::from_secs(self.write_timeout_secs))
    }
}

/// A list given either as a TOML array or as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListValue {
    Csv(String),
    List(Vec<String>),
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match ListValue::deserialize(deserializer)? {
        ListValue::Csv(s) => s.split(',').map(str::to_string).collect(),
        ListValue::List(v) => v,
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r##"
sid = "42X"
server_name = "bot.example.net"
password = "linkpass"
description = "Bot services"
nick = "bot"
real_host = "bot.example.net"
visible_host = "services.example.net"
ident = "bot"
address = "127.0.0.1"
nick_ts = 1700000000
user_ts = 1700000000
gecos = "Example bot"
channels = "#general,#ops"
uid = "AAAAAA"
remote = "hub.example.net:7000"
source_url = "https://git.example.net/pseudolink"
"##;

    pub(crate) fn sample() -> LinkSettings {
        LinkSettings::from_toml_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let s = sample();
        assert_eq!(s.user_mode, "+i");
        assert_eq!(s.join_mode, "o");
        assert_eq!(s.after_join_mode, "+o");
        assert!(s.tls);
        assert!(s.verify_cert);
        assert_eq!(s.read_timeout(), Some(Duration::from_secs(300)));
        assert_eq!(s.write_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(s.max_line_len, 8192);
        assert!(s.raw_allow.is_empty());
    }

    #[test]
    fn test_comma_separated_channels() {
        let s = sample();
        assert_eq!(s.channels, vec!["#general", "#ops"]);
        assert!(s.is_joined("#general"));
        assert!(!s.is_joined("#General"));
    }

    #[test]
    fn test_channel_array_and_blank_entries() {
        let text = SAMPLE.replace(
            r##"channels = "#general,#ops""##,
            r##"channels = ["#a", " #b ", ""]"##,
        );
        let s = LinkSettings::from_toml_str(&text).unwrap();
        assert_eq!(s.channels, vec!["#a", "#b"]);

        let text = SAMPLE.replace(r##"channels = "#general,#ops""##, r##"channels = "#a, ,#b,""##);
        let s = LinkSettings::from_toml_str(&text).unwrap();
        assert_eq!(s.channels, vec!["#a", "#b"]);
    }

    #[test]
    fn test_missing_channels_is_empty() {
        let text = SAMPLE.replace(r##"channels = "#general,#ops""##, "");
        let s = LinkSettings::from_toml_str(&text).unwrap();
        assert!(s.channels.is_empty());
    }

    #[test]
    fn test_full_uid() {
        assert_eq!(sample().full_uid(), "42XAAAAAA");
    }

    #[test]
    fn test_tls_server_name_falls_back_to_remote_host() {
        let mut s = sample();
        assert_eq!(s.remote_host(), "hub.example.net");
        assert_eq!(s.tls_server_name(), "hub.example.net");
        s.tls_server_name = Some("irc.example.net".to_string());
        assert_eq!(s.tls_server_name(), "irc.example.net");
        s.remote = "[::1]:7000".to_string();
        assert_eq!(s.remote_host(), "::1");
    }

    #[test]
    fn test_zero_timeout_disables() {
        let text = format!("{SAMPLE}read_timeout_secs = 0\nwrite_timeout_secs = 0\n");
        let s = LinkSettings::from_toml_str(&text).unwrap();
        assert!(s.read_timeout().is_none());
        assert!(s.write_timeout().is_none());
    }

    #[test]
    fn test_source_link() {
        let mut s = sample();
        assert_eq!(s.source_link(), Some("https://git.example.net/pseudolink"));

        s.source_url = Some(String::new());
        let fallback = Some(env!("CARGO_PKG_REPOSITORY")).filter(|url| !url.is_empty());
        assert_eq!(s.source_link(), fallback);
        s.source_url = None;
        assert_eq!(s.source_link(), fallback);
    }

    #[test]
    fn test_raw_allow_gate() {
        let mut s = sample();
        assert!(s.may_send_raw("0ABAAAAAA"));
        s.raw_allow = vec!["0ABAAAAAB".to_string()];
        assert!(!s.may_send_raw("0ABAAAAAA"));
        assert!(s.may_send_raw("0ABAAAAAB"));
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let text = SAMPLE.replace(r#"sid = "42X""#, "");
        let err = LinkSettings::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pseudolink.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let s = LinkSettings::load(&path).unwrap();
        assert_eq!(s.server_name, "bot.example.net");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinkSettings::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
