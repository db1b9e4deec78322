//! Spawns the `pseudolink` binary for integration testing.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::Context;
use tokio::process::{Child, Command};
use tokio::time::timeout;

/// A running pseudoserver process, killed on drop.
pub struct TestLink {
    child: Child,
    _dir: tempfile::TempDir,
}

/// Write a plaintext link config pointing at `remote` into `dir`.
pub fn write_config(dir: &Path, remote: &str, extra: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join("pseudolink.toml");
    let content = format!(
        r##"
sid = "42X"
server_name = "bot.test"
password = "linkpass"
description = "Test pseudoserver"
nick = "bot"
real_host = "bot.test"
visible_host = "bot.test"
ident = "bot"
address = "127.0.0.1"
nick_ts = 1700000000
user_ts = 1700000000
gecos = "Test bot"
channels = "#general,#ops"
uid = "AAAAAA"
remote = "{remote}"
tls = false
source_url = "https://git.example.net/pseudolink"
{extra}
"##
    );
    std::fs::write(&path, content)?;
    Ok(path)
}

impl TestLink {
    /// Spawn the binary with a plaintext config pointing at `remote`.
    pub fn spawn(remote: &str, extra: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = write_config(dir.path(), remote, extra)?;
        let child = spawn_binary(&config)?;
        Ok(Self { child, _dir: dir })
    }

    /// Wait for the process to exit.
    pub async fn wait(&mut self) -> anyhow::Result<ExitStatus> {
        wait_exit(&mut self.child).await
    }
}

/// Spawn the binary with an arbitrary config path.
pub fn spawn_binary(config: &Path) -> anyhow::Result<Child> {
    let child = Command::new(env!("CARGO_BIN_EXE_pseudolink"))
        .arg(config)
        .env("RUST_LOG", "debug")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    Ok(child)
}

/// Wait for a child to exit, bounded.
pub async fn wait_exit(child: &mut Child) -> anyhow::Result<ExitStatus> {
    timeout(Duration::from_secs(10), child.wait())
        .await
        .context("pseudolink did not exit")?
        .map_err(Into::into)
}
