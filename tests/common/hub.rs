//! A fake hub server for the pseudoserver to link to.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Listening side, before the pseudoserver has connected.
pub struct TestHub {
    listener: TcpListener,
}

/// An accepted link, seen from the hub.
pub struct HubLink {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestHub {
    /// Bind on an ephemeral localhost port.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    /// Address to put in the pseudoserver's `remote` setting.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for the pseudoserver to connect.
    pub async fn accept(&self) -> anyhow::Result<HubLink> {
        let (stream, _) = timeout(IO_TIMEOUT, self.listener.accept())
            .await
            .context("pseudoserver never connected")??;
        Ok(HubLink::new(stream))
    }
}

impl HubLink {
    fn new(stream: TcpStream) -> Self {
        let (rd, writer) = stream.into_split();
        Self {
            lines: BufReader::new(rd).lines(),
            writer,
        }
    }

    /// Send one line, appending the terminator.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(format!("{line}\n").as_bytes()).await?;
        Ok(())
    }

    /// Receive one line.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        match timeout(IO_TIMEOUT, self.lines.next_line())
            .await
            .context("timed out waiting for a line")??
        {
            Some(line) => Ok(line),
            None => bail!("pseudoserver closed the link"),
        }
    }

    /// Receive `n` lines.
    pub async fn recv_n(&mut self, n: usize) -> anyhow::Result<Vec<String>> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.recv().await?);
        }
        Ok(out)
    }
}
