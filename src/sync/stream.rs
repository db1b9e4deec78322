//! Link stream abstraction.
//!
//! Provides a unified stream type for plaintext and TLS links.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::info;

use super::tls::upgrade_to_tls;
use crate::config::LinkSettings;
use crate::error::LinkError;

/// A unified stream type for the server link.
///
/// This enum wraps both plaintext TCP streams and TLS-encrypted streams,
/// allowing the protocol layer to be agnostic to the transport security.
pub enum LinkStream {
    /// Plaintext TCP connection.
    Plain(TcpStream),
    /// TLS-encrypted client connection.
    Tls(Box<TlsStream<TcpStream>>),
}

impl LinkStream {
    /// Connect to `settings.remote`, upgrading to TLS when configured.
    pub async fn connect(settings: &LinkSettings) -> Result<Self, LinkError> {
        let tcp = TcpStream::connect(settings.remote.as_str())
            .await
            .map_err(|source| LinkError::Connect {
                remote: settings.remote.clone(),
                source,
            })?;
        tcp.set_nodelay(true)?;
        info!(remote = %settings.remote, tls = settings.tls, "Connected");

        if !settings.tls {
            return Ok(Self::Plain(tcp));
        }

        let tls = upgrade_to_tls(tcp, settings.tls_server_name(), settings.verify_cert).await?;
        Ok(Self::Tls(Box::new(tls)))
    }

    /// Returns true if this is a TLS-encrypted connection.
    pub fn is_tls(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

impl AsyncRead for LinkStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            LinkStream::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            LinkStream::Tls(stream) => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for LinkStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            LinkStream::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            LinkStream::Tls(stream) => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            LinkStream::Plain(stream) => Pin::new(stream).poll_flush(cx),
            LinkStream::Tls(stream) => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            LinkStream::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            LinkStream::Tls(stream) => Pin::new(stream).poll_shutdown(cx),
        }
    }
}
