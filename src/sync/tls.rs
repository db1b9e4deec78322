//! TLS client setup for the link.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::CryptoProvider;
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{self, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::{info, warn};

use crate::error::LinkError;

/// Build the client config, trusting the platform roots or nothing at all.
pub fn client_config(verify_cert: bool) -> ClientConfig {
    if verify_cert {
        let mut roots = RootCertStore::empty();
        let native = rustls_native_certs::load_native_certs();
        for err in &native.errors {
            warn!(error = %err, "Failed to load some native certs");
        }
        for cert in native.certs {
            if let Err(e) = roots.add(cert) {
                warn!("Failed to add root cert: {}", e);
            }
        }
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    } else {
        // Dangerous: Skip certificate verification (for testing/self-signed certs only)
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(DangerousNoVerifier))
            .with_no_client_auth()
    }
}

/// Run the TLS client handshake over an established TCP stream.
pub async fn upgrade_to_tls(
    tcp_stream: TcpStream,
    server_name: &str,
    verify_cert: bool,
) -> Result<TlsStream<TcpStream>, LinkError> {
    let connector = TlsConnector::from(Arc::new(client_config(verify_cert)));
    let name = ServerName::try_from(server_name.to_string())
        .map_err(|_| LinkError::InvalidServerName(server_name.to_string()))?;

    let tls_stream = connector
        .connect(name, tcp_stream)
        .await
        .map_err(|source| LinkError::Tls {
            server_name: server_name.to_string(),
            source,
        })?;
    info!(server_name = %server_name, verify = verify_cert, "TLS handshake completed");

    Ok(tls_stream)
}

/// Accepts any server certificate.
#[derive(Debug)]
struct DangerousNoVerifier;

impl ServerCertVerifier for DangerousNoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        CryptoProvider::get_default()
            .map(|p| p.signature_verification_algorithms.supported_schemes())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_verify_config_builds() {
        let config = client_config(false);
        assert!(config.alpn_protocols.is_empty());
    }

    #[test]
    fn test_invalid_server_name_rejected() {
        assert!(ServerName::try_from("not a host".to_string()).is_err());
    }
}
