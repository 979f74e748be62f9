//! TLS certificate chain fetcher
//!
//! Connects to an endpoint with peer verification disabled and returns the
//! certificate chain it presents, so that untrusted, self-signed and expired
//! certificates can still be inspected. Name resolution, connect and handshake
//! all run under a single deadline.

use crate::models::Certificate;
use crate::utils::FetchError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

/// A certificate verifier that accepts any certificate.
/// Trust decisions are made afterwards on the retrieved chain.
#[derive(Debug)]
struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Retrieves presented certificate chains from live endpoints
#[derive(Clone)]
pub struct TlsChainFetcher {
    connector: TlsConnector,
}

impl std::fmt::Debug for TlsChainFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsChainFetcher").finish_non_exhaustive()
    }
}

impl TlsChainFetcher {
    /// Build a fetcher with its own ring crypto provider.
    ///
    /// No process-wide default provider is installed.
    pub fn new() -> Result<Self, RustlsError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier))
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }

    /// Fetch the chain presented by `fqdn:port`, leaf first.
    ///
    /// The connection is dropped before returning on every path.
    pub async fn fetch(
        &self,
        fqdn: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Vec<Certificate>, FetchError> {
        tracing::debug!(fqdn, port, ?timeout, "fetching certificate chain");

        match tokio::time::timeout(timeout, self.fetch_chain(fqdn, port)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { timeout }),
        }
    }

    /// Fetch only the leaf certificate
    pub async fn fetch_leaf(
        &self,
        fqdn: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Certificate, FetchError> {
        self.fetch(fqdn, port, timeout)
            .await?
            .into_iter()
            .next()
            .ok_or(FetchError::NoCertificate)
    }

    async fn fetch_chain(&self, fqdn: &str, port: u16) -> Result<Vec<Certificate>, FetchError> {
        let addrs = resolve(fqdn, port).await?;

        let stream = TcpStream::connect(&addrs[..])
            .await
            .map_err(|e| FetchError::Transport {
                message: e.to_string(),
            })?;

        let server_name =
            ServerName::try_from(fqdn.to_string()).map_err(|_| FetchError::Transport {
                message: format!("Invalid server name: {}", fqdn),
            })?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| FetchError::Transport {
                message: e.to_string(),
            })?;

        let (_, connection) = tls_stream.get_ref();
        let presented = match connection.peer_certificates() {
            Some(certs) if !certs.is_empty() => certs,
            _ => return Err(FetchError::NoCertificate),
        };

        let chain = presented
            .iter()
            .map(|der| Certificate::from_der(der.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FetchError::unexpected(e.to_string()))?;

        tracing::debug!(fqdn, port, length = chain.len(), "received certificate chain");
        Ok(chain)
    }
}

async fn resolve(fqdn: &str, port: u16) -> Result<Vec<SocketAddr>, FetchError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((fqdn, port))
        .await
        .map_err(|e| FetchError::NameResolution {
            host: fqdn.to_string(),
            message: e.to_string(),
        })?
        .collect();

    if addrs.is_empty() {
        return Err(FetchError::NameResolution {
            host: fqdn.to_string(),
            message: "no addresses found".to_string(),
        });
    }

    Ok(addrs)
}
