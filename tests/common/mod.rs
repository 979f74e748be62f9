//! Shared fixtures: generated certificates and local TLS endpoints
#![allow(dead_code)]

use cert_checker::models::Certificate;
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
    KeyUsagePurpose, SignatureAlgorithm, PKCS_ECDSA_P256_SHA256,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// A generated certificate with its key
pub struct TestCert {
    pub cert: rcgen::Certificate,
    pub key: KeyPair,
}

impl TestCert {
    pub fn parsed(&self) -> Certificate {
        Certificate::from_der(self.cert.der()).unwrap()
    }

    pub fn der(&self) -> CertificateDer<'static> {
        self.cert.der().clone()
    }

    pub fn pem(&self) -> String {
        self.cert.pem()
    }
}

fn named(mut params: CertificateParams, cn: &str) -> CertificateParams {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, cn);
    dn.push(DnType::OrganizationName, "cert-checker tests");
    params.distinguished_name = dn;
    params
}

/// CA parameters with keyCertSign
pub fn ca_params(cn: &str) -> CertificateParams {
    let mut params = named(CertificateParams::default(), cn);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![
        KeyUsagePurpose::KeyCertSign,
        KeyUsagePurpose::CrlSign,
        KeyUsagePurpose::DigitalSignature,
    ];
    params
}

/// End-entity parameters with the given DNS SANs
pub fn leaf_params(cn: &str, sans: &[&str]) -> CertificateParams {
    let sans: Vec<String> = sans.iter().map(|s| s.to_string()).collect();
    let mut params = named(CertificateParams::new(sans).unwrap(), cn);
    params.is_ca = IsCa::ExplicitNoCa;
    params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
    params
}

pub fn self_signed(params: CertificateParams) -> TestCert {
    self_signed_with(params, &PKCS_ECDSA_P256_SHA256)
}

pub fn self_signed_with(params: CertificateParams, alg: &'static SignatureAlgorithm) -> TestCert {
    let key = KeyPair::generate_for(alg).unwrap();
    let cert = params.self_signed(&key).unwrap();
    TestCert { cert, key }
}

pub fn signed_by(params: CertificateParams, issuer: &TestCert) -> TestCert {
    signed_by_with(params, issuer, &PKCS_ECDSA_P256_SHA256)
}

pub fn signed_by_with(
    params: CertificateParams,
    issuer: &TestCert,
    alg: &'static SignatureAlgorithm,
) -> TestCert {
    let key = KeyPair::generate_for(alg).unwrap();
    let cert = params.signed_by(&key, &issuer.cert, &issuer.key).unwrap();
    TestCert { cert, key }
}

/// Root, intermediate and leaf issued in a line
pub struct Pki {
    pub root: TestCert,
    pub intermediate: TestCert,
    pub leaf: TestCert,
}

impl Pki {
    pub fn new(leaf_sans: &[&str]) -> Self {
        Self::with_leaf(leaf_params("leaf.test", leaf_sans))
    }

    pub fn with_leaf(leaf: CertificateParams) -> Self {
        let root = self_signed(ca_params("Test Root CA"));
        let intermediate = signed_by(ca_params("Test Intermediate CA"), &root);
        let leaf = signed_by(leaf, &intermediate);
        Self {
            root,
            intermediate,
            leaf,
        }
    }

    /// Parsed chain, leaf first
    pub fn chain(&self) -> Vec<Certificate> {
        vec![
            self.leaf.parsed(),
            self.intermediate.parsed(),
            self.root.parsed(),
        ]
    }
}

/// Serve `chain` with `key` on 127.0.0.1 until the test ends
pub async fn spawn_tls_server(chain: Vec<CertificateDer<'static>>, key: &KeyPair) -> SocketAddr {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(
            chain,
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    let mut buf = [0u8; 1];
                    let _ = tls.read(&mut buf).await;
                }
            });
        }
    });

    addr
}

/// Accept connections and never answer
pub async fn spawn_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    addr
}

/// A local port with nothing listening
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
