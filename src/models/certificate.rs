//! Certificate model
//!
//! An owned, immutable view of an X.509 certificate. Parsing is delegated to
//! x509-parser; everything the trust engine needs afterwards (names, validity,
//! key descriptor, the exact signed bytes) is copied out so the value can be
//! shared across tasks without borrowing the original DER.

use crate::utils::CertificateError;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// A distinguished name (subject or issuer)
///
/// Two names are equal when their DER encodings match, or when they carry
/// the same attribute types with the same decoded values RDN by RDN. The
/// second rule lets a PrintableString CN match the same CN encoded as
/// UTF8String.
#[derive(Debug, Clone, Eq)]
pub struct DistinguishedName {
    raw: Vec<u8>,
    display: String,
    common_name: Option<String>,
    rdns: Vec<Vec<NameAttribute>>,
}

/// One attribute of an RDN: type OID and decoded value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NameAttribute {
    oid: String,
    value: String,
}

impl DistinguishedName {
    fn from_x509(name: &X509Name<'_>) -> Self {
        let common_name = name
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(|s| s.to_string());

        let rdns = name
            .iter()
            .map(|rdn| {
                let mut attrs: Vec<NameAttribute> = rdn
                    .iter()
                    .map(|attr| NameAttribute {
                        oid: attr.attr_type().to_id_string(),
                        value: match attr.as_str() {
                            Ok(value) => value.to_string(),
                            Err(_) => {
                                format!("#{}", hex::encode(attr.attr_value().as_bytes()))
                            }
                        },
                    })
                    .collect();
                // multi-valued RDNs are unordered sets
                attrs.sort();
                attrs
            })
            .collect();

        Self {
            raw: name.as_raw().to_vec(),
            display: name.to_string(),
            common_name,
            rdns,
        }
    }

    /// DER encoding of the name
    pub fn as_raw(&self) -> &[u8] {
        &self.raw
    }

    /// First CN attribute, if any
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }
}

impl PartialEq for DistinguishedName {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw || self.rdns == other.rdns
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// Named elliptic curves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EcCurve {
    P256,
    P384,
    P521,
    Other(String),
}

impl EcCurve {
    fn from_oid(oid: &str) -> Self {
        match oid {
            "1.2.840.10045.3.1.7" => EcCurve::P256,
            "1.3.132.0.34" => EcCurve::P384,
            "1.3.132.0.35" => EcCurve::P521,
            other => EcCurve::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcCurve::P256 => write!(f, "P-256"),
            EcCurve::P384 => write!(f, "P-384"),
            EcCurve::P521 => write!(f, "P-521"),
            EcCurve::Other(oid) => write!(f, "{}", oid),
        }
    }
}

/// Public key algorithm family, the dispatch tag for signature verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyAlgorithm {
    Rsa,
    Ec(EcCurve),
    Dsa,
    Unknown(String),
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ec(curve) => write!(f, "EC ({})", curve),
            KeyAlgorithm::Dsa => write!(f, "DSA"),
            KeyAlgorithm::Unknown(oid) => write!(f, "Unknown ({})", oid),
        }
    }
}

/// Subject public key descriptor
#[derive(Debug, Clone)]
pub struct PublicKeyInfo {
    pub algorithm: KeyAlgorithm,
    /// Key size in bits, 0 when unknown
    pub size_bits: u32,
    /// Full SubjectPublicKeyInfo DER
    pub spki_der: Vec<u8>,
    /// Contents of the subjectPublicKey BIT STRING
    pub key_bytes: Vec<u8>,
}

/// Digest used by a certificate signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        };
        write!(f, "{}", name)
    }
}

/// Declared signature algorithm of a certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAlgorithm {
    pub oid: String,
    pub name: String,
    /// Hash declared by the algorithm identifier, if it names one
    pub hash: Option<HashAlgorithm>,
}

impl SignatureAlgorithm {
    fn from_oid(oid: &str) -> Self {
        let (name, hash) = match oid {
            "1.2.840.113549.1.1.5" => ("sha1WithRSAEncryption", Some(HashAlgorithm::Sha1)),
            "1.2.840.113549.1.1.14" => ("sha224WithRSAEncryption", Some(HashAlgorithm::Sha224)),
            "1.2.840.113549.1.1.11" => ("sha256WithRSAEncryption", Some(HashAlgorithm::Sha256)),
            "1.2.840.113549.1.1.12" => ("sha384WithRSAEncryption", Some(HashAlgorithm::Sha384)),
            "1.2.840.113549.1.1.13" => ("sha512WithRSAEncryption", Some(HashAlgorithm::Sha512)),
            "1.2.840.113549.1.1.10" => ("RSASSA-PSS", None),
            "1.2.840.10045.4.1" => ("ecdsa-with-SHA1", Some(HashAlgorithm::Sha1)),
            "1.2.840.10045.4.3.1" => ("ecdsa-with-SHA224", Some(HashAlgorithm::Sha224)),
            "1.2.840.10045.4.3.2" => ("ecdsa-with-SHA256", Some(HashAlgorithm::Sha256)),
            "1.2.840.10045.4.3.3" => ("ecdsa-with-SHA384", Some(HashAlgorithm::Sha384)),
            "1.2.840.10045.4.3.4" => ("ecdsa-with-SHA512", Some(HashAlgorithm::Sha512)),
            "1.2.840.10040.4.3" => ("dsa-with-sha1", Some(HashAlgorithm::Sha1)),
            "2.16.840.1.101.3.4.3.1" => ("dsa-with-sha224", Some(HashAlgorithm::Sha224)),
            "2.16.840.1.101.3.4.3.2" => ("dsa-with-sha256", Some(HashAlgorithm::Sha256)),
            "1.3.101.112" => ("Ed25519", None),
            "1.3.101.113" => ("Ed448", None),
            _ => ("unknown", None),
        };

        Self {
            oid: oid.to_string(),
            name: name.to_string(),
            hash,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == "unknown" {
            write!(f, "Unknown: {}", self.oid)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Basic constraints extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub path_len: Option<u32>,
}

/// Key usage extension bitset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    flags: u16,
}

impl KeyUsage {
    pub const DIGITAL_SIGNATURE: u16 = 1;
    pub const NON_REPUDIATION: u16 = 1 << 1;
    pub const KEY_ENCIPHERMENT: u16 = 1 << 2;
    pub const DATA_ENCIPHERMENT: u16 = 1 << 3;
    pub const KEY_AGREEMENT: u16 = 1 << 4;
    pub const KEY_CERT_SIGN: u16 = 1 << 5;
    pub const CRL_SIGN: u16 = 1 << 6;

    pub fn from_flags(flags: u16) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn key_cert_sign(&self) -> bool {
        self.flags & Self::KEY_CERT_SIGN != 0
    }

    /// Human-readable names of the asserted bits
    pub fn names(&self) -> Vec<&'static str> {
        [
            (Self::DIGITAL_SIGNATURE, "digital_signature"),
            (Self::NON_REPUDIATION, "non_repudiation"),
            (Self::KEY_ENCIPHERMENT, "key_encipherment"),
            (Self::DATA_ENCIPHERMENT, "data_encipherment"),
            (Self::KEY_AGREEMENT, "key_agreement"),
            (Self::KEY_CERT_SIGN, "key_cert_sign"),
            (Self::CRL_SIGN, "crl_sign"),
        ]
        .iter()
        .filter(|(bit, _)| self.flags & bit != 0)
        .map(|(_, name)| *name)
        .collect()
    }
}

/// Parsed X.509 certificate
#[derive(Debug, Clone)]
pub struct Certificate {
    pub version: u32,
    /// Serial number as upper-case hex
    pub serial: String,
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// DNS names from the Subject Alternative Name extension
    pub san_dns: Vec<String>,
    pub public_key: PublicKeyInfo,
    pub signature_algorithm: SignatureAlgorithm,
    pub signature: Vec<u8>,
    /// The exact to-be-signed bytes as they appear in the DER
    pub tbs_der: Vec<u8>,
    pub basic_constraints: Option<BasicConstraints>,
    pub key_usage: Option<KeyUsage>,
    pub extended_key_usage: Vec<String>,
    der: Vec<u8>,
}

impl Certificate {
    /// Parse a single DER-encoded certificate
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        let (rem, cert) =
            X509Certificate::from_der(der).map_err(|e| CertificateError::ParseError {
                message: format!("{:?}", e),
            })?;

        if !rem.is_empty() {
            return Err(CertificateError::TrailingData { bytes: rem.len() });
        }

        let not_before = asn1_time_to_datetime(cert.validity().not_before, "notBefore")?;
        let not_after = asn1_time_to_datetime(cert.validity().not_after, "notAfter")?;

        let basic_constraints = cert
            .basic_constraints()
            .ok()
            .flatten()
            .map(|ext| BasicConstraints {
                is_ca: ext.value.ca,
                path_len: ext.value.path_len_constraint,
            });

        let key_usage = cert
            .key_usage()
            .ok()
            .flatten()
            .map(|ext| KeyUsage::from_flags(ext.value.flags));

        Ok(Self {
            version: cert.version().0 + 1, // X.509 version is 0-indexed
            serial: hex::encode_upper(cert.raw_serial()),
            subject: DistinguishedName::from_x509(cert.subject()),
            issuer: DistinguishedName::from_x509(cert.issuer()),
            not_before,
            not_after,
            san_dns: extract_san_dns(&cert),
            public_key: extract_public_key(&cert),
            signature_algorithm: SignatureAlgorithm::from_oid(
                &cert.signature_algorithm.algorithm.to_id_string(),
            ),
            signature: cert.signature_value.data.to_vec(),
            tbs_der: cert.tbs_certificate.as_ref().to_vec(),
            basic_constraints,
            key_usage,
            extended_key_usage: extract_extended_key_usage(&cert),
            der: der.to_vec(),
        })
    }

    /// Parse the first CERTIFICATE block of a PEM document
    pub fn from_pem(pem_data: &[u8]) -> Result<Self, CertificateError> {
        let block = ::pem::parse(pem_data).map_err(|e| CertificateError::ParseError {
            message: format!("invalid PEM: {}", e),
        })?;

        if block.tag() != "CERTIFICATE" {
            return Err(CertificateError::ParseError {
                message: format!("expected CERTIFICATE block, found {}", block.tag()),
            });
        }

        Self::from_der(block.contents())
    }

    /// Original DER encoding
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Subject common name
    pub fn common_name(&self) -> Option<&str> {
        self.subject.common_name()
    }

    /// Issuer common name
    pub fn issuer_common_name(&self) -> Option<&str> {
        self.issuer.common_name()
    }

    pub fn is_self_signed(&self) -> bool {
        self.subject == self.issuer
    }

    pub fn is_ca(&self) -> bool {
        self.basic_constraints.map(|bc| bc.is_ca).unwrap_or(false)
    }

    /// SHA-256 fingerprint as colon-separated upper-case hex
    pub fn fingerprint(&self) -> String {
        Sha256::digest(&self.der)
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

fn asn1_time_to_datetime(
    time: ASN1Time,
    field: &'static str,
) -> Result<DateTime<Utc>, CertificateError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or(CertificateError::InvalidTime { field })
}

fn extract_san_dns(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(Some(san_ext)) = cert.subject_alternative_name() {
        for name in &san_ext.value.general_names {
            if let GeneralName::DNSName(dns) = name {
                names.push(dns.to_string());
            }
        }
    }

    names
}

fn extract_public_key(cert: &X509Certificate<'_>) -> PublicKeyInfo {
    let spki = cert.public_key();
    let alg_oid = spki.algorithm.algorithm.to_id_string();

    let algorithm = match alg_oid.as_str() {
        "1.2.840.113549.1.1.1" => KeyAlgorithm::Rsa,
        "1.2.840.10045.2.1" => {
            let curve = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.as_oid().ok())
                .map(|oid| EcCurve::from_oid(&oid.to_id_string()))
                .unwrap_or_else(|| EcCurve::Other("unnamed".to_string()));
            KeyAlgorithm::Ec(curve)
        }
        "1.2.840.10040.4.1" => KeyAlgorithm::Dsa,
        _ => KeyAlgorithm::Unknown(alg_oid),
    };

    let size_bits = match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => integer_bits(rsa.modulus),
        Ok(PublicKey::EC(ec)) => ec.key_size() as u32,
        _ => 0,
    };

    PublicKeyInfo {
        algorithm,
        size_bits,
        spki_der: spki.raw.to_vec(),
        key_bytes: spki.subject_public_key.data.to_vec(),
    }
}

/// Bit length of a big-endian unsigned integer
fn integer_bits(bytes: &[u8]) -> u32 {
    let trimmed: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    match trimmed.first() {
        Some(first) => (trimmed.len() as u32 * 8) - first.leading_zeros(),
        None => 0,
    }
}

fn extract_extended_key_usage(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut usages = Vec::new();

    if let Ok(Some(eku)) = cert.extended_key_usage() {
        if eku.value.any {
            usages.push("any".to_string());
        }
        if eku.value.server_auth {
            usages.push("server_auth".to_string());
        }
        if eku.value.client_auth {
            usages.push("client_auth".to_string());
        }
        if eku.value.code_signing {
            usages.push("code_signing".to_string());
        }
        if eku.value.email_protection {
            usages.push("email_protection".to_string());
        }
        if eku.value.time_stamping {
            usages.push("time_stamping".to_string());
        }
        if eku.value.ocsp_signing {
            usages.push("ocsp_signing".to_string());
        }
        for oid in &eku.value.other {
            usages.push(oid.to_id_string());
        }
    }

    usages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bits_ignores_leading_zero_octets() {
        assert_eq!(integer_bits(&[0x00, 0x80, 0x00]), 16);
        assert_eq!(integer_bits(&[0x01, 0xff]), 9);
        assert_eq!(integer_bits(&[]), 0);
    }

    #[test]
    fn key_usage_names_follow_bits() {
        let ku = KeyUsage::from_flags(KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_CERT_SIGN);
        assert!(ku.key_cert_sign());
        assert_eq!(ku.names(), vec!["digital_signature", "key_cert_sign"]);
    }

    #[test]
    fn signature_algorithm_declares_hash() {
        let alg = SignatureAlgorithm::from_oid("1.2.840.10045.4.3.3");
        assert_eq!(alg.hash, Some(HashAlgorithm::Sha384));
        assert_eq!(alg.to_string(), "ecdsa-with-SHA384");

        let pss = SignatureAlgorithm::from_oid("1.2.840.113549.1.1.10");
        assert_eq!(pss.hash, None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Certificate::from_der(b"not a certificate").is_err());
    }
}
