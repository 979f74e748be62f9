//! Certificate file reading and format detection
//!
//! Detects PEM and DER files and parses every certificate they contain.

use crate::models::Certificate;
use crate::utils::CertFileError;
use std::path::Path;

/// Detected certificate file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    Pem,
    Der,
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedFormat::Pem => write!(f, "PEM"),
            DetectedFormat::Der => write!(f, "DER"),
        }
    }
}

/// Detect format from raw bytes
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DetectedFormat, CertFileError> {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.contains("-----BEGIN ") {
            return Ok(DetectedFormat::Pem);
        }
    }

    // ASN.1 SEQUENCE
    if data.first() == Some(&0x30) {
        return Ok(DetectedFormat::Der);
    }

    Err(CertFileError::UnsupportedFormat {
        format: "unknown (could not detect PEM or DER)".to_string(),
    })
}

/// Read and parse every certificate in a PEM or DER file, in file order
pub fn read_certificates(path: &Path) -> Result<Vec<Certificate>, CertFileError> {
    let data = std::fs::read(path).map_err(|e| CertFileError::FileReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_certificates(&data, path)
}

/// Read a file that must hold exactly one leading certificate
pub fn read_certificate(path: &Path) -> Result<Certificate, CertFileError> {
    read_certificates(path)?
        .into_iter()
        .next()
        .ok_or_else(|| CertFileError::FileReadError {
            path: path.display().to_string(),
            message: "No certificate found".to_string(),
        })
}

/// Parse certificates from bytes; `path` is used for error messages only
pub fn parse_certificates(data: &[u8], path: &Path) -> Result<Vec<Certificate>, CertFileError> {
    let ders = match detect_format_from_bytes(data)? {
        DetectedFormat::Pem => pem_certificate_blocks(data, path)?,
        DetectedFormat::Der => vec![data.to_vec()],
    };

    ders.iter()
        .map(|der| {
            Certificate::from_der(der).map_err(|source| CertFileError::InvalidCertificate {
                path: path.display().to_string(),
                source,
            })
        })
        .collect()
}

/// Extract the contents of all CERTIFICATE blocks
fn pem_certificate_blocks(data: &[u8], path: &Path) -> Result<Vec<Vec<u8>>, CertFileError> {
    let pems = ::pem::parse_many(data).map_err(|e| CertFileError::FileReadError {
        path: path.display().to_string(),
        message: format!("Failed to parse PEM: {}", e),
    })?;

    let certs: Vec<Vec<u8>> = pems
        .into_iter()
        .filter(|p| p.tag() == "CERTIFICATE")
        .map(|p| p.into_contents())
        .collect();

    if certs.is_empty() {
        return Err(CertFileError::FileReadError {
            path: path.display().to_string(),
            message: "No CERTIFICATE blocks found in PEM file".to_string(),
        });
    }

    Ok(certs)
}
