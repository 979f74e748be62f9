//! Per-host check result

use super::{Certificate, CertificateStatus, ExpirationInfo, ValidationResult};
use crate::utils::{FetchError, FetchErrorKind};

/// Result of checking a single host.
///
/// Either `error` is set, or `certificate` and `expiration` are; the two
/// constructors are the only way to build one.
#[derive(Debug, Clone)]
pub struct HostCheckResult {
    pub host_name: String,
    pub fqdn: String,
    pub port: u16,
    pub status: CertificateStatus,
    pub certificate: Option<Certificate>,
    pub certificate_chain: Option<Vec<Certificate>>,
    pub expiration: Option<ExpirationInfo>,
    pub hostname_valid: Option<bool>,
    /// Present when the presented chain was validated
    pub chain_validation: Option<ValidationResult>,
    pub error: Option<String>,
    pub error_kind: Option<FetchErrorKind>,
}

impl HostCheckResult {
    /// A host whose certificate was retrieved and analyzed
    #[allow(clippy::too_many_arguments)]
    pub fn checked(
        host_name: impl Into<String>,
        fqdn: impl Into<String>,
        port: u16,
        status: CertificateStatus,
        chain: Vec<Certificate>,
        expiration: ExpirationInfo,
        hostname_valid: bool,
        chain_validation: Option<ValidationResult>,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            fqdn: fqdn.into(),
            port,
            status,
            certificate: chain.first().cloned(),
            certificate_chain: Some(chain),
            expiration: Some(expiration),
            hostname_valid: Some(hostname_valid),
            chain_validation,
            error: None,
            error_kind: None,
        }
    }

    /// A host whose check failed before any certificate could be analyzed
    pub fn failed(
        host_name: impl Into<String>,
        fqdn: impl Into<String>,
        port: u16,
        error: &FetchError,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            fqdn: fqdn.into(),
            port,
            status: CertificateStatus::Error,
            certificate: None,
            certificate_chain: None,
            expiration: None,
            hostname_valid: None,
            chain_validation: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Subject CN of the leaf, if a certificate was retrieved
    pub fn subject_cn(&self) -> Option<&str> {
        self.certificate.as_ref().and_then(|c| c.common_name())
    }

    /// Issuer CN of the leaf, if a certificate was retrieved
    pub fn issuer_cn(&self) -> Option<&str> {
        self.certificate.as_ref().and_then(|c| c.issuer_common_name())
    }
}
