//! Data models for cert-checker
//!
//! This module contains the value types passed between the checks, the
//! orchestrator and the output formatters.

pub mod certificate;
pub mod host_result;
pub mod status;
pub mod validation;

pub use certificate::{
    BasicConstraints, Certificate, DistinguishedName, EcCurve, HashAlgorithm, KeyAlgorithm,
    KeyUsage, PublicKeyInfo, SignatureAlgorithm,
};
pub use host_result::HostCheckResult;
pub use status::{CertificateStatus, ExpirationInfo};
pub use validation::{
    AuditEntry, AuditLevel, AuditTrail, ValidationFailure, ValidationResult, ValidationStatus,
};
