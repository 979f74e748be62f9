//! Status and expiration types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Overall status of a host certificate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Valid,
    Warning,
    Expired,
    Error,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Valid => "valid",
            CertificateStatus::Warning => "warning",
            CertificateStatus::Expired => "expired",
            CertificateStatus::Error => "error",
        }
    }

    /// Get the icon for this status
    pub fn icon(&self) -> &'static str {
        match self {
            CertificateStatus::Valid => "✓",
            CertificateStatus::Warning => "⚠",
            CertificateStatus::Expired => "✗",
            CertificateStatus::Error => "✗",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time validity of a certificate at a given instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpirationInfo {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Whole days until `not_after`, truncated toward zero; negative once past
    pub days_remaining: i64,
    pub is_expired: bool,
    pub is_warning: bool,
    pub status: CertificateStatus,
}
