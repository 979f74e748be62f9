//! JSON output formatter

use crate::models::{CertificateStatus, HostCheckResult};
use serde::Serialize;

/// Certificate summary of a JSON host entry
#[derive(Debug, Serialize)]
pub struct JsonCertificate {
    pub subject_cn: Option<String>,
    pub issuer_cn: Option<String>,
    pub not_before: String,
    pub not_after: String,
    pub days_remaining: i64,
    pub is_expired: bool,
    pub fingerprint: String,
}

/// JSON-serializable host entry
#[derive(Debug, Serialize)]
pub struct JsonHostResult {
    pub host_name: String,
    pub fqdn: String,
    pub port: u16,
    pub status: CertificateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<JsonCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_valid: Option<bool>,
}

impl From<&HostCheckResult> for JsonHostResult {
    fn from(result: &HostCheckResult) -> Self {
        let mut entry = JsonHostResult {
            host_name: result.host_name.clone(),
            fqdn: result.fqdn.clone(),
            port: result.port,
            status: result.status,
            error: None,
            certificate: None,
            hostname_valid: None,
        };

        if let Some(error) = &result.error {
            entry.error = Some(error.clone());
        } else if let (Some(cert), Some(expiration)) = (&result.certificate, &result.expiration) {
            entry.certificate = Some(JsonCertificate {
                subject_cn: cert.common_name().map(str::to_string),
                issuer_cn: cert.issuer_common_name().map(str::to_string),
                not_before: expiration.not_before.to_rfc3339(),
                not_after: expiration.not_after.to_rfc3339(),
                days_remaining: expiration.days_remaining,
                is_expired: expiration.is_expired,
                fingerprint: cert.fingerprint(),
            });
            entry.hostname_valid = result.hostname_valid;
        }

        entry
    }
}

/// Render results as a pretty-printed JSON array
pub fn to_json(results: &[HostCheckResult]) -> serde_json::Result<String> {
    let entries: Vec<JsonHostResult> = results.iter().map(JsonHostResult::from).collect();
    serde_json::to_string_pretty(&entries)
}

/// Print results as JSON to stdout
pub fn print_json(results: &[HostCheckResult]) -> anyhow::Result<()> {
    println!("{}", to_json(results)?);
    Ok(())
}
