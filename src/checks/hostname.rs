//! Hostname identity matching
//!
//! A certificate matches a host when its subject CN or any DNS entry of its
//! Subject Alternative Name extension matches. Only a full leftmost `*` label
//! is treated as a wildcard, and it stands for exactly one non-empty label.

use crate::models::Certificate;

/// Check whether the certificate's identity covers `fqdn`
pub fn matches(cert: &Certificate, fqdn: &str) -> bool {
    matches_identity(cert.common_name(), &cert.san_dns, fqdn)
}

/// Check a CN and SAN DNS list against `fqdn`
pub fn matches_identity(cn: Option<&str>, san_dns: &[String], fqdn: &str) -> bool {
    if cn.is_some_and(|cn| match_pattern(cn, fqdn)) {
        return true;
    }

    san_dns.iter().any(|san| match_pattern(san, fqdn))
}

/// Match one certificate name pattern against a hostname, ignoring case
pub fn match_pattern(pattern: &str, hostname: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let hostname = hostname.to_lowercase();

    if pattern == hostname {
        return true;
    }

    if !pattern.starts_with("*.") {
        return false;
    }

    let pattern_labels: Vec<&str> = pattern.split('.').collect();
    let host_labels: Vec<&str> = hostname.split('.').collect();

    if pattern_labels.len() != host_labels.len() || host_labels[0].is_empty() {
        return false;
    }

    pattern_labels[1..] == host_labels[1..]
}
