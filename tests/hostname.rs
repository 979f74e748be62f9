mod common;

use cert_checker::checks::hostname::{match_pattern, matches};
use common::{ca_params, leaf_params, self_signed, signed_by};

#[test]
fn test_wildcard_scenarios() {
    assert!(match_pattern("*.example.com", "api.example.com"));
    assert!(!match_pattern("*.example.com", "example.com"));
    assert!(!match_pattern("*.example.com", "a.b.example.com"));
    assert!(match_pattern("*.EXAMPLE.com", "Api.Example.COM"));
}

#[test]
fn test_certificate_matches_by_san() {
    let root = self_signed(ca_params("Test Root CA"));
    let leaf = signed_by(
        leaf_params("Example Service", &["www.example.com", "*.api.example.com"]),
        &root,
    );
    let cert = leaf.parsed();

    assert!(matches(&cert, "www.example.com"));
    assert!(matches(&cert, "v2.api.example.com"));
    assert!(!matches(&cert, "example.com"));
    assert!(!matches(&cert, "deep.v2.api.example.com"));
}

#[test]
fn test_certificate_matches_by_cn() {
    let root = self_signed(ca_params("Test Root CA"));
    let leaf = signed_by(leaf_params("legacy.example.com", &[]), &root);
    let cert = leaf.parsed();

    assert!(cert.san_dns.is_empty());
    assert!(matches(&cert, "LEGACY.example.com"));
    assert!(!matches(&cert, "other.example.com"));
}
