mod common;

use cert_checker::checks::{ChainValidator, TrustStore};
use cert_checker::models::{AuditLevel, ValidationFailure, ValidationStatus};
use common::{ca_params, leaf_params, self_signed, signed_by, Pki};
use rcgen::{BasicConstraints, IsCa, KeyUsagePurpose};
use std::sync::Arc;

fn validator_with(anchors: Vec<cert_checker::Certificate>) -> ChainValidator {
    ChainValidator::new(Some(Arc::new(TrustStore::from_certificates(anchors))))
}

#[test]
fn test_sound_chain_is_valid() {
    let pki = Pki::new(&["www.example.com"]);
    let validator = validator_with(vec![pki.root.parsed()]);

    let result = validator.validate_chain(&pki.chain(), true);

    assert_eq!(result.status, ValidationStatus::Valid);
    assert!(result.is_valid);
    assert_eq!(result.failure, None);

    let messages = result.messages();
    assert!(messages.contains(&"Cert 0: Certificate is not a CA certificate".to_string()));
    assert!(messages.contains(&"Cert 1: Certificate is a CA certificate".to_string()));
    assert!(messages.contains(&"Cert 0: Signature valid".to_string()));
    assert!(messages.contains(&"Cert 1: Signature valid".to_string()));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Root certificate found in truststore")
    );
}

#[test]
fn test_issuer_mismatch_stops_before_signature_check() {
    let pki = Pki::new(&["www.example.com"]);
    let other_root = self_signed(ca_params("Other Root CA"));
    let other_intermediate = signed_by(ca_params("Other Intermediate CA"), &other_root);

    let chain = vec![
        pki.leaf.parsed(),
        other_intermediate.parsed(),
        other_root.parsed(),
    ];
    let result = ChainValidator::default().validate_chain(&chain, false);

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.failure, Some(ValidationFailure::LinkageMismatch));
    assert_eq!(
        result.messages().last().map(String::as_str),
        Some("Cert 0: Issuer does not match next cert in chain")
    );
    assert!(!result
        .messages()
        .iter()
        .any(|m| m.contains("Signature valid")));
}

#[test]
fn test_later_linkage_failure_keeps_earlier_confirmations() {
    let pki = Pki::new(&["www.example.com"]);
    let unrelated_root = self_signed(ca_params("Unrelated Root CA"));

    let chain = vec![
        pki.leaf.parsed(),
        pki.intermediate.parsed(),
        unrelated_root.parsed(),
    ];
    let result = ChainValidator::default().validate_chain(&chain, false);

    assert_eq!(result.failure, Some(ValidationFailure::LinkageMismatch));
    let messages = result.messages();
    let tail: Vec<&str> = messages.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(
        tail,
        vec![
            "Cert 1: Issuer does not match next cert in chain",
            "Cert 0: Signature valid"
        ]
    );
}

#[test]
fn test_forged_issuer_with_same_name_fails_signature() {
    let pki = Pki::new(&["www.example.com"]);
    // Same subject as the real intermediate, different key
    let impostor = signed_by(ca_params("Test Intermediate CA"), &pki.root);

    let chain = vec![pki.leaf.parsed(), impostor.parsed()];
    let result = ChainValidator::default().validate_chain(&chain, false);

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.failure, Some(ValidationFailure::SignatureFailure));
    assert_eq!(
        result.messages().last().map(String::as_str),
        Some("Cert 0: Invalid signature from issuer")
    );
}

#[test]
fn test_anchor_with_matching_name_but_foreign_key_is_rejected() {
    let pki = Pki::new(&["www.example.com"]);
    let spoofed_anchor = self_signed(ca_params("Test Root CA"));
    let validator = validator_with(vec![spoofed_anchor.parsed()]);

    let result = validator.validate_chain(&pki.chain(), true);

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.failure, Some(ValidationFailure::TrustAnchorNotFound));
    assert_eq!(
        result.messages().last().map(String::as_str),
        Some("Root certificate not found in truststore")
    );
}

#[test]
fn test_first_verifying_anchor_wins() {
    let pki = Pki::new(&["www.example.com"]);
    let spoofed_anchor = self_signed(ca_params("Test Root CA"));
    let validator = validator_with(vec![spoofed_anchor.parsed(), pki.root.parsed()]);

    let result = validator.validate_chain(&pki.chain(), true);

    assert!(result.is_valid);
}

#[test]
fn test_non_self_signed_last_element_can_be_anchored() {
    let pki = Pki::new(&["www.example.com"]);
    let chain = vec![pki.leaf.parsed(), pki.intermediate.parsed()];

    // Anchors are looked up by the subject of the last element
    let root_only = validator_with(vec![pki.root.parsed()]);
    let result = root_only.validate_chain(&chain, true);
    assert_eq!(result.failure, Some(ValidationFailure::TrustAnchorNotFound));

    // An anchor named like the intermediate and holding the root key signs it
    let anchor = ca_params("Test Intermediate CA")
        .self_signed(&pki.root.key)
        .unwrap();
    let anchor = cert_checker::Certificate::from_der(anchor.der()).unwrap();
    let result = validator_with(vec![anchor]).validate_chain(&chain, true);
    assert!(result.is_valid);
    assert_eq!(
        result.messages().last().map(String::as_str),
        Some("Root certificate found in truststore")
    );
}

#[test]
fn test_truststore_ignored_when_not_requested() {
    let pki = Pki::new(&["www.example.com"]);
    let spoofed_anchor = self_signed(ca_params("Test Root CA"));
    let validator = validator_with(vec![spoofed_anchor.parsed()]);

    let result = validator.validate_chain(&pki.chain(), false);

    assert!(result.is_valid);
    assert!(!result
        .messages()
        .iter()
        .any(|m| m.contains("truststore")));
}

#[test]
fn test_empty_truststore_skips_anchor_pass() {
    let pki = Pki::new(&["www.example.com"]);
    let validator = validator_with(Vec::new());

    let result = validator.validate_chain(&pki.chain(), true);

    assert!(result.is_valid);
}

#[test]
fn test_ca_without_key_cert_sign_short_circuits() {
    let root = self_signed(ca_params("Test Root CA"));
    let mut bad_ca = ca_params("Broken Intermediate CA");
    bad_ca.key_usages = vec![KeyUsagePurpose::DigitalSignature];
    let bad_ca = signed_by(bad_ca, &root);

    let chain = vec![bad_ca.parsed(), root.parsed()];
    let result = ChainValidator::default().validate_chain(&chain, false);

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert_eq!(result.failure, Some(ValidationFailure::StructuralFailure));
    assert_eq!(
        result.messages(),
        vec![
            "Cert 0: Certificate is a CA certificate",
            "Cert 0: CA certificate missing key_cert_sign usage",
        ]
    );
}

#[test]
fn test_missing_extensions_warn_without_downgrading() {
    let root = self_signed(ca_params("Test Root CA"));
    let mut bare = leaf_params("bare.test", &["bare.test"]);
    bare.is_ca = IsCa::NoCa;
    bare.key_usages = Vec::new();
    let bare = signed_by(bare, &root);

    let result = ChainValidator::default().validate_chain(&[bare.parsed(), root.parsed()], false);

    assert_eq!(result.status, ValidationStatus::Valid);
    let warnings: Vec<String> = result.warnings().map(|e| e.to_string()).collect();
    assert_eq!(
        warnings,
        vec![
            "Cert 0: Basic constraints extension not found",
            "Cert 0: Key usage extension not found",
        ]
    );
}

#[test]
fn test_path_length_is_reported() {
    let mut params = ca_params("Constrained Root CA");
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(1));
    let root = self_signed(params);

    let result = ChainValidator::default().validate_chain(&[root.parsed()], false);

    assert!(result
        .messages()
        .contains(&"Cert 0: Path length constraint: 1".to_string()));
}

#[test]
fn test_validate_single_self_signed() {
    let root = self_signed(ca_params("Test Root CA"));
    let result = ChainValidator::default().validate_single(&root.parsed());

    assert!(result.is_valid);
    assert_eq!(
        result.messages().last().map(String::as_str),
        Some("Self-signed certificate with valid signature")
    );
    assert!(result.entries.iter().all(|e| e.index.is_none()));
}

#[test]
fn test_validate_single_issued_cert_skips_signature() {
    let pki = Pki::new(&["www.example.com"]);
    let result = ChainValidator::default().validate_single(&pki.leaf.parsed());

    assert!(result.is_valid);
    assert_eq!(
        result.messages(),
        vec!["Certificate is not a CA certificate", "Key usage valid"]
    );
}

#[test]
fn test_validate_single_rejects_ca_without_key_cert_sign() {
    let mut params = ca_params("Broken Root CA");
    params.key_usages = vec![KeyUsagePurpose::CrlSign];
    let root = self_signed(params);

    let result = ChainValidator::default().validate_single(&root.parsed());

    assert_eq!(result.failure, Some(ValidationFailure::StructuralFailure));
    assert_eq!(
        result.entries.last().map(|e| e.level),
        Some(AuditLevel::Failure)
    );
}

#[test]
fn test_standalone_extension_checks() {
    let pki = Pki::new(&["www.example.com"]);
    let validator = ChainValidator::default();

    let bc = validator.check_basic_constraints(&pki.intermediate.parsed());
    assert_eq!(bc.status, ValidationStatus::Valid);
    assert_eq!(bc.messages(), vec!["Certificate is a CA certificate"]);

    let ku = validator.check_key_usage(&pki.leaf.parsed());
    assert_eq!(ku.messages(), vec!["Key usage valid"]);
}

#[test]
fn test_issuer_name_matches_across_string_encodings() {
    let ca = cert_checker::Certificate::from_pem(include_bytes!("fixtures/name-printable-ca.pem"))
        .unwrap();
    let leaf = cert_checker::Certificate::from_pem(include_bytes!("fixtures/name-utf8-leaf.pem"))
        .unwrap();

    assert_ne!(leaf.issuer.as_raw(), ca.subject.as_raw());
    assert_eq!(leaf.issuer, ca.subject);
    assert_eq!(leaf.issuer.common_name(), Some("Test CA"));

    let validator = validator_with(vec![ca.clone()]);
    let result = validator.validate_chain(&[leaf.clone(), ca.clone()], true);
    assert_eq!(result.status, ValidationStatus::Valid);
    assert!(result.messages().contains(&"Cert 0: Signature valid".to_string()));

    // the leaf alone can be anchored through a name lookup on its issuer
    let store = TrustStore::from_certificates(vec![ca]);
    assert_eq!(store.candidates_for(&leaf.issuer).count(), 1);
}

#[test]
fn test_differing_names_stay_unequal() {
    let ca = cert_checker::Certificate::from_pem(include_bytes!("fixtures/name-printable-ca.pem"))
        .unwrap();
    let leaf = cert_checker::Certificate::from_pem(include_bytes!("fixtures/name-utf8-leaf.pem"))
        .unwrap();

    assert_ne!(leaf.subject, ca.subject);
    assert!(!leaf.is_self_signed());
}

#[test]
fn test_failed_pass_is_reported_as_invalid() {
    let pki = Pki::new(&["www.example.com"]);
    let stranger = self_signed(ca_params("Stranger Root CA"));
    let validator = validator_with(vec![stranger.parsed()]);

    let result = validator.validate_chain(&pki.chain(), true);

    assert_eq!(result.status, ValidationStatus::Invalid);
    assert!(!result.is_valid);
    assert_eq!(result.failure, Some(ValidationFailure::TrustAnchorNotFound));
    assert_eq!(
        result.entries.last().map(|e| e.level),
        Some(AuditLevel::Failure)
    );
}
