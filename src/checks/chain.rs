//! Certificate chain validation
//!
//! [`ChainValidator::validate_chain`] runs an ordered pipeline over a chain
//! given leaf first:
//!
//! 1. an empty chain is rejected outright
//! 2. structural pass over every certificate (basic constraints, key usage)
//! 3. linkage pass over adjacent pairs (issuer name, then signature)
//! 4. optional trust-anchor pass on the last certificate
//!
//! The first hard failure closes the audit trail. Missing extensions are
//! recorded as warnings and never change the final status.

use super::severity::{decide_chain_status, ChainVerdicts};
use super::signature;
use crate::cert_ops::reader;
use crate::models::{
    AuditTrail, Certificate, DistinguishedName, ValidationFailure, ValidationResult,
    ValidationStatus,
};
use crate::utils::CertFileError;
use std::path::Path;
use std::sync::Arc;

/// Read-only set of trust anchors
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    anchors: Vec<Certificate>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_certificates(anchors: Vec<Certificate>) -> Self {
        Self { anchors }
    }

    /// Load every certificate of a PEM bundle as an anchor
    pub fn from_pem_file(path: &Path) -> Result<Self, CertFileError> {
        let anchors = reader::read_certificates(path)?;
        tracing::debug!(path = %path.display(), anchors = anchors.len(), "loaded truststore");
        Ok(Self { anchors })
    }

    pub fn add(&mut self, anchor: Certificate) {
        self.anchors.push(anchor);
    }

    /// Anchors whose subject equals `subject`, in store order
    pub fn candidates_for<'a>(
        &'a self,
        subject: &'a DistinguishedName,
    ) -> impl Iterator<Item = &'a Certificate> + 'a {
        self.anchors.iter().filter(move |a| &a.subject == subject)
    }

    /// Whether some anchor with the root's subject verifies the root's signature
    pub fn anchors_root(&self, root: &Certificate) -> bool {
        self.candidates_for(&root.subject)
            .any(|anchor| signature::verify(root, anchor))
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Validates certificate chains, optionally against a trust store
#[derive(Debug, Clone, Default)]
pub struct ChainValidator {
    truststore: Option<Arc<TrustStore>>,
}

impl ChainValidator {
    pub fn new(truststore: Option<Arc<TrustStore>>) -> Self {
        Self { truststore }
    }

    pub fn truststore(&self) -> Option<&TrustStore> {
        self.truststore.as_deref()
    }

    /// Report the basic constraints of a single certificate
    pub fn check_basic_constraints(&self, cert: &Certificate) -> ValidationResult {
        let mut trail = AuditTrail::new();
        record_basic_constraints(cert, None, &mut trail);

        let status = if cert.basic_constraints.is_some() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warning
        };
        trail.finish(status)
    }

    /// Check the key usage of a single certificate
    pub fn check_key_usage(&self, cert: &Certificate) -> ValidationResult {
        let mut trail = AuditTrail::new();
        if let Err(message) = record_key_usage(cert, None, &mut trail) {
            return trail.fail(ValidationFailure::StructuralFailure, None, message);
        }

        let status = if cert.key_usage.is_some() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warning
        };
        trail.finish(status)
    }

    /// Validate a chain given leaf first
    pub fn validate_chain(&self, chain: &[Certificate], use_truststore: bool) -> ValidationResult {
        let mut run = ChainRun::default();

        if chain.is_empty() {
            return run.reject(ValidationFailure::EmptyChain, None, "Empty certificate chain");
        }

        tracing::debug!(length = chain.len(), use_truststore, "validating chain");

        for (i, cert) in chain.iter().enumerate() {
            record_basic_constraints(cert, Some(i), &mut run.trail);
            if let Err(message) = record_key_usage(cert, Some(i), &mut run.trail) {
                return run.reject(ValidationFailure::StructuralFailure, Some(i), message);
            }
        }

        for (i, pair) in chain.windows(2).enumerate() {
            let (cert, issuer) = (&pair[0], &pair[1]);

            if cert.issuer != issuer.subject {
                return run.reject(
                    ValidationFailure::LinkageMismatch,
                    Some(i),
                    "Issuer does not match next cert in chain",
                );
            }

            if !signature::verify(cert, issuer) {
                return run.reject(
                    ValidationFailure::SignatureFailure,
                    Some(i),
                    "Invalid signature from issuer",
                );
            }
            run.trail.info(Some(i), "Signature valid");
        }

        let store = self.truststore.as_deref().filter(|_| use_truststore);
        if let (Some(store), Some(root)) = (store, chain.last()) {
            if !store.is_empty() {
                if !store.anchors_root(root) {
                    return run.reject(
                        ValidationFailure::TrustAnchorNotFound,
                        None,
                        "Root certificate not found in truststore",
                    );
                }
                run.verdicts.truststore_ok = Some(true);
                run.trail.info(None, "Root certificate found in truststore");
            }
        }

        run.finish()
    }

    /// Validate a lone certificate, checking its own signature if self-signed
    pub fn validate_single(&self, cert: &Certificate) -> ValidationResult {
        let mut trail = AuditTrail::new();

        record_basic_constraints(cert, None, &mut trail);
        if let Err(message) = record_key_usage(cert, None, &mut trail) {
            return trail.fail(ValidationFailure::StructuralFailure, None, message);
        }

        if cert.is_self_signed() {
            if !signature::verify(cert, cert) {
                return trail.fail(
                    ValidationFailure::SignatureFailure,
                    None,
                    "Self-signed certificate with INVALID signature",
                );
            }
            trail.info(None, "Self-signed certificate with valid signature");
        }

        trail.finish(ValidationStatus::Valid)
    }
}

fn record_basic_constraints(cert: &Certificate, index: Option<usize>, trail: &mut AuditTrail) {
    match cert.basic_constraints {
        Some(bc) if bc.is_ca => {
            trail.info(index, "Certificate is a CA certificate");
            if let Some(path_len) = bc.path_len {
                trail.info(index, format!("Path length constraint: {}", path_len));
            }
        }
        Some(_) => trail.info(index, "Certificate is not a CA certificate"),
        None => trail.warn(index, "Basic constraints extension not found"),
    }
}

/// Audit trail plus the verdict of each pass that has run so far
#[derive(Debug, Default)]
struct ChainRun {
    trail: AuditTrail,
    verdicts: ChainVerdicts,
}

impl ChainRun {
    fn reject(
        mut self,
        failure: ValidationFailure,
        index: Option<usize>,
        message: &str,
    ) -> ValidationResult {
        self.verdicts.record(failure);
        let status = decide_chain_status(&self.verdicts);
        self.trail.fail_with(status, failure, index, message)
    }

    fn finish(self) -> ValidationResult {
        self.trail.finish(decide_chain_status(&self.verdicts))
    }
}

/// Err carries the failure message for a CA without keyCertSign
fn record_key_usage(
    cert: &Certificate,
    index: Option<usize>,
    trail: &mut AuditTrail,
) -> Result<(), &'static str> {
    match cert.key_usage {
        None => {
            trail.warn(index, "Key usage extension not found");
            Ok(())
        }
        Some(ku) if cert.is_ca() && !ku.key_cert_sign() => {
            Err("CA certificate missing key_cert_sign usage")
        }
        Some(_) => {
            trail.info(index, "Key usage valid");
            Ok(())
        }
    }
}
