//! Final status decisions
//!
//! The verdicts of the individual checks are combined here, in one place, so
//! the precedence between independent failure modes can be tested on its own.

use crate::models::{CertificateStatus, ValidationFailure, ValidationStatus};

/// Outcomes of the chain validation passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainVerdicts {
    pub structural_ok: bool,
    pub linkage_ok: bool,
    pub signature_ok: bool,
    /// `None` when the trust-anchor pass did not run
    pub truststore_ok: Option<bool>,
}

impl Default for ChainVerdicts {
    fn default() -> Self {
        Self {
            structural_ok: true,
            linkage_ok: true,
            signature_ok: true,
            truststore_ok: None,
        }
    }
}

impl ChainVerdicts {
    /// Mark the pass that produced `failure` as failed
    pub fn record(&mut self, failure: ValidationFailure) {
        match failure {
            ValidationFailure::EmptyChain | ValidationFailure::StructuralFailure => {
                self.structural_ok = false
            }
            ValidationFailure::LinkageMismatch => self.linkage_ok = false,
            ValidationFailure::SignatureFailure => self.signature_ok = false,
            ValidationFailure::TrustAnchorNotFound => self.truststore_ok = Some(false),
        }
    }
}

/// Outcomes of the per-host checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostVerdicts {
    pub hostname_ok: bool,
    /// `None` when the presented chain was not validated
    pub chain_ok: Option<bool>,
    pub expiration: CertificateStatus,
}

/// Any hard failure makes a chain INVALID; warnings never downgrade VALID.
pub fn decide_chain_status(verdicts: &ChainVerdicts) -> ValidationStatus {
    let hard_failure = !verdicts.structural_ok
        || !verdicts.linkage_ok
        || !verdicts.signature_ok
        || verdicts.truststore_ok == Some(false);

    if hard_failure {
        ValidationStatus::Invalid
    } else {
        ValidationStatus::Valid
    }
}

/// Identity failure dominates, then chain failure, then the expiration status.
pub fn decide_host_status(verdicts: &HostVerdicts) -> CertificateStatus {
    if !verdicts.hostname_ok {
        return CertificateStatus::Error;
    }

    if verdicts.chain_ok == Some(false) {
        return CertificateStatus::Error;
    }

    verdicts.expiration
}
