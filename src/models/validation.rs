//! Validation result types

use serde::Serialize;
use std::fmt;

/// Status of a validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    Warning,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => write!(f, "valid"),
            ValidationStatus::Invalid => write!(f, "invalid"),
            ValidationStatus::Warning => write!(f, "warning"),
        }
    }
}

/// Which pipeline stage produced a hard failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    EmptyChain,
    StructuralFailure,
    LinkageMismatch,
    SignatureFailure,
    TrustAnchorNotFound,
}

/// Severity of a single audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Info,
    Warning,
    Failure,
}

/// One line of the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Chain index the entry refers to; `None` for chain-wide entries
    pub index: Option<usize>,
    pub level: AuditLevel,
    pub message: String,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "Cert {}: {}", i, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of a chain or single-certificate validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub is_valid: bool,
    pub failure: Option<ValidationFailure>,
    pub entries: Vec<AuditEntry>,
}

impl ValidationResult {
    /// The audit trail rendered as messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(|e| e.level == AuditLevel::Warning)
    }
}

/// Append-only audit trail used while a validation runs.
///
/// Consuming it with [`AuditTrail::fail`] or [`AuditTrail::finish`] freezes
/// the trail into a [`ValidationResult`].
#[derive(Debug, Default)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, index: Option<usize>, message: impl Into<String>) {
        self.push(index, AuditLevel::Info, message);
    }

    pub fn warn(&mut self, index: Option<usize>, message: impl Into<String>) {
        self.push(index, AuditLevel::Warning, message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record the failure and close the trail as INVALID
    pub fn fail(
        self,
        failure: ValidationFailure,
        index: Option<usize>,
        message: impl Into<String>,
    ) -> ValidationResult {
        self.fail_with(ValidationStatus::Invalid, failure, index, message)
    }

    /// Record the failure and close the trail with a status decided by the caller
    pub fn fail_with(
        mut self,
        status: ValidationStatus,
        failure: ValidationFailure,
        index: Option<usize>,
        message: impl Into<String>,
    ) -> ValidationResult {
        self.push(index, AuditLevel::Failure, message);
        ValidationResult {
            status,
            is_valid: status != ValidationStatus::Invalid,
            failure: Some(failure),
            entries: self.entries,
        }
    }

    /// Close the trail with the given status
    pub fn finish(self, status: ValidationStatus) -> ValidationResult {
        ValidationResult {
            status,
            is_valid: status != ValidationStatus::Invalid,
            failure: None,
            entries: self.entries,
        }
    }

    fn push(&mut self, index: Option<usize>, level: AuditLevel, message: impl Into<String>) {
        self.entries.push(AuditEntry {
            index,
            level,
            message: message.into(),
        });
    }
}
