//! Custom error types for cert-checker
//!
//! This module defines domain-specific error types using `thiserror` for the
//! failure modes of fetching, parsing and verifying certificates. Validation
//! outcomes are not errors: they travel inside `ValidationResult`.

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the cert-checker library
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("Certificate file error: {0}")]
    CertFile(#[from] CertFileError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Timeout,
    NameResolution,
    Transport,
    NoCertificate,
    Unexpected,
}

/// Failures while retrieving a peer certificate from a live endpoint.
///
/// Each variant renders with a distinct, stable prefix so consumers can tell
/// an unreachable host apart from a reachable but untrusted one.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Connection timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("DNS resolution failed: {message}")]
    NameResolution { host: String, message: String },

    #[error("Connection error: {message}")]
    Transport { message: String },

    #[error("No certificate received")]
    NoCertificate,

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl FetchError {
    /// The taxonomy bucket this error belongs to
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout { .. } => FetchErrorKind::Timeout,
            FetchError::NameResolution { .. } => FetchErrorKind::NameResolution,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::NoCertificate => FetchErrorKind::NoCertificate,
            FetchError::Unexpected { .. } => FetchErrorKind::Unexpected,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        FetchError::Unexpected {
            message: message.into(),
        }
    }
}

/// Certificate parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Failed to parse certificate: {message}")]
    ParseError { message: String },

    #[error("Invalid timestamp in certificate: {field}")]
    InvalidTime { field: &'static str },

    #[error("Trailing data after certificate ({bytes} bytes)")]
    TrailingData { bytes: usize },
}

/// Input the signature primitives cannot parse at all.
///
/// A signature that simply does not verify is not an error; it is `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Malformed {algorithm} public key: {message}")]
    MalformedKey {
        algorithm: &'static str,
        message: String,
    },

    #[error("Malformed {algorithm} signature: {message}")]
    MalformedSignature {
        algorithm: &'static str,
        message: String,
    },
}

/// Certificate file reading errors
#[derive(Error, Debug)]
pub enum CertFileError {
    #[error("Failed to read {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("Unsupported certificate format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid certificate in {path}: {source}")]
    InvalidCertificate {
        path: String,
        #[source]
        source: CertificateError,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
