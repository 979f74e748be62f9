//! Utility modules for cert-checker
//!
//! This module contains error types, progress indicators, and other utilities.

pub mod error;
pub mod progress;

pub use error::{
    CertFileError, CertificateError, ConfigError, FetchError, FetchErrorKind, Result,
    SignatureError, ToolkitError,
};
