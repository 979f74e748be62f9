//! Certificate file operations module
//!
//! Reads certificate material from PEM and DER files.

pub mod reader;

pub use reader::{read_certificate, read_certificates, DetectedFormat};
