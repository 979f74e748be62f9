//! cert-checker Library
//!
//! A certificate trust decision engine providing:
//! - Certificate retrieval from live TLS endpoints, trusted or not
//! - Expiration classification against a warning threshold
//! - Wildcard-aware hostname matching
//! - Signature verification and chain validation to a trust anchor
//! - Bounded-parallel batch checks with per-host isolation
//!
//! # Usage
//!
//! ```rust,ignore
//! use cert_checker::runner::{CheckSettings, HostChecker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let checker = HostChecker::new(CheckSettings::default())?;
//!     let result = checker.check_host("example.com", 443, 30, None, None).await;
//!     println!("{}: {}", result.host_name, result.status);
//!     Ok(())
//! }
//! ```

pub mod cert_ops;
pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use checks::{ChainValidator, TlsChainFetcher, TrustStore};
pub use cli::Cli;
pub use config::{Config, HostConfig, Settings};
pub use models::{
    Certificate, CertificateStatus, ExpirationInfo, HostCheckResult, ValidationResult,
    ValidationStatus,
};
pub use runner::{CheckEvent, CheckSettings, HostChecker};
pub use utils::{Result, ToolkitError};
